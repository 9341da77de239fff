//! Field inclusion, custom field mapping and title precedence.

use pagesift::core::{ComponentPresentation, ContentField, FieldSet, KeywordRef, PresentationId};
use pagesift::SuppressionRegistry;

use crate::common::{comp, ct, keyword, text, SettingsMetadata, Site, DYNAMIC_CT, PLAIN_CT};

#[test]
fn test_managed_field_excluded_when_including_by_default() {
    let mut site = Site::new();
    let template = site.template(60, SettingsMetadata {
        managed: Some("summary"),
        ..Default::default()
    });
    let article = site.component(
        10,
        "Article",
        FieldSet::new()
            .with(text("summary", "Short summary"))
            .with(text("body", "Full body")),
    );
    let page = site.page(100, "Page", &[(article, template)]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "Full body. ");
}

#[test]
fn test_only_managed_fields_when_excluding_by_default() {
    let mut site = Site::new();
    let template = site.template(60, SettingsMetadata {
        include: Some("[exclude]"),
        managed: Some("summary"),
        ..Default::default()
    });
    let article = site.component(
        10,
        "Article",
        FieldSet::new()
            .with(text("summary", "Short summary"))
            .with(text("body", "Full body")),
    );
    let page = site.page(100, "Page", &[(article, template)]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "Short summary. ");
}

#[test]
fn test_keywords_mapped_to_multi_valued_tags() {
    let mut site = Site::new();
    let template = site.template(60, SettingsMetadata {
        field_map: Some("tags+:kw"),
        ..Default::default()
    });
    let article = site.component(
        10,
        "Article",
        FieldSet::new()
            .with(ContentField::keyword(
                "kw",
                [
                    KeywordRef::new(keyword(501), "A"),
                    KeywordRef::new(keyword(502), "B"),
                ],
            ))
            .with(text("body", "Tagged")),
    );
    let page = site.page(100, "Page", &[(article, template)]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.custom_fields["tags"], vec!["501", "502"]);
    assert_eq!(doc.body, "Tagged. ");
}

#[test]
fn test_rich_text_normalized_into_body() {
    let mut site = Site::new();
    let article = site.component(
        10,
        "Article",
        FieldSet::new().with(ContentField::rich_text(
            "content",
            ["<p>Hello</p><div>World</div>"],
        )),
    );
    let page = site.page(100, "Page", &[(article, ct(PLAIN_CT))]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert!(doc.body.starts_with("Hello. World."));
    assert!(!doc.body.contains('<'));
}

#[test]
fn test_single_valued_target_keeps_first_across_presentations() {
    let mut site = Site::new();
    let template = site.template(60, SettingsMetadata {
        field_map: Some("author:byline"),
        ..Default::default()
    });
    let first = site.component(10, "First", FieldSet::new().with(text("byline", "Ada")));
    let second = site.component(11, "Second", FieldSet::new().with(text("byline", "Grace")));
    let page = site.page(100, "Page", &[(first, template), (second, template)]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.custom_fields["author"], vec!["Ada"]);
}

#[test]
fn test_mapped_title_wins_over_page_title() {
    let mut site = Site::new();
    let template = site.template(60, SettingsMetadata {
        field_map: Some("title:heading"),
        ..Default::default()
    });
    let first = site.component(
        10,
        "First",
        FieldSet::new()
            .with(text("heading", "Welcome"))
            .with(text("body", "Intro")),
    );
    let second = site.component(11, "Second", FieldSet::new().with(text("heading", "Later")));
    let page = site.page(100, "Page title", &[(first, template), (second, template)]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.title, "Welcome");
    assert!(!doc.custom_fields.contains_key("title"));
}

#[test]
fn test_component_title_used_without_mapped_title() {
    let mut site = Site::new();
    let article = site.component(10, "Component title", FieldSet::new().with(text("body", "x")));
    let doc = site
        .assembler()
        .build_from_presentation(
            &ComponentPresentation::new(article, ct(DYNAMIC_CT)),
            &SuppressionRegistry::new(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(doc.title, "Component title");
}

#[test]
fn test_embedded_groups_and_metadata_in_order() {
    let mut site = Site::new();
    let article = site.component_with_metadata(
        10,
        "Article",
        FieldSet::new()
            .with(text("intro", "One"))
            .with(ContentField::embedded(
                "sections",
                [
                    FieldSet::new().with(text("para", "Two")),
                    FieldSet::new().with(text("para", "Three")),
                ],
            )),
        FieldSet::new().with(text("description", "Four")),
    );
    let page = site.page(100, "Page", &[(article, ct(PLAIN_CT))]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "One. Two. Three. Four. ");
}

#[test]
fn test_page_metadata_processed_first() {
    let mut site = Site::new();
    let article = site.component(10, "Article", FieldSet::new().with(text("body", "Component")));
    let page = site
        .page(100, "Page", &[(article, ct(PLAIN_CT))])
        .with_metadata(FieldSet::new().with(text("keywords", "Page level")));

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "Page level. Component. ");
}

#[test]
fn test_same_component_twice_on_page_is_processed_twice() {
    // Only followed links are deduplicated; each presentation on the page
    // contributes its own text.
    let mut site = Site::new();
    let article = site.component(10, "Article", FieldSet::new().with(text("body", "Repeat")));
    let page = site.page(100, "Page", &[(article, ct(PLAIN_CT)), (article, ct(DYNAMIC_CT))]);

    let build = site.assembler().build_from_page(&page).unwrap();
    assert_eq!(build.document.unwrap().body, "Repeat. Repeat. ");
    assert_eq!(
        build.embedded,
        vec![
            PresentationId::new(comp(10), ct(PLAIN_CT)),
            PresentationId::new(comp(10), ct(DYNAMIC_CT)),
        ]
    );
}

#[test]
fn test_invalid_target_name_falls_back_to_body() {
    let mut site = Site::new();
    let template = site.template(60, SettingsMetadata {
        field_map: Some("my tag:heading|a></custom><evil:teaser|section:kind"),
        ..Default::default()
    });
    let article = site.component(
        10,
        "Article",
        FieldSet::new()
            .with(text("heading", "Hello"))
            .with(text("kind", "news")),
    );
    let page = site.page(100, "Page", &[(article, template)]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "Hello. ");
    assert_eq!(doc.custom_fields.len(), 1);
    assert_eq!(doc.custom_fields["section"], vec!["news"]);
    assert!(doc.to_xml().ends_with("<custom><section>news</section></custom></indexdata>"));
}
