//! Publish transactions, eligibility and document encodings.

use chrono::{TimeZone, Utc};

use pagesift::content::{embed_index_data, extract_index_data, strip_index_data};
use pagesift::core::{
    Component, ComponentPresentation, Container, ContentField, FieldSet, ItemId, ItemKind,
    PresentationId, Template,
};
use pagesift::index::{ContainerInheritance, IndexingSettings, ItemType};
use pagesift::{DocumentAssembler, PublishTransaction, SearchDocument, SuppressionRegistry};

use crate::common::{comp, ct, schema, sg, text, SettingsMetadata, Site, DYNAMIC_CT, PLAIN_CT, PUB};

fn no_index() -> FieldSet {
    FieldSet::new().with(text("NoIndex", "yes"))
}

#[test]
fn test_page_then_standalone_presentation_is_suppressed() {
    let mut site = Site::new();
    let news = site.component(10, "News", FieldSet::new().with(text("body", "Breaking news")));
    let page = site.page(100, "Home", &[(news, ct(DYNAMIC_CT))]);
    let assembler = site.assembler();
    let mut tx = PublishTransaction::new();

    let page_doc = tx.index_page(&assembler, &page).unwrap().unwrap();
    assert_eq!(page_doc.body, "Breaking news. ");
    let cp = ComponentPresentation::new(news, ct(DYNAMIC_CT));
    assert!(tx.index_presentation(&assembler, &cp).unwrap().is_none());

    // A fresh transaction indexes the presentation on its own.
    let standalone = PublishTransaction::new()
        .index_presentation(&assembler, &cp)
        .unwrap()
        .unwrap();
    assert_eq!(standalone.item_type, ItemType::Component);
    assert_eq!(standalone.url, format!("tcm:{PUB}-10"));
}

#[test]
fn test_static_presentation_added_to_registry() {
    let mut site = Site::new();
    let news = site.component(10, "News", FieldSet::new().with(text("body", "Static")));
    let page = site.page(100, "Home", &[(news, ct(PLAIN_CT)), (news, ct(PLAIN_CT))]);
    let mut tx = PublishTransaction::new();

    tx.index_page(&site.assembler(), &page).unwrap();
    assert_eq!(tx.registry().len(), 1);
    assert!(
        tx.registry()
            .contains(&PresentationId::new(news, ct(PLAIN_CT)))
    );
}

#[test]
fn test_non_publishable_presentation_not_indexed_twice() {
    let mut site = Site::new();
    site.repo.add_template(Template::new(ct(70), "Static"));
    let news = site.component(10, "News", FieldSet::new().with(text("body", "Indexed once")));
    let page = site.page(100, "Home", &[(news, ct(70))]);
    let assembler = site.assembler();
    let cp = ComponentPresentation::new(news, ct(70));

    let build = assembler.build_from_page(&page).unwrap();
    assert_eq!(build.document.unwrap().body, "Indexed once. ");
    let registry: SuppressionRegistry = build.embedded.into_iter().collect();
    assert!(assembler.build_from_presentation(&cp, &registry).unwrap().is_none());

    let mut tx = PublishTransaction::new();
    tx.index_page(&assembler, &page).unwrap();
    assert!(tx.index_presentation(&assembler, &cp).unwrap().is_none());
}

#[test]
fn test_presentation_in_no_index_folder_chain() {
    let mut site = Site::new();
    let folder = |item| ItemId::new(PUB, item, ItemKind::Folder);
    site.repo.add_container(Container::new(folder(30), "Archive").with_metadata(no_index()));
    site.repo
        .add_container(Container::new(folder(31), "2019").with_parent(folder(30)));
    let old = comp(12);
    site.repo.add_component(
        Component::new(old, "Old news", schema())
            .with_content(FieldSet::new().with(text("body", "Old news")))
            .in_container(folder(31)),
    );
    let cp = ComponentPresentation::new(old, ct(DYNAMIC_CT));

    let recursive = site.assembler();
    assert!(
        recursive
            .build_from_presentation(&cp, &SuppressionRegistry::new())
            .unwrap()
            .is_none()
    );

    let direct = site
        .assembler()
        .with_container_inheritance(ContainerInheritance::Direct);
    let doc = direct
        .build_from_presentation(&cp, &SuppressionRegistry::new())
        .unwrap()
        .unwrap();
    assert_eq!(doc.body, "Old news. ");
}

#[test]
fn test_no_index_page_yields_nothing() {
    let mut site = Site::new();
    let news = site.component(10, "News", FieldSet::new().with(text("body", "Hidden")));
    let page = site
        .page(100, "Home", &[(news, ct(DYNAMIC_CT))])
        .with_metadata(no_index());

    let build = site.assembler().build_from_page(&page).unwrap();
    assert!(build.document.is_none());
    assert!(build.embedded.is_empty());
}

#[test]
fn test_no_index_component_skipped_on_page_and_standalone() {
    let mut site = Site::new();
    let hidden = site.component_with_metadata(
        10,
        "Hidden",
        FieldSet::new().with(text("body", "Secret")),
        no_index(),
    );
    let visible = site.component(11, "Visible", FieldSet::new().with(text("body", "Public")));
    let page = site.page(100, "Home", &[(hidden, ct(PLAIN_CT)), (visible, ct(PLAIN_CT))]);
    let assembler = site.assembler();

    let doc = assembler.build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "Public. ");

    let standalone = assembler
        .build_from_presentation(
            &ComponentPresentation::new(hidden, ct(DYNAMIC_CT)),
            &SuppressionRegistry::new(),
        )
        .unwrap();
    assert!(standalone.is_none());
}

#[test]
fn test_no_index_template_skips_presentation() {
    let mut site = Site::new();
    site.repo.add_template(Template::new(ct(70), "Navigation").with_metadata(no_index()));
    let nav = site.component(10, "Nav", FieldSet::new().with(text("links", "Home About")));
    let body = site.component(11, "Body", FieldSet::new().with(text("body", "Content")));
    let page = site.page(100, "Home", &[(nav, ct(70)), (body, ct(PLAIN_CT))]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "Content. ");
    // The schema still comes from the first presentation.
    assert_eq!(doc.schema_id, 8);
}

#[test]
fn test_missing_component_is_fatal() {
    let site = Site::new();
    let page = site.page(100, "Home", &[(comp(404), ct(PLAIN_CT))]);
    let err = site.assembler().build_from_page(&page).unwrap_err();
    assert!(err.is_missing());
    assert!(err.to_string().contains("component"));
}

#[test]
fn test_structural_fields() {
    let mut site = Site::new();
    let news = site.component(10, "News", FieldSet::new().with(text("body", "Text")));
    let page = site.page(100, "Home", &[(news, ct(PLAIN_CT))]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.url, "/section/page-100.html");
    assert_eq!(doc.publication_id, PUB);
    assert_eq!(doc.item_type, ItemType::Page);
    assert_eq!(doc.parent_container_id, Some(sg(2).item));
    assert_eq!(doc.container_ancestry, vec![2, 1]);
    assert_eq!(sg(1).kind, ItemKind::StructureGroup);
}

#[test]
fn test_repeated_builds_are_identical() {
    let mut site = Site::new();
    let template = site.template(60, SettingsMetadata {
        field_map: Some("title:heading|tags+:kw|date:published"),
        ..Default::default()
    });
    let news = site.component(
        10,
        "News",
        FieldSet::new()
            .with(text("heading", "Headline"))
            .with(ContentField::text("kw", ["a", "b"]))
            .with(ContentField::date(
                "published",
                [Utc.with_ymd_and_hms(2023, 12, 24, 18, 0, 0).unwrap()],
            ))
            .with(ContentField::rich_text("body", ["<p>Some &amp; more</p>"])),
    );
    let page = site.page(100, "Home", &[(news, template)]);
    let assembler = site.assembler();

    let first = assembler.build_from_page(&page).unwrap().document.unwrap();
    let second = assembler.build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(first.to_xml(), second.to_xml());
    assert_eq!(first.custom_fields["date"], vec!["2023-12-24T18:00:00Z"]);
    assert_eq!(first.body, "Some & more. ");
}

#[test]
fn test_document_travels_through_rendered_output() {
    let mut site = Site::new();
    let news = site.component(10, "News", FieldSet::new().with(text("body", "Fish & chips")));
    let page = site.page(100, "Menu", &[(news, ct(PLAIN_CT))]);
    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();

    let rendered = embed_index_data("<html><body>Menu</body></html>", &doc.to_xml());
    let payload = extract_index_data(&rendered).unwrap();
    assert!(payload.contains("<body>Fish &amp; chips. </body>"));
    assert_eq!(strip_index_data(&rendered), "<html><body>Menu</body></html>");

    let json = doc.to_json().unwrap();
    assert_eq!(SearchDocument::from_json(&json).unwrap(), doc);
}

#[test]
fn test_host_can_add_custom_values() {
    let mut site = Site::new();
    let news = site.component(10, "News", FieldSet::new().with(text("body", "Text")));
    let page = site.page(100, "Home", &[(news, ct(PLAIN_CT))]);
    let mut doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();

    doc.set_custom_field("section", "news");
    assert!(doc.to_xml().contains("<custom><section>news</section></custom>"));
}

#[test]
fn test_priority_threshold_from_defaults() {
    let mut site = Site::new();
    let news = site.component(10, "News", FieldSet::new().with(text("body", "Dynamic")));
    let cp = ComponentPresentation::new(news, ct(DYNAMIC_CT));
    let strict = DocumentAssembler::new(
        &site.repo,
        IndexingSettings {
            min_template_priority: Some(500),
            ..IndexingSettings::process_default()
        },
    );
    assert!(strict
        .build_from_presentation(&cp, &SuppressionRegistry::new())
        .unwrap()
        .is_none());
}
