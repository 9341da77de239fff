//! Following component links into the linking document.

use pagesift::core::{ComponentPresentation, ContentField, FieldSet};
use pagesift::index::{IndexingSettings, UnresolvedLinks};
use pagesift::{DocumentAssembler, SuppressionRegistry};

use crate::common::{comp, ct, text, SettingsMetadata, Site, PLAIN_CT};

fn link(name: &str, targets: &[u32]) -> ContentField {
    ContentField::component_link(name, targets.iter().map(|&t| comp(t)))
}

fn following(site: &mut Site, item: u32) -> pagesift::core::ItemId {
    site.template(item, SettingsMetadata {
        links: Some("related"),
        ..Default::default()
    })
}

#[test]
fn test_linked_component_folded_into_page() {
    let mut site = Site::new();
    let template = following(&mut site, 60);
    site.component(
        20,
        "Author bio",
        FieldSet::new().with(text("bio", "Writes about Rust")),
    );
    let article = site.component(
        10,
        "Article",
        FieldSet::new()
            .with(text("body", "Article body"))
            .with(link("related", &[20])),
    );
    let page = site.page(100, "Page", &[(article, template)]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "Article body. Writes about Rust. ");
}

#[test]
fn test_self_link_traversed_once() {
    let mut site = Site::new();
    let template = following(&mut site, 60);
    let article = site.component(
        10,
        "Article",
        FieldSet::new()
            .with(text("body", "Loop"))
            .with(link("related", &[10])),
    );
    let page = site.page(100, "Page", &[(article, template)]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "Loop. ");
}

#[test]
fn test_transitive_cycle_terminates() {
    let mut site = Site::new();
    let template = following(&mut site, 60);
    site.component(
        20,
        "B",
        FieldSet::new().with(text("body", "B")).with(link("related", &[21])),
    );
    site.component(
        21,
        "C",
        FieldSet::new().with(text("body", "C")).with(link("related", &[10, 20])),
    );
    let article = site.component(
        10,
        "A",
        FieldSet::new().with(text("body", "A")).with(link("related", &[20])),
    );

    let doc = site
        .assembler()
        .build_from_presentation(
            &ComponentPresentation::new(article, template),
            &SuppressionRegistry::new(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(doc.body, "A. B. C. ");
}

#[test]
fn test_component_already_on_page_not_embedded_again() {
    let mut site = Site::new();
    let template = following(&mut site, 60);
    let teaser = site.component(20, "Teaser", FieldSet::new().with(text("body", "Teaser")));
    let article = site.component(
        10,
        "Article",
        FieldSet::new()
            .with(text("body", "Article"))
            .with(link("related", &[20])),
    );
    let page = site.page(100, "Page", &[(teaser, ct(PLAIN_CT)), (article, template)]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "Teaser. Article. ");
}

#[test]
fn test_linked_ids_recorded_when_mapped() {
    let mut site = Site::new();
    let template = site.template(60, SettingsMetadata {
        field_map: Some("related+:related"),
        links: Some("related"),
        ..Default::default()
    });
    site.component(20, "One", FieldSet::new().with(text("body", "One")));
    site.component(21, "Two", FieldSet::new().with(text("body", "Two")));
    let article = site.component(10, "Article", FieldSet::new().with(link("related", &[20, 21])));
    let page = site.page(100, "Page", &[(article, template)]);

    let doc = site.assembler().build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.custom_fields["related"], vec!["20", "21"]);
    assert_eq!(doc.body, "One. Two. ");
}

#[test]
fn test_unresolved_link_policy() {
    let mut site = Site::new();
    let template = following(&mut site, 60);
    let article = site.component(
        10,
        "Article",
        FieldSet::new()
            .with(text("body", "Article"))
            .with(link("related", &[404])),
    );
    let page = site.page(100, "Page", &[(article, template)]);

    let err = site.assembler().build_from_page(&page).unwrap_err();
    assert!(err.is_missing());

    let lenient = DocumentAssembler::new(&site.repo, IndexingSettings::process_default())
        .with_unresolved_links(UnresolvedLinks::Skip);
    let doc = lenient.build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.body, "Article. ");
}
