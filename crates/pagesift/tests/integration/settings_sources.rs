//! Process-level defaults from configuration, overridden per template.

use std::io::Write;

use pagesift::core::{Container, ContentField, FieldSet};
use pagesift::index::ContainerInheritance;
use pagesift::{DocumentAssembler, PagesiftConfig, PublishTransaction};

use crate::common::{ct, sg, text, SettingsMetadata, Site, PLAIN_CT};

const CONFIG: &str = r#"
[indexing]
include = "[exclude]"
managed_fields = "body"
custom_field_map = "title:heading"

[eligibility]
container_inheritance = "direct"
index_session_preview = false
"#;

fn load_config() -> PagesiftConfig {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    PagesiftConfig::load(Some(file.path())).unwrap()
}

fn article_fields() -> FieldSet {
    FieldSet::new()
        .with(text("heading", "Configured title"))
        .with(text("body", "Body text"))
        .with(text("sidebar", "Sidebar text"))
}

#[test]
fn test_defaults_from_config_file() {
    let config = load_config();
    let mut site = Site::new();
    let article = site.component(10, "Article", article_fields());
    let page = site.page(100, "Page", &[(article, ct(PLAIN_CT))]);

    let assembler = DocumentAssembler::from_config(&site.repo, &config);
    let doc = assembler.build_from_page(&page).unwrap().document.unwrap();
    assert_eq!(doc.title, "Configured title");
    assert_eq!(doc.body, "Body text. ");
}

#[test]
fn test_template_settings_override_defaults() {
    let config = load_config();
    let mut site = Site::new();
    let template = site.template(60, SettingsMetadata {
        include: Some("[include]"),
        ..Default::default()
    });
    let article = site.component(10, "Article", article_fields());
    let page = site.page(100, "Page", &[(article, template)]);

    let assembler = DocumentAssembler::from_config(&site.repo, &config);
    let doc = assembler.build_from_page(&page).unwrap().document.unwrap();
    // Own policy, no own managed list: everything not mapped is included.
    assert_eq!(doc.title, "Configured title");
    assert_eq!(doc.body, "Body text. Sidebar text. ");
}

#[test]
fn test_direct_container_inheritance_from_config() {
    let config = load_config();
    assert_eq!(
        config.eligibility.container_inheritance,
        ContainerInheritance::Direct
    );

    let mut site = Site::new();
    site.repo.add_container(
        Container::new(sg(1), "Root")
            .with_metadata(FieldSet::new().with(ContentField::text("NoIndex", ["yes"]))),
    );
    let article = site.component(10, "Article", article_fields());
    let page = site.page(100, "Page", &[(article, ct(PLAIN_CT))]);

    let direct = DocumentAssembler::from_config(&site.repo, &config);
    assert!(direct.build_from_page(&page).unwrap().document.is_some());

    let recursive = site.assembler();
    assert!(recursive.build_from_page(&page).unwrap().document.is_none());
}

#[test]
fn test_session_preview_from_config() {
    let config = load_config();
    let mut site = Site::new();
    let article = site.component(10, "Article", article_fields());
    let page = site.page(100, "Page", &[(article, ct(PLAIN_CT))]);
    let assembler = DocumentAssembler::from_config(&site.repo, &config);

    let mut preview = PublishTransaction::from_config(&config).with_session_preview(true);
    assert!(preview.index_page(&assembler, &page).unwrap().is_none());

    let mut publish = PublishTransaction::from_config(&config);
    assert!(publish.index_page(&assembler, &page).unwrap().is_some());
}

#[test]
fn test_missing_config_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = PagesiftConfig::load(Some(dir.path().join("pagesift.toml").as_path())).unwrap();
    assert_eq!(config, PagesiftConfig::default());
}
