use camino::Utf8PathBuf;
use navglot::{NavItem, Navbar, NavbarConfig, load_structure};
use navglot_common::dom::{MemoryDom, NodeId, Platform};
use navglot_common::i18n::LocaleRegistry;

pub const LOCATION: &str = "https://example.test/";

pub fn fixture_path(name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn registry() -> LocaleRegistry {
    LocaleRegistry::load(&fixture_path("locales.json"), "en")
        .unwrap_or_else(|error| panic!("fixture packs should load: {error}"))
}

pub fn structure() -> Vec<NavItem> {
    load_structure(&fixture_path("navbar.json"))
        .unwrap_or_else(|error| panic!("fixture structure should load: {error}"))
}

/// The configuration of the reference page.
pub fn config() -> NavbarConfig {
    NavbarConfig::from_json_str(
        r##"{
            "container": "#navbar",
            "languages": "#languages",
            "language_page": "index.html?x=y#ignored",
            "language_query": "l",
            "my_url": "http://localhost"
        }"##,
    )
    .unwrap_or_else(|error| panic!("fixture configuration should parse: {error}"))
}

pub fn page() -> MemoryDom {
    let mut dom = MemoryDom::with_location(LOCATION)
        .unwrap_or_else(|error| panic!("fixture location should parse: {error}"));
    let body = dom.body();
    dom.set_inner_html(body, r#"<div id="navbar"></div>"#);
    dom
}

pub fn navbar(config: NavbarConfig) -> Navbar {
    Navbar::new(config, registry())
}

/// First element matching `selector` anywhere in the document.
pub fn find(dom: &MemoryDom, selector: &str) -> NodeId {
    dom.select(dom.document_element(), selector)
        .unwrap_or_else(|| panic!("no element matches `{selector}`"))
}

pub fn attr(dom: &MemoryDom, selector: &str, name: &str) -> Option<String> {
    dom.attribute(find(dom, selector), name)
}
