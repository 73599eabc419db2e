//! End-to-end coverage for filling the reference navbar page.

use std::cell::RefCell;
use std::rc::Rc;

use navglot::NavbarConfig;
use navglot_common::dom::{Event, EventTarget, MemoryDom, Platform, listener};
use rstest::rstest;
use serde_json::{Value, json};

mod support;
use support::page::{attr, config, find, navbar, page, structure};

fn filled() -> (MemoryDom, navglot::Navbar) {
    let mut dom = page();
    let mut nav = navbar(config());
    nav.fill(&mut dom, &structure());
    (dom, nav)
}

#[rstest]
fn renders_the_brand() {
    let (dom, _) = filled();

    assert_eq!(attr(&dom, ".navbar-brand a.navbar-item", "href").as_deref(), Some("http://localhost"));
    assert_eq!(attr(&dom, ".navbar-brand a.navbar-item", "title").as_deref(), Some("Page"));
    assert_eq!(attr(&dom, ".navbar-brand a.navbar-item img", "src").as_deref(), Some("logo.svg"));
    assert_eq!(attr(&dom, ".navbar-brand a.navbar-item img", "alt").as_deref(), Some("Brand"));
    assert_eq!(attr(&dom, ".navbar-brand a.navbar-item img", "width").as_deref(), Some("28"));
    assert_eq!(attr(&dom, ".navbar-brand a.navbar-item img", "height").as_deref(), Some("28"));

    let burger = find(&dom, ".navbar-brand .navbar-burger");
    assert_eq!(dom.attribute(burger, "data-target").as_deref(), Some("menu-content"));
    assert_eq!(dom.select_all(burger, "span").len(), 3);

    assert_eq!(attr(&dom, ".navbar-fullscreen", "title").as_deref(), Some("Full screen"));
    assert_eq!(
        attr(&dom, ".navbar-fullscreen .icon i", "class").as_deref(),
        Some("fas fa-arrows-alt")
    );
}

#[rstest]
fn renders_the_content_dropdown() {
    let (dom, _) = filled();

    assert_eq!(attr(&dom, ".navbar-menu", "id").as_deref(), Some("menu-content"));
    let item = find(&dom, ".navbar-menu .navbar-start .navbar-item");
    assert!(dom.has_class(item, "has-dropdown"));

    let link = dom
        .select(item, ".navbar-link")
        .unwrap_or_else(|| panic!("dropdown link should exist"));
    assert_eq!(
        dom.attribute(link, "href").as_deref(),
        Some("http://localhost/content?prop=value&message=Message content")
    );
    assert_eq!(dom.text(link).trim(), "Contents");

    let items = dom.select_all(item, ".navbar-dropdown a.navbar-item");
    let [one, two] = items.as_slice() else {
        panic!("expected two dropdown items, got {items:?}");
    };
    assert_eq!(dom.attribute(*one, "href").as_deref(), Some("one"));
    assert_eq!(dom.text(*one), "One");
    assert_eq!(
        dom.select(*one, ".icon i").and_then(|icon| dom.attribute(icon, "class")).as_deref(),
        Some("timeline-icon")
    );
    assert_eq!(dom.attribute(*two, "href").as_deref(), Some("two"));
    assert_eq!(dom.text(*two), "Two");
    assert_eq!(
        dom.select(*two, ".icon i").and_then(|icon| dom.attribute(icon, "class")).as_deref(),
        Some("far fa-circle")
    );
    let divider = dom
        .select(item, ".navbar-dropdown hr")
        .unwrap_or_else(|| panic!("divider should exist"));
    assert!(dom.has_class(divider, "navbar-divider"));
}

#[rstest]
fn renders_the_language_switcher() {
    let (dom, _) = filled();

    let languages = find(&dom, ".navbar-end > .navbar-item.has-dropdown");
    let back = dom
        .select(languages, ".navbar-link")
        .unwrap_or_else(|| panic!("back link should exist"));
    assert_eq!(dom.attribute(back, "href"), None);
    assert_eq!(dom.attribute(back, "title").as_deref(), Some("Return to default language"));
    assert_eq!(
        dom.select(back, ".icon i").and_then(|icon| dom.attribute(icon, "class")).as_deref(),
        Some("fas fa-language fa-xs")
    );

    assert_eq!(dom.select_all(languages, "#languages > ul > li").len(), 2);
    let active = dom.select_all(languages, "#languages a.is-active");
    let [active] = active.as_slice() else {
        panic!("expected one active link, got {active:?}");
    };
    assert!(dom.has_class(*active, "navbar-item"));
    assert_eq!(
        dom.attribute(*active, "href").as_deref(),
        Some("https://example.test/index.html?x=y&l=en")
    );
    assert_eq!(dom.attribute(*active, "hreflang").as_deref(), Some("en"));
    assert_eq!(dom.text(*active), "English");

    let inactive = find(&dom, "#languages a[hreflang=nl]");
    assert!(dom.has_class(inactive, "navbar-item"));
    assert!(!dom.has_class(inactive, "is-active"));
    assert_eq!(
        dom.attribute(inactive, "href").as_deref(),
        Some("https://example.test/index.html?x=y&l=nl")
    );
    assert_eq!(dom.text(inactive), "Nederlands");

    assert_eq!(
        attr(&dom, "head link[rel=canonical]", "href").as_deref(),
        Some("https://example.test/index.html?x=y")
    );
    assert_eq!(dom.select_all(dom.document_element(), "head link[rel=alternate]").len(), 2);
}

#[rstest]
fn renders_the_end_link() {
    let (dom, _) = filled();

    let end = find(&dom, ".navbar-end > a.navbar-item");
    assert_eq!(dom.attribute(end, "href").as_deref(), Some("https://example.com"));
    assert_eq!(dom.attribute(end, "title").as_deref(), Some("Example"));
    let image = dom
        .select(end, "img")
        .unwrap_or_else(|| panic!("end image should exist"));
    assert_eq!(
        dom.attribute(image, "src").as_deref(),
        Some("http://localhost/example-en.svg")
    );
    assert_eq!(dom.attribute(image, "width").as_deref(), Some("50"));
    assert_eq!(dom.attribute(image, "height").as_deref(), Some("24"));
}

#[rstest]
fn hash_changes_refresh_language_links() {
    let (mut dom, _) = filled();

    dom.set_location_hash("#abc");

    assert_eq!(attr(&dom, ".navbar-end .navbar-link", "href"), None);
    assert_eq!(
        attr(&dom, "#languages a[hreflang=en]", "href").as_deref(),
        Some("https://example.test/index.html?x=y&l=en#abc")
    );
    assert_eq!(
        attr(&dom, "#languages a[hreflang=nl]", "href").as_deref(),
        Some("https://example.test/index.html?x=y&l=nl#abc")
    );
    assert_eq!(
        attr(&dom, "head link[rel=canonical]", "href").as_deref(),
        Some("https://example.test/index.html?x=y")
    );
}

#[rstest]
fn initial_hash_is_carried_into_links() {
    let mut dom = page();
    dom.set_location_hash("#content");
    let mut nav = navbar(config());

    nav.fill(&mut dom, &structure());

    assert_eq!(
        attr(&dom, "#languages a[hreflang=nl]", "href").as_deref(),
        Some("https://example.test/index.html?x=y&l=nl#content")
    );
}

#[rstest]
fn invalid_types_leave_the_container_empty() {
    let mut dom = page();
    let config = NavbarConfig::from_json_str(r##"{"container": "#navbar"}"##)
        .unwrap_or_else(|error| panic!("configuration should parse: {error}"));
    let mut nav = navbar(config);
    let structure = navglot::parse_structure(r#"[{"type": "invalid"}]"#)
        .unwrap_or_else(|error| panic!("structure should parse: {error}"));

    nav.fill(&mut dom, &structure);

    assert_eq!(dom.inner_html(find(&dom, "#navbar")), "");
}

#[rstest]
fn burger_clicks_toggle_the_menu() {
    let (mut dom, _) = filled();
    let burger = find(&dom, ".navbar-burger");
    let menu = find(&dom, "#menu-content");

    dom.click(burger);
    assert!(dom.has_class(burger, "is-active"));
    assert!(dom.has_class(menu, "is-active"));
    assert_eq!(dom.attribute(burger, "aria-expanded").as_deref(), Some("true"));

    dom.click(burger);
    assert!(!dom.has_class(burger, "is-active"));
    assert!(!dom.has_class(menu, "is-active"));
    assert_eq!(dom.attribute(burger, "aria-expanded").as_deref(), Some("false"));
}

#[rstest]
#[case(r#"[{"type": "burger", "target": "missing"}]"#)]
#[case(r#"[{"type": "burger"}]"#)]
fn burgers_without_a_target_toggle_themselves(#[case] source: &str) {
    let mut dom = page();
    let mut nav = navbar(config());
    let structure = navglot::parse_structure(source)
        .unwrap_or_else(|error| panic!("structure should parse: {error}"));
    nav.fill(&mut dom, &structure);
    let burger = find(&dom, ".navbar-burger");

    dom.click(burger);
    assert!(dom.has_class(burger, "is-active"));
    assert_eq!(dom.attribute(burger, "aria-expanded").as_deref(), Some("true"));

    dom.click(burger);
    assert!(!dom.has_class(burger, "is-active"));
    assert_eq!(dom.attribute(burger, "aria-expanded").as_deref(), Some("false"));
}

#[rstest]
fn fullscreen_state_follows_platform_notifications() {
    let mut dom = page();
    dom.support_fullscreen_methods(["webkitRequestFullScreen", "webkitCancelFullScreen"]);
    let mut nav = navbar(config());
    nav.fill(&mut dom, &structure());

    let container = find(&dom, "#navbar");
    let seen: Rc<RefCell<Vec<Value>>> = Rc::default();
    let sink = Rc::clone(&seen);
    dom.listen(
        EventTarget::Node(container),
        "fullscreen",
        listener(move |_, event| sink.borrow_mut().extend(event.detail().cloned())),
    );
    let toggle = find(&dom, ".navbar-fullscreen");

    dom.click(toggle);
    assert_eq!(dom.fullscreen_calls(), ["webkitRequestFullScreen"]);
    assert!(!dom.has_class(toggle, "is-active"));

    dom.set_fullscreen_flag("webkitIsFullScreen", true);
    dom.dispatch(Event::new("webkitfullscreenchange", EventTarget::Document));
    assert!(dom.has_class(toggle, "is-active"));

    dom.click(toggle);
    assert_eq!(
        dom.fullscreen_calls(),
        ["webkitRequestFullScreen", "webkitCancelFullScreen"]
    );
    assert!(dom.has_class(toggle, "is-active"));

    dom.set_fullscreen_flag("webkitIsFullScreen", false);
    dom.dispatch(Event::new("webkitfullscreenchange", EventTarget::Document));
    assert!(!dom.has_class(toggle, "is-active"));

    assert_eq!(
        *seen.borrow(),
        [json!({"isFullscreen": true}), json!({"isFullscreen": false})]
    );
}

#[rstest]
fn set_fullscreen_marks_toggles_and_notifies() {
    let (mut dom, nav) = filled();
    let container = find(&dom, "#navbar");
    let seen: Rc<RefCell<Vec<Value>>> = Rc::default();
    let sink = Rc::clone(&seen);
    dom.listen(
        EventTarget::Node(container),
        "fullscreen",
        listener(move |_, event| sink.borrow_mut().extend(event.detail().cloned())),
    );

    nav.set_fullscreen(&mut dom, true);
    assert!(dom.has_class(find(&dom, ".navbar-fullscreen"), "is-active"));
    nav.set_fullscreen(&mut dom, false);
    assert!(!dom.has_class(find(&dom, ".navbar-fullscreen"), "is-active"));

    assert_eq!(
        *seen.borrow(),
        [json!({"isFullscreen": true}), json!({"isFullscreen": false})]
    );
}

#[rstest]
fn refilling_replaces_global_listeners() {
    let (mut dom, mut nav) = filled();

    nav.fill(&mut dom, &structure());
    nav.fill(&mut dom, &structure());

    assert_eq!(dom.listener_count(EventTarget::Window, "hashchange"), 1);
    for event in ["fullscreenchange", "mozfullscreenchange", "webkitfullscreenchange", "msfullscreenchange"] {
        assert_eq!(dom.listener_count(EventTarget::Document, event), 1, "{event}");
    }
    let burger = find(&dom, ".navbar-burger");
    assert_eq!(dom.listener_count(EventTarget::Node(burger), "click"), 1);

    dom.set_location_hash("#again");
    assert_eq!(
        attr(&dom, "#languages a[hreflang=en]", "href").as_deref(),
        Some("https://example.test/index.html?x=y&l=en#again")
    );
}

#[rstest]
fn refilling_after_selecting_a_language() {
    let (mut dom, mut nav) = filled();

    nav.locales_mut().select("nl");
    nav.fill(&mut dom, &structure());

    assert_eq!(attr(&dom, ".navbar-brand a.navbar-item", "title").as_deref(), Some("Pagina"));
    assert_eq!(
        attr(&dom, ".navbar-start .navbar-link", "href").as_deref(),
        Some("http://localhost/content?prop=value&message=Berichtinhoud")
    );
    assert_eq!(
        attr(&dom, ".navbar-end > a.navbar-item img", "src").as_deref(),
        Some("http://localhost/example-nl.svg")
    );
    assert_eq!(
        attr(&dom, "#languages a.is-active", "hreflang").as_deref(),
        Some("nl")
    );
}

#[rstest]
#[case("", "", "https://example.test/?l=en")]
#[case("https://other.test/app/", "", "https://other.test/app/?l=en")]
#[case("https://other.test/app/", "page.html?l=nl&y=1", "https://other.test/app/page.html?y=1&l=en")]
#[case("", "/root.html#x", "https://example.test/root.html?l=en")]
fn language_pages_resolve_against_the_base(
    #[case] base_url: &str,
    #[case] language_page: &str,
    #[case] expected: &str,
) {
    let mut dom = page();
    let config = NavbarConfig {
        base_url: base_url.to_owned(),
        language_page: language_page.to_owned(),
        ..config()
    };
    let mut nav = navbar(config);

    nav.fill(&mut dom, &structure());

    assert_eq!(attr(&dom, "#languages a[hreflang=en]", "href").as_deref(), Some(expected));
}

#[rstest]
fn missing_language_panel_skips_the_switcher() {
    let mut dom = page();
    let config = NavbarConfig {
        languages: Some(String::from("#absent")),
        ..config()
    };
    let mut nav = navbar(config);

    nav.fill(&mut dom, &structure());

    assert!(dom.select_all(dom.document_element(), "#languages li").is_empty());
    assert_eq!(dom.listener_count(EventTarget::Window, "hashchange"), 0);
    assert!(dom.select(dom.document_element(), ".navbar-burger").is_some());
}

#[rstest]
fn missing_container_renders_nothing() {
    let mut dom = page();
    let config = NavbarConfig {
        container: String::from("#elsewhere"),
        ..config()
    };
    let mut nav = navbar(config);

    nav.fill(&mut dom, &structure());

    assert_eq!(dom.inner_html(find(&dom, "#navbar")), "");
    assert_eq!(dom.listener_count(EventTarget::Document, "fullscreenchange"), 0);
}
