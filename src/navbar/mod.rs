//! Navbar rendering and live behaviour.
//!
//! [`Navbar::fill`] renders a structure into the configured container, then
//! wires the page: the language switcher and its hash-change refresh, the
//! burger toggles, and the fullscreen toggles with their platform change
//! events. Listeners on the window and document are tracked and replaced on
//! every fill; listeners on rendered elements go away with the markup they
//! were attached to.

use log::{debug, warn};
use navglot_common::dom::{EventTarget, ListenerId, NodeId, Platform, listener};
use navglot_common::i18n::{
    ActiveTarget, LocaleRegistry, NavigationRequest, separator_for, strip_language,
};
use url::Url;

use crate::config::NavbarConfig;

mod fullscreen;
pub mod node;
mod render;

use fullscreen::ACTIVE_CLASS;
pub use fullscreen::{
    CHANGE_EVENTS, EXIT_METHODS, FULLSCREEN_EVENT, FullscreenApi, REQUEST_METHODS,
};
pub use node::{LinkTarget, LocaleText, NavItem, NavNode, load_structure, parse_structure};

/// A navbar bound to its configuration and language packs.
#[derive(Debug)]
pub struct Navbar {
    config: NavbarConfig,
    locales: LocaleRegistry,
    listeners: Vec<ListenerId>,
}

impl Navbar {
    /// Create a navbar; nothing is rendered until [`Self::fill`].
    #[must_use]
    pub const fn new(config: NavbarConfig, locales: LocaleRegistry) -> Self {
        Self {
            config,
            locales,
            listeners: Vec::new(),
        }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &NavbarConfig {
        &self.config
    }

    /// The language packs in use.
    #[must_use]
    pub const fn locales(&self) -> &LocaleRegistry {
        &self.locales
    }

    /// Mutable access to the language packs, for example to select another
    /// language before filling again.
    pub const fn locales_mut(&mut self) -> &mut LocaleRegistry {
        &mut self.locales
    }

    /// Render `structure` into the container and wire its behaviour.
    ///
    /// Replaces the container's content. When a language switcher selector
    /// is configured and found, it is populated with one link per language
    /// and kept in sync with the location hash. Calling `fill` again first
    /// detaches the window and document listeners of the previous call.
    pub fn fill(&mut self, dom: &mut dyn Platform, structure: &[NavItem]) {
        for id in self.listeners.drain(..) {
            dom.unlisten(id);
        }

        let Some(container) = self.container(dom) else {
            warn!(
                target: "navglot::navbar",
                "navbar container `{}` not found",
                self.config.container
            );
            return;
        };
        let markup = self.build(structure);
        dom.set_inner_html(container, &markup);

        self.attach_languages(dom, container);
        set_burger_trigger(dom, container);
        self.set_fullscreen_trigger(dom, container);
    }

    /// Mark the fullscreen toggles and dispatch a `fullscreen` event on the
    /// container carrying `{"isFullscreen": is_fullscreen}`.
    pub fn set_fullscreen(&self, dom: &mut dyn Platform, is_fullscreen: bool) {
        if let Some(container) = self.container(dom) {
            fullscreen::apply_fullscreen(dom, container, is_fullscreen);
        }
    }

    fn container(&self, dom: &dyn Platform) -> Option<NodeId> {
        dom.select(dom.document_element(), &self.config.container)
    }

    /// The page language links point at: `language_page` resolved against
    /// `base_url` (or the current location) without the language parameter
    /// and hash.
    fn canonical_url(&self, dom: &dyn Platform) -> Result<Url, url::ParseError> {
        let base = if self.config.base_url.is_empty() {
            dom.location()
        } else {
            self.config.base_url.clone()
        };
        let mut canonical = Url::parse(&base)?.join(&self.config.language_page)?;
        strip_language(&mut canonical, &self.config.language_query);
        Ok(canonical)
    }

    fn attach_languages(&mut self, dom: &mut dyn Platform, container: NodeId) {
        let Some(selector) = self.config.languages() else {
            return;
        };
        let Some(panel) = dom.select(container, selector) else {
            debug!(
                target: "navglot::navbar",
                "language switcher `{selector}` not found in navbar"
            );
            return;
        };
        self.fill_languages(dom, panel);
    }

    fn fill_languages(&mut self, dom: &mut dyn Platform, panel: NodeId) {
        let Ok(canonical) = self.canonical_url(dom).inspect_err(|error| {
            warn!(
                target: "navglot::navbar",
                "skipping language navigation for page `{}`: {error}",
                self.config.language_page
            );
        }) else {
            return;
        };
        let query = self.config.language_query.clone();
        let hash = dom.location_hash();
        let request = NavigationRequest::new(canonical.as_str())
            .with_query(&query)
            .with_active(ActiveTarget::Link)
            .with_classes("navbar-item")
            .with_hash(&hash);
        self.locales.generate_navigation(dom, panel, &request);

        let separator = separator_for(&canonical);
        let page = String::from(canonical);
        let id = dom.listen(
            EventTarget::Window,
            "hashchange",
            listener(move |host, _| {
                let links = host.select_all(panel, "a");
                let current_hash = host.location_hash();
                LocaleRegistry::update_navigation_links(
                    host,
                    &links,
                    &page,
                    &query,
                    &current_hash,
                    separator,
                );
            }),
        );
        self.listeners.push(id);
    }

    fn set_fullscreen_trigger(&mut self, dom: &mut dyn Platform, container: NodeId) {
        let api = FullscreenApi::probe(dom);
        for toggle in dom.select_all(container, ".navbar-fullscreen") {
            dom.listen(
                EventTarget::Node(toggle),
                "click",
                listener(move |host, _| {
                    let active = host.has_class(toggle, ACTIVE_CLASS);
                    api.toggle(host, active);
                }),
            );
        }

        for (event, flag) in CHANGE_EVENTS {
            let id = dom.listen(
                EventTarget::Document,
                event,
                listener(move |host, _| {
                    let is_fullscreen = host.fullscreen_flag(flag);
                    fullscreen::apply_fullscreen(host, container, is_fullscreen);
                }),
            );
            self.listeners.push(id);
        }
    }
}

// Each burger toggles itself and the element named by its `data-target`,
// taking the target's current state as the source of truth. A burger whose
// target is absent from the page follows its own state.
fn set_burger_trigger(dom: &mut dyn Platform, container: NodeId) {
    for burger in dom.select_all(container, ".navbar-burger") {
        dom.listen(
            EventTarget::Node(burger),
            "click",
            listener(move |host, _| {
                let target = host
                    .attribute(burger, "data-target")
                    .filter(|id| !id.is_empty())
                    .and_then(|id| host.select(host.document_element(), &format!("#{id}")));
                let open = host.has_class(target.unwrap_or(burger), ACTIVE_CLASS);

                host.set_class(burger, ACTIVE_CLASS, !open);
                host.set_attribute(burger, "aria-expanded", if open { "false" } else { "true" });
                if let Some(menu) = target {
                    host.set_class(menu, ACTIVE_CLASS, !open);
                }
            }),
        );
    }
}
