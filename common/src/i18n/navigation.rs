//! Language switcher generation and head alternates.

use log::debug;
use url::Url;

use super::pack::LocalePack;
use super::registry::LocaleRegistry;
use crate::dom::{NodeId, Platform};

const ACTIVE_CLASS: &str = "is-active";

/// Which element of a language entry carries the active class.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ActiveTarget {
    /// The `li` wrapping the link.
    #[default]
    Item,
    /// The `a` itself.
    Link,
}

/// Inputs to [`LocaleRegistry::generate_navigation`].
///
/// `page` is the page every language link points at. `query` names the
/// query-string key that carries the language code; it may be empty, in
/// which case the code is appended as a bare parameter. `hash` is appended
/// verbatim and should start with `#` when present.
#[derive(Clone, Copy, Debug, Default)]
pub struct NavigationRequest<'a> {
    page: &'a str,
    query: &'a str,
    active: ActiveTarget,
    classes: &'a str,
    hash: &'a str,
}

impl<'a> NavigationRequest<'a> {
    /// Start a request for `page`.
    #[must_use]
    pub fn new(page: &'a str) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Set the query-string key for the language code.
    #[must_use]
    pub const fn with_query(mut self, query: &'a str) -> Self {
        self.query = query;
        self
    }

    /// Choose which element is marked active.
    #[must_use]
    pub const fn with_active(mut self, active: ActiveTarget) -> Self {
        self.active = active;
        self
    }

    /// Extra whitespace separated classes added to every marked element.
    #[must_use]
    pub const fn with_classes(mut self, classes: &'a str) -> Self {
        self.classes = classes;
        self
    }

    /// Hash suffix appended to every link.
    #[must_use]
    pub const fn with_hash(mut self, hash: &'a str) -> Self {
        self.hash = hash;
        self
    }
}

/// Page prefix and separator that language codes are appended to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NavigationBase {
    /// Page with the language parameter and hash removed when it parsed.
    pub page: String,
    /// `?` when the page has no query string yet, otherwise `&`.
    pub separator: &'static str,
    /// Whether the page parsed as an absolute URL.
    pub canonical: bool,
}

impl NavigationBase {
    /// Normalise `page` for language links keyed by `query`.
    ///
    /// Absolute URLs lose any existing `query` parameter and their fragment.
    /// Anything else is used verbatim and joined by looking for a `?`.
    #[must_use]
    pub fn resolve(page: &str, query: &str) -> Self {
        Url::parse(page).map_or_else(
            |error| {
                debug!(
                    target: "navglot::i18n",
                    "joining language links naively to `{page}`: {error}"
                );
                Self {
                    separator: if page.contains('?') { "&" } else { "?" },
                    page: page.to_owned(),
                    canonical: false,
                }
            },
            |mut url| {
                strip_language(&mut url, query);
                Self {
                    separator: separator_for(&url),
                    page: url.into(),
                    canonical: true,
                }
            },
        )
    }
}

/// Remove every `name` query parameter and the fragment from `url`.
pub fn strip_language(url: &mut Url, name: &str) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
    url.set_fragment(None);
}

/// Separator for appending one more parameter to `url`.
#[must_use]
pub fn separator_for(url: &Url) -> &'static str {
    if url.query().is_some_and(|query| !query.is_empty()) {
        "&"
    } else {
        "?"
    }
}

/// Link to `page` in language `code`.
///
/// ```
/// use navglot_common::i18n::navigation_href;
///
/// assert_eq!(
///     navigation_href("https://x.test/?x=y", "&", "l", "nl", "#top"),
///     "https://x.test/?x=y&l=nl#top"
/// );
/// assert_eq!(navigation_href("page", "?", "", "en", ""), "page?en");
/// ```
#[must_use]
pub fn navigation_href(page: &str, separator: &str, query: &str, code: &str, hash: &str) -> String {
    let assign = if query.is_empty() { "" } else { "=" };
    format!("{page}{separator}{query}{assign}{code}{hash}")
}

impl LocaleRegistry {
    /// Populate `nav` with one `ul > li > a` entry per registered language.
    ///
    /// Existing entries are reused so repeated calls update in place.
    /// Every link gets `hreflang`, the pack's display name and an `href`
    /// built by [`navigation_href`]. The entry whose pack is the active pack
    /// gets `is-active`; all marked elements also get the request's extra
    /// classes. When the page is an absolute URL the document head receives
    /// one `canonical` link and one `alternate` link per language.
    pub fn generate_navigation(
        &self,
        dom: &mut dyn Platform,
        nav: NodeId,
        request: &NavigationRequest<'_>,
    ) {
        let base = NavigationBase::resolve(request.page, request.query);
        let codes: Vec<&str> = self.codes().collect();

        let list = single_child(dom, nav, "ul", "ul");
        let mut items = dom.children(list).into_iter();
        let mut links = Vec::with_capacity(codes.len());
        for code in &codes {
            let item = items
                .next()
                .unwrap_or_else(|| dom.append_element(list, "li"));
            let link = dom
                .select(item, "a")
                .unwrap_or_else(|| dom.append_element(item, "a"));
            dom.set_attribute(link, "hreflang", code);
            let name = self.pack(code).map_or(*code, LocalePack::language);
            dom.set_text(link, name);

            let marked = match request.active {
                ActiveTarget::Item => item,
                ActiveTarget::Link => link,
            };
            dom.set_class(marked, ACTIVE_CLASS, self.is_active(code));
            for class in request.classes.split_whitespace() {
                dom.set_class(marked, class, true);
            }
            links.push(link);
        }
        for surplus in items {
            dom.remove(surplus);
        }

        Self::update_navigation_links(
            dom,
            &links,
            &base.page,
            request.query,
            request.hash,
            base.separator,
        );

        if base.canonical {
            self.update_head(dom, &base, request.query);
        }
    }

    /// Recompute the `href` of every link from its `hreflang`.
    ///
    /// Produces the same hrefs as [`Self::generate_navigation`] for the same
    /// page, query, hash and separator, so it can run on every hash change.
    pub fn update_navigation_links(
        dom: &mut dyn Platform,
        links: &[NodeId],
        page: &str,
        query: &str,
        hash: &str,
        separator: &str,
    ) {
        for &link in links {
            let code = dom.attribute(link, "hreflang").unwrap_or_default();
            let href = navigation_href(page, separator, query, &code, hash);
            dom.set_attribute(link, "href", &href);
        }
    }

    fn update_head(&self, dom: &mut dyn Platform, base: &NavigationBase, query: &str) {
        let Some(head) = dom.head() else {
            debug!(target: "navglot::i18n", "document has no head for canonical links");
            return;
        };

        let canonical = single_child(dom, head, "link[rel=canonical]", "link");
        dom.set_attribute(canonical, "rel", "canonical");
        dom.set_attribute(canonical, "href", &base.page);

        let mut existing = dom.select_all(head, "link[rel=alternate][hreflang]").into_iter();
        let mut alternates = Vec::new();
        for code in self.codes() {
            let alternate = existing
                .next()
                .unwrap_or_else(|| dom.append_element(head, "link"));
            dom.set_attribute(alternate, "rel", "alternate");
            dom.set_attribute(alternate, "hreflang", code);
            alternates.push(alternate);
        }
        for surplus in existing {
            dom.remove(surplus);
        }
        Self::update_navigation_links(dom, &alternates, &base.page, query, "", base.separator);
    }
}

// Keep the first match of `selector` below `parent`, creating a `tag`
// element when there is none and dropping any further matches.
fn single_child(dom: &mut dyn Platform, parent: NodeId, selector: &str, tag: &str) -> NodeId {
    let mut matches = dom.select_all(parent, selector).into_iter();
    let Some(first) = matches.next() else {
        return dom.append_element(parent, tag);
    };
    for extra in matches {
        dom.remove(extra);
    }
    first
}
