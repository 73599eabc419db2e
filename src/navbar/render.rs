//! Markup for each navbar node.

use log::warn;
use navglot_common::i18n::value_text;
use serde_json::{Map, Value};

use super::Navbar;
use super::node::{
    Burger, Children, Dropdown, Fullscreen, Icon, Image, Link, LinkTarget, LocaleText, Menu,
    NavItem, NavNode, Section, Text,
};
use crate::markup::escape;

impl Navbar {
    /// Render a sequence of items, one per line.
    ///
    /// Invalid items are logged and render as nothing; their siblings still
    /// render.
    #[must_use]
    pub fn build(&self, items: &[NavItem]) -> String {
        items
            .iter()
            .map(|item| match item {
                NavItem::Node(node) => self.render(node),
                NavItem::Invalid { kind, reason } => {
                    warn!(
                        target: "navglot::navbar",
                        "invalid navbar item type `{}`: {reason}",
                        kind.as_deref().unwrap_or("<none>")
                    );
                    String::new()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render container children: nested items, or escaped localised text.
    #[must_use]
    pub fn build_children(&self, children: Option<&Children>) -> String {
        match children {
            None => String::new(),
            Some(Children::Items(items)) => self.build(items),
            Some(Children::Text(text)) => escape(&self.locale_text(text)),
        }
    }

    /// Render a single node.
    #[must_use]
    pub fn render(&self, node: &NavNode) -> String {
        match node {
            NavNode::Brand(section) => self.section("navbar-brand", section),
            NavNode::Link(link) => self.link_markup(link, "item"),
            NavNode::Fullscreen(fullscreen) => self.fullscreen_markup(fullscreen),
            NavNode::Image(image) => self.image_markup(image),
            NavNode::Text(Text { text }) => escape(&self.optional_text(text.as_ref())),
            NavNode::Burger(burger) => burger_markup(burger),
            NavNode::Menu(menu) => self.menu_markup(menu),
            NavNode::Start(section) => self.section("navbar-start", section),
            NavNode::End(section) => self.section("navbar-end", section),
            NavNode::Dropdown(dropdown) => self.dropdown_markup(dropdown),
            NavNode::Divider => String::from(r#"<hr class="navbar-divider">"#),
        }
    }

    /// Resolve localised text against the active language, falling back to
    /// the `en` entry.
    #[must_use]
    pub fn locale_text(&self, text: &LocaleText) -> String {
        match text {
            LocaleText::Plain(plain) => plain.clone(),
            LocaleText::Localized(table) => self.localized(table),
        }
    }

    /// Resolve a link target to a URL.
    #[must_use]
    pub fn link(&self, target: &LinkTarget) -> String {
        match target {
            LinkTarget::Parts(parts) => parts.iter().map(|part| self.link(part)).collect(),
            LinkTarget::Config { config } => self.config.lookup(config).unwrap_or_default(),
            LinkTarget::Locale { locale } if locale == "lang" => self.locales.lang().to_owned(),
            LinkTarget::Locale { locale } => self
                .locales
                .get(locale)
                .as_ref()
                .map(value_text)
                .unwrap_or_default(),
            LinkTarget::Localized(table) => self.localized(table),
            LinkTarget::Literal(value) => value_text(value),
        }
    }

    fn localized(&self, table: &Map<String, Value>) -> String {
        self.locales
            .retrieve(table, None, table.get("en"))
            .as_ref()
            .map(value_text)
            .unwrap_or_default()
    }

    fn optional_text(&self, text: Option<&LocaleText>) -> String {
        text.map(|value| self.locale_text(value)).unwrap_or_default()
    }

    fn section(&self, class: &str, section: &Section) -> String {
        format!(
            r#"<div class="{class}">{}</div>"#,
            self.build_children(section.items.as_ref())
        )
    }

    fn link_markup(&self, link: &Link, default_class: &str) -> String {
        let class = link.class.as_deref().unwrap_or(default_class);
        let href = link
            .url
            .as_ref()
            .map(|url| format!(r#" href="{}""#, self.link(url)))
            .unwrap_or_default();
        format!(
            r#"<a class="navbar-{}"{href} title="{}">{}{}</a>"#,
            escape(class),
            escape(&self.optional_text(link.title.as_ref())),
            icon_markup(link.icon.as_ref()),
            self.build_children(link.content.as_ref()),
        )
    }

    fn fullscreen_markup(&self, fullscreen: &Fullscreen) -> String {
        format!(
            r#"<a class="navbar-item navbar-fullscreen" title="{}">{}</a>"#,
            escape(&self.optional_text(fullscreen.title.as_ref())),
            icon_markup(fullscreen.icon.as_ref()),
        )
    }

    fn image_markup(&self, image: &Image) -> String {
        let src = image
            .url
            .as_ref()
            .map(|url| self.link(url))
            .unwrap_or_default();
        format!(
            r#"<img src="{src}" alt="{}" width="{}" height="{}" style="{}">"#,
            escape(&self.optional_text(image.alt.as_ref())),
            escape(&literal(image.width.as_ref())),
            escape(&literal(image.height.as_ref())),
            literal(image.style.as_ref()),
        )
    }

    fn menu_markup(&self, menu: &Menu) -> String {
        format!(
            r#"<div class="navbar-menu" id="{}">{}</div>"#,
            escape(menu.id.as_deref().unwrap_or_default()),
            self.build_children(menu.items.as_ref())
        )
    }

    fn dropdown_markup(&self, dropdown: &Dropdown) -> String {
        let wrapper = match dropdown.class.as_deref() {
            Some(extra) if !extra.is_empty() => format!("{} {}", DROPDOWN_CLASS, escape(extra)),
            _ => String::from(DROPDOWN_CLASS),
        };
        let id = dropdown
            .id
            .as_deref()
            .map(|id| format!(r#" id="{}""#, escape(id)))
            .unwrap_or_default();
        format!(
            r#"<div class="{wrapper}">{}<div class="navbar-dropdown is-boxed"{id}>{}</div></div>"#,
            self.link_markup(&dropdown.link, "link"),
            self.build_children(dropdown.items.as_ref()),
        )
    }
}

const DROPDOWN_CLASS: &str = "navbar-item has-dropdown is-hoverable";

fn burger_markup(burger: &Burger) -> String {
    format!(
        r#"<a role="button" class="navbar-burger" aria-label="menu" aria-expanded="false" data-target="{}">{}</a>"#,
        escape(burger.target.as_deref().unwrap_or_default()),
        r#"<span aria-hidden="true"></span>"#.repeat(burger.lines),
    )
}

fn icon_markup(icon: Option<&Icon>) -> String {
    icon.map(|found| {
        format!(
            r#"<span class="icon"><i class="{}" aria-hidden="true"></i></span>"#,
            escape(&found.classes())
        )
    })
    .unwrap_or_default()
}

fn literal(value: Option<&Value>) -> String {
    value.map(value_text).unwrap_or_default()
}
