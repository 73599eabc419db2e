//! Declarative navbar structure.
//!
//! A structure is a JSON array of objects tagged by `type`. Entries that do
//! not describe a known node are kept as [`NavItem::Invalid`] so rendering
//! can report and skip them without rejecting the whole structure.

use camino::Utf8Path;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::config::{ConfigError, read};

/// One node of the navbar tree.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NavNode {
    /// `div.navbar-brand` around its items.
    Brand(Section),
    /// An anchor with optional icon and content.
    Link(Link),
    /// The fullscreen toggle.
    Fullscreen(Fullscreen),
    /// An image.
    Image(Image),
    /// Bare localised text.
    Text(Text),
    /// The burger toggle for a collapsible menu.
    Burger(Burger),
    /// `div.navbar-menu` with an id the burger can target.
    Menu(Menu),
    /// `div.navbar-start` around its items.
    Start(Section),
    /// `div.navbar-end` around its items.
    End(Section),
    /// A hoverable dropdown: a trigger link plus a panel of items.
    Dropdown(Dropdown),
    /// `hr.navbar-divider`.
    Divider,
}

/// A structure entry: a node, or an entry that failed to parse.
#[derive(Clone, Debug, PartialEq)]
pub enum NavItem {
    /// A recognised node.
    Node(NavNode),
    /// An entry rendering skips with a warning.
    Invalid {
        /// The entry's `type`, when it had a textual one.
        kind: Option<String>,
        /// Why the entry was rejected.
        reason: String,
    },
}

impl From<NavNode> for NavItem {
    fn from(node: NavNode) -> Self {
        Self::Node(node)
    }
}

impl<'de> Deserialize<'de> for NavItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(match NavNode::deserialize(&raw) {
            Ok(node) => Self::Node(node),
            Err(error) => Self::Invalid {
                kind: raw.get("type").and_then(Value::as_str).map(str::to_owned),
                reason: error.to_string(),
            },
        })
    }
}

/// Children of a container node: nested items or plain localised text.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Children {
    /// Nested structure entries.
    Items(Vec<NavItem>),
    /// Text rendered in place of child nodes.
    Text(LocaleText),
}

/// Text that is either fixed or keyed by language code.
///
/// Localised tables resolve against the active language and fall back to
/// their `en` entry.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LocaleText {
    /// The same text for every language.
    Plain(String),
    /// Text per language code.
    Localized(Map<String, Value>),
}

/// Where a link or image points.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LinkTarget {
    /// Concatenation of each part's resolution.
    Parts(Vec<LinkTarget>),
    /// A configuration value, `{"config": "key"}`.
    Config {
        /// Configuration key to look up.
        config: String,
    },
    /// `{"locale": "lang"}` for the active code, otherwise a top-level field
    /// of the active pack.
    Locale {
        /// `lang` or the name of a pack field.
        locale: String,
    },
    /// A table keyed by language code.
    Localized(Map<String, Value>),
    /// Used as-is.
    Literal(Value),
}

/// Icon classes: a class list, or parts where all but the first get the
/// `fa-` prefix (`["fas", "language", "xs"]`).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Icon {
    /// A ready-made class attribute.
    Classes(String),
    /// A style class followed by Font Awesome names.
    Parts(Vec<String>),
}

impl Icon {
    /// The resulting class attribute value.
    #[must_use]
    pub fn classes(&self) -> String {
        match self {
            Self::Classes(classes) => classes.clone(),
            Self::Parts(parts) => parts
                .iter()
                .enumerate()
                .map(|(index, part)| {
                    if index == 0 {
                        part.clone()
                    } else {
                        format!("fa-{part}")
                    }
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// A wrapper `div` around nested items.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Section {
    /// Items rendered inside the wrapper.
    pub items: Option<Children>,
}

/// An anchor.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Link {
    /// Suffix of the `navbar-` class; defaults to `item`.
    pub class: Option<String>,
    /// The `href`; omitted when absent.
    pub url: Option<LinkTarget>,
    /// The `title` attribute.
    pub title: Option<LocaleText>,
    /// Icon rendered before the content.
    pub icon: Option<Icon>,
    /// Text or nested items inside the anchor.
    pub content: Option<Children>,
}

/// The fullscreen toggle link.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Fullscreen {
    /// The `title` attribute.
    pub title: Option<LocaleText>,
    /// Icon inside the toggle.
    pub icon: Option<Icon>,
}

/// An `img` element.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Image {
    /// The `src`.
    pub url: Option<LinkTarget>,
    /// The `alt` text.
    pub alt: Option<LocaleText>,
    /// The `width` attribute, as given.
    pub width: Option<Value>,
    /// The `height` attribute, as given.
    pub height: Option<Value>,
    /// The `style` attribute, as given.
    pub style: Option<Value>,
}

/// Bare text.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Text {
    /// The text; nothing is rendered when absent.
    pub text: Option<LocaleText>,
}

/// The burger toggle.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Burger {
    /// Id of the menu the burger opens.
    pub target: Option<String>,
    /// Number of decorative bars.
    #[serde(default)]
    pub lines: usize,
}

/// The collapsible menu.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Menu {
    /// Element id, matched by a burger's target.
    pub id: Option<String>,
    /// Items rendered inside the menu.
    pub items: Option<Children>,
}

/// A dropdown trigger and panel.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Dropdown {
    /// Extra classes on the dropdown wrapper.
    pub class: Option<String>,
    /// Id of the dropdown panel, for example the language switcher.
    pub id: Option<String>,
    /// Trigger link; its class defaults to `link`.
    #[serde(default)]
    pub link: Link,
    /// Items rendered in the panel.
    pub items: Option<Children>,
}

/// Parse a JSON navbar structure.
///
/// # Errors
///
/// Fails when `source` is not a JSON array; entries that are not valid
/// nodes become [`NavItem::Invalid`].
pub fn parse_structure(source: &str) -> Result<Vec<NavItem>, ConfigError> {
    Ok(serde_json::from_str(source)?)
}

/// Read a JSON navbar structure file.
///
/// # Errors
///
/// Fails when the file cannot be read or is not a JSON array.
pub fn load_structure(path: &Utf8Path) -> Result<Vec<NavItem>, ConfigError> {
    parse_structure(&read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn parses_nested_structures() {
        let items = parse_structure(
            r#"[{"type": "menu", "id": "menu", "items": [
                    {"type": "start", "items": [{"type": "divider"}]},
                    {"type": "text", "text": {"en": "Hi", "nl": "Hoi"}}
               ]}]"#,
        )
        .unwrap_or_else(|error| panic!("structure should parse: {error}"));

        let expected = NavItem::Node(NavNode::Menu(Menu {
            id: Some(String::from("menu")),
            items: Some(Children::Items(vec![
                NavItem::Node(NavNode::Start(Section {
                    items: Some(Children::Items(vec![NavItem::Node(NavNode::Divider)])),
                })),
                NavItem::Node(NavNode::Text(Text {
                    text: Some(LocaleText::Localized(
                        json!({"en": "Hi", "nl": "Hoi"})
                            .as_object()
                            .cloned()
                            .unwrap_or_default(),
                    )),
                })),
            ])),
        }));
        assert_eq!(items, [expected]);
    }

    #[rstest]
    #[case(r#"{"type": "invalid"}"#, Some("invalid"))]
    #[case(r#"{"type": "burger", "lines": "three"}"#, Some("burger"))]
    #[case(r#"{"title": "untyped"}"#, None)]
    #[case(r#""bare""#, None)]
    fn keeps_invalid_entries(#[case] entry: &str, #[case] kind: Option<&str>) {
        let items = parse_structure(&format!("[{entry}, {{\"type\": \"divider\"}}]"))
            .unwrap_or_else(|error| panic!("structure should parse: {error}"));

        let [NavItem::Invalid { kind: found, .. }, NavItem::Node(NavNode::Divider)] =
            items.as_slice()
        else {
            panic!("unexpected items: {items:?}");
        };
        assert_eq!(found.as_deref(), kind);
    }

    #[rstest]
    #[case(json!("logo.svg"), LinkTarget::Literal(json!("logo.svg")))]
    #[case(json!(42), LinkTarget::Literal(json!(42)))]
    #[case(json!({"config": "my_url"}), LinkTarget::Config { config: String::from("my_url") })]
    #[case(json!({"locale": "lang"}), LinkTarget::Locale { locale: String::from("lang") })]
    #[case(
        json!(["a", {"config": "b"}]),
        LinkTarget::Parts(vec![
            LinkTarget::Literal(json!("a")),
            LinkTarget::Config { config: String::from("b") },
        ])
    )]
    fn classifies_link_targets(#[case] raw: Value, #[case] expected: LinkTarget) {
        let target = LinkTarget::deserialize(&raw)
            .unwrap_or_else(|error| panic!("target should parse: {error}"));
        assert_eq!(target, expected);
    }

    #[rstest]
    #[case(Icon::Classes(String::from("timeline-icon")), "timeline-icon")]
    #[case(
        Icon::Parts(vec![String::from("fas"), String::from("language"), String::from("xs")]),
        "fas fa-language fa-xs"
    )]
    #[case(Icon::Parts(Vec::new()), "")]
    fn expands_icon_classes(#[case] icon: Icon, #[case] expected: &str) {
        assert_eq!(icon.classes(), expected);
    }
}
