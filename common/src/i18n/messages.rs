use log::debug;

use super::registry::{LocaleRegistry, MessageFallback};
use crate::dom::{NodeId, Platform};

const MESSAGE_MARKER: &str = "data-message";

impl LocaleRegistry {
    /// Replace marked content below `root` with resolved messages.
    ///
    /// Every element carrying `data-message` gets its content replaced by
    /// that message, with the markup of its child elements as positional
    /// arguments; the new content is then resolved in turn. Elements whose
    /// ancestor was replaced earlier in the walk are skipped. For each name
    /// in `attributes`, elements carrying `data-message-<name>` get that
    /// attribute set from the message, without arguments.
    ///
    /// With [`MessageFallback::Keep`] unresolved content and attributes are
    /// left untouched. Without a `root` the whole document is processed and
    /// its `lang` attribute is set to the active code. A message whose
    /// replacement marks the same key again is substituted once; the inner
    /// marker is left in place.
    pub fn update_messages(
        &self,
        dom: &mut dyn Platform,
        root: Option<NodeId>,
        attributes: &[&str],
        fallback: &MessageFallback,
    ) {
        let scope = root.unwrap_or_else(|| {
            let document = dom.document_element();
            dom.set_attribute(document, "lang", self.lang());
            document
        });
        self.substitute(dom, scope, attributes, fallback, &mut Vec::new());
    }

    // `active` holds the keys whose replacements are being resolved above
    // `scope`.
    fn substitute(
        &self,
        dom: &mut dyn Platform,
        scope: NodeId,
        attributes: &[&str],
        fallback: &MessageFallback,
        active: &mut Vec<String>,
    ) {
        for element in dom.select_all(scope, "[data-message]") {
            if !dom.contains(scope, element) {
                continue;
            }
            let key = dom.attribute(element, MESSAGE_MARKER).unwrap_or_default();
            if active.contains(&key) {
                debug!(target: "navglot::i18n", "message `{key}` refers to itself; not expanding");
                continue;
            }
            let args: Vec<String> = dom
                .children(element)
                .into_iter()
                .map(|child| dom.outer_html(child))
                .collect();
            if let Some(replacement) = self.resolve_message(&key, &args, fallback) {
                dom.set_inner_html(element, &replacement);
                active.push(key);
                self.substitute(dom, element, attributes, fallback, active);
                active.pop();
            }
        }

        for attribute in attributes {
            let marker = format!("{MESSAGE_MARKER}-{attribute}");
            for element in dom.select_all(scope, &format!("[{marker}]")) {
                let key = dom.attribute(element, &marker).unwrap_or_default();
                let none: &[&str] = &[];
                if let Some(replacement) = self.resolve_message(&key, none, fallback) {
                    dom.set_attribute(element, attribute, &replacement);
                }
            }
        }
    }
}
