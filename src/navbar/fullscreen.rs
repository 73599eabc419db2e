//! Fullscreen capability probing across vendor-prefixed platform APIs.

use log::debug;
use navglot_common::dom::{Event, EventTarget, NodeId, Platform};
use serde_json::json;

/// Request methods in the order they are tried.
pub const REQUEST_METHODS: [&str; 4] = [
    "requestFullscreen",
    "mozRequestFullScreen",
    "webkitRequestFullScreen",
    "msRequestFullscreen",
];

/// Exit methods in the order they are tried.
pub const EXIT_METHODS: [&str; 4] = [
    "exitFullscreen",
    "mozCancelFullScreen",
    "webkitCancelFullScreen",
    "msExitFullscreen",
];

/// Change events paired with the state flag each one reports through.
pub const CHANGE_EVENTS: [(&str, &str); 4] = [
    ("fullscreenchange", "fullscreen"),
    ("mozfullscreenchange", "mozFullScreen"),
    ("webkitfullscreenchange", "webkitIsFullScreen"),
    ("msfullscreenchange", "msFullscreenElement"),
];

/// Class marking active fullscreen toggles.
pub const ACTIVE_CLASS: &str = "is-active";

/// Event dispatched on the navbar container after a state change.
pub const FULLSCREEN_EVENT: &str = "fullscreen";

/// The request and exit methods a platform offers, probed once.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FullscreenApi {
    request: Option<&'static str>,
    exit: Option<&'static str>,
}

impl FullscreenApi {
    /// Pick the first available request and exit methods.
    #[must_use]
    pub fn probe(dom: &dyn Platform) -> Self {
        let first = |candidates: &[&'static str]| {
            candidates
                .iter()
                .copied()
                .find(|name| dom.fullscreen_method_available(name))
        };
        let api = Self {
            request: first(&REQUEST_METHODS),
            exit: first(&EXIT_METHODS),
        };
        debug!(
            target: "navglot::navbar",
            "fullscreen request method {:?}, exit method {:?}",
            api.request,
            api.exit
        );
        api
    }

    /// The chosen request method.
    #[must_use]
    pub const fn request(&self) -> Option<&'static str> {
        self.request
    }

    /// The chosen exit method.
    #[must_use]
    pub const fn exit(&self) -> Option<&'static str> {
        self.exit
    }

    /// Ask the platform to enter fullscreen, or to leave it when `active`.
    ///
    /// The displayed state is left alone; it follows the platform's change
    /// events.
    pub fn toggle(self, dom: &mut dyn Platform, active: bool) {
        let Some(method) = (if active { self.exit } else { self.request }) else {
            debug!(target: "navglot::navbar", "platform offers no fullscreen support");
            return;
        };
        dom.call_fullscreen_method(method);
    }
}

/// Mark every fullscreen toggle in `container` and announce the new state.
pub fn apply_fullscreen(dom: &mut dyn Platform, container: NodeId, is_fullscreen: bool) {
    for toggle in dom.select_all(container, ".navbar-fullscreen") {
        dom.set_class(toggle, ACTIVE_CLASS, is_fullscreen);
    }
    dom.dispatch(
        Event::new(FULLSCREEN_EVENT, EventTarget::Node(container))
            .with_detail(json!({ "isFullscreen": is_fullscreen })),
    );
}
