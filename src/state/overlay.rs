//! Header menu state: disclosure behavior plus an optional full-viewport overlay.
//!
//! DESIGN
//! ======
//! Page-wide chrome (scroll lock, published header offset) lives in a single
//! [`PageChrome`] value provided once per page and passed by reference, so
//! tests can build isolated pages. The overlay is a strategy object chosen at
//! construction rather than a subclass: a [`HeaderMenu`] without one behaves
//! exactly like a plain [`Disclosure`] apart from header bookkeeping.
//!
//! TRADE-OFFS
//! ==========
//! Scroll lock is a flag, not a counter. At most one overlay is expected to be
//! open at a time; whichever menu closes last clears the lock.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::state::disclosure::{AnimationHandle, Disclosure, Transition};

/// Root custom property holding the first measured header bottom edge.
pub const HEADER_BOTTOM_VAR: &str = "--header-bottom-position-desktop";
/// Root custom property holding the top edge of the open overlay.
pub const MEGA_MENU_TOP_VAR: &str = "--mega-menu-top";
/// Body `overflow` value while an overlay holds the scroll lock.
pub const SCROLL_LOCK_OVERFLOW: &str = "hidden";
/// Class on the header element that keeps a sticky header from hiding.
pub const HEADER_PINNED_CLASS: &str = "header--prevent-hide";
/// Key that cancels an open overlay.
pub const ESCAPE_KEY: &str = "Escape";

/// Page-level chrome shared by every menu on the page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageChrome {
    pub scroll_locked: bool,
    /// First header bottom edge published by any menu; never re-derived.
    pub header_bottom_px: Option<i32>,
    /// Top edge of the most recently opened overlay.
    pub mega_menu_top_px: Option<i32>,
    /// Open state of the most recently toggled header menu.
    pub header_pinned: bool,
}

impl PageChrome {
    pub fn lock_scroll(&mut self) {
        self.scroll_locked = true;
    }

    pub fn release_scroll(&mut self) {
        self.scroll_locked = false;
    }

    /// Record the header offset if none has been published yet.
    ///
    /// Returns `true` when this call set the value.
    pub fn publish_header_bottom(&mut self, px: i32) -> bool {
        if self.header_bottom_px.is_some() {
            return false;
        }
        self.header_bottom_px = Some(px);
        true
    }

    /// Body `overflow` style implied by the scroll lock.
    #[must_use]
    pub fn body_overflow(&self) -> &'static str {
        if self.scroll_locked { SCROLL_LOCK_OVERFLOW } else { "" }
    }
}

/// Geometry applied to the overlay content when it opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayLayout {
    pub top_px: i32,
    pub height_css: String,
}

impl OverlayLayout {
    #[must_use]
    pub fn below_header(top_px: i32) -> Self {
        Self { top_px, height_css: format!("calc(100vh - {top_px}px)") }
    }

    #[must_use]
    pub fn top_css(&self) -> String {
        format!("{}px", self.top_px)
    }
}

/// Overlay strategy: scroll lock, positioning, and the escape listener.
#[derive(Debug, Default)]
pub struct OverlayMenu {
    escape_armed: bool,
}

impl OverlayMenu {
    #[must_use]
    pub fn is_escape_armed(&self) -> bool {
        self.escape_armed
    }

    /// Lock scrolling and place the overlay directly below the header.
    pub fn open(&mut self, header_bottom_px: i32, chrome: &mut PageChrome) -> OverlayLayout {
        chrome.lock_scroll();
        chrome.mega_menu_top_px = Some(header_bottom_px);
        self.escape_armed = true;
        OverlayLayout::below_header(header_bottom_px)
    }

    /// Clear the scroll lock and disarm the escape listener, whoever set them.
    pub fn release(&mut self, chrome: &mut PageChrome) {
        chrome.release_scroll();
        self.escape_armed = false;
    }
}

/// Side effects the DOM layer must apply after a menu operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuEffects {
    pub transition: Option<Transition>,
    /// Position the overlay content.
    pub layout: Option<OverlayLayout>,
    /// `Some(true)` to attach the escape listener, `Some(false)` to detach it.
    pub escape_listener: Option<bool>,
}

/// A header navigation menu.
#[derive(Debug)]
pub struct HeaderMenu<A> {
    disclosure: Disclosure<A>,
    overlay: Option<OverlayMenu>,
}

impl<A: AnimationHandle> HeaderMenu<A> {
    /// Build a menu; `overlay` is the markup flag selecting the full-viewport variant.
    #[must_use]
    pub fn new(open: bool, overlay: bool) -> Self {
        Self { disclosure: Disclosure::new(open), overlay: overlay.then(OverlayMenu::default) }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.disclosure.is_open()
    }

    #[must_use]
    pub fn disclosure(&self) -> &Disclosure<A> {
        &self.disclosure
    }

    /// React to the `<details>` toggle event.
    ///
    /// `header_bottom` is the measured bottom edge of the fixed header, or
    /// `None` when the page has no header; in that case only the disclosure
    /// and the close-side cleanup run.
    #[allow(clippy::cast_possible_truncation)]
    pub fn on_toggle<F>(
        &mut self,
        open: bool,
        header_bottom: Option<f64>,
        chrome: &mut PageChrome,
        capture: F,
    ) -> MenuEffects
    where
        F: FnOnce() -> Vec<A>,
    {
        let Some(transition) = self.disclosure.toggle_opened(Some(open), capture) else {
            return MenuEffects::default();
        };
        let mut effects = MenuEffects { transition: Some(transition), ..MenuEffects::default() };
        chrome.header_pinned = transition == Transition::Opened;

        let header_px = header_bottom.map(|bottom| bottom.floor() as i32);
        if let Some(px) = header_px {
            chrome.publish_header_bottom(px);
        }

        let Some(overlay) = self.overlay.as_mut() else {
            return effects;
        };
        match (transition, header_px) {
            (Transition::Opened, Some(px)) => {
                effects.layout = Some(overlay.open(px, chrome));
                effects.escape_listener = Some(true);
            }
            (Transition::Opened, None) => {}
            (Transition::Closed, _) => {
                overlay.release(chrome);
                effects.escape_listener = Some(false);
            }
        }
        effects
    }

    /// Close the menu and unconditionally release overlay resources.
    pub fn close<F>(&mut self, chrome: &mut PageChrome, capture: F) -> MenuEffects
    where
        F: FnOnce() -> Vec<A>,
    {
        let transition = self.disclosure.close(capture);
        if transition.is_some() {
            chrome.header_pinned = false;
        }
        let mut effects = MenuEffects { transition, ..MenuEffects::default() };
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.release(chrome);
            effects.escape_listener = Some(false);
        }
        effects
    }

    /// Handle a document `keydown`; only the escape gesture on an open overlay closes.
    ///
    /// Returns `None` when the key is ignored.
    pub fn on_key<F>(&mut self, key: &str, chrome: &mut PageChrome, capture: F) -> Option<MenuEffects>
    where
        F: FnOnce() -> Vec<A>,
    {
        let armed = self.overlay.as_ref().is_some_and(OverlayMenu::is_escape_armed);
        if key != ESCAPE_KEY || !armed || !self.is_open() {
            return None;
        }
        Some(self.close(chrome, capture))
    }

    /// Deferred focus check; closes when focus has left the menu.
    ///
    /// Returns `None` when focus is still inside.
    pub fn after_focus_out<F>(&mut self, focus_inside: bool, chrome: &mut PageChrome, capture: F) -> Option<MenuEffects>
    where
        F: FnOnce() -> Vec<A>,
    {
        if focus_inside {
            return None;
        }
        Some(self.close(chrome, capture))
    }
}
