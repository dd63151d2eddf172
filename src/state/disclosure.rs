//! Collapsible disclosure state: open flag plus a lazily captured animation set.
//!
//! DESIGN
//! ======
//! The `<details>` element's `open` attribute is the source of truth; the DOM
//! layer feeds it in through [`Disclosure::toggle_opened`] and this model only
//! reacts. Content-panel animations are snapshotted once, on the first
//! transition, and replayed or cancelled on every transition after that.

#[cfg(test)]
#[path = "disclosure_test.rs"]
mod disclosure_test;

/// A running or declared animation on the content panel.
pub trait AnimationHandle {
    /// Start (or resume) playback.
    fn play(&self);
    /// Cancel playback and reset, so the next `play` starts from the beginning.
    fn cancel(&self);
}

/// Observable open/close transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Opened,
    Closed,
}

/// Open/close state for one disclosure instance.
#[derive(Debug)]
pub struct Disclosure<A> {
    open: bool,
    animations: Option<Vec<A>>,
}

impl<A> Default for Disclosure<A> {
    fn default() -> Self {
        Self { open: false, animations: None }
    }
}

impl<A: AnimationHandle> Disclosure<A> {
    #[must_use]
    pub fn new(open: bool) -> Self {
        Self { open, animations: None }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The captured animation snapshot, or `None` before the first transition.
    #[must_use]
    pub fn animations(&self) -> Option<&[A]> {
        self.animations.as_deref()
    }

    /// Flip the open state, or apply `explicit` when given.
    ///
    /// `capture` is invoked at most once over the lifetime of the disclosure.
    /// Returns `None` when the requested state equals the current one.
    pub fn toggle_opened<F>(&mut self, explicit: Option<bool>, capture: F) -> Option<Transition>
    where
        F: FnOnce() -> Vec<A>,
    {
        let target = explicit.unwrap_or(!self.open);
        if target == self.open {
            return None;
        }
        self.open = target;

        let animations = self.animations.get_or_insert_with(capture);
        if target {
            animations.iter().for_each(AnimationHandle::play);
            Some(Transition::Opened)
        } else {
            animations.iter().for_each(AnimationHandle::cancel);
            Some(Transition::Closed)
        }
    }

    /// Force the closed state.
    pub fn close<F>(&mut self, capture: F) -> Option<Transition>
    where
        F: FnOnce() -> Vec<A>,
    {
        self.toggle_opened(Some(false), capture)
    }

    /// Deferred focus check after a `focusout`.
    ///
    /// Returns `true` when the close path ran (focus is outside the subtree),
    /// even if the disclosure was already closed.
    pub fn after_focus_out<F>(&mut self, focus_inside: bool, capture: F) -> bool
    where
        F: FnOnce() -> Vec<A>,
    {
        if focus_inside {
            return false;
        }
        self.close(capture);
        true
    }
}
