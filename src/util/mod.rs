//! Utility helpers shared across storefront components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser concerns from component logic. `dom` is
//! browser-only; `notice` degrades to logging elsewhere.

#[cfg(feature = "hydrate")]
pub mod dom;
pub mod notice;
