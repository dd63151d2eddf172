//! Storefront widget components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the theme markup and translate DOM events into calls on
//! the state machines in [`crate::state`], reading page-level chrome and
//! configuration from Leptos context.

pub mod disclosure;
pub mod file_intake;
pub mod header_menu;
pub mod product_form;
