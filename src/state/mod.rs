//! Host-agnostic interaction state.
//!
//! DESIGN
//! ======
//! Every model here is a small state machine with no DOM types, so the
//! invariants (one-time animation snapshot, scroll-lock cleanup, monotone
//! upload progress, submit gating) are tested natively. Components own one
//! instance each and translate DOM events into calls on it.

pub mod disclosure;
pub mod intake;
pub mod overlay;
pub mod submit_gate;
pub mod upload;
