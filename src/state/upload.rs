//! Upload task handle, cancellation, and the tick driver.
//!
//! The transport is a trait so the simulated progress source can be swapped
//! for a real network upload without touching [`IntakeState`]'s contract.
//! A driver stops for good on completion or cancellation; every tick after
//! that is [`TickOutcome::Ignored`].

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::Rng;

use crate::state::intake::{IntakeState, TickOutcome};

/// Shared cancellation flag between an [`UploadTask`] and its driver.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Handle to a running upload.
#[derive(Clone, Debug, Default)]
pub struct UploadTask {
    token: CancelToken,
}

impl UploadTask {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }
}

/// Source of upload progress.
pub trait UploadTransport {
    /// Percentage points gained since the previous tick.
    fn next_increment(&mut self) -> f64;
}

/// Random progress in `[min_step, max_step]` per tick.
#[derive(Debug)]
pub struct SimulatedTransport<R> {
    rng: R,
    min_step: f64,
    max_step: f64,
}

impl<R: Rng> SimulatedTransport<R> {
    /// `min_step` and `max_step` must satisfy `0 < min_step <= max_step`.
    pub fn new(rng: R, min_step: f64, max_step: f64) -> Self {
        Self { rng, min_step, max_step }
    }
}

impl<R: Rng> UploadTransport for SimulatedTransport<R> {
    fn next_increment(&mut self) -> f64 {
        self.rng.random_range(self.min_step..=self.max_step)
    }
}

/// Feeds transport progress into an [`IntakeState`] one tick at a time.
#[derive(Debug)]
pub struct UploadDriver<T> {
    transport: T,
    token: CancelToken,
    finished: bool,
}

impl<T: UploadTransport> UploadDriver<T> {
    pub fn new(transport: T, token: CancelToken) -> Self {
        Self { transport, token, finished: false }
    }

    /// `true` once the upload completed, was cancelled, or lost its phase.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished || self.token.is_cancelled()
    }

    pub fn tick(&mut self, state: &mut IntakeState) -> TickOutcome {
        if self.is_finished() {
            return TickOutcome::Ignored;
        }
        let outcome = state.advance(self.transport.next_increment());
        if !matches!(outcome, TickOutcome::Progressed(_)) {
            self.finished = true;
        }
        outcome
    }
}
