use super::*;
use crate::state::intake::{FileDescriptor, IntakePhase};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct FixedTransport(f64);

impl UploadTransport for FixedTransport {
    fn next_increment(&mut self) -> f64 {
        self.0
    }
}

fn uploading(name: &str) -> IntakeState {
    let mut state = IntakeState::default();
    state
        .submit_file(FileDescriptor::new(name, 2 * 1024 * 1024))
        .expect("fixture file is valid");
    state
}

fn simulated(seed: u64) -> SimulatedTransport<StdRng> {
    SimulatedTransport::new(StdRng::seed_from_u64(seed), 5.0, 30.0)
}

// =============================================================
// CancelToken / UploadTask
// =============================================================

#[test]
fn task_cancel_is_visible_through_token() {
    let task = UploadTask::new();
    let token = task.token();
    assert!(!token.is_cancelled());
    task.cancel();
    assert!(token.is_cancelled());
    assert!(task.token().is_cancelled());
}

// =============================================================
// SimulatedTransport
// =============================================================

#[test]
fn simulated_increments_stay_within_bounds() {
    let mut transport = simulated(7);
    for _ in 0..500 {
        let step = transport.next_increment();
        assert!((5.0..=30.0).contains(&step), "step {step} out of range");
    }
}

#[test]
fn simulated_upload_finishes_in_bounded_ticks() {
    for seed in 0..50 {
        let mut state = uploading("team.csv");
        let mut driver = UploadDriver::new(simulated(seed), CancelToken::default());
        let mut ticks = 0;
        while !driver.is_finished() {
            driver.tick(&mut state);
            ticks += 1;
        }
        assert!((4..=20).contains(&ticks), "seed {seed} took {ticks} ticks");
    }
}

// =============================================================
// UploadDriver
// =============================================================

#[test]
fn progress_is_monotonic_and_ends_at_exactly_one_hundred() {
    let mut state = uploading("team.csv");
    let mut driver = UploadDriver::new(simulated(42), CancelToken::default());
    let mut bars = Vec::new();

    while !driver.is_finished() {
        driver.tick(&mut state);
        bars.push(state.progress_bar);
    }

    assert!(bars.windows(2).all(|w| w[0] <= w[1]), "non-monotonic: {bars:?}");
    assert_eq!(bars.last().copied(), Some(100.0));
    assert!(bars[..bars.len() - 1].iter().all(|p| *p < 100.0));
}

#[test]
fn no_ticks_are_observed_after_completion() {
    let mut state = uploading("team.csv");
    let mut driver = UploadDriver::new(FixedTransport(40.0), CancelToken::default());
    let mut events = Vec::new();

    for _ in 0..10 {
        match driver.tick(&mut state) {
            TickOutcome::Ignored => {}
            outcome => events.push(outcome),
        }
    }

    assert_eq!(
        events,
        vec![
            TickOutcome::Progressed(40.0),
            TickOutcome::Progressed(80.0),
            TickOutcome::Completed { stored_ref: "[File: team.csv]".to_owned() },
        ]
    );
    assert!(driver.is_finished());
}

#[test]
fn cancelled_driver_stops_immediately() {
    let mut state = uploading("team.csv");
    let task = UploadTask::new();
    let mut driver = UploadDriver::new(FixedTransport(10.0), task.token());

    assert_eq!(driver.tick(&mut state), TickOutcome::Progressed(10.0));
    task.cancel();

    assert!(driver.is_finished());
    assert_eq!(driver.tick(&mut state), TickOutcome::Ignored);
    assert_eq!(state.progress(), Some(10.0));
}

#[test]
fn driver_finishes_when_selection_is_removed() {
    let mut state = uploading("team.csv");
    let mut driver = UploadDriver::new(FixedTransport(10.0), CancelToken::default());
    driver.tick(&mut state);

    state.remove_selection();

    assert_eq!(driver.tick(&mut state), TickOutcome::Ignored);
    assert!(driver.is_finished());
}

// =============================================================
// End to end
// =============================================================

#[test]
fn select_upload_then_remove() {
    let mut state = IntakeState::default();
    let mut phases = vec![state.phase.clone()];

    state
        .submit_file(FileDescriptor::new("team.csv", 2 * 1024 * 1024))
        .expect("team.csv is valid");
    phases.push(state.phase.clone());

    let mut driver = UploadDriver::new(simulated(3), CancelToken::default());
    while !driver.is_finished() {
        if let TickOutcome::Completed { .. } = driver.tick(&mut state) {
            phases.push(IntakePhase::Uploading { progress: state.progress_bar });
        }
        phases.push(state.phase.clone());
    }

    assert_eq!(phases.first(), Some(&IntakePhase::Idle));
    assert_eq!(phases.get(1), Some(&IntakePhase::Uploading { progress: 0.0 }));
    let tail = &phases[phases.len() - 2..];
    assert_eq!(tail[0], IntakePhase::Uploading { progress: 100.0 });
    assert_eq!(tail[1], IntakePhase::Succeeded { stored_ref: "[File: team.csv]".to_owned() });
    assert_eq!(state.hidden_field_value(), "[File: team.csv]");
    assert_eq!(state.uploaded_name(), Some("team.csv"));

    state.remove_selection();

    assert_eq!(state.phase, IntakePhase::Idle);
    assert_eq!(state.hidden_field_value(), "");
    assert!(!state.success_visible());
    assert!(!state.progress_visible());
}
