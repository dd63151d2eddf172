use super::*;

fn file(name: &str, size_bytes: u64) -> FileDescriptor {
    FileDescriptor::new(name, size_bytes)
}

// =============================================================
// FileDescriptor
// =============================================================

#[test]
fn extension_is_lowercased_text_after_final_dot() {
    assert_eq!(file("report.PDF", 1).extension, "pdf");
    assert_eq!(file("archive.tar.CSV", 1).extension, "csv");
    assert_eq!(file("README", 1).extension, "");
}

// =============================================================
// validate
// =============================================================

#[test]
fn exact_size_limit_is_accepted() {
    assert_eq!(validate(&file("team.csv", 10_485_760)), Ok(()));
}

#[test]
fn one_byte_over_limit_is_too_large() {
    assert_eq!(
        validate(&file("team.csv", 10_485_761)),
        Err(IntakeError::TooLarge { size_bytes: 10_485_761 })
    );
}

#[test]
fn extension_match_is_case_insensitive() {
    assert_eq!(validate(&file("report.PDF", 1024)), Ok(()));
    assert_eq!(validate(&file("Roster.XlSx", 1024)), Ok(()));
}

#[test]
fn disallowed_extension_is_bad_type() {
    assert_eq!(
        validate(&file("report.exe", 1024)),
        Err(IntakeError::BadType { extension: "exe".to_owned() })
    );
}

#[test]
fn name_without_extension_is_bad_type() {
    assert_eq!(validate(&file("csv", 1024)), Err(IntakeError::BadType { extension: String::new() }));
}

#[test]
fn size_is_checked_before_type() {
    assert!(matches!(validate(&file("huge.exe", MAX_FILE_BYTES + 1)), Err(IntakeError::TooLarge { .. })));
}

#[test]
fn error_messages_are_user_facing_notices() {
    assert_eq!(
        IntakeError::TooLarge { size_bytes: 1 }.to_string(),
        "File is too large. Maximum size is 10MB."
    );
    assert_eq!(
        IntakeError::BadType { extension: "exe".to_owned() }.to_string(),
        "Invalid file type. Please upload a Word, Excel, CSV, PDF, or TXT file."
    );
}

#[test]
fn accept_attr_lists_every_allowed_extension() {
    for ext in ALLOWED_EXTENSIONS {
        assert!(ACCEPT_ATTR.split(',').any(|item| item == format!(".{ext}")), "missing {ext}");
    }
}

// =============================================================
// submit_file
// =============================================================

#[test]
fn accepted_file_starts_upload_at_zero() {
    let mut state = IntakeState::default();
    assert_eq!(state.submit_file(file("team.csv", 2_000_000)), Ok(()));
    assert_eq!(state.phase, IntakePhase::Uploading { progress: 0.0 });
    assert!(state.progress_visible());
    assert!(!state.success_visible());
}

#[test]
fn rejected_file_leaves_idle_state_unchanged() {
    let mut state = IntakeState::default();
    let before = state.clone();
    assert!(state.submit_file(file("report.exe", 10)).is_err());
    assert_eq!(state, before);
}

#[test]
fn rejected_file_keeps_previous_upload() {
    let mut state = IntakeState::default();
    state.submit_file(file("team.csv", 10)).expect("valid file");
    state.advance(100.0);
    let before = state.clone();

    assert!(state.submit_file(file("big.pdf", MAX_FILE_BYTES + 1)).is_err());
    assert_eq!(state, before);
    assert_eq!(state.hidden_field_value(), "[File: team.csv]");
}

// =============================================================
// advance
// =============================================================

#[test]
fn advance_is_ignored_when_idle() {
    let mut state = IntakeState::default();
    assert_eq!(state.advance(25.0), TickOutcome::Ignored);
    assert_eq!(state.phase, IntakePhase::Idle);
}

#[test]
fn advance_clamps_to_exactly_one_hundred_and_completes() {
    let mut state = IntakeState::default();
    state.submit_file(file("team.csv", 10)).expect("valid file");
    assert_eq!(state.advance(60.0), TickOutcome::Progressed(60.0));
    assert_eq!(
        state.advance(60.0),
        TickOutcome::Completed { stored_ref: "[File: team.csv]".to_owned() }
    );
    assert_eq!(state.progress_bar, 100.0);
    assert_eq!(state.stored_ref(), Some("[File: team.csv]"));
}

#[test]
fn advance_after_completion_is_ignored() {
    let mut state = IntakeState::default();
    state.submit_file(file("team.csv", 10)).expect("valid file");
    state.advance(100.0);
    let done = state.clone();
    assert_eq!(state.advance(10.0), TickOutcome::Ignored);
    assert_eq!(state, done);
}

#[test]
fn negative_increment_never_moves_progress_backwards() {
    let mut state = IntakeState::default();
    state.submit_file(file("team.csv", 10)).expect("valid file");
    state.advance(40.0);
    assert_eq!(state.advance(-10.0), TickOutcome::Progressed(40.0));
}

// =============================================================
// remove_selection
// =============================================================

#[test]
fn remove_from_succeeded_resets_everything() {
    let mut state = IntakeState::default();
    state.submit_file(file("team.csv", 10)).expect("valid file");
    state.advance(100.0);

    state.remove_selection();

    assert_eq!(state.phase, IntakePhase::Idle);
    assert_eq!(state.hidden_field_value(), "");
    assert!(state.selected.is_none());
    assert!(!state.progress_visible());
    assert!(!state.success_visible());
}

#[test]
fn remove_from_uploading_resets_everything() {
    let mut state = IntakeState::default();
    state.submit_file(file("team.csv", 10)).expect("valid file");
    state.advance(30.0);

    state.remove_selection();

    assert_eq!(state.phase, IntakePhase::Idle);
    assert_eq!(state.progress_bar, 0.0);
    assert_eq!(state.advance(30.0), TickOutcome::Ignored);
}

// =============================================================
// Drag and drop
// =============================================================

#[test]
fn drag_enter_and_over_mark_active() {
    let mut state = IntakeState::default();
    state.drag(DragPhase::Enter);
    assert!(state.drag_active);
    state.drag(DragPhase::Over);
    assert!(state.drag_active);
    state.drag(DragPhase::Leave);
    assert!(!state.drag_active);
    state.drag(DragPhase::Over);
    state.drag(DragPhase::Drop);
    assert!(!state.drag_active);
}

#[test]
fn drop_honors_only_the_first_file() {
    let mut state = IntakeState::default();
    state.drag(DragPhase::Over);

    let accepted = state.accept_drop(vec![file("first.pdf", 10), file("second.exe", 10)]);

    assert_eq!(accepted, Ok(true));
    assert!(!state.drag_active);
    assert_eq!(state.selected.as_ref().map(|f| f.name.as_str()), Some("first.pdf"));
}

#[test]
fn empty_drop_only_clears_mark() {
    let mut state = IntakeState::default();
    state.drag(DragPhase::Enter);
    assert_eq!(state.accept_drop(Vec::new()), Ok(false));
    assert!(!state.drag_active);
    assert_eq!(state.phase, IntakePhase::Idle);
}

#[test]
fn invalid_first_drop_is_rejected() {
    let mut state = IntakeState::default();
    let result = state.accept_drop(vec![file("virus.exe", 10), file("ok.pdf", 10)]);
    assert!(matches!(result, Err(IntakeError::BadType { .. })));
    assert_eq!(state.phase, IntakePhase::Idle);
    assert!(!state.drag_active);
}
