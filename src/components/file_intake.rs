//! Group-order file upload area: picker, drag-and-drop, progress, success panel.
//!
//! ARCHITECTURE
//! ============
//! [`IntakeState`] lives in a signal and every visible element derives from it.
//! The simulated upload runs as a local task that sleeps between ticks and
//! exits as soon as its [`UploadDriver`] reports finished, either because the
//! state reached 100% or because the [`UploadTask`] was cancelled by a remove
//! or a newer selection.

#[cfg(test)]
#[path = "file_intake_test.rs"]
mod file_intake_test;

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use crate::app::use_config;
#[cfg(feature = "hydrate")]
use crate::config::UploadTiming;
#[cfg(any(feature = "hydrate", test))]
use crate::state::intake::FileDescriptor;
use crate::state::intake::{ACCEPT_ATTR, DragPhase, IntakeState};
#[cfg(feature = "hydrate")]
use crate::state::intake::{IntakeError, TickOutcome};
use crate::state::upload::UploadTask;
#[cfg(feature = "hydrate")]
use crate::state::upload::{SimulatedTransport, UploadDriver};
#[cfg(feature = "hydrate")]
use crate::util::notice::blocking_notice;

const AREA_CLASS: &str = "product-customizer__upload-area";
const AREA_DRAGOVER_CLASS: &str = "product-customizer__upload-area--dragover";

fn area_class(drag_active: bool) -> String {
    if drag_active { format!("{AREA_CLASS} {AREA_DRAGOVER_CLASS}") } else { AREA_CLASS.to_owned() }
}

fn display(visible: bool) -> &'static str {
    if visible { "block" } else { "none" }
}

#[cfg(feature = "hydrate")]
fn reject(err: &IntakeError) {
    log::info!("file rejected: {err:?}");
    blocking_notice(&err.to_string());
}

/// A drop overwrites the file input's selection only when it carried files.
#[cfg(any(feature = "hydrate", test))]
fn drop_replaces_selection(dropped: &[FileDescriptor]) -> bool {
    !dropped.is_empty()
}

/// Mark the drop target, notifying only when the mark actually changes.
fn set_drag(intake: RwSignal<IntakeState>, phase: DragPhase) {
    intake.maybe_update(|state| {
        let before = state.drag_active;
        state.drag(phase);
        before != state.drag_active
    });
}

fn cancel_upload(task: StoredValue<Option<UploadTask>>) {
    task.try_update_value(|slot| {
        if let Some(running) = slot.take() {
            running.cancel();
        }
    });
}

/// Start a simulated upload for the file `intake` has just accepted.
#[cfg(feature = "hydrate")]
fn spawn_upload(intake: RwSignal<IntakeState>, task: StoredValue<Option<UploadTask>>, timing: UploadTiming) {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    let upload = UploadTask::new();
    let token = upload.token();
    task.update_value(|slot| {
        if let Some(previous) = slot.replace(upload) {
            previous.cancel();
        }
    });

    let rng = StdRng::seed_from_u64(js_sys::Date::now().to_bits());
    let mut driver = UploadDriver::new(SimulatedTransport::new(rng, timing.min_step, timing.max_step), token);
    let interval = Duration::from_millis(u64::from(timing.tick_interval_ms));

    leptos::task::spawn_local(async move {
        loop {
            gloo_timers::future::sleep(interval).await;
            if driver.is_finished() {
                break;
            }
            match intake.try_update(|state| driver.tick(state)) {
                Some(TickOutcome::Progressed(progress)) => log::trace!("upload at {progress:.0}%"),
                Some(TickOutcome::Completed { stored_ref }) => {
                    log::info!("upload complete: {stored_ref}");
                    break;
                }
                Some(TickOutcome::Ignored) | None => break,
            }
        }
    });
}

/// Validate `file` and start uploading it.
#[cfg(feature = "hydrate")]
fn intake_file(
    intake: RwSignal<IntakeState>,
    task: StoredValue<Option<UploadTask>>,
    timing: UploadTiming,
    file: FileDescriptor,
) {
    match intake.try_update(|state| state.submit_file(file)) {
        Some(Ok(())) => spawn_upload(intake, task, timing),
        Some(Err(err)) => reject(&err),
        None => {}
    }
}

#[component]
pub fn FileIntake(input_id: String, field_name: String) -> impl IntoView {
    let intake = RwSignal::new(IntakeState::default());
    let task = StoredValue::new(None::<UploadTask>);
    let input_ref = NodeRef::<leptos::html::Input>::new();
    #[cfg(feature = "hydrate")]
    let timing = use_config().upload;

    on_cleanup(move || cancel_upload(task));

    let on_change = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(input) = input_ref.get_untracked() else {
                return;
            };
            let Some(files) = input.files() else {
                return;
            };
            if let Some(first) = crate::util::dom::file_descriptors(&files).into_iter().next() {
                intake_file(intake, task, timing, first);
            }
        }
    };

    let on_area_click = move |_| {
        #[cfg(feature = "hydrate")]
        if let Some(input) = input_ref.get_untracked() {
            input.click();
        }
    };

    let on_dragenter = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        set_drag(intake, DragPhase::Enter);
    };
    let on_dragover = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        set_drag(intake, DragPhase::Over);
    };
    let on_dragleave = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        set_drag(intake, DragPhase::Leave);
    };

    let on_drop = {
        #[cfg(feature = "hydrate")]
        {
            move |ev: leptos::ev::DragEvent| {
                ev.prevent_default();
                let Some(files) = ev.data_transfer().and_then(|transfer| transfer.files()) else {
                    set_drag(intake, DragPhase::Drop);
                    return;
                };
                let dropped = crate::util::dom::file_descriptors(&files);
                if drop_replaces_selection(&dropped) {
                    if let Some(input) = input_ref.get_untracked() {
                        input.set_files(Some(&files));
                    }
                }
                match intake.try_update(|state| state.accept_drop(dropped)) {
                    Some(Ok(true)) => spawn_upload(intake, task, timing),
                    Some(Err(err)) => reject(&err),
                    Some(Ok(false)) | None => {}
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            move |ev: leptos::ev::DragEvent| {
                ev.prevent_default();
                set_drag(intake, DragPhase::Drop);
            }
        }
    };

    let on_remove = move |_| {
        cancel_upload(task);
        intake.update(IntakeState::remove_selection);
        #[cfg(feature = "hydrate")]
        if let Some(input) = input_ref.get_untracked() {
            input.set_value("");
        }
    };

    view! {
        <div class="product-customizer__upload">
            <input
                type="file"
                id=input_id
                class="product-customizer__file-input"
                accept=ACCEPT_ATTR
                style:display="none"
                node_ref=input_ref
                on:change=on_change
            />
            <div
                id="upload-area"
                class=move || area_class(intake.with(|state| state.drag_active))
                on:click=on_area_click
                on:dragenter=on_dragenter
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:drop=on_drop
            >
                <p class="product-customizer__upload-text">"Drag and drop your file here, or click to browse"</p>
                <p class="product-customizer__upload-hint">"Word, Excel, CSV, PDF or TXT, up to 10MB"</p>
            </div>
            <div id="upload-progress" class="product-customizer__progress" style:display=move || display(intake.with(IntakeState::progress_visible))>
                <div
                    id="upload-progress-bar"
                    class="product-customizer__progress-bar"
                    style:width=move || format!("{}%", intake.with(|state| state.progress_bar))
                ></div>
            </div>
            <div id="upload-success" class="product-customizer__success" style:display=move || display(intake.with(IntakeState::success_visible))>
                <span id="upload-filename">{move || intake.with(|state| state.uploaded_name().unwrap_or_default().to_owned())}</span>
                <button type="button" id="remove-file" class="product-customizer__remove" on:click=on_remove>
                    "Remove"
                </button>
            </div>
            <input
                type="hidden"
                id="group-order-file-url"
                name=field_name
                prop:value=move || intake.with(IntakeState::hidden_field_value)
            />
        </div>
    }
}
