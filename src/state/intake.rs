//! Group-order file intake: validation, drag-and-drop marking, and upload phases.
//!
//! DESIGN
//! ======
//! Validation is synchronous and runs before any state changes; a rejected
//! file leaves the intake exactly as it was. An accepted file enters
//! `Uploading(0)` and progress only moves forward until it is clamped to 100,
//! at which point the phase becomes `Succeeded` exactly once.

#[cfg(test)]
#[path = "intake_test.rs"]
mod intake_test;

/// Largest accepted file, in bytes (10 MiB).
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted extensions, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["doc", "docx", "xls", "xlsx", "csv", "pdf", "txt"];

/// `accept` attribute for the file input.
pub const ACCEPT_ATTR: &str = ".doc,.docx,.xls,.xlsx,.csv,.pdf,.txt";

/// Upper bound of the progress percentage.
pub const PROGRESS_COMPLETE: f64 = 100.0;

/// A user-selected file as seen by validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub size_bytes: u64,
    /// Lowercased text after the final `.`, empty when the name has none.
    pub extension: String,
}

impl FileDescriptor {
    pub fn new(name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        Self { name, size_bytes, extension }
    }
}

/// Reasons a file is refused. `Display` is the notice shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("File is too large. Maximum size is 10MB.")]
    TooLarge { size_bytes: u64 },
    #[error("Invalid file type. Please upload a Word, Excel, CSV, PDF, or TXT file.")]
    BadType { extension: String },
}

/// Check size first, then type.
pub fn validate(file: &FileDescriptor) -> Result<(), IntakeError> {
    if file.size_bytes > MAX_FILE_BYTES {
        return Err(IntakeError::TooLarge { size_bytes: file.size_bytes });
    }
    if !ALLOWED_EXTENSIONS.contains(&file.extension.as_str()) {
        return Err(IntakeError::BadType { extension: file.extension.clone() });
    }
    Ok(())
}

/// Placeholder reference the form submits in place of an uploaded file URL.
#[must_use]
pub fn stored_reference(file_name: &str) -> String {
    format!("[File: {file_name}]")
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum IntakePhase {
    #[default]
    Idle,
    Uploading {
        progress: f64,
    },
    Succeeded {
        stored_ref: String,
    },
}

/// Result of one upload tick.
#[derive(Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Progress advanced but has not reached 100.
    Progressed(f64),
    /// Progress reached exactly 100 and the phase is now `Succeeded`.
    Completed { stored_ref: String },
    /// Not uploading; nothing changed.
    Ignored,
}

/// Drag lifecycle events on the drop target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    Enter,
    Over,
    Leave,
    Drop,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntakeState {
    pub selected: Option<FileDescriptor>,
    pub phase: IntakePhase,
    /// Drop target is showing its `--dragover` mark.
    pub drag_active: bool,
    /// Width of the progress indicator, in percent.
    pub progress_bar: f64,
}

impl IntakeState {
    /// Validate `file` and, if accepted, start a fresh upload at 0%.
    ///
    /// Any previous selection or upload is replaced. On error nothing changes.
    pub fn submit_file(&mut self, file: FileDescriptor) -> Result<(), IntakeError> {
        validate(&file)?;
        self.selected = Some(file);
        self.phase = IntakePhase::Uploading { progress: 0.0 };
        self.progress_bar = 0.0;
        Ok(())
    }

    /// Advance upload progress by `increment` percent.
    pub fn advance(&mut self, increment: f64) -> TickOutcome {
        let IntakePhase::Uploading { progress } = self.phase else {
            return TickOutcome::Ignored;
        };
        let next = (progress + increment.max(0.0)).min(PROGRESS_COMPLETE);
        self.progress_bar = next;
        if next < PROGRESS_COMPLETE {
            self.phase = IntakePhase::Uploading { progress: next };
            return TickOutcome::Progressed(next);
        }

        let name = self.selected.as_ref().map_or("", |file| file.name.as_str());
        let stored_ref = stored_reference(name);
        self.phase = IntakePhase::Succeeded { stored_ref: stored_ref.clone() };
        TickOutcome::Completed { stored_ref }
    }

    /// Drop the selection and return to `Idle` from any phase.
    pub fn remove_selection(&mut self) {
        self.selected = None;
        self.phase = IntakePhase::Idle;
        self.progress_bar = 0.0;
    }

    pub fn drag(&mut self, phase: DragPhase) {
        self.drag_active = matches!(phase, DragPhase::Enter | DragPhase::Over);
    }

    /// Handle a drop: clear the drag mark and submit the first file, if any.
    ///
    /// Returns `Ok(false)` when nothing was dropped.
    pub fn accept_drop(&mut self, files: Vec<FileDescriptor>) -> Result<bool, IntakeError> {
        self.drag(DragPhase::Drop);
        let Some(first) = files.into_iter().next() else {
            return Ok(false);
        };
        self.submit_file(first)?;
        Ok(true)
    }

    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        match self.phase {
            IntakePhase::Uploading { progress } => Some(progress),
            _ => None,
        }
    }

    #[must_use]
    pub fn stored_ref(&self) -> Option<&str> {
        match &self.phase {
            IntakePhase::Succeeded { stored_ref } => Some(stored_ref),
            _ => None,
        }
    }

    /// Value of the hidden form field.
    #[must_use]
    pub fn hidden_field_value(&self) -> String {
        self.stored_ref().unwrap_or_default().to_owned()
    }

    #[must_use]
    pub fn progress_visible(&self) -> bool {
        matches!(self.phase, IntakePhase::Uploading { .. })
    }

    #[must_use]
    pub fn success_visible(&self) -> bool {
        matches!(self.phase, IntakePhase::Succeeded { .. })
    }

    /// File name shown in the success panel.
    #[must_use]
    pub fn uploaded_name(&self) -> Option<&str> {
        if !self.success_visible() {
            return None;
        }
        self.selected.as_ref().map(|file| file.name.as_str())
    }
}
