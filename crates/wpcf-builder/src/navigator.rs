//! Multi-step navigation state.

use wpcf_storage::MultiStepSettings;

/// Position within a fixed, ordered list of steps.
///
/// The index starts at 0 and stays within `0..len` for non-empty lists.
/// Transitions that are not currently offered are no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    index: usize,
    len: usize,
    next_label: String,
    prev_label: String,
}

impl Navigator {
    /// Start at the first of `len` steps, with labels from `settings`.
    #[must_use]
    pub fn new(len: usize, settings: &MultiStepSettings) -> Self {
        Self {
            index: 0,
            len,
            next_label: settings.next_label().to_owned(),
            prev_label: settings.prev_label().to_owned(),
        }
    }

    /// Current 0-based step index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.index + 1 < self.len
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.index > 0
    }

    /// Move to the next step. Returns whether the index changed.
    pub fn advance(&mut self) -> bool {
        if self.can_advance() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous step. Returns whether the index changed.
    pub fn retreat(&mut self) -> bool {
        if self.can_retreat() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Return to the first step.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Navigation controls appear only for multi-step forms.
    #[must_use]
    pub fn shows_controls(&self) -> bool {
        self.len > 1
    }

    /// Label of the advance control.
    #[must_use]
    pub fn next_label(&self) -> &str {
        &self.next_label
    }

    /// Label of the retreat control.
    #[must_use]
    pub fn prev_label(&self) -> &str {
        &self.prev_label
    }
}
