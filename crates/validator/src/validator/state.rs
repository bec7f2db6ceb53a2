//! Error state: field name → message-or-null, plus the first-invalid pointer.
//!
//! `Some(message)` means evaluated-and-failed, `None` means evaluated-valid,
//! an absent key means never evaluated. The first-invalid pointer tracks the
//! first field (by evaluation order) currently in error and is updated in
//! the same mutation as the error map, so readers never observe the two out
//! of sync.

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub(crate) struct ErrorState {
    errors: IndexMap<String, Option<String>>,
    first_invalid: Option<String>,
}

impl ErrorState {
    /// Records a rule failure; tracks the focus pointer when enabled.
    pub(crate) fn set_failure(&mut self, field: &str, message: String, track_focus: bool) {
        self.errors.insert(field.to_owned(), Some(message));
        if track_focus && self.first_invalid.is_none() {
            self.first_invalid = Some(field.to_owned());
        }
    }

    /// Records an async execution fault. The pointer is not touched — the
    /// generic message is not an actionable field error to focus.
    pub(crate) fn set_fault(&mut self, field: &str, message: String) {
        self.errors.insert(field.to_owned(), Some(message));
    }

    /// Records a successful evaluation.
    pub(crate) fn set_valid(&mut self, field: &str) {
        self.errors.insert(field.to_owned(), None);
        if self.first_invalid.as_deref() == Some(field) {
            self.first_invalid = None;
        }
    }

    /// Clears one field's error (creates an evaluated-valid entry).
    pub(crate) fn clear(&mut self, field: &str) {
        self.set_valid(field);
    }

    /// Nulls every present entry and drops the pointer. Keys are kept, so
    /// "evaluated, valid" stays distinguishable from "never evaluated" in
    /// the raw map.
    pub(crate) fn reset(&mut self) {
        for value in self.errors.values_mut() {
            *value = None;
        }
        self.first_invalid = None;
    }

    /// Truthy-error check: a present, non-empty message.
    pub(crate) fn is_invalid(&self, field: &str) -> bool {
        matches!(self.errors.get(field), Some(Some(message)) if !message.is_empty())
    }

    pub(crate) fn get(&self, field: &str) -> Option<String> {
        self.errors.get(field).and_then(Clone::clone)
    }

    pub(crate) fn snapshot(&self) -> IndexMap<String, Option<String>> {
        self.errors.clone()
    }

    pub(crate) fn first_invalid(&self) -> Option<String> {
        self.first_invalid.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_tracks_first_failure_only() {
        let mut state = ErrorState::default();
        state.set_failure("a", "bad".into(), true);
        state.set_failure("b", "bad".into(), true);
        assert_eq!(state.first_invalid().as_deref(), Some("a"));

        // Recovering `b` leaves the pointer on `a`.
        state.set_valid("b");
        assert_eq!(state.first_invalid().as_deref(), Some("a"));

        state.set_valid("a");
        assert_eq!(state.first_invalid(), None);
    }

    #[test]
    fn fault_does_not_move_pointer() {
        let mut state = ErrorState::default();
        state.set_fault("a", "generic".into());
        assert_eq!(state.first_invalid(), None);
        assert!(state.is_invalid("a"));
    }

    #[test]
    fn reset_keeps_keys() {
        let mut state = ErrorState::default();
        state.set_failure("a", "bad".into(), true);
        state.reset();
        assert!(!state.is_invalid("a"));
        assert!(state.snapshot().contains_key("a"));
        assert_eq!(state.first_invalid(), None);
    }

    #[test]
    fn absent_and_valid_read_the_same_through_queries() {
        let mut state = ErrorState::default();
        state.set_valid("seen");
        assert!(!state.is_invalid("seen"));
        assert!(!state.is_invalid("never"));
        assert_eq!(state.get("seen"), None);
        assert_eq!(state.get("never"), None);
    }
}
