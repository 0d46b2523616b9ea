use crate::effect::FORM_RESET_DELAY;
use crate::validation::{validate, ValidationErrors};
use crate::{Effect, Field, RequestFailure, UserDraft};

pub type ResetToken = u64;

pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to submit form";
pub const SUBMIT_SUCCESS_MESSAGE: &str = "Form submitted successfully and saved to database!";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

/// Raised by the form for its owner; carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormNotice {
    UserAdded,
}

/// Submission flow: draft, per-field errors, and the submit lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    draft: UserDraft,
    errors: ValidationErrors,
    submission: SubmissionState,
    pending_reset: Option<ResetToken>,
    next_reset_token: ResetToken,
    disposed: bool,
    changed: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionState::Submitting
    }

    pub fn pending_reset(&self) -> Option<ResetToken> {
        self.pending_reset
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Returns whether anything changed since the last call, then resets.
    pub(crate) fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    pub fn update_field(&mut self, field: Field, value: String) {
        if self.disposed {
            return;
        }
        if self.draft.get(field) != value {
            self.draft.set(field, value);
            self.changed = true;
        }
        if self.errors.clear(field) {
            self.changed = true;
        }
    }

    /// Validates and, if clean, starts a create request.
    ///
    /// Returns no effects when validation fails or a request is already
    /// in flight.
    pub fn submit(&mut self) -> Vec<Effect> {
        if self.disposed || self.is_submitting() {
            return Vec::new();
        }

        let errors = validate(&self.draft);
        if errors != self.errors {
            self.errors = errors;
            self.changed = true;
        }
        if !self.errors.is_empty() {
            return Vec::new();
        }

        let mut effects = Vec::with_capacity(2);
        // A reset left over from an earlier success must not wipe this draft.
        if let Some(token) = self.pending_reset.take() {
            effects.push(Effect::CancelFormReset { token });
        }
        self.submission = SubmissionState::Submitting;
        self.changed = true;
        effects.push(Effect::CreateUser {
            draft: self.draft.clone(),
        });
        effects
    }

    /// Applies the create response. Every branch leaves `Submitting`.
    pub fn apply_create_result(
        &mut self,
        result: Result<(), RequestFailure>,
    ) -> (Vec<Effect>, Option<FormNotice>) {
        match result {
            Ok(()) if self.disposed => (Vec::new(), Some(FormNotice::UserAdded)),
            Ok(()) => {
                self.submission = SubmissionState::Succeeded;
                self.next_reset_token += 1;
                let token = self.next_reset_token;
                self.pending_reset = Some(token);
                self.changed = true;
                (
                    vec![Effect::ScheduleFormReset {
                        token,
                        delay: FORM_RESET_DELAY,
                    }],
                    Some(FormNotice::UserAdded),
                )
            }
            Err(_) if self.disposed => (Vec::new(), None),
            Err(failure) => {
                self.submission =
                    SubmissionState::Failed(failure.banner_text(SUBMIT_FALLBACK_MESSAGE));
                self.changed = true;
                (Vec::new(), None)
            }
        }
    }

    /// Clears the draft once the success banner has been shown long enough.
    /// Tokens that are no longer pending are ignored.
    pub fn reset_elapsed(&mut self, token: ResetToken) {
        if self.disposed || self.pending_reset != Some(token) {
            return;
        }
        self.pending_reset = None;
        self.draft.clear();
        self.submission = SubmissionState::Idle;
        self.changed = true;
    }

    /// Tears the form down, releasing any pending reset timer.
    pub fn dispose(&mut self) -> Vec<Effect> {
        if self.disposed {
            return Vec::new();
        }
        self.disposed = true;
        self.changed = true;
        self.pending_reset
            .take()
            .map(|token| Effect::CancelFormReset { token })
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> FormState {
        let mut form = FormState::new();
        form.update_field(Field::Name, "Jane Doe".to_string());
        form.update_field(Field::Mobile, "9876543210".to_string());
        form.update_field(Field::Email, "jane@example.com".to_string());
        form
    }

    #[test]
    fn submit_is_ignored_while_in_flight() {
        let mut form = valid_form();
        assert_eq!(form.submit().len(), 1);
        assert!(form.submit().is_empty());
        assert!(form.is_submitting());
    }

    #[test]
    fn reset_tokens_increase_per_success() {
        let mut form = valid_form();
        form.submit();
        form.apply_create_result(Ok(()));
        let first = form.pending_reset().unwrap();

        let effects = form.submit();
        assert_eq!(effects[0], Effect::CancelFormReset { token: first });
        form.apply_create_result(Ok(()));
        let second = form.pending_reset().unwrap();
        assert!(second > first);

        form.reset_elapsed(first);
        assert_eq!(form.draft().name, "Jane Doe");
        form.reset_elapsed(second);
        assert!(form.draft().is_empty());
    }

    #[test]
    fn disposed_form_still_reports_creation_without_scheduling() {
        let mut form = valid_form();
        form.submit();
        assert!(form.dispose().is_empty());

        let (effects, notice) = form.apply_create_result(Ok(()));
        assert!(effects.is_empty());
        assert_eq!(notice, Some(FormNotice::UserAdded));
        assert_eq!(form.pending_reset(), None);
    }

    #[test]
    fn only_real_edits_count_as_changes() {
        let mut form = valid_form();
        assert!(form.take_changed());

        form.update_field(Field::Name, "Jane Doe".to_string());
        assert!(!form.take_changed());

        form.update_field(Field::Name, String::new());
        form.submit();
        assert!(form.take_changed());
        form.submit();
        assert!(!form.take_changed());

        form.update_field(Field::Name, "Jane".to_string());
        assert!(form.take_changed());
    }
}
