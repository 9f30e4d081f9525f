//! The reactive form and its unsaved-changes guard.
//!
//! A form is CLEAN while its current snapshot equals the initial one and
//! DIRTY otherwise. Leaving a DIRTY form needs the user's confirmation;
//! closing the page while DIRTY raises the host's native prompt.

use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

use super::validators::{keep_only_digits, validate_field};
use super::{Field, FormSnapshot, Violation};
use crate::i18n::Language;

/// Blocking user interaction supplied by the host (browser dialogs, a
/// terminal, a test double). Calls do not return until the user answers.
pub trait Prompt {
    /// Ask a yes/no question; `true` means the user confirmed.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show an informational notice.
    fn notify(&mut self, message: &str);
}

/// A view that can veto navigation away from itself.
pub trait CanDeactivate {
    /// Views without unsaved state can always be left.
    fn can_deactivate(&mut self, _prompt: &mut dyn Prompt) -> bool {
        true
    }
}

/// Route guard attached to navigations leaving a guarded view.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsavedChangesGuard;

impl UnsavedChangesGuard {
    pub fn can_deactivate(&self, component: &mut dyn CanDeactivate, prompt: &mut dyn Prompt) -> bool {
        let allowed = component.can_deactivate(prompt);
        debug!("Navigation {}", if allowed { "allowed" } else { "blocked" });
        allowed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Clean,
    Dirty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was valid and has been reset.
    Accepted,
    /// At least one field failed validation; nothing was reset.
    Rejected(BTreeMap<Field, BTreeSet<Violation>>),
}

/// The contact form: name, email, age and category.
#[derive(Debug, Clone)]
pub struct ReactiveForm {
    locale: Language,
    values: FormSnapshot,
    initial: FormSnapshot,
    submitted: bool,
    edited: BTreeSet<Field>,
}

impl ReactiveForm {
    /// A blank form whose messages and prompts use `locale`.
    pub fn new(locale: Language) -> Self {
        let values = FormSnapshot::blank();
        Self {
            locale,
            initial: values.clone(),
            values,
            submitted: false,
            edited: BTreeSet::new(),
        }
    }

    pub fn locale(&self) -> Language {
        self.locale
    }

    pub fn value(&self, field: Field) -> &Value {
        self.values.get(field)
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.values
    }

    pub fn initial_snapshot(&self) -> &FormSnapshot {
        &self.initial
    }

    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<Value>) {
        self.values.set(field, value);
        self.edited.insert(field);
    }

    /// Feed raw keyboard input to the age field.
    ///
    /// Non-digits are stripped before the value reaches the field; the
    /// cleaned text is returned so the caller can write it back to the
    /// input element.
    pub fn input_age(&mut self, raw: &str) -> String {
        let cleaned = keep_only_digits(raw);
        self.set_value(Field::Age, cleaned.clone());
        cleaned
    }

    pub fn errors(&self, field: Field) -> BTreeSet<Violation> {
        validate_field(field, self.values.get(field))
    }

    /// Violations of every invalid field.
    pub fn all_errors(&self) -> BTreeMap<Field, BTreeSet<Violation>> {
        Field::ALL
            .iter()
            .map(|&field| (field, self.errors(field)))
            .filter(|(_, violations)| !violations.is_empty())
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        Field::ALL.iter().all(|&field| self.errors(field).is_empty())
    }

    /// Localized messages to display for `field`.
    ///
    /// Empty until the field has been edited or a submission was attempted,
    /// so a fresh form does not open covered in errors.
    pub fn visible_errors(&self, field: Field) -> Vec<String> {
        if !self.submitted && !self.edited.contains(&field) {
            return Vec::new();
        }

        let strings = self.locale.strings();
        self.errors(field)
            .iter()
            .map(|violation| violation.message(strings))
            .collect()
    }

    pub fn state(&self) -> GuardState {
        if self.values == self.initial {
            GuardState::Clean
        } else {
            GuardState::Dirty
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.state() == GuardState::Dirty
    }

    /// Whether closing the page should raise the host's native
    /// "leave site?" prompt. No custom text is supplied.
    pub fn before_unload(&self) -> bool {
        self.is_dirty()
    }

    /// Attempt to submit.
    ///
    /// Always marks the form as submitted. A valid form shows the success
    /// notice and is reset, which makes it CLEAN again.
    pub fn submit(&mut self, prompt: &mut dyn Prompt) -> SubmitOutcome {
        self.submitted = true;

        let errors = self.all_errors();
        if !errors.is_empty() {
            debug!("Submission rejected: {} invalid field(s)", errors.len());
            return SubmitOutcome::Rejected(errors);
        }

        info!("Form submitted");
        prompt.notify(self.locale.strings().submit_success);
        self.reset();
        SubmitOutcome::Accepted
    }

    /// Clear every field to `null` and adopt that as the new initial state.
    pub fn reset(&mut self) {
        self.values = FormSnapshot::cleared();
        self.initial = self.values.clone();
        self.submitted = false;
        self.edited.clear();
    }
}

impl CanDeactivate for ReactiveForm {
    fn can_deactivate(&mut self, prompt: &mut dyn Prompt) -> bool {
        if !self.is_dirty() {
            return true;
        }

        prompt.confirm(self.locale.strings().unsaved_changes_confirm)
    }
}
