//! The contact form: validators, snapshots and the unsaved-changes guard.
//!
//! ```rust,ignore
//! use localized_form::form::{Field, ReactiveForm, UnsavedChangesGuard};
//! use localized_form::i18n::Language;
//!
//! let mut form = ReactiveForm::new(Language::SPANISH);
//! form.set_value(Field::Name, "Juan");
//!
//! // Dirty: the prompt is asked before navigation proceeds
//! let leave = UnsavedChangesGuard.can_deactivate(&mut form, &mut prompt);
//! ```

mod guard;
mod snapshot;
mod validators;

pub use guard::{CanDeactivate, GuardState, Prompt, ReactiveForm, SubmitOutcome, UnsavedChangesGuard};
pub use snapshot::FormSnapshot;
pub use validators::{
    keep_only_digits, validate_field, Field, Rule, Violation, AGE_MAX, AGE_MIN, NAME_MIN_LENGTH,
};
