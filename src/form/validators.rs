//! Field validators.
//!
//! Every rule is a plain `fn(&Value) -> Option<Violation>`. A field's result
//! is the set of violations from all of its rules, so several can be
//! reported at once (e.g. a two-character name with a digit).

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use crate::i18n::{fill, LanguageStrings};

pub const NAME_MIN_LENGTH: usize = 3;
pub const AGE_MIN: f64 = 18.0;
pub const AGE_MAX: f64 = 120.0;

/// Fields of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Age,
    Category,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Age, Field::Category];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Age => "age",
            Field::Category => "category",
        }
    }

    /// The rules applied to this field.
    pub fn rules(&self) -> &'static [Rule] {
        match self {
            Field::Name => NAME_RULES,
            Field::Email => EMAIL_RULES,
            Field::Age => AGE_RULES,
            Field::Category => CATEGORY_RULES,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Violation {
    Required,
    TooShort,
    ContainsDigits,
    InvalidEmail,
    NotNumeric,
    OutOfRange,
}

impl Violation {
    /// Stable code used by templates and tests, e.g. "too-short".
    pub fn code(&self) -> &'static str {
        match self {
            Violation::Required => "required",
            Violation::TooShort => "too-short",
            Violation::ContainsDigits => "contains-digits",
            Violation::InvalidEmail => "invalid-email",
            Violation::NotNumeric => "not-numeric",
            Violation::OutOfRange => "out-of-range",
        }
    }

    /// Display message in the given locale's strings.
    pub fn message(&self, strings: &LanguageStrings) -> String {
        match self {
            Violation::Required => strings.required.to_string(),
            Violation::TooShort => fill(strings.too_short, &[("min", NAME_MIN_LENGTH.to_string())]),
            Violation::ContainsDigits => strings.contains_digits.to_string(),
            Violation::InvalidEmail => strings.invalid_email.to_string(),
            Violation::NotNumeric => strings.not_numeric.to_string(),
            Violation::OutOfRange => fill(
                strings.out_of_range,
                &[("min", AGE_MIN.to_string()), ("max", AGE_MAX.to_string())],
            ),
        }
    }
}

pub type Rule = fn(&Value) -> Option<Violation>;

const NAME_RULES: &[Rule] = &[required, min_length, no_digits];
const EMAIL_RULES: &[Rule] = &[required, email];
const AGE_RULES: &[Rule] = &[required, numeric, age_range];
const CATEGORY_RULES: &[Rule] = &[required];

/// Run every rule of `field` against `value`.
pub fn validate_field(field: Field, value: &Value) -> BTreeSet<Violation> {
    field.rules().iter().filter_map(|rule| rule(value)).collect()
}

/// Strip every character that is not an ASCII digit.
pub fn keep_only_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Text of a value; `None` for null and the empty string.
fn text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(Cow::Borrowed(s)),
        other => Some(Cow::Owned(other.to_string())),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

// ==================== Rules ====================

// Apart from `required`, rules pass on empty values so an empty field only
// reports that it is missing.

fn required(value: &Value) -> Option<Violation> {
    text(value).is_none().then_some(Violation::Required)
}

fn min_length(value: &Value) -> Option<Violation> {
    let text = text(value)?;
    (text.chars().count() < NAME_MIN_LENGTH).then_some(Violation::TooShort)
}

fn no_digits(value: &Value) -> Option<Violation> {
    let text = text(value)?;
    text.chars()
        .any(|c| c.is_ascii_digit())
        .then_some(Violation::ContainsDigits)
}

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// WHATWG-style address shape: dot-atom local part, hostname labels of at
/// most 63 characters, 254 characters overall and 64 before the `@`.
fn email(value: &Value) -> Option<Violation> {
    let text = text(value)?;
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .unwrap()
    });

    let local_len = text.split('@').next().map(str::len).unwrap_or_default();
    let valid = text.len() <= 254 && local_len <= 64 && regex.is_match(&text);

    (!valid).then_some(Violation::InvalidEmail)
}

fn numeric(value: &Value) -> Option<Violation> {
    text(value)?;
    number(value).is_none().then_some(Violation::NotNumeric)
}

fn age_range(value: &Value) -> Option<Violation> {
    let age = number(value)?;
    (!(AGE_MIN..=AGE_MAX).contains(&age)).then_some(Violation::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use proptest::prelude::*;
    use serde_json::json;

    fn violations(field: Field, value: Value) -> Vec<&'static str> {
        validate_field(field, &value)
            .iter()
            .map(Violation::code)
            .collect()
    }

    // ==================== Name Tests ====================

    #[test]
    fn test_name_required() {
        assert_eq!(violations(Field::Name, json!("")), vec!["required"]);
        assert_eq!(violations(Field::Name, Value::Null), vec!["required"]);
    }

    #[test]
    fn test_name_too_short() {
        assert_eq!(violations(Field::Name, json!("Jo")), vec!["too-short"]);
    }

    #[test]
    fn test_name_length_counts_characters() {
        assert!(violations(Field::Name, json!("Íñé")).is_empty());
    }

    #[test]
    fn test_name_contains_digits() {
        assert_eq!(violations(Field::Name, json!("Juan2")), vec!["contains-digits"]);
    }

    #[test]
    fn test_name_reports_all_violations() {
        assert_eq!(
            violations(Field::Name, json!("J1")),
            vec!["too-short", "contains-digits"]
        );
    }

    #[test]
    fn test_name_valid() {
        assert!(violations(Field::Name, json!("Juan")).is_empty());
    }

    // ==================== Email Tests ====================

    #[test]
    fn test_email_required() {
        assert_eq!(violations(Field::Email, json!("")), vec!["required"]);
    }

    #[test]
    fn test_email_invalid_shapes() {
        for bad in ["invalid-email", "a@", "@b.com", "a b@c.com", "a@-b.com", "a..b@c.com"] {
            assert_eq!(violations(Field::Email, json!(bad)), vec!["invalid-email"], "{}", bad);
        }
    }

    #[test]
    fn test_email_valid_shapes() {
        for good in ["test@example.com", "a.b+tag@sub.example.org", "user@localhost"] {
            assert!(violations(Field::Email, json!(good)).is_empty(), "{}", good);
        }
    }

    #[test]
    fn test_email_local_part_too_long() {
        let address = format!("{}@example.com", "a".repeat(65));
        assert_eq!(violations(Field::Email, json!(address)), vec!["invalid-email"]);
    }

    // ==================== Age Tests ====================

    #[test]
    fn test_age_required() {
        assert_eq!(violations(Field::Age, json!("")), vec!["required"]);
    }

    #[test]
    fn test_age_bounds() {
        assert_eq!(violations(Field::Age, json!(17)), vec!["out-of-range"]);
        assert_eq!(violations(Field::Age, json!("121")), vec!["out-of-range"]);
        assert!(violations(Field::Age, json!(18)).is_empty());
        assert!(violations(Field::Age, json!("120")).is_empty());
        assert!(violations(Field::Age, json!(25)).is_empty());
    }

    #[test]
    fn test_age_not_numeric() {
        assert_eq!(violations(Field::Age, json!("abc")), vec!["not-numeric"]);
        assert_eq!(violations(Field::Age, json!("inf")), vec!["not-numeric"]);
    }

    // ==================== Category Tests ====================

    #[test]
    fn test_category() {
        assert_eq!(violations(Field::Category, json!("")), vec!["required"]);
        assert!(violations(Field::Category, json!("tech")).is_empty());
    }

    // ==================== Digit Filter Tests ====================

    #[test]
    fn test_keep_only_digits() {
        assert_eq!(keep_only_digits("abc123def456"), "123456");
        assert_eq!(keep_only_digits("12345"), "12345");
        assert_eq!(keep_only_digits("٣٤"), "");
        assert_eq!(keep_only_digits(""), "");
    }

    proptest! {
        #[test]
        fn prop_keep_only_digits_output_is_digits(raw in ".*") {
            prop_assert!(keep_only_digits(&raw).chars().all(|c| c.is_ascii_digit()));
        }

        #[test]
        fn prop_keep_only_digits_is_idempotent(raw in ".*") {
            let once = keep_only_digits(&raw);
            prop_assert_eq!(keep_only_digits(&once), once);
        }
    }

    // ==================== Message Tests ====================

    #[test]
    fn test_messages_fill_limits() {
        let strings = Language::ENGLISH.strings();
        assert_eq!(
            Violation::TooShort.message(strings),
            "Must be at least 3 characters long."
        );
        assert_eq!(
            Violation::OutOfRange.message(strings),
            "Must be between 18 and 120."
        );
    }

    #[test]
    fn test_violation_serializes_as_code() {
        let json = serde_json::to_string(&Violation::ContainsDigits).unwrap();
        assert_eq!(json, "\"contains-digits\"");
    }
}
