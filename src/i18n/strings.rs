/// All localized user-facing strings for a language.
///
/// Placeholders are written as `{name}` and filled with [`fill`].
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Form Guard ====================
    /// Confirmation asked before leaving a form with unsaved edits
    pub unsaved_changes_confirm: &'static str,

    /// Notice shown after a valid submission
    pub submit_success: &'static str,

    // ==================== Field Violations ====================
    pub required: &'static str,

    /// Placeholders: {min}
    pub too_short: &'static str,

    pub contains_digits: &'static str,

    pub invalid_email: &'static str,

    pub not_numeric: &'static str,

    /// Placeholders: {min}, {max}
    pub out_of_range: &'static str,

    // ==================== Language Switcher ====================
    /// Label of the locale selector
    pub language_label: &'static str,

    /// Placeholders: {current}
    pub language_current: &'static str,
}

/// Replace each `{key}` placeholder in `template` with its value.
pub fn fill(template: &str, values: &[(&str, String)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (key, value)| {
            text.replace(&format!("{{{}}}", key), value)
        })
}

// ==================== Spanish Strings ====================

pub const SPANISH_STRINGS: LanguageStrings = LanguageStrings {
    unsaved_changes_confirm: "Tienes cambios sin guardar. ¿Deseas continuar?",
    submit_success: "¡Formulario enviado correctamente!",

    required: "Este campo es obligatorio.",
    too_short: "Debe tener al menos {min} caracteres.",
    contains_digits: "No puede contener números.",
    invalid_email: "Introduce un correo electrónico válido.",
    not_numeric: "Debe ser un número.",
    out_of_range: "Debe estar entre {min} y {max}.",

    language_label: "Idioma / Language:",
    language_current: "Actual: {current}",
};

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    unsaved_changes_confirm: "You have unsaved changes. Do you want to continue?",
    submit_success: "Form submitted successfully!",

    required: "This field is required.",
    too_short: "Must be at least {min} characters long.",
    contains_digits: "Must not contain numbers.",
    invalid_email: "Enter a valid email address.",
    not_numeric: "Must be a number.",
    out_of_range: "Must be between {min} and {max}.",

    language_label: "Idioma / Language:",
    language_current: "Current: {current}",
};
