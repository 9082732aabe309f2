use crate::core::validation::{ValidationResult, Validator};
use regex::Regex;

pub const LETTERS_MESSAGE: &str = "Only letters are allowed";
pub const CURP_MESSAGE: &str = "Invalid CURP";
pub const RFC_MESSAGE: &str = "Invalid RFC";
pub const SMALL_NUMBER_MESSAGE: &str = "Only numbers are allowed less than 5 digits";
pub const ALPHANUMERIC_MESSAGE: &str =
    "Only numbers and letters are allowed less than 10 characters";

const CURP_PATTERN: &str =
    r"^[A-Z][AEIOU][A-Z]{2}[0-9]{6}[HM][A-Z]{2}[B-DF-HJ-NP-TV-Z]{3}[A-Z0-9][0-9]$";
const RFC_PATTERN: &str = r"^([A-ZÑ&]{3,4})[0-9]{6}(?:[A-Z0-9]{3})?$";

/// Accepts any value; used for fields whose only rule is being present.
pub fn any() -> Validator {
    Box::new(|_: &str| ValidationResult::Valid)
}

pub fn letters_only() -> Validator {
    regex(r"^[a-zA-Z]+$", LETTERS_MESSAGE)
}

/// Mexican personal identifier, matched after uppercasing.
pub fn curp() -> Validator {
    uppercase_regex(CURP_PATTERN, CURP_MESSAGE)
}

/// Mexican tax identifier, matched after uppercasing.
pub fn rfc() -> Validator {
    uppercase_regex(RFC_PATTERN, RFC_MESSAGE)
}

/// `max` below one is raised to one; `{1,0}` is not a valid repetition.
pub fn digits_up_to(max: usize) -> Validator {
    let max = max.max(1);
    regex(&format!("^[0-9]{{1,{max}}}$"), SMALL_NUMBER_MESSAGE)
}

pub fn alphanumeric_up_to(max: usize) -> Validator {
    let max = max.max(1);
    regex(&format!("^[a-zA-Z0-9]{{1,{max}}}$"), ALPHANUMERIC_MESSAGE)
}

pub fn regex(pattern: &str, message: impl Into<String>) -> Validator {
    let re = Regex::new(pattern).expect("Invalid regex pattern");
    let message = message.into();
    Box::new(move |value: &str| {
        if re.is_match(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(message.clone())
        }
    })
}

fn uppercase_regex(pattern: &str, message: &str) -> Validator {
    let inner = regex(pattern, message);
    Box::new(move |value: &str| inner(&value.to_uppercase()))
}
