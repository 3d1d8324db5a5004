use std::sync::LazyLock;

use regex::Regex;
use relay_core_contact_contracts::ContactSubmitError;
use relay_models::contact::SanitizedContactSubmission;

/// Deliberately permissive: `local@domain.tld` with a top level label of at
/// least two characters.
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap());

pub static CONTACT_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\-+()\s]{7,20}$").unwrap());

pub fn is_valid_email(email: &str) -> bool {
    CONTACT_EMAIL_REGEX.is_match(email)
}

pub fn is_likely_phone(phone: &str) -> bool {
    CONTACT_PHONE_REGEX.is_match(phone)
}

/// Runs the field checks in order, the first failing check wins.
pub fn validate(
    submission: SanitizedContactSubmission,
) -> Result<SanitizedContactSubmission, ContactSubmitError> {
    if submission.has_empty_field() {
        return Err(ContactSubmitError::MissingFields);
    }
    if !is_valid_email(&submission.email) {
        return Err(ContactSubmitError::InvalidEmail);
    }
    if !is_likely_phone(&submission.phone) {
        return Err(ContactSubmitError::InvalidPhone);
    }
    Ok(submission)
}
