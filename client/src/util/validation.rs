//! Form field validation shared by the auth pages and the KYC wizard.
//!
//! Each validator returns `Some(message)` when the value is unacceptable.
//! Form-level helpers collect those into [`FieldErrors`] keyed by field name;
//! an empty map means the form may be submitted.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::collections::BTreeMap;

use crate::net::types::{ResetPasswordRequest, SignInRequest, SignUpRequest};
use crate::state::role::Role;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const OTP_LEN: usize = 6;

pub type FieldErrors = BTreeMap<&'static str, String>;

#[must_use]
pub fn validate_required(label: &str, value: &str) -> Option<String> {
    value.trim().is_empty().then(|| format!("{label} is required"))
}

#[must_use]
pub fn validate_email(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Email is required".to_owned());
    }
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
            && !domain.ends_with('.')
            && !value.contains(char::is_whitespace)
    });
    (!valid).then(|| "Enter a valid email address".to_owned())
}

#[must_use]
pub fn validate_password(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Password is required".to_owned());
    }
    (value.chars().count() < MIN_PASSWORD_LEN)
        .then(|| format!("Password must be at least {MIN_PASSWORD_LEN} characters"))
}

/// Digits with optional leading `+` and spaces or dashes, 7 to 15 digits.
#[must_use]
pub fn validate_phone(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Phone is required".to_owned());
    }
    let body = value.strip_prefix('+').unwrap_or(value);
    let allowed = body.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
    let digits = body.chars().filter(char::is_ascii_digit).count();
    (!allowed || !(7..=15).contains(&digits)).then(|| "Enter a valid phone number".to_owned())
}

#[must_use]
pub fn validate_otp(value: &str) -> Option<String> {
    let value = value.trim();
    let valid = value.len() == OTP_LEN && value.chars().all(|c| c.is_ascii_digit());
    (!valid).then(|| format!("Enter the {OTP_LEN}-digit code"))
}

fn collect(checks: impl IntoIterator<Item = (&'static str, Option<String>)>) -> FieldErrors {
    checks
        .into_iter()
        .filter_map(|(field, error)| error.map(|e| (field, e)))
        .collect()
}

#[must_use]
pub fn sign_in_errors(form: &SignInRequest) -> FieldErrors {
    collect([
        ("email", validate_email(&form.email)),
        ("password", validate_required("Password", &form.password)),
    ])
}

#[must_use]
pub fn sign_up_errors(form: &SignUpRequest, confirm_password: &str) -> FieldErrors {
    let role = Role::parse(&form.signed_up_as)
        .is_none()
        .then(|| "Choose an account type".to_owned());
    collect([
        ("name", validate_required("Name", &form.name)),
        ("email", validate_email(&form.email)),
        ("phone", validate_phone(&form.phone)),
        ("password", validate_password(&form.password)),
        ("confirmPassword", (form.password != confirm_password).then(|| "Passwords do not match".to_owned())),
        ("signedUpAs", role),
    ])
}

#[must_use]
pub fn reset_password_errors(form: &ResetPasswordRequest, confirm_password: &str) -> FieldErrors {
    collect([
        ("token", validate_required("Reset token", &form.token)),
        ("password", validate_password(&form.password)),
        ("confirmPassword", (form.password != confirm_password).then(|| "Passwords do not match".to_owned())),
    ])
}
