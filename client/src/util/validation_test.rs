use super::*;

#[test]
fn email_accepts_plain_addresses() {
    assert_eq!(validate_email("ops@example.com"), None);
    assert_eq!(validate_email("  first.last+tag@sub.example.co  "), None);
}

#[test]
fn email_rejects_malformed_addresses() {
    assert_eq!(validate_email(""), Some("Email is required".to_owned()));
    for bad in ["plain", "@example.com", "a@", "a@b", "a@b.", "a b@c.com", "a@b@c.com", "a@.com"] {
        assert!(validate_email(bad).is_some(), "{bad} should be rejected");
    }
}

#[test]
fn password_needs_minimum_length() {
    assert_eq!(validate_password(""), Some("Password is required".to_owned()));
    assert!(validate_password("short").is_some());
    assert_eq!(validate_password("12345678"), None);
}

#[test]
fn phone_allows_common_formatting() {
    assert_eq!(validate_phone("+1 415-555-0100"), None);
    assert_eq!(validate_phone("5550100"), None);
    assert!(validate_phone("555").is_some());
    assert!(validate_phone("call me").is_some());
    assert!(validate_phone("+1 (415) 555-0100").is_some());
}

#[test]
fn otp_is_six_digits() {
    assert_eq!(validate_otp("123456"), None);
    assert_eq!(validate_otp(" 123456 "), None);
    assert!(validate_otp("12345").is_some());
    assert!(validate_otp("12a456").is_some());
}

#[test]
fn sign_in_form_reports_each_field() {
    let errors = sign_in_errors(&SignInRequest { email: "nope".to_owned(), password: String::new() });
    assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec!["email", "password"]);

    let ok = SignInRequest { email: "a@b.co".to_owned(), password: "x".to_owned() };
    assert!(sign_in_errors(&ok).is_empty());
}

#[test]
fn sign_up_form_checks_confirmation_and_account_type() {
    let form = SignUpRequest {
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        phone: "5550100".to_owned(),
        password: "correct horse".to_owned(),
        signed_up_as: "doctor".to_owned(),
    };
    assert!(sign_up_errors(&form, "correct horse").is_empty());

    let errors = sign_up_errors(&SignUpRequest { signed_up_as: "pilot".to_owned(), ..form.clone() }, "other");
    assert!(errors.contains_key("confirmPassword"));
    assert!(errors.contains_key("signedUpAs"));
    assert!(!errors.contains_key("email"));
}

#[test]
fn reset_form_requires_token() {
    let form = ResetPasswordRequest { token: " ".to_owned(), password: "longenough".to_owned() };
    let errors = reset_password_errors(&form, "longenough");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get("token").map(String::as_str), Some("Reset token is required"));
}
