use super::*;

#[test]
fn validate_login_input_trims_email() {
    assert_eq!(
        validate_login_input("  user@example.com  ", "hunter22"),
        Ok(("user@example.com".to_owned(), "hunter22".to_owned()))
    );
}

#[test]
fn validate_login_input_keeps_password_spaces() {
    assert_eq!(
        validate_login_input("a@b.com", " pass "),
        Ok(("a@b.com".to_owned(), " pass ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "secret"), Err("Enter both email and password."));
    assert_eq!(validate_login_input("a@b.com", ""), Err("Enter both email and password."));
}
