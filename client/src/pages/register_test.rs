use super::*;

#[test]
fn validate_register_input_accepts_every_role() {
    for r in Role::ALL {
        let form = validate_register_input(" new@bms.test ", "longenough", r.as_str());
        assert_eq!(
            form,
            Ok(Registration { email: "new@bms.test".to_owned(), password: "longenough".to_owned(), role: r })
        );
    }
}

#[test]
fn validate_register_input_enforces_min_password_length() {
    assert_eq!(
        validate_register_input("a@b.com", "short77", "resident"),
        Err("Password must be at least 8 characters.")
    );
    assert!(validate_register_input("a@b.com", "exactly8", "resident").is_ok());
}

#[test]
fn validate_register_input_requires_email() {
    assert_eq!(validate_register_input("  ", "longenough", "resident"), Err("Enter an email address."));
}

#[test]
fn validate_register_input_rejects_unknown_role() {
    assert_eq!(validate_register_input("a@b.com", "longenough", "janitor"), Err("Choose a role."));
}
