use super::*;

fn filled() -> SignupForm {
    SignupForm {
        name: " Asha ".to_owned(),
        email: "asha@example.in".to_owned(),
        city: "Jaipur ".to_owned(),
        password: "secret1".to_owned(),
        confirm: "secret1".to_owned(),
    }
}

#[test]
fn valid_form_trims_fields() {
    let request = filled().validate().unwrap();
    assert_eq!(request.name, "Asha");
    assert_eq!(request.city, "Jaipur");
}

#[test]
fn required_fields_are_checked_first() {
    let form = SignupForm {
        city: "  ".to_owned(),
        ..filled()
    };
    assert_eq!(form.validate(), Err("Name, email and city are required."));
}

#[test]
fn password_rules() {
    let short = SignupForm {
        password: "abc12".to_owned(),
        confirm: "abc12".to_owned(),
        ..filled()
    };
    assert_eq!(short.validate(), Err("Password must be at least 6 characters."));

    let mismatch = SignupForm {
        confirm: "secret2".to_owned(),
        ..filled()
    };
    assert_eq!(mismatch.validate(), Err("Passwords do not match."));
}

#[test]
fn email_needs_at_sign() {
    let form = SignupForm {
        email: "asha.example.in".to_owned(),
        ..filled()
    };
    assert_eq!(form.validate(), Err("Enter a valid email address."));
}

#[test]
fn returned_profile_wins_over_form_profile() {
    let request = filled().validate().unwrap();
    let fallback = profile_for(&request, None);
    assert_eq!(fallback.city.as_deref(), Some("Jaipur"));

    let returned = UserProfile::from_email("server@example.in");
    assert_eq!(profile_for(&request, Some(returned.clone())), returned);
}
