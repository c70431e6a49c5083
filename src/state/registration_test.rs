use super::*;

fn filled(role: Role) -> RegistrationForm {
    RegistrationForm {
        name: "Ana Torres".to_owned(),
        email: " ana@uni.edu ".to_owned(),
        password: "s3cret".to_owned(),
        confirm_password: "s3cret".to_owned(),
        technologies: "Rust,  Leptos ,".to_owned(),
        bio: "Backend dev".to_owned(),
        github: String::new(),
        website: "https://acme.io".to_owned(),
        address: "Calle 1".to_owned(),
        tax_id: "900123".to_owned(),
        ..RegistrationForm::new(role)
    }
}

#[test]
fn mismatched_confirmation_is_rejected() {
    let form = RegistrationForm { confirm_password: "other".to_owned(), ..filled(Role::Student) };
    let err = form.validate().expect_err("mismatch must fail");
    assert_eq!(err.field_message("confirm_password"), Some(PASSWORDS_DO_NOT_MATCH));
}

#[test]
fn missing_required_fields_are_each_reported() {
    let err = RegistrationForm::new(Role::Company).validate().expect_err("empty form");
    assert_eq!(err.field_message("name"), Some("Name is required"));
    assert_eq!(err.field_message("email"), Some("Email is required"));
    assert_eq!(err.field_message("password"), Some("Password is required"));
}

#[test]
fn email_without_at_sign_is_rejected() {
    let form = RegistrationForm { email: "ana.uni.edu".to_owned(), ..filled(Role::Student) };
    let err = form.validate().expect_err("invalid email");
    assert_eq!(err.field_message("email"), Some("Enter a valid email address"));
}

#[test]
fn student_payload_carries_only_student_fields() {
    let request = filled(Role::Student).validate().expect("valid form");
    assert_eq!(request.id_rol, 2);
    assert_eq!(request.email, "ana@uni.edu");
    assert_eq!(request.tecnologias.as_deref(), Some("Rust, Leptos"));
    assert_eq!(request.bio.as_deref(), Some("Backend dev"));
    assert_eq!(request.github, None);
    assert_eq!(request.sitio_web, None);
    assert_eq!(request.identificador_fiscal, None);
}

#[test]
fn company_payload_carries_only_company_fields() {
    let request = filled(Role::Company).validate().expect("valid form");
    assert_eq!(request.id_rol, 3);
    assert_eq!(request.sitio_web.as_deref(), Some("https://acme.io"));
    assert_eq!(request.direccion.as_deref(), Some("Calle 1"));
    assert_eq!(request.identificador_fiscal.as_deref(), Some("900123"));
    assert_eq!(request.tecnologias, None);
    assert_eq!(request.bio, None);
}

#[test]
fn blank_optional_fields_are_not_serialized() {
    let request = filled(Role::Company).validate().expect("valid form");
    let json = serde_json::to_value(&request).expect("serialize");
    assert!(json.get("telefono").is_none());
    assert!(json.get("github").is_none());
}
