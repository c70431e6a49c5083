use super::*;

// =============================================================
// Helpers
// =============================================================

fn api_user(role: Option<i64>) -> ApiUser {
    ApiUser {
        id_usuario: 7,
        nombre: " Ana Torres ".to_owned(),
        email: "ana@uni.edu".to_owned(),
        id_rol: role,
        telefono: Some(String::new()),
        github: Some("https://github.com/ana".to_owned()),
        tecnologias: Some("Rust, React ,, SQL ".to_owned()),
        bio: Some("   ".to_owned()),
        sitio_web: Some("https://acme.io".to_owned()),
        direccion: Some("Calle 1".to_owned()),
        identificador_fiscal: Some("900123".to_owned()),
        foto: None,
        hoja_vida: Some("/static/uploads/cv_7.pdf".to_owned()),
        fecha_registro: Some("2025-03-01T10:00:00Z".to_owned()),
    }
}

// =============================================================
// Role codes
// =============================================================

#[test]
fn role_codes_map_both_ways() {
    for role in [Role::Coordinator, Role::Student, Role::Company] {
        assert_eq!(Role::from_code(role.code()), Some(role));
    }
    assert_eq!(Role::from_code(0), None);
    assert_eq!(Role::from_code(4), None);
}

// =============================================================
// ApiUser -> UserProfile
// =============================================================

#[test]
fn student_profile_keeps_only_student_fields() {
    let profile = UserProfile::from(api_user(Some(2)));
    assert_eq!(profile.name, "Ana Torres");
    assert_eq!(profile.phone, None);
    assert_eq!(profile.role(), Some(Role::Student));
    let RoleProfile::Student(student) = profile.role else {
        panic!("expected student profile");
    };
    assert_eq!(student.technologies, vec!["Rust", "React", "SQL"]);
    assert_eq!(student.bio, None);
    assert_eq!(student.github.as_deref(), Some("https://github.com/ana"));
    assert_eq!(student.cv_url.as_deref(), Some("/static/uploads/cv_7.pdf"));
}

#[test]
fn company_profile_keeps_company_fields() {
    let profile = UserProfile::from(api_user(Some(3)));
    assert_eq!(
        profile.role,
        RoleProfile::Company(CompanyProfile {
            website: Some("https://acme.io".to_owned()),
            address: Some("Calle 1".to_owned()),
            tax_id: Some("900123".to_owned()),
        })
    );
}

#[test]
fn coordinator_profile_has_no_extra_fields() {
    let profile = UserProfile::from(api_user(Some(1)));
    assert_eq!(profile.role, RoleProfile::Coordinator);
    assert_eq!(profile.role.code(), Some(1));
}

#[test]
fn unknown_or_missing_role_is_kept_as_other() {
    let profile = UserProfile::from(api_user(Some(9)));
    assert_eq!(profile.role, RoleProfile::Other { code: Some(9) });
    assert_eq!(profile.role(), None);

    let profile = UserProfile::from(api_user(None));
    assert_eq!(profile.role, RoleProfile::Other { code: None });
}

#[test]
fn api_user_deserializes_with_missing_optional_columns() {
    let user: ApiUser = serde_json::from_value(serde_json::json!({
        "id_usuario": 3,
        "nombre": "Acme",
        "email": "hr@acme.io",
        "id_rol": 3
    }))
    .expect("minimal user should parse");
    assert_eq!(user.sitio_web, None);
    assert_eq!(user.fecha_registro, None);
}

// =============================================================
// Profile helpers
// =============================================================

#[test]
fn with_cv_url_only_applies_to_students() {
    let company = UserProfile::from(api_user(Some(3)));
    assert_eq!(company.clone().with_cv_url("/cv.pdf"), company);

    let student = UserProfile::from(api_user(Some(2))).with_cv_url("/static/uploads/new.pdf");
    let RoleProfile::Student(fields) = student.role else {
        panic!("expected student profile");
    };
    assert_eq!(fields.cv_url.as_deref(), Some("/static/uploads/new.pdf"));
}

#[test]
fn with_photo_url_blank_clears_photo() {
    let profile = UserProfile::from(api_user(Some(1))).with_photo_url("/p.png");
    assert_eq!(profile.photo_url.as_deref(), Some("/p.png"));
    assert_eq!(profile.with_photo_url("  ").photo_url, None);
}

#[test]
fn profile_update_prefills_role_fields() {
    let update = ProfileUpdate::from_profile(&UserProfile::from(api_user(Some(2))));
    assert_eq!(update.nombre.as_deref(), Some("Ana Torres"));
    assert_eq!(update.tecnologias.as_deref(), Some("Rust, React, SQL"));
    assert_eq!(update.sitio_web, None);
}

#[test]
fn normalized_update_sends_cleared_fields_as_empty() {
    let update = ProfileUpdate {
        nombre: Some(" Ana ".to_owned()),
        github: Some(String::new()),
        bio: Some("  ".to_owned()),
        ..ProfileUpdate::default()
    }
    .normalized();
    assert_eq!(
        serde_json::to_value(&update).expect("serialize"),
        serde_json::json!({ "nombre": "Ana", "github": "", "bio": "" })
    );
}

#[test]
fn normalized_update_never_sends_blank_name() {
    let update = ProfileUpdate { nombre: Some("   ".to_owned()), ..ProfileUpdate::default() }.normalized();
    assert_eq!(serde_json::to_value(&update).expect("serialize"), serde_json::json!({}));
}

#[test]
fn cached_profile_survives_json_round_trip() {
    let profile = UserProfile::from(api_user(Some(2)));
    let raw = serde_json::to_string(&profile).expect("serialize");
    let back: UserProfile = serde_json::from_str(&raw).expect("deserialize");
    assert_eq!(back, profile);
}
