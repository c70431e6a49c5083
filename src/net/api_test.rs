use super::*;

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc.def.ghi"), "Bearer abc.def.ghi");
}

#[test]
fn upload_paths_match_api_routes() {
    assert_eq!(UploadKind::Photo.path(), "/upload/image");
    assert_eq!(UploadKind::Document.path(), "/upload/document");
}

#[test]
fn photo_accepts_any_image_type() {
    assert!(UploadKind::Photo.accepts("image/png"));
    assert!(UploadKind::Photo.accepts("IMAGE/JPEG"));
    assert!(!UploadKind::Photo.accepts("application/pdf"));
    assert!(!UploadKind::Photo.accepts(""));
}

#[test]
fn document_accepts_only_pdf() {
    assert!(UploadKind::Document.accepts("application/pdf"));
    assert!(!UploadKind::Document.accepts("application/msword"));
    assert!(!UploadKind::Document.accepts("image/png"));
}

#[test]
fn check_reports_file_field_message() {
    let err = UploadKind::Document.check("text/plain").expect_err("text is not a PDF");
    assert_eq!(err.field_message("file"), Some("File must be a PDF"));
    assert!(UploadKind::Photo.check("image/webp").is_ok());
}

#[test]
fn http_api_uses_configured_base_url() {
    let api = HttpAuthApi::new(ApiConfig::new("https://api.example.test/v1"));
    assert_eq!(
        api.config().endpoint(CURRENT_USER_PATH),
        "https://api.example.test/v1/users/me"
    );
}

#[cfg(not(feature = "csr"))]
#[test]
fn http_api_reports_network_error_outside_browser() {
    let api = HttpAuthApi::default();
    let err = futures::executor::block_on(api.current_user("t")).expect_err("no transport");
    assert!(matches!(err, AuthError::Network(_)));
}
