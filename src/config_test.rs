use super::*;

#[test]
fn from_value_uses_default_when_missing_or_blank() {
    assert_eq!(ApiConfig::from_value(None).base_url, DEFAULT_API_URL);
    assert_eq!(ApiConfig::from_value(Some("   ")).base_url, DEFAULT_API_URL);
}

#[test]
fn from_value_trims_trailing_slash() {
    let config = ApiConfig::from_value(Some("https://api.softlink.dev/v1/"));
    assert_eq!(config.base_url, "https://api.softlink.dev/v1");
}

#[test]
fn endpoint_joins_with_single_slash() {
    let config = ApiConfig::new("http://localhost:8000/api/v1/");
    assert_eq!(config.endpoint("/users/me"), "http://localhost:8000/api/v1/users/me");
    assert_eq!(config.endpoint("auth/login"), "http://localhost:8000/api/v1/auth/login");
}
