//! REST calls against the SoftLink API.
//!
//! Browser build (`csr`): real HTTP via `gloo-net`.
//! Native build: every call fails with [`AuthError::Network`], since there is
//! no fetch implementation to call through.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become `Network`; non-success statuses go through
//! [`classify_response`] so callers always see the auth error taxonomy.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::AuthError;
#[cfg(feature = "csr")]
use super::error::{RequestKind, classify_response};
use super::types::{ApiUser, LoginResponse, ProfileUpdate, RegisterRequest};
use crate::config::ApiConfig;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/auth/register";
const CURRENT_USER_PATH: &str = "/users/me";

/// Network seam used by the auth service. [`HttpAuthApi`] is the only production impl.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// `POST /auth/login` with form-encoded `username`/`password`.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError>;
    /// `POST /auth/register` with a JSON body.
    async fn register(&self, request: &RegisterRequest) -> Result<ApiUser, AuthError>;
    /// `GET /users/me` with bearer auth.
    async fn current_user(&self, token: &str) -> Result<ApiUser, AuthError>;
    /// `PUT /users/me` with bearer auth.
    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<ApiUser, AuthError>;
}

/// File upload targets accepted by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadKind {
    /// Profile picture, any `image/*` type.
    Photo,
    /// CV, PDF only.
    Document,
}

impl UploadKind {
    pub fn path(self) -> &'static str {
        match self {
            Self::Photo => "/upload/image",
            Self::Document => "/upload/document",
        }
    }

    pub fn accepts(self, content_type: &str) -> bool {
        let content_type = content_type.trim().to_ascii_lowercase();
        match self {
            Self::Photo => content_type.starts_with("image/"),
            Self::Document => content_type == "application/pdf",
        }
    }

    /// Reject a file locally before it is sent.
    pub fn check(self, content_type: &str) -> Result<(), AuthError> {
        if self.accepts(content_type) {
            return Ok(());
        }
        let message = match self {
            Self::Photo => "File must be an image",
            Self::Document => "File must be a PDF",
        };
        Err(AuthError::Validation(vec![super::error::FieldError::new("file", message)]))
    }
}

#[cfg(any(test, feature = "csr"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(not(feature = "csr"))]
fn unavailable() -> AuthError {
    AuthError::Network("not available outside the browser".to_owned())
}

#[cfg(feature = "csr")]
#[allow(clippy::needless_pass_by_value)]
fn transport(e: gloo_net::Error) -> AuthError {
    AuthError::Network(e.to_string())
}

#[cfg(feature = "csr")]
async fn read_json<T: serde::de::DeserializeOwned>(
    kind: RequestKind,
    resp: gloo_net::http::Response,
) -> Result<T, AuthError> {
    let status = resp.status();
    if !resp.ok() {
        let body = resp.text().await.unwrap_or_default();
        log::debug!("api: {kind:?} request failed with status {status}");
        return Err(classify_response(kind, status, &body));
    }
    resp.json::<T>()
        .await
        .map_err(|e| AuthError::Unexpected { status, message: e.to_string() })
}

/// [`AuthApi`] over HTTP.
#[derive(Clone, Debug, Default)]
pub struct HttpAuthApi {
    config: ApiConfig,
}

impl HttpAuthApi {
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Upload `file` as multipart `file` field; returns the stored file's URL.
    ///
    /// # Errors
    ///
    /// `Validation` when the file type is wrong for `kind`, otherwise the usual
    /// transport/status classification.
    #[cfg(feature = "csr")]
    pub async fn upload(&self, token: &str, kind: UploadKind, file: &web_sys::File) -> Result<String, AuthError> {
        kind.check(&file.type_())?;
        let form = web_sys::FormData::new()
            .map_err(|_| AuthError::Network("multipart form unavailable".to_owned()))?;
        form.append_with_blob("file", file)
            .map_err(|_| AuthError::Network("could not attach file".to_owned()))?;
        let resp = gloo_net::http::Request::post(&self.config.endpoint(kind.path()))
            .header("Authorization", &bearer(token))
            .body(form)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        let body: super::types::UploadResponse = read_json(RequestKind::Upload, resp).await?;
        log::info!("api: uploaded {}", body.filename);
        Ok(body.url)
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        #[cfg(feature = "csr")]
        {
            let params = web_sys::UrlSearchParams::new()
                .map_err(|_| AuthError::Network("form encoding unavailable".to_owned()))?;
            params.append("username", email);
            params.append("password", password);
            let resp = gloo_net::http::Request::post(&self.config.endpoint(LOGIN_PATH))
                .body(params)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            read_json(RequestKind::Login, resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email, password, LOGIN_PATH);
            Err(unavailable())
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<ApiUser, AuthError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::post(&self.config.endpoint(REGISTER_PATH))
                .json(request)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            read_json(RequestKind::Register, resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (request, REGISTER_PATH);
            Err(unavailable())
        }
    }

    async fn current_user(&self, token: &str) -> Result<ApiUser, AuthError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::get(&self.config.endpoint(CURRENT_USER_PATH))
                .header("Authorization", &bearer(token))
                .send()
                .await
                .map_err(transport)?;
            read_json(RequestKind::Profile, resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (token, CURRENT_USER_PATH);
            Err(unavailable())
        }
    }

    async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<ApiUser, AuthError> {
        #[cfg(feature = "csr")]
        {
            let resp = gloo_net::http::Request::put(&self.config.endpoint(CURRENT_USER_PATH))
                .header("Authorization", &bearer(token))
                .json(update)
                .map_err(transport)?
                .send()
                .await
                .map_err(transport)?;
            read_json(RequestKind::Profile, resp).await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (token, update);
            Err(unavailable())
        }
    }
}
