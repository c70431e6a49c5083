//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthService` owns the network calls and the token/profile cache.
//! `AuthContext` wraps it in the single "who is logged in" state the view tree
//! reads. The app builds one context at startup, provides it through Leptos
//! context, and mirrors every transition into an `RwSignal<AuthState>` so
//! route guards and pages re-render.
//!
//! STATE MACHINE
//! =============
//! `Unresolved` until the startup resolution finishes, then `Authenticated`
//! or `Unauthenticated`. `login` and `logout` move between the two resolved
//! states; `update_current_user` swaps the profile in place.
//!
//! Every session attempt takes a new epoch. A continuation that wakes up after
//! its epoch was superseded (typically by a logout) drops its result, so a
//! late response can never bring a session back.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::net::api::AuthApi;
use crate::net::error::AuthError;
use crate::net::types::{ProfileUpdate, UserProfile};
use crate::state::registration::RegistrationForm;
use crate::state::session::{SessionBackend, SessionStore};
use crate::util::token;

const NO_SESSION: &str = "No active session, please sign in";
const SUPERSEDED: &str = "Sign-in was cancelled";

/// Who is logged in, as seen by the view tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthState {
    /// Startup resolution has not finished.
    #[default]
    Unresolved,
    Authenticated(UserProfile),
    Unauthenticated,
}

impl AuthState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Unresolved)
    }

    pub fn user(&self) -> Option<&UserProfile> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Unresolved | Self::Unauthenticated => None,
        }
    }
}

/// Source of "now" in Unix seconds.
pub type Clock = fn() -> i64;

/// Network operations plus local token checks.
pub struct AuthService<A, B> {
    api: A,
    store: SessionStore<B>,
    clock: Clock,
}

impl<A: AuthApi, B: SessionBackend> AuthService<A, B> {
    pub fn new(api: A, store: SessionStore<B>) -> Self {
        Self { api, store, clock: token::now_unix_secs }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn store(&self) -> &SessionStore<B> {
        &self.store
    }

    /// Exchange credentials for a token and profile without touching storage.
    ///
    /// # Errors
    ///
    /// `Authentication` when the API rejects the credentials, `Network` when
    /// it cannot be reached.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<(String, UserProfile), AuthError> {
        let response = self.api.login(email.trim(), password).await?;
        Ok((response.access_token, UserProfile::from(response.user)))
    }

    /// Sign in and persist the new session.
    ///
    /// # Errors
    ///
    /// Same as [`AuthService::authenticate`].
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, UserProfile), AuthError> {
        let (token, profile) = self.authenticate(email, password).await?;
        self.store.save(&token, &profile);
        log::info!("auth: signed in user {}", profile.id);
        Ok((token, profile))
    }

    /// Validate `form` locally, then create the account.
    ///
    /// # Errors
    ///
    /// `Validation` for local or API field problems, `Conflict` for an email
    /// that is already registered, `Network` on transport failure.
    pub async fn register(&self, form: &RegistrationForm) -> Result<UserProfile, AuthError> {
        let request = form.validate()?;
        let user = self.api.register(&request).await?;
        log::info!("auth: registered user {}", user.id_usuario);
        Ok(UserProfile::from(user))
    }

    /// Stored token, if present and not expired.
    pub fn valid_token(&self) -> Option<String> {
        let now = (self.clock)();
        self.store.token().filter(|t| token::is_valid_at(t, now))
    }

    pub fn is_token_valid(&self) -> bool {
        self.valid_token().is_some()
    }

    /// Stored valid token.
    ///
    /// # Errors
    ///
    /// `Authentication` when there is no token or it has expired.
    pub fn bearer_token(&self) -> Result<String, AuthError> {
        self.valid_token()
            .ok_or_else(|| AuthError::Authentication(NO_SESSION.to_owned()))
    }

    /// Fetch the profile of the session owner from the API.
    ///
    /// # Errors
    ///
    /// `Authentication` without a valid stored token or when the API rejects
    /// it, otherwise transport/status errors.
    pub async fn fetch_current_profile(&self) -> Result<UserProfile, AuthError> {
        let token = self.bearer_token()?;
        let user = self.api.current_user(&token).await?;
        Ok(UserProfile::from(user))
    }

    /// Send edited profile fields. Auth state is left alone; callers follow up
    /// with [`AuthContext::update_current_user`].
    ///
    /// # Errors
    ///
    /// `Authentication` without a valid session, otherwise API errors.
    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile, AuthError> {
        let token = self.bearer_token()?;
        let user = self.api.update_profile(&token, &update.normalized()).await?;
        Ok(UserProfile::from(user))
    }

    /// Forget the session locally. No network call.
    pub fn logout(&self) {
        self.store.clear();
    }
}

struct Inner<A, B> {
    service: AuthService<A, B>,
    state: RefCell<AuthState>,
    epoch: Cell<u64>,
    publish: Box<dyn Fn(&AuthState)>,
}

/// Shared auth state for the lifetime of the loaded app. Clones share state.
pub struct AuthContext<A, B> {
    inner: Rc<Inner<A, B>>,
}

impl<A, B> Clone for AuthContext<A, B> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<A: AuthApi, B: SessionBackend> AuthContext<A, B> {
    /// Build a context in the `Unresolved` state. `publish` is called after
    /// every transition. Call [`AuthContext::resolve`] to leave `Unresolved`.
    pub fn new(service: AuthService<A, B>, publish: impl Fn(&AuthState) + 'static) -> Self {
        Self {
            inner: Rc::new(Inner {
                service,
                state: RefCell::new(AuthState::Unresolved),
                epoch: Cell::new(0),
                publish: Box::new(publish),
            }),
        }
    }

    pub fn service(&self) -> &AuthService<A, B> {
        &self.inner.service
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.inner.state.borrow().user().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    fn set_state(&self, next: AuthState) {
        let snapshot = next.clone();
        *self.inner.state.borrow_mut() = next;
        (self.inner.publish)(&snapshot);
    }

    fn begin_epoch(&self) -> u64 {
        let epoch = self.inner.epoch.get().wrapping_add(1);
        self.inner.epoch.set(epoch);
        epoch
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.inner.epoch.get() == epoch
    }

    /// Turn the stored token into an authoritative state. Failures end in
    /// `Unauthenticated` with storage cleared and are only logged.
    pub async fn resolve(&self) {
        let epoch = self.begin_epoch();
        if let Err(e) = self.resolve_in(epoch).await {
            log::debug!("auth: startup resolution ended unauthenticated: {e}");
        }
    }

    async fn resolve_in(&self, epoch: u64) -> Result<(), AuthError> {
        let service = self.service();
        if !service.is_token_valid() {
            service.logout();
            self.set_state(AuthState::Unauthenticated);
            return Err(AuthError::Authentication(NO_SESSION.to_owned()));
        }

        let result = service.fetch_current_profile().await;
        if !self.is_current(epoch) {
            log::debug!("auth: dropping superseded profile response");
            return Err(AuthError::Authentication(SUPERSEDED.to_owned()));
        }

        match result {
            Ok(profile) => {
                if let Some(token) = service.store().token() {
                    service.store().save(&token, &profile);
                }
                log::info!("auth: session resolved for user {}", profile.id);
                self.set_state(AuthState::Authenticated(profile));
                Ok(())
            }
            Err(e) => {
                log::warn!("auth: session rejected, signing out: {e}");
                service.logout();
                self.set_state(AuthState::Unauthenticated);
                Err(e)
            }
        }
    }

    /// Sign in, then load the profile from `/users/me`.
    ///
    /// # Errors
    ///
    /// Login errors unchanged; a profile fetch failure after a successful
    /// login; `Authentication` when a logout superseded this attempt.
    ///
    /// A rejected login made before startup resolution finished re-runs the
    /// resolution against the stored token so the state still settles.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let epoch = self.begin_epoch();
        let (token, profile) = match self.service().authenticate(email, password).await {
            Ok(session) => session,
            Err(e) => {
                // This attempt superseded any startup resolution still in flight.
                if self.is_current(epoch) && self.is_loading() {
                    if let Err(resolve_err) = self.resolve_in(epoch).await {
                        log::debug!("auth: resolution after failed login ended unauthenticated: {resolve_err}");
                    }
                }
                return Err(e);
            }
        };
        if !self.is_current(epoch) {
            log::debug!("auth: dropping superseded login response");
            return Err(AuthError::Authentication(SUPERSEDED.to_owned()));
        }
        self.service().store().save(&token, &profile);
        log::info!("auth: signed in user {}", profile.id);
        self.resolve_in(epoch).await
    }

    /// Create an account. The auth state does not change.
    ///
    /// # Errors
    ///
    /// See [`AuthService::register`].
    pub async fn register(&self, form: &RegistrationForm) -> Result<UserProfile, AuthError> {
        self.service().register(form).await
    }

    /// End the session immediately and invalidate any in-flight continuation.
    pub fn logout(&self) {
        self.begin_epoch();
        self.service().logout();
        log::info!("auth: signed out");
        self.set_state(AuthState::Unauthenticated);
    }

    /// Replace the signed-in profile locally after the server accepted a change.
    ///
    /// Ignored when nobody is signed in or when `profile` carries a different
    /// role than the current one.
    pub fn update_current_user(&self, profile: UserProfile) {
        let current_role = match &*self.inner.state.borrow() {
            AuthState::Authenticated(current) => current.role.code(),
            AuthState::Unresolved | AuthState::Unauthenticated => {
                log::warn!("auth: profile update ignored, no active session");
                return;
            }
        };
        if current_role != profile.role.code() {
            log::warn!("auth: profile update ignored, role cannot change");
            return;
        }
        let Some(token) = self.service().store().token() else {
            log::warn!("auth: profile update ignored, token missing");
            return;
        };
        self.service().store().save(&token, &profile);
        self.set_state(AuthState::Authenticated(profile));
    }
}
