//! Route guard decisions shared by protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route applies the same rules: show a neutral loading view
//! while the session resolves, render once authenticated, redirect otherwise.
//! The decision itself is pure so it can be tested without a router.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::Role;
use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// What a protected route should do for the current auth state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still resolving: neither content nor redirect.
    Loading,
    Render,
    RedirectToLogin,
    /// Signed in, but the role is not allowed here.
    RedirectHome,
}

impl GuardDecision {
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectHome => Some(HOME_PATH),
            Self::Loading | Self::Render => None,
        }
    }
}

/// Decide for `state`. An empty `allowed` list admits every signed-in user.
pub fn guard_decision(state: &AuthState, allowed: &[Role]) -> GuardDecision {
    match state {
        AuthState::Unresolved => GuardDecision::Loading,
        AuthState::Unauthenticated => GuardDecision::RedirectToLogin,
        AuthState::Authenticated(user) => {
            if allowed.is_empty() || user.role().is_some_and(|r| allowed.contains(&r)) {
                GuardDecision::Render
            } else {
                GuardDecision::RedirectHome
            }
        }
    }
}

/// Remembers the last redirect so a re-evaluation with the same outcome does
/// not navigate twice.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedirectLatch {
    issued: Option<GuardDecision>,
}

impl RedirectLatch {
    /// Path to navigate to now, if any.
    pub fn observe(&mut self, decision: GuardDecision) -> Option<&'static str> {
        match decision.redirect_path() {
            Some(path) if self.issued != Some(decision) => {
                self.issued = Some(decision);
                Some(path)
            }
            Some(_) => None,
            None => {
                self.issued = None;
                None
            }
        }
    }
}

/// Navigate away whenever the guard decides to, at most once per episode.
pub fn install_guard_redirect<F>(auth: RwSignal<AuthState>, allowed: Vec<Role>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let mut latch = RedirectLatch::default();
    Effect::new(move || {
        let decision = guard_decision(&auth.get(), &allowed);
        if let Some(path) = latch.observe(decision) {
            log::debug!("guard: redirecting to {path}");
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
