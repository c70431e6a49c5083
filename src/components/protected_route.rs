//! Route guard wrapper for pages that need a signed-in user.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::types::Role;
use crate::state::auth::AuthState;
use crate::util::auth::{GuardDecision, guard_decision, install_guard_redirect};

/// Render `children` only for a signed-in user (optionally of one of `roles`).
///
/// While the session is still resolving a neutral loading view is shown;
/// neither the content nor a redirect happens until it settles.
#[component]
pub fn ProtectedRoute(#[prop(optional)] roles: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let allowed = roles.clone();
    install_guard_redirect(auth, roles, use_navigate());

    move || match guard_decision(&auth.get(), &allowed) {
        GuardDecision::Loading => view! {
            <div class="route-guard route-guard--loading">
                <p>"Loading..."</p>
            </div>
        }
        .into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::RedirectToLogin | GuardDecision::RedirectHome => {
            view! { <div class="route-guard"></div> }.into_any()
        }
    }
}
