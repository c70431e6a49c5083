//! Role-conditional dashboard.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_auth;
use crate::components::protected_route::ProtectedRoute;
use crate::state::auth::AuthState;
use crate::util::role_view::ViewVariant;

#[component]
pub fn DashboardPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <Dashboard/>
        </ProtectedRoute>
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let handle = use_auth();

    let user = move || auth.with(|s| s.user().cloned());
    let variant = move || ViewVariant::for_role(user().and_then(|u| u.role()));
    let role_label = move || user().and_then(|u| u.role()).map_or("Member", |r| r.label());

    // The guard redirects to /login once the state flips to Unauthenticated.
    let on_logout = move |_: leptos::ev::MouseEvent| handle.get_value().logout();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>{move || variant().title()}</h1>
                <div class="dashboard-header__user">
                    <span>{move || user().map(|u| u.name).unwrap_or_default()}</span>
                    <span class="dashboard-badge">{role_label}</span>
                    <A href="/profile">"My profile"</A>
                    <button class="dashboard-logout" on:click=on_logout>"Log out"</button>
                </div>
            </header>
            <section class="dashboard-actions">
                <Show
                    when=move || !variant().actions().is_empty()
                    fallback=|| view! { <p>"Nothing to show for this account yet."</p> }
                >
                    <ul>
                        {move || {
                            variant()
                                .actions()
                                .iter()
                                .map(|action| view! { <li class="dashboard-action">{action.label()}</li> })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </section>
        </div>
    }
}
