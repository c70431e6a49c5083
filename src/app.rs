//! Root application component with routing and the auth context.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::config::ApiConfig;
use crate::net::api::HttpAuthApi;
use crate::pages::{
    dashboard::DashboardPage,
    login::LoginPage,
    profile::ProfilePage,
    register::{RegisterChoicePage, RegisterCompanyPage, RegisterStudentPage},
};
use crate::state::auth::{AuthContext, AuthService, AuthState};
use crate::state::session::{LocalStorageBackend, SessionStore};

/// Auth context type used by the browser app.
pub type AppAuth = AuthContext<HttpAuthApi, LocalStorageBackend>;

/// Handle under which [`App`] provides the auth context.
pub type AuthHandle = StoredValue<AppAuth, LocalStorage>;

/// Auth context provided by [`App`].
pub fn use_auth() -> AuthHandle {
    expect_context::<AuthHandle>()
}

/// Root application component.
///
/// Builds the auth context once, mirrors its state into an
/// `RwSignal<AuthState>` for reactive readers, and starts session resolution.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let service = AuthService::new(
        HttpAuthApi::new(ApiConfig::from_env()),
        SessionStore::new(LocalStorageBackend),
    );
    let ctx = AuthContext::new(service, move |state: &AuthState| auth.set(state.clone()));

    provide_context(auth);
    provide_context::<AuthHandle>(StoredValue::new_local(ctx.clone()));

    leptos::task::spawn_local(async move { ctx.resolve().await });

    view! {
        <Title text="SoftLink"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| view! { <Redirect path="/dashboard"/> }/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterChoicePage/>
                <Route path=(StaticSegment("register"), StaticSegment("student")) view=RegisterStudentPage/>
                <Route path=(StaticSegment("register"), StaticSegment("company")) view=RegisterCompanyPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=StaticSegment("profile") view=ProfilePage/>
            </Routes>
        </Router>
    }
}
