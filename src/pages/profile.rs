//! Profile page: view and edit the signed-in user's own record.
//!
//! Editable fields come from the role's view variant. Students can attach a
//! PDF CV; coordinators and companies can replace their photo. Uploads are
//! browser-only.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::app::use_auth;
use crate::components::protected_route::ProtectedRoute;
use crate::net::api::UploadKind;
use crate::net::types::{ProfileUpdate, RoleProfile, UserProfile};
use crate::state::auth::AuthState;
use crate::util::role_view::{ProfileField, ViewVariant};

fn draft_value(draft: &ProfileUpdate, field: ProfileField) -> String {
    let value = match field {
        ProfileField::Name => &draft.nombre,
        ProfileField::Phone => &draft.telefono,
        ProfileField::Technologies => &draft.tecnologias,
        ProfileField::Bio => &draft.bio,
        ProfileField::Github => &draft.github,
        ProfileField::Website => &draft.sitio_web,
        ProfileField::Address => &draft.direccion,
        ProfileField::TaxId => &draft.identificador_fiscal,
    };
    value.clone().unwrap_or_default()
}

fn set_draft_value(draft: &mut ProfileUpdate, field: ProfileField, value: String) {
    let slot = match field {
        ProfileField::Name => &mut draft.nombre,
        ProfileField::Phone => &mut draft.telefono,
        ProfileField::Technologies => &mut draft.tecnologias,
        ProfileField::Bio => &mut draft.bio,
        ProfileField::Github => &mut draft.github,
        ProfileField::Website => &mut draft.sitio_web,
        ProfileField::Address => &mut draft.direccion,
        ProfileField::TaxId => &mut draft.identificador_fiscal,
    };
    *slot = Some(value);
}

/// Keep upload links the update response did not echo back.
fn merge_saved(saved: UserProfile, previous: &UserProfile) -> UserProfile {
    let mut merged = saved;
    if merged.photo_url.is_none() {
        merged.photo_url.clone_from(&previous.photo_url);
    }
    if let (RoleProfile::Student(next), RoleProfile::Student(prev)) = (&mut merged.role, &previous.role) {
        if next.cv_url.is_none() {
            next.cv_url.clone_from(&prev.cv_url);
        }
    }
    merged
}

/// Apply an uploaded file's URL to the matching profile slot.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
fn apply_upload(profile: UserProfile, kind: UploadKind, url: String) -> UserProfile {
    match kind {
        UploadKind::Photo => profile.with_photo_url(url),
        UploadKind::Document => profile.with_cv_url(url),
    }
}

fn cv_url(profile: &UserProfile) -> Option<String> {
    match &profile.role {
        RoleProfile::Student(student) => student.cv_url.clone(),
        _ => None,
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <ProfileEditor/>
        </ProtectedRoute>
    }
}

#[component]
fn ProfileEditor() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let handle = use_auth();

    let Some(initial) = auth.get_untracked().user().cloned() else {
        return view! { <div class="profile-page"></div> }.into_any();
    };
    let variant = ViewVariant::for_role(initial.role());
    let draft = RwSignal::new(ProfileUpdate::from_profile(&initial));
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        info.set("Saving...".to_owned());

        let ctx = handle.get_value();
        let update = draft.get();
        leptos::task::spawn_local(async move {
            match ctx.service().update_profile(update).await {
                Ok(saved) => {
                    if let Some(previous) = ctx.current_user() {
                        let merged = merge_saved(saved, &previous);
                        draft.set(ProfileUpdate::from_profile(&merged));
                        ctx.update_current_user(merged);
                    }
                    info.set("Profile updated.".to_owned());
                }
                Err(e) => info.set(e.to_string()),
            }
            busy.set(false);
        });
    };

    let current = move || auth.with(|s| s.user().cloned());

    view! {
        <div class="profile-page">
            <div class="profile-card">
                <A href="/dashboard">"Back to dashboard"</A>
                <h1>"My profile"</h1>
                <p class="profile-card__subtitle">
                    {move || current().map(|u| u.email).unwrap_or_default()}
                </p>
                <Show when=move || current().is_some_and(|u| u.photo_url.is_some())>
                    <img
                        class="profile-photo"
                        alt="Profile photo"
                        src=move || current().and_then(|u| u.photo_url).unwrap_or_default()
                    />
                </Show>
                <form class="profile-form" on:submit=on_save>
                    {variant
                        .editable_fields()
                        .iter()
                        .copied()
                        .map(|field| view! { <DraftInput draft field/> })
                        .collect_view()}
                    <button class="profile-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Saving..." } else { "Save changes" }}
                    </button>
                </form>
                {variant.offers_photo_upload().then(|| view! { <UploadInput kind=UploadKind::Photo info/> })}
                {variant.offers_cv_upload().then(|| view! {
                    <Show when=move || current().as_ref().and_then(cv_url).is_some()>
                        <a
                            class="profile-cv"
                            target="_blank"
                            href=move || current().as_ref().and_then(cv_url).unwrap_or_default()
                        >
                            "View current CV"
                        </a>
                    </Show>
                    <UploadInput kind=UploadKind::Document info/>
                })}
                <Show when=move || !info.get().is_empty()>
                    <p class="profile-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn DraftInput(draft: RwSignal<ProfileUpdate>, field: ProfileField) -> impl IntoView {
    view! {
        <label class="profile-field">
            <span>{field.label()}</span>
            {if field.is_multiline() {
                view! {
                    <textarea
                        prop:value=move || draft.with(|d| draft_value(d, field))
                        on:input=move |ev| draft.update(|d| set_draft_value(d, field, event_target_value(&ev)))
                    ></textarea>
                }
                .into_any()
            } else {
                view! {
                    <input
                        type="text"
                        prop:value=move || draft.with(|d| draft_value(d, field))
                        on:input=move |ev| draft.update(|d| set_draft_value(d, field, event_target_value(&ev)))
                    />
                }
                .into_any()
            }}
        </label>
    }
}

#[component]
fn UploadInput(kind: UploadKind, info: RwSignal<String>) -> impl IntoView {
    let handle = use_auth();
    let (label, accept) = match kind {
        UploadKind::Photo => ("Change photo", "image/*"),
        UploadKind::Document => ("Upload CV (PDF)", "application/pdf"),
    };

    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "csr")]
        {
            use wasm_bindgen::JsCast;

            let Some(file) = ev
                .target()
                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                .and_then(|input| input.files())
                .and_then(|files| files.get(0))
            else {
                return;
            };
            if let Err(e) = kind.check(&file.type_()) {
                info.set(e.to_string());
                return;
            }
            info.set("Uploading...".to_owned());
            let ctx = handle.get_value();
            leptos::task::spawn_local(async move {
                let result = match ctx.service().bearer_token() {
                    Ok(token) => ctx.service().api().upload(&token, kind, &file).await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(url) => {
                        if let Some(profile) = ctx.current_user() {
                            ctx.update_current_user(apply_upload(profile, kind, url));
                        }
                        info.set("File uploaded.".to_owned());
                    }
                    Err(e) => info.set(e.to_string()),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (ev, handle);
            info.set("Uploads are only available in the browser.".to_owned());
        }
    };

    view! {
        <label class="profile-upload">
            <span>{label}</span>
            <input type="file" accept=accept on:change=on_change/>
        </label>
    }
}
