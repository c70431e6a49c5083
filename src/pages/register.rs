//! Registration pages for students and companies.
//!
//! Coordinators are provisioned by the institution and never sign up here.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::app::use_auth;
use crate::net::error::AuthError;
use crate::net::types::Role;
use crate::state::registration::RegistrationForm;
use crate::util::role_view::{ProfileField, ViewVariant};

/// Role-specific inputs, after the common name/phone pair.
fn role_fields(role: Role) -> Vec<ProfileField> {
    ViewVariant::for_role(Some(role))
        .editable_fields()
        .iter()
        .copied()
        .filter(|f| !matches!(f, ProfileField::Name | ProfileField::Phone))
        .collect()
}

fn form_field_key(field: ProfileField) -> &'static str {
    match field {
        ProfileField::Name => "name",
        ProfileField::Phone => "phone",
        ProfileField::Technologies => "technologies",
        ProfileField::Bio => "bio",
        ProfileField::Github => "github",
        ProfileField::Website => "website",
        ProfileField::Address => "address",
        ProfileField::TaxId => "tax_id",
    }
}

fn form_value(form: &RegistrationForm, field: ProfileField) -> String {
    match field {
        ProfileField::Name => form.name.clone(),
        ProfileField::Phone => form.phone.clone(),
        ProfileField::Technologies => form.technologies.clone(),
        ProfileField::Bio => form.bio.clone(),
        ProfileField::Github => form.github.clone(),
        ProfileField::Website => form.website.clone(),
        ProfileField::Address => form.address.clone(),
        ProfileField::TaxId => form.tax_id.clone(),
    }
}

fn set_form_value(form: &mut RegistrationForm, field: ProfileField, value: String) {
    match field {
        ProfileField::Name => form.name = value,
        ProfileField::Phone => form.phone = value,
        ProfileField::Technologies => form.technologies = value,
        ProfileField::Bio => form.bio = value,
        ProfileField::Github => form.github = value,
        ProfileField::Website => form.website = value,
        ProfileField::Address => form.address = value,
        ProfileField::TaxId => form.tax_id = value,
    }
}

/// Form key for a field name as reported either locally or by the API.
fn form_key(field: &str) -> &str {
    match field {
        "nombre" => "name",
        "telefono" => "phone",
        "tecnologias" => "technologies",
        "sitio_web" => "website",
        "direccion" => "address",
        "identificador_fiscal" => "tax_id",
        other => other,
    }
}

/// Messages for the input keyed `key`, joined when several apply.
fn inline_message(error: &AuthError, key: &str) -> Option<String> {
    let AuthError::Validation(errors) = error else {
        return None;
    };
    let messages: Vec<&str> = errors
        .iter()
        .filter(|e| form_key(&e.field) == key)
        .map(|e| e.message.as_str())
        .collect();
    (!messages.is_empty()).then(|| messages.join("; "))
}

/// Keys of the credential inputs rendered above the profile fields.
const CREDENTIAL_KEYS: &[&str] = &["email", "password", "confirm_password"];

/// Error text that has no input to sit under: transport/conflict errors,
/// and validation entries for fields this form does not render.
fn general_message(error: &AuthError, role: Role) -> Option<String> {
    let AuthError::Validation(errors) = error else {
        return Some(error.to_string());
    };
    let mut inline: Vec<&str> = CREDENTIAL_KEYS.to_vec();
    inline.extend([ProfileField::Name, ProfileField::Phone].into_iter().map(form_field_key));
    inline.extend(role_fields(role).into_iter().map(form_field_key));

    let rest: Vec<&str> = errors
        .iter()
        .filter(|e| !inline.contains(&form_key(&e.field)))
        .map(|e| e.message.as_str())
        .collect();
    (!rest.is_empty()).then(|| rest.join("; "))
}

#[component]
pub fn RegisterChoicePage() -> impl IntoView {
    view! {
        <div class="register-page">
            <div class="register-card">
                <h1>"Join SoftLink"</h1>
                <p class="register-card__subtitle">"How will you use the platform?"</p>
                <A href="/register/student">"I am a student"</A>
                <A href="/register/company">"I represent a company"</A>
                <p class="register-card__subtitle">
                    "Already registered? "
                    <A href="/login">"Sign in"</A>
                </p>
            </div>
        </div>
    }
}

#[component]
pub fn RegisterStudentPage() -> impl IntoView {
    view! { <RegisterPage role=Role::Student/> }
}

#[component]
pub fn RegisterCompanyPage() -> impl IntoView {
    view! { <RegisterPage role=Role::Company/> }
}

#[component]
fn FieldInput(
    form: RwSignal<RegistrationForm>,
    field: ProfileField,
    error: RwSignal<Option<AuthError>>,
) -> impl IntoView {
    let key = form_field_key(field);
    view! {
        <label class="register-field">
            <span>{field.label()}</span>
            {if field.is_multiline() {
                view! {
                    <textarea
                        prop:value=move || form.with(|f| form_value(f, field))
                        on:input=move |ev| form.update(|f| set_form_value(f, field, event_target_value(&ev)))
                    ></textarea>
                }
                .into_any()
            } else {
                view! {
                    <input
                        type="text"
                        prop:value=move || form.with(|f| form_value(f, field))
                        on:input=move |ev| form.update(|f| set_form_value(f, field, event_target_value(&ev)))
                    />
                }
                .into_any()
            }}
            <FieldMessage error key/>
        </label>
    }
}

#[component]
fn FieldMessage(error: RwSignal<Option<AuthError>>, key: &'static str) -> impl IntoView {
    let message = move || {
        error.with(|e| e.as_ref().and_then(|e| inline_message(e, key)))
    };
    view! {
        <Show when=move || message().is_some()>
            <p class="register-field__error">{move || message().unwrap_or_default()}</p>
        </Show>
    }
}

#[component]
fn RegisterPage(role: Role) -> impl IntoView {
    let handle = use_auth();
    let navigate = use_navigate();

    let form = RwSignal::new(RegistrationForm::new(role));
    let error = RwSignal::new(None::<AuthError>);
    let success = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let general = Memo::new(move |_| error.with(|e| e.as_ref().and_then(|e| general_message(e, role))));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        busy.set(true);
        error.set(None);

        let ctx = handle.get_value();
        let submitted = form.get();
        let navigate = navigate.clone();
        leptos::task::spawn_local(async move {
            match ctx.register(&submitted).await {
                Ok(_) => {
                    success.set(true);
                    #[cfg(feature = "csr")]
                    gloo_timers::future::TimeoutFuture::new(2_000).await;
                    navigate("/login", leptos_router::NavigateOptions::default());
                }
                Err(e) => {
                    error.set(Some(e));
                    busy.set(false);
                }
            }
        });
    };

    let text_input = move |key: &'static str, kind: &'static str, get: fn(&RegistrationForm) -> String, set: fn(&mut RegistrationForm, String)| {
        view! {
            <input
                class="register-input"
                type=kind
                name=key
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
            <FieldMessage error key/>
        }
    };

    view! {
        <div class="register-page">
            <div class="register-card">
                <h1>{format!("Create a {} account", role.label().to_ascii_lowercase())}</h1>
                <Show when=move || success.get()>
                    <p class="register-message register-message--ok">"Account created! Redirecting to sign in..."</p>
                </Show>
                <Show when=move || general.get().is_some()>
                    <p class="register-message">{move || general.get().unwrap_or_default()}</p>
                </Show>
                <form class="register-form" on:submit=on_submit>
                    <FieldInput form field=ProfileField::Name error/>
                    <label class="register-field">
                        <span>"Email"</span>
                        {text_input("email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    </label>
                    <label class="register-field">
                        <span>"Password"</span>
                        {text_input("password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                    </label>
                    <label class="register-field">
                        <span>"Confirm password"</span>
                        {text_input(
                            "confirm_password",
                            "password",
                            |f| f.confirm_password.clone(),
                            |f, v| f.confirm_password = v,
                        )}
                    </label>
                    <FieldInput form field=ProfileField::Phone error/>
                    {role_fields(role)
                        .into_iter()
                        .map(|field| view! { <FieldInput form field error/> })
                        .collect_view()}
                    <button class="register-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
