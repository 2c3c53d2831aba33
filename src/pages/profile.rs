//! Profile Page
//!
//! Contact details of the signed-in member and the password change form.
//! Members still on the default password only see the latter.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_app_context;
use crate::models::{choice_label, Member, UpdateProfileRequest, DIVISIONS, MIN_PASSWORD_LEN};
use crate::store::{notify_error, notify_success, use_ui_store};

/// Time to read the success notice before the forced sign-out
const SIGN_OUT_DELAY_MS: u32 = 2000;

#[component]
pub fn ProfilePage() -> impl IntoView {
    let ctx = use_app_context();
    let toasts = use_ui_store();
    let member = RwSignal::new(None::<Member>);
    let form = RwSignal::new(UpdateProfileRequest::default());
    let saving = RwSignal::new(false);

    let must_change = move || ctx.user.with(|u| u.as_ref().is_some_and(|u| !u.is_password_changed));

    let load = move || {
        let Some(id) = ctx.user.with_untracked(|u| u.as_ref().map(|u| u.id.clone())) else {
            return;
        };
        let client = ctx.client();
        spawn_local(async move {
            match api::fetch_member(&client, &id).await {
                Ok(loaded) => {
                    form.try_set(UpdateProfileRequest::from_member(&loaded));
                    member.try_set(Some(loaded));
                }
                Err(err) => {
                    log::warn!("profile load failed: {}", err);
                    notify_error(&toasts, err.user_message("Failed to load profile"));
                }
            }
        });
    };
    load();

    let submit_profile = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let request = form.get_untracked();
        saving.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match api::update_profile(&client, &request).await {
                Ok(()) => {
                    notify_success(&toasts, "Profile updated");
                    load();
                }
                Err(err) => {
                    log::warn!("profile update failed: {}", err);
                    notify_error(&toasts, err.user_message("Failed to update profile"));
                }
            }
            saving.try_set(false);
        });
    };

    let initial = move || {
        ctx.user.with(|u| {
            u.as_ref()
                .and_then(|u| u.display_name().chars().next())
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "U".into())
        })
    };
    let user_text = move |pick: fn(&crate::models::User) -> String| {
        move || ctx.user.with(|u| u.as_ref().map(pick).unwrap_or_default())
    };

    view! {
        <div class="page profile-page">
            <Show when=must_change>
                <div class="list-error security-warning">
                    <strong>"Account security"</strong>
                    <span>"You are still using the default password. Change it to keep your account safe."</span>
                </div>
            </Show>

            <section class="card profile-hero">
                <div class="profile-avatar">{initial}</div>
                <div class="profile-identity">
                    <h2>{user_text(|u| u.display_name().to_string())}</h2>
                    <p class="profile-username">"@" {user_text(|u| u.username.clone())}</p>
                    <span class="badge">{user_text(|u| u.role.label().to_string())}</span>
                    {move || {
                        member
                            .with(|m| m.as_ref().and_then(|m| m.expert_division.clone()))
                            .map(|d| view! { <span class="badge badge-muted">{choice_label(DIVISIONS, &d)}</span> })
                    }}
                </div>
            </section>

            <div class="profile-columns">
                <Show when=move || !must_change()>
                    <section class="card">
                        <h3>"Personal information"</h3>
                        <form class="modal-form" on:submit=submit_profile>
                            <label>
                                "Student number"
                                <input type="text" readonly=true prop:value=user_text(|u| u.username.clone()) />
                            </label>
                            <label>
                                "Full name"
                                <input type="text" readonly=true prop:value=user_text(|u| u.full_name.clone()) />
                            </label>
                            <label>
                                "Email"
                                <input
                                    type="email"
                                    placeholder="email@example.com"
                                    prop:value=move || form.with(|f| f.email.clone())
                                    on:input=move |ev| form.update(|f| f.email = event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Phone number"
                                <input
                                    type="tel"
                                    placeholder="08123456789"
                                    prop:value=move || form.with(|f| f.phone_number.clone())
                                    on:input=move |ev| form.update(|f| f.phone_number = event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Social media link"
                                <input
                                    type="url"
                                    placeholder="https://linkedin.com/in/username"
                                    prop:value=move || form.with(|f| f.social_media_link.clone())
                                    on:input=move |ev| form.update(|f| f.social_media_link = event_target_value(&ev))
                                />
                            </label>
                            <label>
                                "Expert division"
                                <select on:change=move |ev| form.update(|f| f.expert_division = event_target_value(&ev))>
                                    <option value="" selected=move || form.with(|f| f.expert_division.is_empty())>
                                        "Not set"
                                    </option>
                                    {DIVISIONS
                                        .iter()
                                        .map(|(value, label)| {
                                            let value = *value;
                                            view! {
                                                <option value=value selected=move || form.with(|f| f.expert_division == value)>
                                                    {*label}
                                                </option>
                                            }
                                        })
                                        .collect_view()}
                                </select>
                            </label>
                            <label>
                                "Department"
                                <input
                                    type="text"
                                    prop:value=move || form.with(|f| f.department.clone())
                                    on:input=move |ev| form.update(|f| f.department = event_target_value(&ev))
                                />
                            </label>
                            <div class="modal-actions">
                                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                                    "Save changes"
                                </button>
                            </div>
                        </form>
                    </section>
                </Show>

                <PasswordCard />
            </div>
        </div>
    }
}

#[component]
fn PasswordCard() -> impl IntoView {
    let ctx = use_app_context();
    let toasts = use_ui_store();
    let current = RwSignal::new(String::new());
    let new = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let changing = RwSignal::new(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if changing.get_untracked() {
            return;
        }
        let (old_pw, new_pw, confirm_pw) = (current.get_untracked(), new.get_untracked(), confirm.get_untracked());
        changing.set(true);
        let client = ctx.client();
        spawn_local(async move {
            match api::change_password(&client, &old_pw, &new_pw, &confirm_pw).await {
                Ok(()) => {
                    notify_success(&toasts, "Password changed, please sign in again");
                    TimeoutFuture::new(SIGN_OUT_DELAY_MS).await;
                    ctx.sign_out();
                }
                Err(err) => {
                    log::warn!("password change failed: {}", err);
                    notify_error(&toasts, err.user_message("Failed to change password"));
                    changing.try_set(false);
                }
            }
        });
    };

    let password_input = move |label: &'static str, value: RwSignal<String>, autocomplete: &'static str| {
        view! {
            <label>
                {label}
                <input
                    type="password"
                    autocomplete=autocomplete
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </label>
        }
    };

    view! {
        <section class="card">
            <h3>"Security"</h3>
            <form class="modal-form" on:submit=submit>
                {password_input("Current password", current, "current-password")}
                {password_input("New password", new, "new-password")}
                {password_input("Confirm new password", confirm, "new-password")}
                <ul class="form-hint">
                    <li>{format!("At least {} characters.", MIN_PASSWORD_LEN)}</li>
                    <li>"You will be signed out after a successful change."</li>
                </ul>
                <div class="modal-actions">
                    <button type="submit" class="btn btn-danger" disabled=move || changing.get()>
                        "Change password"
                    </button>
                </div>
            </form>
        </section>
    }
}
