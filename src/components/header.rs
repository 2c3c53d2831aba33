//! Header Component
//!
//! Page title, signed-in user (links to the profile), theme toggle and
//! logout.

use leptos::prelude::*;

use crate::context::{use_app_context, Route};

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_app_context();

    let name = move || ctx.user.with(|u| u.as_ref().map(|u| u.display_name().to_string()).unwrap_or_default());
    let role = move || ctx.user.with(|u| u.as_ref().map(|u| u.role.label().to_string()).unwrap_or_default());

    view! {
        <header class="header">
            <h1 class="header-title">{move || ctx.route.get().label()}</h1>
            <div class="header-actions">
                <button
                    class="theme-toggle"
                    title="Toggle theme"
                    on:click=move |_| ctx.theme.update(|t| *t = t.toggled())
                >
                    {move || ctx.theme.get().toggled().as_str()}
                </button>
                <div class="header-user" title="Profile" on:click=move |_| ctx.navigate(Route::Profile)>
                    <span class="user-name">{name}</span>
                    <span class="user-role">{role}</span>
                </div>
                <button class="btn btn-secondary" on:click=move |_| ctx.sign_out()>"Logout"</button>
            </div>
        </header>
    }
}
