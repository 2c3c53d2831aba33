use leptos::prelude::*;

/// Pill showing a status code; the class is derived from the code
#[component]
pub fn StatusBadge(#[prop(into)] status: String, #[prop(into)] label: String) -> impl IntoView {
    let class = format!("badge badge-{}", status.to_lowercase().replace('_', "-"));
    view! { <span class=class>{label}</span> }
}
