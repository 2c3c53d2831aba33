//! Sidebar Component
//!
//! Collapsible navigation; entries depend on the signed-in role.

use leptos::prelude::*;

use crate::context::{menu_for, use_app_context};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();
    let collapsed = ctx.sidebar_collapsed;

    let entries = move || ctx.role().map(|role| menu_for(&role)).unwrap_or_default();

    view! {
        <aside class=move || if collapsed.get() { "sidebar collapsed" } else { "sidebar" }>
            <div class="sidebar-brand" on:click=move |_| ctx.navigate(crate::context::Route::Dashboard)>
                <span class="brand-mark">"LAB"</span>
                <Show when=move || !collapsed.get()>
                    <span class="brand-name">"Lab Manager"</span>
                </Show>
            </div>
            <nav>
                <ul>
                    <For
                        each=entries
                        key=|route| *route
                        children=move |route| {
                            let is_active = move || ctx.route.get() == route;
                            view! {
                                <li>
                                    <button
                                        class=move || if is_active() { "nav-link active" } else { "nav-link" }
                                        title=move || collapsed.get().then(|| route.label())
                                        on:click=move |_| ctx.navigate(route)
                                    >
                                        <span class="nav-label">{route.label()}</span>
                                    </button>
                                </li>
                            }
                        }
                    />
                </ul>
            </nav>
            <button
                class="sidebar-toggle"
                aria-label=move || if collapsed.get() { "Expand sidebar" } else { "Collapse sidebar" }
                on:click=move |_| collapsed.update(|c| *c = !*c)
            >
                {move || if collapsed.get() { "»" } else { "«" }}
            </button>
        </aside>
    }
}
