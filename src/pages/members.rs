//! Members Page
//!
//! Admin-only member directory.

use leptos::prelude::*;
use remote_collection::{ActionKind, FilterCriteria, FilterValue, ModalSlot, SortSpec};

use crate::api;
use crate::components::{ChoiceFilter, ConfirmModal, ListStatus, SearchInput, SortSelect, StatusBadge};
use crate::context::use_app_context;
use crate::list::{use_list_controller, ListHandle, Notice};
use crate::models::{choice_label, Member, Role, DIVISIONS};

const SEARCH_FIELDS: &[&str] = &["fullName", "username", "email"];

const DELETED: Notice = Notice::new("Member deleted", "Failed to delete member");

#[component]
pub fn MembersPage() -> impl IntoView {
    let ctx = use_app_context();
    let page_size = ctx.page_size();
    let list = use_list_controller(move |client| api::member_list(client, page_size));

    let search = RwSignal::new(String::new());
    let division = RwSignal::new(String::new());
    let sort = RwSignal::new(SortSpec::NameAsc);

    let rows = move || {
        let criteria = FilterCriteria::new(SEARCH_FIELDS)
            .with_search(search.get())
            .with_filter("expertDivision", FilterValue::from_option(&division.get()));
        list.rows(&criteria, sort.get())
    };

    let confirm_delete = move |_: ()| {
        if let Some(member) = list.peek_modals(|m| m.confirm(ModalSlot::DeleteConfirm)) {
            list.dispatch_from_modal(ModalSlot::DeleteConfirm, api::delete_member(&member.id), DELETED);
        }
    };

    view! {
        <Show
            when=move || ctx.allows(Role::can_manage_members)
            fallback=|| view! { <div class="page-forbidden">"Only administrators can manage members."</div> }
        >
            <div class="page members-page">
                <div class="page-toolbar">
                    <SearchInput value=search placeholder="Search name, NIM or email..." />
                    <ChoiceFilter value=division choices=DIVISIONS any_label="All divisions" />
                    <SortSelect value=sort />
                </div>

                <ListStatus
                    loading=Signal::derive(move || list.is_loading())
                    error=Signal::derive(move || list.error())
                    empty=Signal::derive(move || list.is_empty())
                    empty_text="No members yet"
                    on_retry=move |_| list.refresh()
                />

                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"NIM"</th>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Division"</th>
                            <th>"Role"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || rows().into_iter().map(|member| view! { <MemberRow member=member list=list /> }).collect_view()}
                    </tbody>
                </table>

                <ConfirmModal
                    title="Delete member"
                    message=Signal::derive(move || {
                        list.target(ModalSlot::DeleteConfirm)
                            .map(|m| format!("Delete {} ({})?", m.full_name, m.username))
                            .unwrap_or_default()
                    })
                    open=Signal::derive(move || list.is_open(ModalSlot::DeleteConfirm))
                    busy=Signal::derive(move || list.is_busy())
                    on_confirm=confirm_delete
                    on_cancel=move |_| list.cancel(ModalSlot::DeleteConfirm)
                />
            </div>
        </Show>
    }
}

#[component]
fn MemberRow(member: Member, list: ListHandle<Member>) -> impl IntoView {
    let id = member.id.clone();
    let deleting = move || list.is_pending_for(ActionKind::Delete, &id);
    let (status, status_label) = if member.is_active { ("ACTIVE", "Active") } else { ("INACTIVE", "Inactive") };
    let role = Role::from(member.role.clone());
    let division = member.expert_division.as_deref().map(|d| choice_label(DIVISIONS, d)).unwrap_or_else(|| "-".into());
    let target = member.clone();

    view! {
        <tr class:row-busy=deleting>
            <td class="mono">{member.username.clone()}</td>
            <td>{member.full_name.clone()}</td>
            <td>{member.email.clone().unwrap_or_else(|| "-".into())}</td>
            <td>{division}</td>
            <td>{role.label().to_string()}</td>
            <td><StatusBadge status=status label=status_label /></td>
            <td class="row-actions">
                <button
                    class="btn btn-small btn-danger"
                    disabled=move || list.is_busy()
                    on:click=move |_| list.open(ModalSlot::DeleteConfirm, target.clone())
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}
