//! Projects Page
//!
//! Project table with search, division/status filters and sorting. Rows
//! open a detail modal (approve / reject), a delete confirmation, and for
//! completed projects an archive form.

use leptos::prelude::*;
use remote_collection::{ActionKind, FilterCriteria, FilterValue, ModalSlot, SortSpec};

use super::archive_modal::ArchiveModal;
use crate::api;
use crate::components::{ChoiceFilter, ConfirmModal, ListStatus, Modal, ReasonForm, SearchInput, SortSelect, StatusBadge};
use crate::context::use_app_context;
use crate::list::{use_list_controller, ListHandle, Notice};
use crate::models::{choice_label, date_part, ArchiveSource, CreateArchiveRequest, Project, Role, DIVISIONS, PROJECT_STATUSES};

const SEARCH_FIELDS: &[&str] = &["name", "projectCode"];

const APPROVED: Notice = Notice::new("Project approved", "Failed to approve project");
const REJECTED: Notice = Notice::new("Project rejected", "Failed to reject project");
const DELETED: Notice = Notice::new("Project deleted", "Failed to delete project");
const ARCHIVED: Notice = Notice::new("Project archived", "Failed to archive project");

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let ctx = use_app_context();
    let page_size = ctx.page_size();
    let list = use_list_controller(move |client| api::project_list(client, page_size));

    let search = RwSignal::new(String::new());
    let division = RwSignal::new(String::new());
    let status = RwSignal::new(String::new());
    let sort = RwSignal::new(SortSpec::default());

    let rows = move || {
        let criteria = FilterCriteria::new(SEARCH_FIELDS)
            .with_search(search.get())
            .with_filter("division", FilterValue::from_option(&division.get()))
            .with_filter("status", FilterValue::from_option(&status.get()));
        list.rows(&criteria, sort.get())
    };

    let delete_target = move || list.target(ModalSlot::DeleteConfirm);
    let confirm_delete = move |_: ()| {
        if let Some(project) = list.peek_modals(|m| m.confirm(ModalSlot::DeleteConfirm)) {
            list.dispatch_from_modal(ModalSlot::DeleteConfirm, api::delete_project(&project.id), DELETED);
        }
    };

    let submit_archive = move |archive: CreateArchiveRequest| {
        let Some(project) = list.peek_modals(|m| m.confirm(ModalSlot::Archive)) else { return };
        match api::archive_project(&project.id, &archive) {
            Ok(request) => list.dispatch_from_modal(ModalSlot::Archive, request, ARCHIVED),
            Err(err) => list.reject_input(err.user_message(ARCHIVED.failure)),
        }
    };

    view! {
        <div class="page projects-page">
            <div class="page-toolbar">
                <SearchInput value=search placeholder="Search name or code..." />
                <ChoiceFilter value=division choices=DIVISIONS any_label="All divisions" />
                <ChoiceFilter value=status choices=PROJECT_STATUSES any_label="All statuses" />
                <SortSelect value=sort />
                <button class="btn btn-secondary" on:click=move |_| list.refresh()>"Refresh"</button>
            </div>

            <ListStatus
                loading=Signal::derive(move || list.is_loading())
                error=Signal::derive(move || list.error())
                empty=Signal::derive(move || list.is_empty())
                empty_text="No projects yet"
                on_retry=move |_| list.refresh()
            />

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Code"</th>
                        <th>"Name"</th>
                        <th>"Leader"</th>
                        <th>"Division"</th>
                        <th>"Status"</th>
                        <th>"Progress"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || rows().into_iter().map(|project| view! { <ProjectRow project=project list=list /> }).collect_view()}
                </tbody>
            </table>

            <ProjectDetailModal list=list />

            <ConfirmModal
                title="Delete project"
                message=Signal::derive(move || {
                    delete_target()
                        .map(|p| format!("Delete {} ({})? This cannot be undone.", p.name, p.project_code))
                        .unwrap_or_default()
                })
                open=Signal::derive(move || list.is_open(ModalSlot::DeleteConfirm))
                busy=Signal::derive(move || list.is_busy())
                on_confirm=confirm_delete
                on_cancel=move |_| list.cancel(ModalSlot::DeleteConfirm)
            />

            <ArchiveModal
                source=ArchiveSource::Project
                open=Signal::derive(move || list.is_open(ModalSlot::Archive))
                target=Signal::derive(move || list.target(ModalSlot::Archive).map(|p| (p.id, p.name)))
                busy=Signal::derive(move || list.is_busy())
                on_submit=submit_archive
                on_cancel=move |_| list.cancel(ModalSlot::Archive)
            />
        </div>
    }
}

#[component]
fn ProjectRow(project: Project, list: ListHandle<Project>) -> impl IntoView {
    let ctx = use_app_context();
    let id = project.id.clone();
    let deleting = move || list.is_pending_for(ActionKind::Delete, &id);
    let can_archive = project.is_completed();
    let detail_target = project.clone();
    let delete_target = project.clone();
    let archive_target = project.clone();

    view! {
        <tr class:row-busy=deleting>
            <td class="mono">{project.project_code.clone()}</td>
            <td>{project.name.clone()}</td>
            <td>{project.leader_name().to_string()}</td>
            <td>{choice_label(DIVISIONS, &project.division)}</td>
            <td>
                <StatusBadge status=project.status.clone() label=choice_label(PROJECT_STATUSES, &project.status) />
                {project.is_awaiting_approval().then(|| view! { <StatusBadge status="pending" label="Awaiting approval" /> })}
            </td>
            <td>{format!("{}%", project.progress_percent)}</td>
            <td class="row-actions">
                <button class="btn btn-small" on:click=move |_| list.open(ModalSlot::Detail, detail_target.clone())>
                    "Detail"
                </button>
                <Show when=move || can_archive && ctx.allows(Role::can_archive)>
                    {
                        let target = archive_target.clone();
                        view! {
                            <button
                                class="btn btn-small"
                                disabled=move || list.is_busy()
                                on:click=move |_| list.open(ModalSlot::Archive, target.clone())
                            >
                                "Archive"
                            </button>
                        }
                    }
                </Show>
                <Show when=move || ctx.allows(Role::can_delete)>
                    {
                        let target = delete_target.clone();
                        view! {
                            <button
                                class="btn btn-small btn-danger"
                                disabled=move || list.is_busy()
                                on:click=move |_| list.open(ModalSlot::DeleteConfirm, target.clone())
                            >
                                "Delete"
                            </button>
                        }
                    }
                </Show>
            </td>
        </tr>
    }
}

#[component]
fn ProjectDetailModal(list: ListHandle<Project>) -> impl IntoView {
    let ctx = use_app_context();
    let project = move || list.target(ModalSlot::Detail);
    let editing_reason = move || list.with_modals(|m| m.reason().is_editing());

    let approve = move || {
        let Some(p) = list.peek_modals(|m| m.confirm(ModalSlot::Detail)) else { return };
        list.dispatch_from_modal(ModalSlot::Detail, api::approve_project(&p.id), APPROVED);
    };

    let submit_reject = move |_: ()| {
        let Some(p) = list.peek_modals(|m| m.confirm(ModalSlot::Detail)) else { return };
        let request = list
            .peek_modals(|m| m.submit_reason())
            .and_then(|reason| api::reject_project(&p.id, &reason));
        match request {
            Ok(request) => list.dispatch_from_modal(ModalSlot::Detail, request, REJECTED),
            Err(err) => list.reject_input(err.user_message("A rejection reason is required")),
        }
    };

    let title = move || project().map(|p| format!("Project: {}", p.project_code)).unwrap_or_default();

    view! {
        <Modal
            title=Signal::derive(title)
            open=Signal::derive(move || list.is_open(ModalSlot::Detail))
            on_close=move |_| list.cancel(ModalSlot::Detail)
        >
            {move || project().map(|p| {
                let can_decide = p.is_awaiting_approval();
                view! {
                    <dl class="detail-grid">
                        <dt>"Name"</dt><dd>{p.name.clone()}</dd>
                        <dt>"Division"</dt><dd>{choice_label(DIVISIONS, &p.division)}</dd>
                        <dt>"Activity"</dt><dd>{p.activity_type.clone().unwrap_or_default()}</dd>
                        <dt>"Status"</dt><dd>{choice_label(PROJECT_STATUSES, &p.status)}</dd>
                        <dt>"Approval"</dt><dd>{p.approval_status.clone().unwrap_or_else(|| "-".into())}</dd>
                        <dt>"Period"</dt>
                        <dd>
                            {p.start_date.as_deref().map(date_part).unwrap_or("-").to_string()}
                            " to "
                            {p.end_date.as_deref().map(date_part).unwrap_or("-").to_string()}
                        </dd>
                        <dt>"Leader"</dt><dd>{p.leader_name().to_string()}</dd>
                        <dt>"Team"</dt>
                        <dd>{p.team_members.iter().map(|m| m.full_name.clone()).collect::<Vec<_>>().join(", ")}</dd>
                        <dt>"Progress"</dt><dd>{format!("{}%", p.progress_percent)}</dd>
                    </dl>
                    <p class="detail-description">{p.description.clone().unwrap_or_default()}</p>
                    {p.rejection_reason.clone().map(|r| view! { <p class="detail-rejection">"Rejected: " {r}</p> })}
                    <Show when=move || can_decide && ctx.allows(Role::can_approve_projects)>
                        <Show
                            when=editing_reason
                            fallback=move || view! {
                                <div class="modal-actions">
                                    <button
                                        class="btn btn-danger"
                                        disabled=move || list.is_busy()
                                        on:click=move |_| list.update_modals(|m| m.begin_reason())
                                    >
                                        "Reject"
                                    </button>
                                    <button class="btn btn-primary" disabled=move || list.is_busy() on:click=move |_| approve()>
                                        {move || if list.is_busy() { "Working..." } else { "Approve" }}
                                    </button>
                                </div>
                            }
                        >
                            <ReasonForm
                                reason=Signal::derive(move || list.with_modals(|m| m.reason().text().to_string()))
                                on_input=move |text: String| list.update_modals(|m| m.set_reason(text))
                                on_submit=submit_reject
                                on_cancel=move |_| list.update_modals(|m| m.cancel_reason())
                                busy=Signal::derive(move || list.is_busy())
                            />
                        </Show>
                    </Show>
                }
            })}
        </Modal>
    }
}
