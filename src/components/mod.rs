//! UI Components
//!
//! Reusable Leptos components.

mod confirm_button;
mod filter_bar;
mod header;
mod list_status;
mod modal;
mod reason_form;
mod sidebar;
mod status_badge;
mod toast_host;

pub use confirm_button::ConfirmButton;
pub use filter_bar::{ChoiceFilter, SearchInput, SortSelect};
pub use header::Header;
pub use list_status::ListStatus;
pub use modal::{ConfirmModal, Modal};
pub use reason_form::ReasonForm;
pub use sidebar::Sidebar;
pub use status_badge::StatusBadge;
pub use toast_host::ToastHost;
