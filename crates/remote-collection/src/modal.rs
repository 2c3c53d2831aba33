//! Modal Workflow State
//!
//! One modal per slot per page. Opening a slot that is already open
//! retargets it. Closing never runs the modal's action; confirming hands
//! the target back to the caller, who closes the slot once the action has
//! succeeded and the list has been patched.

use std::collections::BTreeMap;

use crate::error::{ApiError, ApiResult};

/// Secondary views a list page can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModalSlot {
    Detail,
    DeleteConfirm,
    Create,
    Archive,
    Reject,
    Proof,
}

/// Open flag plus the entity the modal acts on
#[derive(Debug, Clone, PartialEq)]
pub struct ModalTarget<T> {
    pub is_open: bool,
    pub entity: Option<T>,
}

impl<T> Default for ModalTarget<T> {
    fn default() -> Self {
        Self { is_open: false, entity: None }
    }
}

/// Free-text reason entry for reject-style actions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReasonPrompt {
    #[default]
    Hidden,
    Editing { reason: String },
}

impl ReasonPrompt {
    pub fn is_editing(&self) -> bool {
        matches!(self, ReasonPrompt::Editing { .. })
    }

    pub fn text(&self) -> &str {
        match self {
            ReasonPrompt::Hidden => "",
            ReasonPrompt::Editing { reason } => reason,
        }
    }
}

/// Modal state of one page
#[derive(Debug, Clone, PartialEq)]
pub struct ModalWorkflow<T> {
    slots: BTreeMap<ModalSlot, ModalTarget<T>>,
    reason: ReasonPrompt,
}

impl<T> Default for ModalWorkflow<T> {
    fn default() -> Self {
        Self { slots: BTreeMap::new(), reason: ReasonPrompt::Hidden }
    }
}

impl<T: Clone> ModalWorkflow<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `slot` on `entity`, replacing any current target of that slot
    pub fn open(&mut self, slot: ModalSlot, entity: T) {
        self.slots.insert(slot, ModalTarget { is_open: true, entity: Some(entity) });
        if slot == ModalSlot::Reject {
            self.begin_reason();
        }
    }

    /// Open a slot with no target (create forms)
    pub fn open_blank(&mut self, slot: ModalSlot) {
        self.slots.insert(slot, ModalTarget { is_open: true, entity: None });
    }

    /// Close without acting
    pub fn cancel(&mut self, slot: ModalSlot) {
        self.close(slot);
    }

    /// Close after the slot's action succeeded
    pub fn complete(&mut self, slot: ModalSlot) {
        self.close(slot);
    }

    fn close(&mut self, slot: ModalSlot) {
        self.slots.remove(&slot);
        if matches!(slot, ModalSlot::Detail | ModalSlot::Reject) {
            self.reason = ReasonPrompt::Hidden;
        }
    }

    pub fn is_open(&self, slot: ModalSlot) -> bool {
        self.slots.get(&slot).map(|t| t.is_open).unwrap_or(false)
    }

    pub fn target(&self, slot: ModalSlot) -> Option<&T> {
        self.slots.get(&slot).and_then(|t| t.entity.as_ref())
    }

    pub fn slot(&self, slot: ModalSlot) -> ModalTarget<T> {
        self.slots.get(&slot).cloned().unwrap_or_default()
    }

    /// Explicit confirmation: the entity to act on, if the slot is open.
    /// The slot stays open until [`complete`](Self::complete).
    pub fn confirm(&self, slot: ModalSlot) -> Option<T> {
        self.slots
            .get(&slot)
            .filter(|t| t.is_open)
            .and_then(|t| t.entity.clone())
    }

    // ========================
    // Reason prompt
    // ========================

    pub fn reason(&self) -> &ReasonPrompt {
        &self.reason
    }

    pub fn begin_reason(&mut self) {
        self.reason = ReasonPrompt::Editing { reason: String::new() };
    }

    pub fn set_reason(&mut self, text: impl Into<String>) {
        self.reason = ReasonPrompt::Editing { reason: text.into() };
    }

    pub fn cancel_reason(&mut self) {
        self.reason = ReasonPrompt::Hidden;
    }

    /// The entered reason, trimmed. An empty reason is a validation error
    /// and leaves the prompt in the editing state.
    pub fn submit_reason(&self) -> ApiResult<String> {
        match &self.reason {
            ReasonPrompt::Editing { reason } if !reason.trim().is_empty() => Ok(reason.trim().to_string()),
            ReasonPrompt::Editing { .. } => Err(ApiError::Validation("rejection reason is required".to_string())),
            ReasonPrompt::Hidden => Err(ApiError::Validation("no reason prompt is open".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_replaces_target_of_same_slot() {
        let mut modals = ModalWorkflow::new();
        modals.open(ModalSlot::Detail, "p1");
        modals.open(ModalSlot::Detail, "p2");
        assert_eq!(modals.target(ModalSlot::Detail), Some(&"p2"));
        modals.open(ModalSlot::DeleteConfirm, "p3");
        assert_eq!(modals.target(ModalSlot::Detail), Some(&"p2"));
        assert_eq!(modals.target(ModalSlot::DeleteConfirm), Some(&"p3"));
    }

    #[test]
    fn test_cancel_closes_without_target() {
        let mut modals = ModalWorkflow::new();
        modals.open(ModalSlot::DeleteConfirm, 7);
        modals.cancel(ModalSlot::DeleteConfirm);
        assert!(!modals.is_open(ModalSlot::DeleteConfirm));
        assert_eq!(modals.confirm(ModalSlot::DeleteConfirm), None);
        assert_eq!(modals.slot(ModalSlot::DeleteConfirm), ModalTarget::default());
    }

    #[test]
    fn test_confirm_keeps_slot_open() {
        let mut modals = ModalWorkflow::new();
        modals.open(ModalSlot::Archive, "e1");
        assert_eq!(modals.confirm(ModalSlot::Archive), Some("e1"));
        assert!(modals.is_open(ModalSlot::Archive));
        modals.complete(ModalSlot::Archive);
        assert!(!modals.is_open(ModalSlot::Archive));
    }

    #[test]
    fn test_blank_slot_has_no_target() {
        let mut modals: ModalWorkflow<u32> = ModalWorkflow::new();
        modals.open_blank(ModalSlot::Create);
        assert!(modals.is_open(ModalSlot::Create));
        assert_eq!(modals.confirm(ModalSlot::Create), None);
    }

    #[test]
    fn test_empty_reason_stays_in_entry_state() {
        let mut modals = ModalWorkflow::new();
        modals.open(ModalSlot::Reject, "r1");
        assert!(modals.reason().is_editing());
        modals.set_reason("   ");
        assert!(matches!(modals.submit_reason(), Err(ApiError::Validation(_))));
        assert!(modals.reason().is_editing());

        modals.set_reason(" Harga terlalu mahal ");
        assert_eq!(modals.submit_reason().unwrap(), "Harga terlalu mahal");
    }

    #[test]
    fn test_closing_detail_resets_reason() {
        let mut modals = ModalWorkflow::new();
        modals.open(ModalSlot::Detail, "p1");
        modals.begin_reason();
        modals.set_reason("draft");
        modals.cancel(ModalSlot::Detail);
        assert_eq!(modals.reason(), &ReasonPrompt::Hidden);
        assert!(modals.submit_reason().is_err());
    }
}
