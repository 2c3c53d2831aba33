//! Remote Collection State
//!
//! Items of one list plus loading/error flags, the fetch sequence used to
//! discard stale responses, and the single pending mutation.

use crate::dispatcher::ActionKind;
use crate::entity::Entity;
use crate::error::ApiError;

/// Where a newly created entity goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Newest-first lists
    Prepend,
    Append,
}

/// Sequence number handed out when a fetch starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

/// What happened to a finished fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Items replaced
    Applied { count: usize },
    /// Request failed; items kept, message stored in `error`
    Failed(ApiError),
    /// A newer fetch was issued meanwhile; response dropped
    Stale,
}

/// The mutation currently in flight for a list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction<Id> {
    pub kind: ActionKind,
    /// `None` for creates
    pub entity_id: Option<Id>,
}

/// List state owned by one page
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteCollection<T: Entity> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub error: Option<String>,
    pending: Option<PendingAction<T::Id>>,
    issued: u64,
}

impl<T: Entity> Default for RemoteCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            error: None,
            pending: None,
            issued: 0,
        }
    }
}

impl<T: Entity> RemoteCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<T>) -> Self {
        Self { items, ..Self::default() }
    }

    // ========================
    // Fetch lifecycle
    // ========================

    /// Start a fetch: marks loading and issues the next sequence number.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        self.is_loading = true;
        LoadTicket(self.issued)
    }

    pub fn is_latest(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Retire every outstanding fetch. Called after a mutation patched
    /// `items`, so a response requested before it cannot overwrite it.
    pub fn invalidate_loads(&mut self) {
        self.issued += 1;
        self.is_loading = false;
    }

    /// Apply a fetch result if `ticket` is still the latest one issued.
    ///
    /// `describe` turns a failure into the message stored in `error`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<T>, ApiError>,
        describe: impl FnOnce(&ApiError) -> String,
    ) -> LoadOutcome {
        if !self.is_latest(ticket) {
            return LoadOutcome::Stale;
        }
        self.is_loading = false;
        match result {
            Ok(items) => {
                let count = items.len();
                self.items = items;
                self.error = None;
                LoadOutcome::Applied { count }
            }
            Err(err) => {
                self.error = Some(describe(&err));
                LoadOutcome::Failed(err)
            }
        }
    }

    // ========================
    // Pending mutation
    // ========================

    pub fn pending(&self) -> Option<&PendingAction<T::Id>> {
        self.pending.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// True while `kind` is running against `id` (per-row spinners)
    pub fn is_pending_for(&self, kind: ActionKind, id: &T::Id) -> bool {
        matches!(&self.pending, Some(p) if p.kind == kind && p.entity_id.as_ref() == Some(id))
    }

    /// Claim the pending slot. Returns false if another mutation is in flight.
    pub fn try_begin_action(&mut self, kind: ActionKind, entity_id: Option<T::Id>) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(PendingAction { kind, entity_id });
        true
    }

    pub fn end_action(&mut self) {
        self.pending = None;
    }

    // ========================
    // Item-level patches
    // ========================

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    /// Insert a new entity. An existing entity with the same id is replaced
    /// in place instead of duplicated.
    pub fn insert(&mut self, entity: T, placement: Placement) {
        if self.replace(entity.clone()) {
            return;
        }
        match placement {
            Placement::Prepend => self.items.insert(0, entity),
            Placement::Append => self.items.push(entity),
        }
    }

    /// Splice `entity` over the item with the same id. False if absent.
    pub fn replace(&mut self, entity: T) -> bool {
        match self.items.iter_mut().find(|item| item.id() == entity.id()) {
            Some(slot) => {
                *slot = entity;
                true
            }
            None => false,
        }
    }

    /// Edit the item with `id` in place. False if absent.
    pub fn patch(&mut self, id: &T::Id, f: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                f(item);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }
}
