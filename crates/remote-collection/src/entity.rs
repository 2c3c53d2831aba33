//! Entity Trait
//!
//! Every record shown in a remote collection has a stable identifier.

use std::fmt;
use std::hash::Hash;

/// Core trait for list entities
pub trait Entity: Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}
