//! # Record Trait
//!
//! The `Record` trait is the contract every persisted type (Ticket, Category, Priority, User, …)
//! implements so a generic [`StoreActor`](crate::StoreActor) can hold it. The store owns id
//! assignment: a record arrives without an id, the store hands out the next numeric value and
//! writes it back through [`Record::set_id`].
//!
//! # Architecture Note
//! Records are plain data. They carry no lifecycle hooks and no references to other stores;
//! cross-record rules (validation, defaults, eager loading) belong to the service that talks to
//! the store, not to the record itself.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any persisted type must implement to be kept by a `StoreActor`.
///
/// # Identity
/// `Id` is a small copyable key (usually a newtype around `u64`). It must be `Ord` because the
/// store keeps records in ascending id order, which is the order pages are served in.
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// The store-assigned identifier. Must be convertible from `u64` for automatic id generation.
    type Id: Copy + Eq + Ord + Hash + Send + Sync + Display + Debug + From<u64> + 'static;

    /// The identifier, or `None` before the record was first saved.
    fn id(&self) -> Option<Self::Id>;

    /// Called by the store exactly once, when the record is first inserted.
    fn set_id(&mut self, id: Self::Id);
}
