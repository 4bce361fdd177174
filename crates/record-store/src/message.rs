//! # Store Messages
//!
//! This module defines the request envelope sent from a `StoreClient` to its `StoreActor`.
//!
//! Besides plain CRUD, two requests run a caller-supplied closure *inside* the store task:
//!
//! - **Modify**: read, merge and write one record as a single step.
//! - **FindOrInsert**: look a record up by predicate and insert the candidate only when nothing
//!   matches.
//!
//! Because the actor processes one request at a time, both are atomic with respect to every
//! other request on the same store. No lock is involved.

use crate::entity::Record;
use crate::error::StoreError;
use crate::page::{Page, PageRequest};
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// An in-place change applied to a stored record.
pub type Mutation<T> = Box<dyn FnOnce(&mut T) + Send>;

/// A filter evaluated against stored records.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send>;

/// Internal message type sent to the store to request operations.
pub enum StoreRequest<T: Record> {
    /// Insert when the record has no id, replace when it has one.
    Save {
        record: T,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        page: PageRequest,
        respond_to: Response<Page<T>>,
    },
    FindAll {
        predicate: Predicate<T>,
        respond_to: Response<Vec<T>>,
    },
    Modify {
        id: T::Id,
        mutation: Mutation<T>,
        respond_to: Response<Option<T>>,
    },
    FindOrInsert {
        predicate: Predicate<T>,
        record: T,
        respond_to: Response<T>,
    },
    /// Responds `true` when a record was removed.
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
    Count {
        respond_to: Response<u64>,
    },
}

impl<T: Record> StoreRequest<T> {
    /// Short operation name used in logs and mock diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Save { .. } => "Save",
            Self::Get { .. } => "Get",
            Self::List { .. } => "List",
            Self::FindAll { .. } => "FindAll",
            Self::Modify { .. } => "Modify",
            Self::FindOrInsert { .. } => "FindOrInsert",
            Self::Delete { .. } => "Delete",
            Self::Count { .. } => "Count",
        }
    }
}

impl<T: Record> fmt::Debug for StoreRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Save { record, .. } => f.debug_struct("Save").field("record", record).finish(),
            Self::Get { id, .. } => f.debug_struct("Get").field("id", id).finish(),
            Self::List { page, .. } => f.debug_struct("List").field("page", page).finish(),
            Self::Modify { id, .. } => f.debug_struct("Modify").field("id", id).finish(),
            Self::FindOrInsert { record, .. } => f
                .debug_struct("FindOrInsert")
                .field("record", record)
                .finish(),
            Self::Delete { id, .. } => f.debug_struct("Delete").field("id", id).finish(),
            Self::FindAll { .. } | Self::Count { .. } => f.write_str(self.kind()),
        }
    }
}
