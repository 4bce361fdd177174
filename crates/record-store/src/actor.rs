//! # Generic Store Server
//!
//! This module defines the `StoreActor`, the component that owns the records of one type and
//! assigns their ids. It implements the "Server" side of the Actor Model, processing requests
//! sequentially and ensuring exclusive access to the record map.

use crate::client::StoreClient;
use crate::entity::Record;
use crate::error::StoreError;
use crate::message::StoreRequest;
use crate::page::Page;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that keeps a collection of records.
///
/// # Architecture Note
/// This struct is the "Server" half of the store. It owns the state (`records`) and the receiver
/// end of the channel.
///
/// **Concurrency Model**:
/// Any number of tasks may hold a `StoreClient` and send requests at the same time. The actor
/// still processes them *one by one*, so the record map needs no `Mutex`. Two consequences follow:
///
/// * id assignment is race-free: concurrent inserts always receive distinct ids;
/// * [`StoreRequest::Modify`] and [`StoreRequest::FindOrInsert`] run their closures without any
///   other request interleaving, which makes read-merge-write and find-or-create atomic.
///
/// # Usage Pattern
///
/// ```rust
/// use record_store::{Record, StoreActor};
///
/// #[derive(Clone, Debug)]
/// struct Note { id: Option<u64>, text: String }
///
/// impl Record for Note {
///     type Id = u64;
///     fn id(&self) -> Option<u64> { self.id }
///     fn set_id(&mut self, id: u64) { self.id = Some(id); }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::<Note>::new(16);
///     tokio::spawn(actor.run());
///
///     let saved = client.save(Note { id: None, text: "hello".into() }).await.unwrap();
///     assert_eq!(saved.id, Some(1));
/// }
/// ```
///
/// # Implementation Details
///
/// Records live in a `BTreeMap` keyed by id, so listings come out in ascending id order, which is
/// also insertion order. Ids start at 1 and are never reused, even after a delete.
pub struct StoreActor<T: Record> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: BTreeMap<T::Id, T>,
    next_id: u64,
}

impl<T: Record> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full, calls on the
    ///   client wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: BTreeMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the store's event loop, processing requests until every client is dropped.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "Ticket" instead of "ticket_tracker::model::ticket::Ticket")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Save { record, respond_to } => {
                    debug!(entity_type, ?record, "Save");
                    let _ = respond_to.send(self.save(entity_type, record));
                }
                StoreRequest::Get { id, respond_to } => {
                    let record = self.records.get(&id).cloned();
                    debug!(entity_type, %id, found = record.is_some(), "Get");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::List { page, respond_to } => {
                    let items: Vec<T> = self
                        .records
                        .values()
                        .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
                        .take(usize::try_from(page.size).unwrap_or(usize::MAX))
                        .cloned()
                        .collect();
                    debug!(entity_type, page = page.page, returned = items.len(), "List");
                    let total = self.records.len() as u64;
                    let _ = respond_to.send(Ok(Page::new(items, total, page)));
                }
                StoreRequest::FindAll {
                    predicate,
                    respond_to,
                } => {
                    let matches: Vec<T> = self
                        .records
                        .values()
                        .filter(|record| predicate(*record))
                        .cloned()
                        .collect();
                    debug!(entity_type, matched = matches.len(), "FindAll");
                    let _ = respond_to.send(Ok(matches));
                }
                StoreRequest::Modify {
                    id,
                    mutation,
                    respond_to,
                } => {
                    debug!(entity_type, %id, "Modify");
                    let modified = match self.records.get_mut(&id) {
                        Some(record) => {
                            mutation(record);
                            info!(entity_type, %id, "Modified");
                            Some(record.clone())
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            None
                        }
                    };
                    let _ = respond_to.send(Ok(modified));
                }
                StoreRequest::FindOrInsert {
                    predicate,
                    record,
                    respond_to,
                } => {
                    let existing = self.records.values().find(|record| predicate(*record)).cloned();
                    let result = match existing {
                        Some(found) => {
                            debug!(entity_type, id = ?found.id(), "FindOrInsert matched");
                            Ok(found)
                        }
                        None => self.insert(entity_type, record),
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::Delete { id, respond_to } => {
                    let removed = self.records.remove(&id).is_some();
                    if removed {
                        info!(entity_type, %id, size = self.records.len(), "Deleted");
                    } else {
                        debug!(entity_type, %id, "Delete of absent record");
                    }
                    let _ = respond_to.send(Ok(removed));
                }
                StoreRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.records.len() as u64));
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }

    fn save(&mut self, entity_type: &str, record: T) -> Result<T, StoreError> {
        let Some(id) = record.id() else {
            return self.insert(entity_type, record);
        };
        match self.records.get_mut(&id) {
            Some(slot) => {
                *slot = record.clone();
                info!(entity_type, %id, "Replaced");
                Ok(record)
            }
            None => {
                warn!(entity_type, %id, "Not found");
                Err(StoreError::NotFound(id.to_string()))
            }
        }
    }

    fn insert(&mut self, entity_type: &str, mut record: T) -> Result<T, StoreError> {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;
        record.set_id(id);
        self.records.insert(id, record.clone());
        info!(entity_type, %id, size = self.records.len(), "Created");
        Ok(record)
    }
}
