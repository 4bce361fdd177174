//! # Generic Client
//!
//! This module defines the generic client for communicating with a store.

use crate::entity::Record;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use crate::page::{Page, PageRequest};
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `StoreActor`.
///
/// The client holds only a sender, so cloning it is cheap; hand one clone to every task that
/// needs the store. The store shuts down once the last clone is dropped.
pub struct StoreClient<T: Record> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: Record> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    /// Sends one request and waits for its reply.
    async fn call<R>(
        &self,
        request: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    /// Inserts a record without an id (the store assigns one) or replaces the record with the
    /// same id. Replacing an id the store does not hold fails with [`StoreError::NotFound`].
    pub async fn save(&self, record: T) -> Result<T, StoreError> {
        self.call(|respond_to| StoreRequest::Save { record, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.call(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self, page: PageRequest) -> Result<Page<T>, StoreError> {
        self.call(|respond_to| StoreRequest::List { page, respond_to })
            .await
    }

    /// Every record matching `predicate`, in ascending id order.
    pub async fn find_all(
        &self,
        predicate: impl Fn(&T) -> bool + Send + 'static,
    ) -> Result<Vec<T>, StoreError> {
        self.call(|respond_to| StoreRequest::FindAll {
            predicate: Box::new(predicate),
            respond_to,
        })
        .await
    }

    /// Applies `mutation` to the stored record inside the store task and returns the result.
    /// Returns `Ok(None)` when no record has this id.
    pub async fn modify(
        &self,
        id: T::Id,
        mutation: impl FnOnce(&mut T) + Send + 'static,
    ) -> Result<Option<T>, StoreError> {
        self.call(|respond_to| StoreRequest::Modify {
            id,
            mutation: Box::new(mutation),
            respond_to,
        })
        .await
    }

    /// Returns the first record matching `predicate`, inserting `record` if none does.
    pub async fn find_or_insert(
        &self,
        predicate: impl Fn(&T) -> bool + Send + 'static,
        record: T,
    ) -> Result<T, StoreError> {
        self.call(|respond_to| StoreRequest::FindOrInsert {
            predicate: Box::new(predicate),
            record,
            respond_to,
        })
        .await
    }

    /// Removes a record. `Ok(false)` means there was nothing to remove.
    pub async fn delete(&self, id: T::Id) -> Result<bool, StoreError> {
        self.call(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        self.call(|respond_to| StoreRequest::Count { respond_to })
            .await
    }
}
