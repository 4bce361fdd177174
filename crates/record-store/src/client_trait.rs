//! # StoreHandle Trait
//!
//! Provides a common interface for domain services that sit on top of a `StoreClient`, adding
//! default read and delete operations with the service's own error type.
use crate::{Page, PageRequest, Record, StoreClient, StoreError};
use async_trait::async_trait;

/// Trait for domain services to inherit the plain store operations.
///
/// # Example
///
/// ```rust
/// use record_store::{Record, StoreClient, StoreError, StoreHandle};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Label { id: Option<u64>, name: String }
///
/// impl Record for Label {
///     type Id = u64;
///     fn id(&self) -> Option<u64> { self.id }
///     fn set_id(&mut self, id: u64) { self.id = Some(id); }
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("label store unavailable: {0}")]
/// struct LabelError(String);
///
/// struct Labels { store: StoreClient<Label> }
///
/// #[async_trait]
/// impl StoreHandle<Label> for Labels {
///     type Error = LabelError;
///
///     fn store(&self) -> &StoreClient<Label> {
///         &self.store
///     }
///
///     fn map_error(e: StoreError) -> LabelError {
///         LabelError(e.to_string())
///     }
/// }
///
/// async fn usage(labels: Labels) {
///     // get(), delete(), count() and list() come for free
///     let _ = labels.get(1).await;
///     let _ = labels.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait StoreHandle<T: Record>: Send + Sync {
    /// The service-specific error type.
    type Error: Send + Sync;

    /// Access the underlying store client.
    fn store(&self) -> &StoreClient<T>;

    /// Map store errors to the service error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.store().get(id).await.map_err(Self::map_error)
    }

    /// Delete a record by id. Deleting an absent record succeeds.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        let removed = self.store().delete(id).await.map_err(Self::map_error)?;
        if !removed {
            tracing::debug!("Nothing to delete");
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn count(&self) -> Result<u64, Self::Error> {
        self.store().count().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self, page: PageRequest) -> Result<Page<T>, Self::Error> {
        self.store().list(page).await.map_err(Self::map_error)
    }
}
