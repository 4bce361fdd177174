//! # Registries
//!
//! Flat, named reference data that tickets point at: categories, priorities and the users who
//! submit tickets. All three share one implementation, [`NamedRegistry`], over their own store.
//!
//! ## Find-or-create
//!
//! [`NamedRegistry::find_or_create`] runs as a single store request, so any number of callers
//! asking for the same name at once end up with one record.
//!
//! ```rust
//! use record_store::StoreActor;
//! use ticket_tracker::model::Category;
//! use ticket_tracker::registry::CategoryRegistry;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, store) = StoreActor::<Category>::new(16);
//!     tokio::spawn(actor.run());
//!     let categories = CategoryRegistry::new(store);
//!
//!     let bug = categories.find_or_create("BUG").await?;
//!     let again = categories.find_or_create("  BUG ").await?;
//!     assert_eq!(bug.id, again.id);
//!     Ok(())
//! }
//! ```

pub mod error;

pub use error::*;

use crate::model::{Category, Priority, User};
use async_trait::async_trait;
use record_store::{Record, StoreClient, StoreError, StoreHandle};
use tracing::{debug, instrument};

/// A record identified to humans by a unique name.
pub trait NamedRecord: Record {
    /// Lower-case kind used in logs and error messages.
    const KIND: &'static str;

    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    /// A new, unsaved record with this name.
    fn named(name: String) -> Self;
}

pub type CategoryRegistry = NamedRegistry<Category>;
pub type PriorityRegistry = NamedRegistry<Priority>;
pub type UserDirectory = NamedRegistry<User>;

/// CRUD over one kind of named record, plus idempotent find-or-create.
///
/// Names are trimmed before they are stored or compared; a blank name is rejected with
/// [`RegistryError::InvalidName`].
pub struct NamedRegistry<T: NamedRecord> {
    store: StoreClient<T>,
}

impl<T: NamedRecord> Clone for NamedRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

#[async_trait]
impl<T: NamedRecord> StoreHandle<T> for NamedRegistry<T> {
    type Error = RegistryError;

    fn store(&self) -> &StoreClient<T> {
        &self.store
    }

    fn map_error(e: StoreError) -> Self::Error {
        RegistryError::StoreUnavailable(e.to_string())
    }
}

impl<T: NamedRecord> NamedRegistry<T> {
    pub fn new(store: StoreClient<T>) -> Self {
        Self { store }
    }

    /// Adds a record, even if one with the same name exists.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn create(&self, name: &str) -> Result<T, RegistryError> {
        let name = normalize(name)?;
        self.store
            .save(T::named(name))
            .await
            .map_err(Self::map_error)
    }

    /// Returns the record with this name, creating it if there is none.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn find_or_create(&self, name: &str) -> Result<T, RegistryError> {
        let name = normalize(name)?;
        let wanted = name.clone();
        self.store
            .find_or_insert(move |record| record.name() == wanted, T::named(name))
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn find_by_name(&self, name: &str) -> Result<Option<T>, RegistryError> {
        let wanted = name.trim().to_string();
        let mut matches = self
            .store
            .find_all(move |record| record.name() == wanted)
            .await
            .map_err(Self::map_error)?;
        if matches.is_empty() {
            debug!("No match");
            return Ok(None);
        }
        Ok(Some(matches.swap_remove(0)))
    }

    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn rename(&self, id: T::Id, name: &str) -> Result<T, RegistryError> {
        let name = normalize(name)?;
        self.store
            .modify(id, move |record| record.set_name(name))
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Every record, in id order.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub async fn all(&self) -> Result<Vec<T>, RegistryError> {
        self.store
            .find_all(|_| true)
            .await
            .map_err(Self::map_error)
    }
}

fn normalize(name: &str) -> Result<String, RegistryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CategoryId;
    use record_store::mock::MockStore;
    use record_store::StoreActor;

    fn spawn_categories() -> CategoryRegistry {
        let (actor, store) = StoreActor::<Category>::new(16);
        tokio::spawn(actor.run());
        CategoryRegistry::new(store)
    }

    #[tokio::test]
    async fn test_find_or_create_trims_and_reuses() {
        let categories = spawn_categories();

        let bug = categories.find_or_create(" BUG ").await.unwrap();
        assert_eq!(bug.name, "BUG");
        let again = categories.find_or_create("BUG").await.unwrap();
        assert_eq!(bug.id, again.id);
        assert_eq!(categories.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_blank_names_are_rejected() {
        let categories = spawn_categories();

        let err = categories.create("   ").await.unwrap_err();
        assert_eq!(err, RegistryError::InvalidName("   ".to_string()));
        let err = categories.find_or_create("").await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidName(_)));
    }

    #[tokio::test]
    async fn test_rename_and_lookup() {
        let categories = spawn_categories();
        let created = categories.create("Billing").await.unwrap();
        let id = created.id.unwrap();

        let renamed = categories.rename(id, "Invoices").await.unwrap();
        assert_eq!(renamed.name, "Invoices");
        assert!(categories.find_by_name("Billing").await.unwrap().is_none());
        assert_eq!(
            categories.find_by_name("Invoices").await.unwrap().unwrap().id,
            Some(id)
        );

        let err = categories.rename(CategoryId(99), "Other").await.unwrap_err();
        assert_eq!(err, RegistryError::NotFound("category_99".to_string()));
    }

    #[tokio::test]
    async fn test_delete_and_list() {
        let categories = spawn_categories();
        let first = categories.create("BUG").await.unwrap();
        categories.create("FEATURE").await.unwrap();

        categories.delete(first.id.unwrap()).await.unwrap();
        // deleting twice is not an error
        categories.delete(first.id.unwrap()).await.unwrap();

        let names: Vec<_> = categories
            .all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["FEATURE"]);
    }

    #[tokio::test]
    async fn test_find_or_create_over_scripted_store() {
        let mut mock = MockStore::<Category>::new();
        mock.expect_find_or_insert().return_ok(Category {
            id: Some(CategoryId(4)),
            name: "BUG".to_string(),
        });
        let categories = CategoryRegistry::new(mock.client());

        let bug = categories.find_or_create(" BUG ").await.unwrap();
        assert_eq!(bug.id, Some(CategoryId(4)));
        mock.verify();
    }

    #[tokio::test]
    async fn test_store_failure_is_mapped() {
        let mut mock = MockStore::<Category>::new();
        mock.expect_save()
            .return_err(record_store::StoreError::StoreClosed);
        let categories = CategoryRegistry::new(mock.client());

        let err = categories.create("BUG").await.unwrap_err();
        assert_eq!(err, RegistryError::StoreUnavailable("Store closed".to_string()));
        mock.verify();
    }
}
