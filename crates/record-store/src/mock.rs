//! # Mock Store & Testing Guide
//!
//! `MockStore<T>` hands out a real `StoreClient<T>` whose requests are answered from a queue of
//! expectations instead of a `StoreActor`. Services built on a `StoreClient` can then be unit
//! tested without any real storage behind them.
//!
//! ## When to use Mocks vs Real Stores
//!
//! | Feature | MockStore | Real StoreActor |
//! |---------|-----------|-----------------|
//! | **Determinism** | Fully scripted | Subject to scheduler |
//! | **State** | None (expectations only) | Real records and ids |
//! | **Use Case** | Logic *around* the client | The store itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Only `StoreClosed` by dropping the actor |
//!
//! ## Example
//!
//! ```rust
//! use record_store::mock::MockStore;
//! use record_store::{Record, StoreError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Note { id: Option<u64>, text: String }
//!
//! impl Record for Note {
//!     type Id = u64;
//!     fn id(&self) -> Option<u64> { self.id }
//!     fn set_id(&mut self, id: u64) { self.id = Some(id); }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockStore::<Note>::new();
//!     mock.expect_get(1).return_err(StoreError::StoreClosed);
//!
//!     let client = mock.client();
//!     let result = client.get(1).await;
//!     assert!(matches!(result, Err(StoreError::StoreClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Channel Helpers
//!
//! [`create_mock_store`] returns a client plus the raw receiver. Use it together with
//! [`expect_save`], [`expect_get`] and [`expect_modify`] when a test needs to inspect the request
//! payload or decide the reply on the fly.

use crate::client::StoreClient;
use crate::entity::Record;
use crate::error::StoreError;
use crate::message::{Mutation, Response, StoreRequest};
use crate::page::Page;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: Record> {
    Save {
        response: Result<T, StoreError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    List {
        response: Result<Page<T>, StoreError>,
    },
    FindAll {
        response: Result<Vec<T>, StoreError>,
    },
    /// `Ok(Some(record))` runs the caller's mutation on `record` before replying.
    Modify {
        id: T::Id,
        response: Result<Option<T>, StoreError>,
    },
    FindOrInsert {
        response: Result<T, StoreError>,
    },
    Delete {
        id: T::Id,
        response: Result<bool, StoreError>,
    },
    Count {
        response: Result<u64, StoreError>,
    },
}

impl<T: Record> Expectation<T> {
    fn kind(&self) -> &'static str {
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

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A scripted store with expectation tracking.
///
/// Requests are matched against expectations in the order they were registered. A request that
/// does not match the next expectation panics the background task, and the calling client then
/// observes [`StoreError::StoreDropped`].
pub struct MockStore<T: Record> {
    client: StoreClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> MockStore<T> {
    /// Creates a mock store with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                answer(request, expectation);
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_save(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::Save { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Page<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_find_all(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::FindAll { response })
    }

    /// Expects a `modify`. Returning `Some(record)` applies the caller's mutation to `record`
    /// and replies with the result.
    pub fn expect_modify(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Modify { id, response })
    }

    pub fn expect_find_or_insert(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(|response| Expectation::FindOrInsert { response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, bool> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_count(&mut self) -> ExpectationBuilder<T, u64> {
        self.builder(|response| Expectation::Count { response })
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            make: Box::new(make),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let exps = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !exps.is_empty() {
            let pending: Vec<&str> = exps.iter().map(Expectation::kind).collect();
            panic!(
                "Not all expectations were met. {} remaining: {:?}",
                exps.len(),
                pending
            );
        }
    }
}

/// Registers the reply for one expected request.
pub struct ExpectationBuilder<T: Record, R> {
    make: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T> + Send>,
    expectations: Expectations<T>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.make)(response);
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(expectation);
    }
}

fn answer<T: Record>(request: StoreRequest<T>, expectation: Option<Expectation<T>>) {
    match (request, expectation) {
        (StoreRequest::Save { respond_to, .. }, Some(Expectation::Save { response })) => {
            let _ = respond_to.send(response);
        }
        (StoreRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            assert_eq!(id, want, "Get for unexpected id");
            let _ = respond_to.send(response);
        }
        (StoreRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
            let _ = respond_to.send(response);
        }
        (StoreRequest::FindAll { respond_to, .. }, Some(Expectation::FindAll { response })) => {
            let _ = respond_to.send(response);
        }
        (
            StoreRequest::Modify {
                id,
                mutation,
                respond_to,
            },
            Some(Expectation::Modify { id: want, response }),
        ) => {
            assert_eq!(id, want, "Modify for unexpected id");
            let _ = respond_to.send(apply(mutation, response));
        }
        (
            StoreRequest::FindOrInsert { respond_to, .. },
            Some(Expectation::FindOrInsert { response }),
        ) => {
            let _ = respond_to.send(response);
        }
        (StoreRequest::Delete { id, respond_to }, Some(Expectation::Delete { id: want, response })) => {
            assert_eq!(id, want, "Delete for unexpected id");
            let _ = respond_to.send(response);
        }
        (StoreRequest::Count { respond_to }, Some(Expectation::Count { response })) => {
            let _ = respond_to.send(response);
        }
        (request, expectation) => {
            panic!(
                "Unexpected request {:?}, expected {}",
                request,
                expectation.as_ref().map_or("nothing", Expectation::kind)
            );
        }
    }
}

fn apply<T: Record>(
    mutation: Mutation<T>,
    response: Result<Option<T>, StoreError>,
) -> Result<Option<T>, StoreError> {
    response.map(|found| {
        found.map(|mut record| {
            mutation(&mut record);
            record
        })
    })
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// Tests drive the "store" side by hand: receive a request, assert on it, then reply through the
/// request's `respond_to`. Dropping the receiver makes every call fail with
/// [`StoreError::StoreClosed`].
pub fn create_mock_store<T: Record>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T, Response<T>)> {
    match receiver.recv().await {
        Some(StoreRequest::Save { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Modify request
pub async fn expect_modify<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Id, Mutation<T>, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Modify {
            id,
            mutation,
            respond_to,
        }) => Some((id, mutation, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: Option<u64>,
        text: String,
    }

    impl Record for Note {
        type Id = u64;

        fn id(&self) -> Option<u64> {
            self.id
        }

        fn set_id(&mut self, id: u64) {
            self.id = Some(id);
        }
    }

    impl Note {
        fn new(id: Option<u64>, text: &str) -> Self {
            Self {
                id,
                text: text.to_string(),
            }
        }
    }

    #[tokio::test]
    async fn test_channel_helpers() {
        let (client, mut receiver) = create_mock_store::<Note>(10);

        let save_task = tokio::spawn(async move { client.save(Note::new(None, "draft")).await });

        let (record, responder) = expect_save(&mut receiver)
            .await
            .expect("Expected Save request");
        assert_eq!(record.text, "draft");
        responder.send(Ok(Note::new(Some(7), "draft"))).unwrap();

        let saved = save_task.await.unwrap().unwrap();
        assert_eq!(saved.id, Some(7));
    }

    #[tokio::test]
    async fn test_expectations_in_order() {
        let mut mock = MockStore::<Note>::new();
        mock.expect_save().return_ok(Note::new(Some(1), "a"));
        mock.expect_get(1).return_ok(Some(Note::new(Some(1), "a")));
        mock.expect_delete(1).return_ok(true);
        mock.expect_count().return_ok(0);

        let client = mock.client();
        let saved = client.save(Note::new(None, "a")).await.unwrap();
        assert_eq!(saved.id, Some(1));
        assert_eq!(client.get(1).await.unwrap().unwrap().text, "a");
        assert!(client.delete(1).await.unwrap());
        assert_eq!(client.count().await.unwrap(), 0);

        mock.verify();
    }

    #[tokio::test]
    async fn test_modify_applies_mutation_to_scripted_record() {
        let mut mock = MockStore::<Note>::new();
        mock.expect_modify(3).return_ok(Some(Note::new(Some(3), "old")));
        mock.expect_modify(4).return_ok(None);

        let client = mock.client();
        let modified = client
            .modify(3, |note| note.text = "new".to_string())
            .await
            .unwrap();
        assert_eq!(modified, Some(Note::new(Some(3), "new")));

        let missing = client.modify(4, |note| note.text.clear()).await.unwrap();
        assert_eq!(missing, None);

        mock.verify();
    }

    #[tokio::test]
    async fn test_find_or_insert_expectation() {
        let mut mock = MockStore::<Note>::new();
        mock.expect_find_or_insert()
            .return_ok(Note::new(Some(2), "existing"));
        mock.expect_find_or_insert()
            .return_err(StoreError::StoreClosed);

        let client = mock.client();
        let found = client
            .find_or_insert(|note| note.text == "existing", Note::new(None, "existing"))
            .await
            .unwrap();
        assert_eq!(found.id, Some(2));

        let result = client
            .find_or_insert(|_| false, Note::new(None, "other"))
            .await;
        assert_eq!(result, Err(StoreError::StoreClosed));

        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_surfaces_as_dropped() {
        let mut mock = MockStore::<Note>::new();
        mock.expect_count().return_ok(1);

        let client = mock.client();
        let result = client.get(1).await;
        assert_eq!(result, Err(StoreError::StoreDropped));
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_verify_reports_unmet_expectations() {
        let mut mock = MockStore::<Note>::new();
        mock.expect_count().return_ok(0);
        mock.verify();
    }
}
