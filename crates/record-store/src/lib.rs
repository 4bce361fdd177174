//! # Record Store
//!
//! This crate provides an in-memory, actor-backed store for records of one type. Each store is a
//! tokio task that owns its records outright; callers talk to it through a cheap, cloneable
//! [`StoreClient`].
//!
//! ## Architecture Overview
//!
//! 1. **Record Layer** ([`Record`]) - your domain type and its id
//! 2. **Runtime Layer** ([`StoreActor`]) - sequential request processing and id assignment
//! 3. **Interface Layer** ([`StoreClient`], [`StoreHandle`]) - type-safe communication
//!
//! ## Quick Start
//!
//! ```rust
//! use record_store::{PageRequest, Record, StoreActor};
//!
//! #[derive(Clone, Debug)]
//! struct Note {
//!     id: Option<u64>,
//!     text: String,
//! }
//!
//! impl Record for Note {
//!     type Id = u64;
//!     fn id(&self) -> Option<u64> { self.id }
//!     fn set_id(&mut self, id: u64) { self.id = Some(id); }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::<Note>::new(32);
//!     let handle = tokio::spawn(actor.run());
//!
//!     let first = client.save(Note { id: None, text: "first".into() }).await.unwrap();
//!     let updated = client
//!         .modify(first.id.unwrap(), |note| note.text.push_str(" (edited)"))
//!         .await
//!         .unwrap()
//!         .unwrap();
//!     assert_eq!(updated.text, "first (edited)");
//!
//!     let page = client.list(PageRequest::new(0, 10)).await.unwrap();
//!     assert_eq!(page.total, 1);
//!
//!     // Dropping the last client stops the store
//!     drop(client);
//!     handle.await.unwrap();
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each store runs in its own tokio task
//! - Requests are processed **sequentially** within a store, so ids never collide
//! - Different stores run in **parallel**
//! - Read-merge-write goes through [`StoreClient::modify`], which runs inside the store task
//!
//! ## Testing
//!
//! The [`mock`] module offers [`mock::MockStore`], a scripted stand-in for a store, plus raw
//! channel helpers for tests that want to inspect each request.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod page;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::StoreHandle;
pub use entity::Record;
pub use error::StoreError;
pub use message::{Mutation, Predicate, Response, StoreRequest};
pub use page::{Page, PageRequest};
