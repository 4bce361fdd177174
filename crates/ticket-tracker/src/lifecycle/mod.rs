//! # System Lifecycle
//!
//! Startup and shutdown of the ticket tracker.
//!
//! ## Startup
//!
//! [`TrackerSystem::new`] creates one [`StoreActor`](record_store::StoreActor) per record kind
//! (tickets, categories, priorities, users), spawns each in its own tokio task, and builds the
//! registries and the [`TicketService`](crate::ticket_service::TicketService) on their clients.
//! The ticket service gets clones of the registry clients so it can resolve relations.
//!
//! ```text
//!                 ┌──────────────────┐
//!   caller ──────►│  TicketService   │──── validate ───► TicketValidator
//!                 └──┬─────┬────┬────┘
//!                    │     │    │  resolve relations
//!           save/list│     │    └─────────────┐
//!                    ▼     ▼                  ▼
//!          Store<Ticket> Store<Category> Store<Priority> Store<User>
//! ```
//!
//! ## Shutdown
//!
//! [`TrackerSystem::shutdown`] drops the clients it holds. Each store notices its channel closed
//! once the last client is gone, logs `Shutdown` with its final size, and exits.
//!
//! ## Observability
//!
//! Call [`record_store::tracing::setup_tracing_with`] with the configured filter before building
//! the system:
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads and rejected input
//! ```

pub mod tracker_system;

pub use tracker_system::*;
