//! # Tracing Setup
//!
//! Structured logging for binaries and tests built on the store.
//!
//! Every store logs with an `entity_type` field instead of a module path, so a typical run
//! looks like this:
//!
//! ```text
//! INFO Store started entity_type="Ticket"
//! INFO create_ticket: Created entity_type="Ticket" id=ticket_1 size=1
//! INFO partial_update: Modified entity_type="Ticket" id=ticket_1
//! ```
//!
//! ## Levels
//!
//! - `info`: records created, replaced, modified, deleted; store start and shutdown
//! - `warn`: a replace or modify aimed at an id the store does not hold
//! - `debug`: every request with its payload, rejected input, lookups that found nothing
//!
//! Set `RUST_LOG` to override the default filter, e.g. `RUST_LOG=debug` or
//! `RUST_LOG=ticket_tracker=debug,record_store=info`.

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber, reading the filter from `RUST_LOG` and falling back to
/// `info`.
pub fn setup_tracing() {
    setup_tracing_with("info");
}

/// Initializes the global subscriber with `default_filter` unless `RUST_LOG` is set.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn setup_tracing_with(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // entity_type identifies the store, module paths add noise
        .compact()
        .try_init();
}
