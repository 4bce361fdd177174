//! # Ticket Tracker
//!
//! The core of a support-ticket system: the ticket model, the business rules a ticket must
//! satisfy, and the service that creates, updates, patches, finds and deletes tickets on top of
//! actor-backed stores from `record-store`.
//!
//! - [`model`] - tickets, their typed ids, and the reference data they point at
//! - [`validation`] - [`TicketValidator`](validation::TicketValidator)
//! - [`ticket_service`] - [`TicketService`](ticket_service::TicketService), the lifecycle orchestrator
//! - [`registry`] - categories, priorities and users
//! - [`config`] - TOML configuration
//! - [`lifecycle`] - [`TrackerSystem`](lifecycle::TrackerSystem), startup and shutdown

pub mod config;
pub mod lifecycle;
pub mod model;
pub mod registry;
pub mod ticket_service;
pub mod validation;
