//! # Ticket Service
//!
//! The lifecycle orchestrator for tickets. It validates candidates, fills in defaults, and hands
//! tickets to the ticket store; reads resolve category, priority and user through their
//! registries.
//!
//! ## Operations
//!
//! | Operation | Validates | Result on unknown id |
//! |-----------|-----------|----------------------|
//! | [`create`](TicketService::create) | always | n/a (always inserts) |
//! | [`update`](TicketService::update) | when `validate_on_update` | `TicketError::NotFound` |
//! | [`partial_update`](TicketService::partial_update) | never | `Ok(None)` |
//! | [`find_one`](TicketService::find_one) | n/a | `Ok(None)` |
//! | `delete` (from [`StoreHandle`]) | n/a | `Ok(())` |
//!
//! ## Concurrency
//!
//! The service holds no mutable state and is cheap to clone; every clone talks to the same
//! stores. Partial updates run as one `modify` request inside the ticket store, so two concurrent
//! patches to the same ticket never lose each other's fields.
//!
//! ## Errors
//!
//! Validation failures come back unchanged as [`TicketError::Validation`] and are logged at
//! `debug` only. Store failures become [`TicketError::StoreUnavailable`]. Nothing is retried.

pub mod error;

pub use error::*;

use crate::config::TicketConfig;
use crate::model::{Ticket, TicketDetails, TicketId, TicketPatch, TicketStatus, UserId};
use crate::registry::{
    CategoryRegistry, NamedRecord, NamedRegistry, PriorityRegistry, RegistryError, UserDirectory,
};
use crate::validation::TicketValidator;
use async_trait::async_trait;
use chrono::Utc;
use record_store::{Page, PageRequest, Record, StoreClient, StoreError, StoreHandle};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Orchestrates the ticket lifecycle on top of the ticket store and the registries.
#[derive(Clone)]
pub struct TicketService {
    tickets: StoreClient<Ticket>,
    categories: CategoryRegistry,
    priorities: PriorityRegistry,
    users: UserDirectory,
    validator: TicketValidator,
    config: TicketConfig,
}

#[async_trait]
impl StoreHandle<Ticket> for TicketService {
    type Error = TicketError;

    fn store(&self) -> &StoreClient<Ticket> {
        &self.tickets
    }

    fn map_error(e: StoreError) -> Self::Error {
        TicketError::StoreUnavailable(e.to_string())
    }
}

impl TicketService {
    pub fn new(
        tickets: StoreClient<Ticket>,
        categories: CategoryRegistry,
        priorities: PriorityRegistry,
        users: UserDirectory,
        config: TicketConfig,
    ) -> Self {
        Self {
            tickets,
            categories,
            priorities,
            users,
            validator: TicketValidator::new(),
            config,
        }
    }

    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    pub fn priorities(&self) -> &PriorityRegistry {
        &self.priorities
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Validates and persists a new ticket.
    ///
    /// A missing status becomes [`TicketStatus::Open`] and a missing creation date becomes now.
    /// Any id on the candidate is discarded; the store always assigns a fresh one.
    #[instrument(skip(self, ticket), fields(title = ?ticket.title))]
    pub async fn create(&self, mut ticket: Ticket) -> Result<Ticket, TicketError> {
        debug!(?ticket, "Processing request");
        self.check(&ticket)?;

        if let Some(discarded) = ticket.id.take() {
            debug!(%discarded, "Discarding caller-supplied id");
        }
        if ticket.status.is_none() {
            ticket.status = Some(TicketStatus::Open);
        }
        if ticket.creation_date.is_none() {
            ticket.creation_date = Some(Utc::now());
        }

        self.tickets.save(ticket).await.map_err(Self::map_error)
    }

    /// Replaces a stored ticket wholesale. No defaults are applied.
    #[instrument(skip(self, ticket), fields(id = ?ticket.id))]
    pub async fn update(&self, ticket: Ticket) -> Result<Ticket, TicketError> {
        debug!(?ticket, "Processing request");
        let id = ticket.id.ok_or(TicketError::MissingId)?;
        if self.config.validate_on_update {
            self.check(&ticket)?;
        }

        self.tickets.save(ticket).await.map_err(|e| match e {
            StoreError::NotFound(_) => TicketError::NotFound(id),
            other => Self::map_error(other),
        })
    }

    /// Merges the title, description, creation date and status of `ticket` that are set onto the
    /// stored ticket with the same id. Returns `Ok(None)` if there is no such ticket.
    #[instrument(skip(self, ticket), fields(id = ?ticket.id))]
    pub async fn partial_update(&self, ticket: Ticket) -> Result<Option<Ticket>, TicketError> {
        let id = ticket.id.ok_or(TicketError::MissingId)?;
        self.patch(id, TicketPatch::from(ticket)).await
    }

    /// Applies `patch` to the ticket with this id as one store request.
    #[instrument(skip(self))]
    pub async fn patch(
        &self,
        id: TicketId,
        patch: TicketPatch,
    ) -> Result<Option<Ticket>, TicketError> {
        let patched = self
            .tickets
            .modify(id, move |stored| patch.apply_to(stored))
            .await
            .map_err(Self::map_error)?;
        if patched.is_none() {
            debug!("Nothing to patch");
        }
        Ok(patched)
    }

    /// Fetches a ticket together with its category, priority and user.
    #[instrument(skip(self))]
    pub async fn find_one(&self, id: TicketId) -> Result<Option<TicketDetails>, TicketError> {
        let Some(ticket) = self.get(id).await? else {
            debug!("Not found");
            return Ok(None);
        };

        let (category, priority, user) = tokio::join!(
            lookup(&self.categories, ticket.category),
            lookup(&self.priorities, ticket.priority),
            lookup(&self.users, ticket.user),
        );

        Ok(Some(TicketDetails {
            category: category?,
            priority: priority?,
            user: user?,
            ticket,
        }))
    }

    /// One page of tickets in id order, without relations.
    #[instrument(skip(self))]
    pub async fn find_all(&self, page: PageRequest) -> Result<Page<Ticket>, TicketError> {
        self.tickets
            .list(self.normalize(page))
            .await
            .map_err(Self::map_error)
    }

    /// One page of tickets in id order, each with its relations resolved.
    ///
    /// Each registry is read once per call rather than once per ticket.
    #[instrument(skip(self))]
    pub async fn find_all_with_eager_relationships(
        &self,
        page: PageRequest,
    ) -> Result<Page<TicketDetails>, TicketError> {
        let (tickets, categories, priorities, users) = tokio::join!(
            self.tickets.list(self.normalize(page)),
            self.categories.all(),
            self.priorities.all(),
            self.users.all(),
        );
        let tickets = tickets.map_err(Self::map_error)?;
        let categories = by_id(categories?);
        let priorities = by_id(priorities?);
        let users = by_id(users?);

        Ok(tickets.map(|ticket| TicketDetails {
            category: ticket.category.and_then(|id| categories.get(&id).cloned()),
            priority: ticket.priority.and_then(|id| priorities.get(&id).cloned()),
            user: ticket.user.and_then(|id| users.get(&id).cloned()),
            ticket,
        }))
    }

    /// Every ticket submitted by `user`, in id order.
    #[instrument(skip(self))]
    pub async fn find_by_user(&self, user: UserId) -> Result<Vec<Ticket>, TicketError> {
        self.tickets
            .find_all(move |ticket| ticket.user == Some(user))
            .await
            .map_err(Self::map_error)
    }

    fn check(&self, ticket: &Ticket) -> Result<(), TicketError> {
        self.validator.validate(ticket).map_err(|e| {
            debug!(field = %e.field(), reason = %e, "Rejected");
            TicketError::from(e)
        })
    }

    /// Size 0 means the default size; anything above the maximum is clamped. The result is
    /// never 0, even for a hand-built config with zero sizes.
    fn normalize(&self, page: PageRequest) -> PageRequest {
        let size = match page.size {
            0 => self.config.default_page_size,
            size => size.min(self.config.max_page_size),
        };
        PageRequest::new(page.page, size.max(1))
    }
}

async fn lookup<T: NamedRecord>(
    registry: &NamedRegistry<T>,
    id: Option<T::Id>,
) -> Result<Option<T>, RegistryError> {
    match id {
        Some(id) => registry.get(id).await,
        None => Ok(None),
    }
}

fn by_id<T: Record>(records: Vec<T>) -> HashMap<T::Id, T> {
    records
        .into_iter()
        .filter_map(|record| record.id().map(|id| (id, record)))
        .collect()
}
