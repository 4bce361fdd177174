use crate::model::{Category, CategoryId, Priority, PriorityId, TicketId, User, UserId};
use chrono::{DateTime, Utc};
use record_store::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a ticket is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A support request tracked by the system.
///
/// Every field is optional so that a candidate can be handed to the validator as-is; the
/// [`TicketService`](crate::ticket_service::TicketService) guarantees that a persisted ticket
/// has an id, a status and a creation date. Category, priority and user are references by id
/// and are resolved through their registries on demand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Option<TicketId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub creation_date: Option<DateTime<Utc>>,
    pub category: Option<CategoryId>,
    pub priority: Option<PriorityId>,
    pub user: Option<UserId>,
}

impl Ticket {
    /// Creates a ticket candidate with a title and description and nothing else.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_priority(mut self, priority: PriorityId) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_user(mut self, user: UserId) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_creation_date(mut self, creation_date: DateTime<Utc>) -> Self {
        self.creation_date = Some(creation_date);
        self
    }
}

impl Record for Ticket {
    type Id = TicketId;

    fn id(&self) -> Option<TicketId> {
        self.id
    }

    fn set_id(&mut self, id: TicketId) {
        self.id = Some(id);
    }
}

/// The fields a partial update may overwrite. `None` leaves the stored value alone.
///
/// Category, priority and user only change through a full update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub status: Option<TicketStatus>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.creation_date.is_none()
            && self.status.is_none()
    }

    /// Overwrites the fields of `ticket` for which this patch carries a value.
    pub fn apply_to(self, ticket: &mut Ticket) {
        if let Some(title) = self.title {
            ticket.title = Some(title);
        }
        if let Some(description) = self.description {
            ticket.description = Some(description);
        }
        if let Some(creation_date) = self.creation_date {
            ticket.creation_date = Some(creation_date);
        }
        if let Some(status) = self.status {
            ticket.status = Some(status);
        }
    }
}

impl From<Ticket> for TicketPatch {
    fn from(ticket: Ticket) -> Self {
        Self {
            title: ticket.title,
            description: ticket.description,
            creation_date: ticket.creation_date,
            status: ticket.status,
        }
    }
}

/// A ticket together with the entities it references.
///
/// A relation is `None` when the ticket has no reference or the referenced entity no longer
/// exists in its registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketDetails {
    pub ticket: Ticket,
    pub category: Option<Category>,
    pub priority: Option<Priority>,
    pub user: Option<User>,
}
