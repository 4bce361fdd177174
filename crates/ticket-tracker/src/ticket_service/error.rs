use crate::model::TicketId;
use crate::registry::RegistryError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TicketError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Ticket not found: {0}")]
    NotFound(TicketId),
    #[error("Ticket has no id")]
    MissingId,
    #[error("Ticket store unavailable: {0}")]
    StoreUnavailable(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
