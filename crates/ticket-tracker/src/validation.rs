//! # Ticket Validation
//!
//! Business rules a ticket must satisfy before it is admitted. Checks run in a fixed order and
//! the first failure is returned:
//!
//! 1. title present (non-blank), then at least [`TicketValidator::MIN_TITLE_LENGTH`] characters
//! 2. description present, then at least [`TicketValidator::MIN_DESCRIPTION_LENGTH`] characters
//! 3. category reference present
//! 4. priority reference present
//!
//! Lengths count Unicode scalar values of the trimmed text. The ticket itself is never modified,
//! so surrounding whitespace is persisted as submitted.

use crate::model::Ticket;
use serde::Serialize;
use std::fmt;

/// The ticket field a validation rule is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketField {
    Title,
    Description,
    Category,
    Priority,
}

impl TicketField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Category => "category",
            Self::Priority => "priority",
        }
    }

    /// Capitalized form used at the start of error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Category => "Category",
            Self::Priority => "Priority",
        }
    }
}

impl fmt::Display for TicketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a ticket candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{} is required", .field.label())]
    RequiredFieldMissing { field: TicketField },
    #[error("{} must be at least {min} characters long", .field.label())]
    FieldTooShort { field: TicketField, min: usize },
}

impl ValidationError {
    pub fn field(&self) -> TicketField {
        match self {
            Self::RequiredFieldMissing { field } | Self::FieldTooShort { field, .. } => *field,
        }
    }
}

/// Stateless checker for ticket business rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketValidator;

impl TicketValidator {
    pub const MIN_TITLE_LENGTH: usize = 5;
    pub const MIN_DESCRIPTION_LENGTH: usize = 20;

    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, ticket: &Ticket) -> Result<(), ValidationError> {
        check_text(
            TicketField::Title,
            ticket.title.as_deref(),
            Self::MIN_TITLE_LENGTH,
        )?;
        check_text(
            TicketField::Description,
            ticket.description.as_deref(),
            Self::MIN_DESCRIPTION_LENGTH,
        )?;
        if ticket.category.is_none() {
            return Err(ValidationError::RequiredFieldMissing {
                field: TicketField::Category,
            });
        }
        if ticket.priority.is_none() {
            return Err(ValidationError::RequiredFieldMissing {
                field: TicketField::Priority,
            });
        }
        Ok(())
    }
}

fn check_text(field: TicketField, value: Option<&str>, min: usize) -> Result<(), ValidationError> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(ValidationError::RequiredFieldMissing { field });
    }
    if trimmed.chars().count() < min {
        return Err(ValidationError::FieldTooShort { field, min });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoryId, PriorityId};

    const VALID_DESCRIPTION: &str = "This is a valid description for testing";

    fn valid_ticket() -> Ticket {
        Ticket::new("Valid Title", VALID_DESCRIPTION)
            .with_category(CategoryId(1))
            .with_priority(PriorityId(1))
    }

    fn validate(ticket: &Ticket) -> Result<(), ValidationError> {
        TicketValidator::new().validate(ticket)
    }

    fn missing(field: TicketField) -> Result<(), ValidationError> {
        Err(ValidationError::RequiredFieldMissing { field })
    }

    fn too_short(field: TicketField, min: usize) -> Result<(), ValidationError> {
        Err(ValidationError::FieldTooShort { field, min })
    }

    #[test]
    fn test_valid_ticket_passes() {
        assert_eq!(validate(&valid_ticket()), Ok(()));
    }

    #[test]
    fn test_missing_title() {
        let mut ticket = valid_ticket();
        ticket.title = None;
        assert_eq!(validate(&ticket), missing(TicketField::Title));

        ticket.title = Some(String::new());
        assert_eq!(validate(&ticket), missing(TicketField::Title));

        ticket.title = Some("   \t ".to_string());
        assert_eq!(validate(&ticket), missing(TicketField::Title));
    }

    #[test]
    fn test_short_title() {
        let mut ticket = valid_ticket();
        ticket.title = Some("Hi".to_string());
        assert_eq!(validate(&ticket), too_short(TicketField::Title, 5));

        ticket.title = Some("Help".to_string());
        assert_eq!(validate(&ticket), too_short(TicketField::Title, 5));
    }

    #[test]
    fn test_title_at_minimum_length() {
        let mut ticket = valid_ticket();
        ticket.title = Some("12345".to_string());
        assert_eq!(validate(&ticket), Ok(()));
    }

    #[test]
    fn test_title_length_ignores_surrounding_whitespace() {
        let mut ticket = valid_ticket();
        ticket.title = Some("  abcd  ".to_string());
        assert_eq!(validate(&ticket), too_short(TicketField::Title, 5));
    }

    #[test]
    fn test_missing_description() {
        let mut ticket = valid_ticket();
        ticket.description = None;
        assert_eq!(validate(&ticket), missing(TicketField::Description));

        ticket.description = Some("    ".to_string());
        assert_eq!(validate(&ticket), missing(TicketField::Description));
    }

    #[test]
    fn test_description_boundary() {
        let mut ticket = valid_ticket();
        ticket.description = Some("a".repeat(20));
        assert_eq!(validate(&ticket), Ok(()));

        ticket.description = Some("a".repeat(19));
        assert_eq!(validate(&ticket), too_short(TicketField::Description, 20));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut ticket = valid_ticket();
        // five characters, ten bytes
        ticket.title = Some("ééééé".to_string());
        assert_eq!(validate(&ticket), Ok(()));

        ticket.title = Some("éééé".to_string());
        assert_eq!(validate(&ticket), too_short(TicketField::Title, 5));
    }

    #[test]
    fn test_missing_references() {
        let mut ticket = valid_ticket();
        ticket.category = None;
        assert_eq!(validate(&ticket), missing(TicketField::Category));

        let mut ticket = valid_ticket();
        ticket.priority = None;
        assert_eq!(validate(&ticket), missing(TicketField::Priority));
    }

    #[test]
    fn test_first_failure_wins() {
        assert_eq!(validate(&Ticket::default()), missing(TicketField::Title));

        let ticket = Ticket::new("Valid Title", "short");
        assert_eq!(validate(&ticket), too_short(TicketField::Description, 20));
    }

    #[test]
    fn test_error_messages() {
        let err = ValidationError::RequiredFieldMissing {
            field: TicketField::Title,
        };
        assert_eq!(err.to_string(), "Title is required");
        assert_eq!(err.field(), TicketField::Title);

        let err = ValidationError::FieldTooShort {
            field: TicketField::Description,
            min: 20,
        };
        assert_eq!(
            err.to_string(),
            "Description must be at least 20 characters long"
        );
    }
}
