use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a typed identifier over `u64` for each record kind.
///
/// `record_id!(Ticket => "ticket")` expands to `TicketId(pub u64)` with `From<u64>` (which the
/// store uses to assign ids) and a `ticket_{n}` display form for logs.
macro_rules! record_id {
    ($($name:ident => $prefix:literal),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Type-safe identifier for " $name " records."]
                #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
                #[serde(transparent)]
                pub struct [<$name Id>](pub u64);

                impl From<u64> for [<$name Id>] {
                    fn from(id: u64) -> Self {
                        Self(id)
                    }
                }

                impl fmt::Display for [<$name Id>] {
                    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        write!(f, concat!($prefix, "_{}"), self.0)
                    }
                }
            )*
        }
    };
}

record_id! {
    Ticket => "ticket",
    Category => "category",
    Priority => "priority",
    User => "user",
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_kind_prefix() {
        assert_eq!(TicketId(7).to_string(), "ticket_7");
        assert_eq!(CategoryId::from(2).to_string(), "category_2");
        assert_eq!(UserId(1).to_string(), "user_1");
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&PriorityId(3)).unwrap();
        assert_eq!(json, "3");
        let back: PriorityId = serde_json::from_str("3").unwrap();
        assert_eq!(back, PriorityId(3));
    }
}
