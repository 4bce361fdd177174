use crate::model::UserId;
use crate::registry::NamedRecord;
use record_store::Record;
use serde::{Deserialize, Serialize};

/// The identity that submitted a ticket.
///
/// # Notes
/// Only the login is kept. Authentication and profile data live outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<UserId>,
    pub login: String,
}

impl User {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            id: None,
            login: login.into(),
        }
    }
}

impl Record for User {
    type Id = UserId;

    fn id(&self) -> Option<UserId> {
        self.id
    }

    fn set_id(&mut self, id: UserId) {
        self.id = Some(id);
    }
}

impl NamedRecord for User {
    const KIND: &'static str = "user";

    fn name(&self) -> &str {
        &self.login
    }

    fn set_name(&mut self, login: String) {
        self.login = login;
    }

    fn named(login: String) -> Self {
        Self::new(login)
    }
}
