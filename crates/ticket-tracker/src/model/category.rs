use crate::model::CategoryId;
use crate::registry::NamedRecord;
use record_store::Record;
use serde::{Deserialize, Serialize};

/// A classification for tickets, e.g. `BUG` or `BILLING`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<CategoryId>,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Record for Category {
    type Id = CategoryId;

    fn id(&self) -> Option<CategoryId> {
        self.id
    }

    fn set_id(&mut self, id: CategoryId) {
        self.id = Some(id);
    }
}

impl NamedRecord for Category {
    const KIND: &'static str = "category";

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn named(name: String) -> Self {
        Self::new(name)
    }
}
