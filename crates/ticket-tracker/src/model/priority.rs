use crate::model::PriorityId;
use crate::registry::NamedRecord;
use record_store::Record;
use serde::{Deserialize, Serialize};

/// How urgently a ticket needs attention, e.g. `HIGH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub id: Option<PriorityId>,
    pub name: String,
}

impl Priority {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

impl Record for Priority {
    type Id = PriorityId;

    fn id(&self) -> Option<PriorityId> {
        self.id
    }

    fn set_id(&mut self, id: PriorityId) {
        self.id = Some(id);
    }
}

impl NamedRecord for Priority {
    const KIND: &'static str = "priority";

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
