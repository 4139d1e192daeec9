use serde::{Deserialize, Serialize};

use crate::consts::consts::PersonId;

/// A stored (or about to be stored) person.
///
/// `id` is `None` until the store assigns one on first save and never changes after that.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Person {
    pub id: Option<PersonId>,
    pub name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Person {
            id: None,
            name: name.into(),
        }
    }

    pub fn with_id(id: PersonId, name: impl Into<String>) -> Self {
        Person {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Replacement value used by updates, keeps our identity and takes the new name
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Person {
            id: self.id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
impl Person {
    pub fn new_test() -> Self {
        Person::new("Name")
    }
}

/// Request body for create / update.
///
/// Every field is optional so a missing name reaches the validator instead of failing decoding.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonPayload {
    #[serde(default)]
    pub id: Option<PersonId>,
    #[serde(default)]
    pub name: Option<String>,
}

impl PersonPayload {
    pub fn named(name: impl Into<String>) -> Self {
        PersonPayload {
            id: None,
            name: Some(name.into()),
        }
    }
}
