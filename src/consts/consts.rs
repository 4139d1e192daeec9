use std::fmt;

use serde::{Deserialize, Serialize};

// Values
pub const API: &str = "/api/people";
pub const DELETE_SUCCESS_MESSAGE: &str = "successfully deleted!";

pub const NAME_MIN_LENGTH: usize = 1;
pub const NAME_MAX_LENGTH: usize = 10;

// New Type Pattern -- https://doc.rust-lang.org/rust-by-example/generics/new_types.html
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl PersonId {
    pub fn to_number(self) -> i64 {
        self.0
    }

    pub fn increment(&self) -> PersonId {
        PersonId(self.0 + 1)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ids handed out by a fresh store start here
pub const START_AT_ID: PersonId = PersonId(1);

/// Location of a single person resource, e.g. `/api/people/1`
pub fn person_location(id: PersonId) -> String {
    format!("{}/{}", API, id)
}
