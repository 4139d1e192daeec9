use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    consts::consts::{PersonId, START_AT_ID},
    database::commands::{Statement, StatementResult},
    model::person::Person,
};

use super::query;

#[derive(Error, Debug, PartialEq)]
pub enum ApplyErrors {
    // CRUD - UPDATE
    #[error("Cannot update, record does not exist: {0}")]
    CannotUpdateDoesNotExist(PersonId),
}

pub struct PersonTable {
    pub person_rows: BTreeMap<PersonId, Person>,
    next_id: PersonId,
}

impl PersonTable {
    pub fn new() -> Self {
        Self {
            person_rows: BTreeMap::new(),
            next_id: START_AT_ID,
        }
    }

    pub fn apply(&mut self, statement: Statement) -> Result<StatementResult, ApplyErrors> {
        let statement_result = match statement {
            Statement::Save(person) => match person.id {
                None => {
                    let id = self.next_id;
                    self.next_id = id.increment();

                    let persisted = Person::with_id(id, person.name);
                    self.person_rows.insert(id, persisted.clone());

                    StatementResult::Single(persisted)
                }
                Some(id) => {
                    let row = self
                        .person_rows
                        .get_mut(&id)
                        .ok_or(ApplyErrors::CannotUpdateDoesNotExist(id))?;

                    *row = person.clone();

                    StatementResult::Single(person)
                }
            },
            Statement::Remove(id) => {
                // Removing a missing row is not an error, the end state is the same
                self.person_rows.remove(&id);

                StatementResult::SuccessStatus(format!("Removed: {}", id))
            }
            Statement::RemoveAll => {
                let removed = self.person_rows.len();
                self.person_rows.clear();

                StatementResult::SuccessStatus(format!("Removed {} rows", removed))
            }
            Statement::Get(id) => StatementResult::GetSingle(self.person_rows.get(&id).cloned()),
            Statement::GetFirstByName(name) => {
                StatementResult::GetSingle(query::first_by_name(self, &name))
            }
            Statement::GetLowestId => StatementResult::GetSingle(query::lowest_id(self)),
            Statement::List => StatementResult::List(query::list(self)),
            Statement::Count => StatementResult::Count(self.person_rows.len()),
        };

        Ok(statement_result)
    }
}

impl Default for PersonTable {
    fn default() -> Self {
        Self::new()
    }
}
