use crate::{consts::consts::PersonId, model::person::Person};

use super::table::table::ApplyErrors;

/// Single row operations understood by the person table
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// Returns a list of Person, ordered by id
    List,
    Get(PersonId),
    GetFirstByName(String),
    GetLowestId,
    Count,
    /// Inserts when the person has no id, otherwise overwrites
    Save(Person),
    Remove(PersonId),
    RemoveAll,
}

impl Statement {
    pub fn is_mutation(&self) -> bool {
        match self {
            Statement::Save(_) | Statement::Remove(_) | Statement::RemoveAll => true,
            Statement::List
            | Statement::Get(_)
            | Statement::GetFirstByName(_)
            | Statement::GetLowestId
            | Statement::Count => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatementResult {
    /// Used for statements that do not return data
    SuccessStatus(String),
    Single(Person),
    GetSingle(Option<Person>),
    List(Vec<Person>),
    Count(usize),
}

impl StatementResult {
    pub fn single(self) -> Option<Person> {
        match self {
            StatementResult::Single(p) => Some(p),
            _ => None,
        }
    }

    pub fn get_single(self) -> Option<Option<Person>> {
        match self {
            StatementResult::GetSingle(p) => Some(p),
            _ => None,
        }
    }

    pub fn list(self) -> Option<Vec<Person>> {
        match self {
            StatementResult::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn count(self) -> Option<usize> {
        match self {
            StatementResult::Count(c) => Some(c),
            _ => None,
        }
    }

    pub fn success_status(self) -> Option<String> {
        match self {
            StatementResult::SuccessStatus(s) => Some(s),
            _ => None,
        }
    }
}

/// Database commands are how we interact with the database worker.
///
/// Most interactions are statements, control commands manage the worker itself.
#[derive(Debug)]
pub enum DatabaseCommand {
    Statement(Statement),
    Control(Control),
}

#[derive(Debug, PartialEq)]
pub enum Control {
    /// Stops the worker, requests queued before the shutdown are still answered
    Shutdown,
}

#[derive(Debug)]
pub enum DatabaseCommandResponse {
    /// Statement applied, returns its result
    Commit(StatementResult),
    /// Statement rejected by the table, nothing changed
    Rollback(ApplyErrors),
    /// Control command performed
    ControlSuccess(String),
}

pub struct DatabaseCommandRequest {
    pub resolver: oneshot::Sender<DatabaseCommandResponse>,
    pub command: DatabaseCommand,
}
