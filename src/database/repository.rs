use async_trait::async_trait;
use thiserror::Error;

use crate::{consts::consts::PersonId, model::person::Person};

use super::table::table::ApplyErrors;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database is not running, request could not be delivered")]
    Disconnected,
    #[error("Database took too long to respond to request")]
    Timeout,
    #[error("Database responded with an unexpected result for: {0}")]
    UnexpectedResult(String),
    #[error("Cannot delete, record has not been persisted")]
    NotPersisted,
    #[error("Cannot update, record does not exist: {0}")]
    RowDoesNotExist(PersonId),
    #[error("Postgres error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<ApplyErrors> for StoreError {
    fn from(err: ApplyErrors) -> Self {
        match err {
            ApplyErrors::CannotUpdateDoesNotExist(id) => StoreError::RowDoesNotExist(id),
        }
    }
}

/// Row level access to stored people.
///
/// Every call is a single statement, atomicity of that statement is the implementation's concern.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Every stored person, ordered by id
    async fn find_all(&self) -> StoreResult<Vec<Person>>;

    async fn find_by_id(&self, id: PersonId) -> StoreResult<Option<Person>>;

    /// Exact match on name, lowest id wins
    async fn find_first_by_name(&self, name: &str) -> StoreResult<Option<Person>>;

    async fn find_lowest_id(&self) -> StoreResult<Option<Person>>;

    async fn count(&self) -> StoreResult<usize>;

    /// Inserts when `id` is `None` (the store assigns the id), otherwise overwrites the existing row
    async fn save(&self, person: Person) -> StoreResult<Person>;

    async fn delete(&self, person: &Person) -> StoreResult<()>;

    async fn delete_all(&self) -> StoreResult<()>;
}
