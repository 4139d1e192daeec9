use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;

use crate::{
    consts::consts::PersonId,
    database::{
        database::Database,
        options::DatabaseOptions,
        repository::{PersonRepository, StoreResult},
        request_manager::RequestManager,
    },
    model::{person::Person, validation::PersonValidator},
};

use super::handlers::PersonHandler;

/// In-memory store that counts every write it is asked to perform
pub struct RecordingRepository {
    inner: RequestManager,
    pub writes: AtomicUsize,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self {
            inner: Database::new(DatabaseOptions::new_test()).run(),
            writes: AtomicUsize::new(0),
        }
    }

    /// Stops the backing database so later calls fail like a lost connection
    pub async fn shutdown(&self) {
        let _ = self.inner.send_shutdown_request().await;
    }
}

#[async_trait]
impl PersonRepository for RecordingRepository {
    async fn find_all(&self) -> StoreResult<Vec<Person>> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: PersonId) -> StoreResult<Option<Person>> {
        self.inner.find_by_id(id).await
    }

    async fn find_first_by_name(&self, name: &str) -> StoreResult<Option<Person>> {
        self.inner.find_first_by_name(name).await
    }

    async fn find_lowest_id(&self) -> StoreResult<Option<Person>> {
        self.inner.find_lowest_id().await
    }

    async fn count(&self) -> StoreResult<usize> {
        self.inner.count().await
    }

    async fn save(&self, person: Person) -> StoreResult<Person> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.save(person).await
    }

    async fn delete(&self, person: &Person) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(person).await
    }

    async fn delete_all(&self) -> StoreResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete_all().await
    }
}

pub fn new_test_handler() -> (PersonHandler, Arc<RecordingRepository>) {
    let repository = Arc::new(RecordingRepository::new());

    let handler = PersonHandler::new(repository.clone(), Arc::new(PersonValidator::default()));

    (handler, repository)
}
