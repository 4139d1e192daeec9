use std::time::Duration;

use async_trait::async_trait;
use flume::Sender;

use crate::{consts::consts::PersonId, model::person::Person};

use super::{
    commands::{
        Control, DatabaseCommand, DatabaseCommandRequest, DatabaseCommandResponse, Statement,
        StatementResult,
    },
    repository::{PersonRepository, StoreError, StoreResult},
};

/// Handle to the in-memory database thread, cheap to clone and share between requests.
///
/// Each call sends a command over the database channel and awaits the reply on a oneshot
/// channel, so callers suspend instead of blocking while the database works.
#[derive(Clone)]
pub struct RequestManager {
    database_sender: Sender<DatabaseCommandRequest>,
    request_timeout: Duration,
}

fn unexpected(statement: &str) -> StoreError {
    StoreError::UnexpectedResult(statement.to_string())
}

impl RequestManager {
    pub fn new(database_sender: Sender<DatabaseCommandRequest>, request_timeout: Duration) -> Self {
        Self {
            database_sender,
            request_timeout,
        }
    }

    /// Sends a shutdown request to the database and returns the database's response
    pub async fn send_shutdown_request(&self) -> StoreResult<String> {
        match self
            .send_command(DatabaseCommand::Control(Control::Shutdown))
            .await?
        {
            DatabaseCommandResponse::ControlSuccess(status) => Ok(status),
            _ => Err(unexpected("Shutdown")),
        }
    }

    pub async fn send_statement(&self, statement: Statement) -> StoreResult<StatementResult> {
        match self.send_command(DatabaseCommand::Statement(statement)).await? {
            DatabaseCommandResponse::Commit(result) => Ok(result),
            DatabaseCommandResponse::Rollback(err) => Err(err.into()),
            DatabaseCommandResponse::ControlSuccess(status) => Err(StoreError::UnexpectedResult(
                format!("statement answered with control status: {}", status),
            )),
        }
    }

    pub async fn send_command(&self, command: DatabaseCommand) -> StoreResult<DatabaseCommandResponse> {
        let (resolver, response_receiver) = oneshot::channel::<DatabaseCommandResponse>();

        let request = DatabaseCommandRequest { resolver, command };

        // Sends the request to the database thread, the database responds
        //  on the response_receiver once it's finished processing the request
        self.database_sender
            .send_async(request)
            .await
            .map_err(|_| StoreError::Disconnected)?;

        match tokio::time::timeout(self.request_timeout, response_receiver).await {
            Ok(Ok(response)) => Ok(response),
            // Resolver dropped without an answer, the database thread has exited
            Ok(Err(_)) => Err(StoreError::Disconnected),
            Err(_) => Err(StoreError::Timeout),
        }
    }
}

#[async_trait]
impl PersonRepository for RequestManager {
    async fn find_all(&self) -> StoreResult<Vec<Person>> {
        self.send_statement(Statement::List)
            .await?
            .list()
            .ok_or_else(|| unexpected("List"))
    }

    async fn find_by_id(&self, id: PersonId) -> StoreResult<Option<Person>> {
        self.send_statement(Statement::Get(id))
            .await?
            .get_single()
            .ok_or_else(|| unexpected("Get"))
    }

    async fn find_first_by_name(&self, name: &str) -> StoreResult<Option<Person>> {
        self.send_statement(Statement::GetFirstByName(name.to_string()))
            .await?
            .get_single()
            .ok_or_else(|| unexpected("GetFirstByName"))
    }

    async fn find_lowest_id(&self) -> StoreResult<Option<Person>> {
        self.send_statement(Statement::GetLowestId)
            .await?
            .get_single()
            .ok_or_else(|| unexpected("GetLowestId"))
    }

    async fn count(&self) -> StoreResult<usize> {
        self.send_statement(Statement::Count)
            .await?
            .count()
            .ok_or_else(|| unexpected("Count"))
    }

    async fn save(&self, person: Person) -> StoreResult<Person> {
        self.send_statement(Statement::Save(person))
            .await?
            .single()
            .ok_or_else(|| unexpected("Save"))
    }

    async fn delete(&self, person: &Person) -> StoreResult<()> {
        let id = person.id.ok_or(StoreError::NotPersisted)?;

        let status = self
            .send_statement(Statement::Remove(id))
            .await?
            .success_status()
            .ok_or_else(|| unexpected("Remove"))?;

        log::debug!("{}", status);

        Ok(())
    }

    async fn delete_all(&self) -> StoreResult<()> {
        self.send_statement(Statement::RemoveAll)
            .await?
            .success_status()
            .ok_or_else(|| unexpected("RemoveAll"))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{database::Database, options::DatabaseOptions};

    fn new_test_request_manager() -> RequestManager {
        Database::new(DatabaseOptions::new_test()).run()
    }

    mod crud {
        use super::*;

        #[test_log::test(tokio::test)]
        async fn save_then_find_by_id_round_trips() {
            let rm = new_test_request_manager();

            let saved = rm.save(Person::new("Ann")).await.expect("should save");
            let id = saved.id.expect("should assign id");

            let found = rm.find_by_id(id).await.expect("should query");

            assert_eq!(found, Some(Person::with_id(id, "Ann")));
        }

        #[test_log::test(tokio::test)]
        async fn save_unknown_id_is_row_does_not_exist() {
            let rm = new_test_request_manager();

            let err = rm
                .save(Person::with_id(PersonId(999_999), "X"))
                .await
                .expect_err("should reject");

            assert!(matches!(err, StoreError::RowDoesNotExist(PersonId(999_999))));
        }

        #[test_log::test(tokio::test)]
        async fn delete_removes_row() {
            let rm = new_test_request_manager();
            let saved = rm.save(Person::new("Ann")).await.expect("should save");

            rm.delete(&saved).await.expect("should delete");

            assert_eq!(rm.count().await.expect("should count"), 0);
        }

        #[test_log::test(tokio::test)]
        async fn delete_unpersisted_is_rejected() {
            let rm = new_test_request_manager();

            let err = rm
                .delete(&Person::new("Ann"))
                .await
                .expect_err("should reject");

            assert!(matches!(err, StoreError::NotPersisted));
        }

        #[test_log::test(tokio::test)]
        async fn delete_all_resets_rows_but_not_ids() {
            let rm = new_test_request_manager();
            rm.save(Person::new("Ann")).await.expect("should save");
            rm.save(Person::new("Bob")).await.expect("should save");

            rm.delete_all().await.expect("should delete all");
            let next = rm.save(Person::new("Cid")).await.expect("should save");

            assert_eq!(rm.find_all().await.expect("should list"), vec![next.clone()]);
            assert_eq!(next.id, Some(PersonId(3)));
        }
    }

    mod queries {
        use super::*;

        #[test_log::test(tokio::test)]
        async fn lowest_id_and_first_by_name() {
            let rm = new_test_request_manager();
            let ann = rm.save(Person::new("Ann")).await.expect("should save");
            rm.save(Person::new("Bob")).await.expect("should save");
            rm.save(Person::new("Ann")).await.expect("should save");

            assert_eq!(
                rm.find_lowest_id().await.expect("should query"),
                Some(ann.clone())
            );
            assert_eq!(
                rm.find_first_by_name("Ann").await.expect("should query"),
                Some(ann)
            );
            assert_eq!(
                rm.find_first_by_name("Zed").await.expect("should query"),
                None
            );
        }

        #[test_log::test(tokio::test)]
        async fn concurrent_inserts_get_distinct_ids() {
            let rm = new_test_request_manager();

            let handles: Vec<_> = (0..20)
                .map(|i| {
                    let rm = rm.clone();
                    tokio::spawn(async move { rm.save(Person::new(format!("P{}", i))).await })
                })
                .collect();

            let mut ids = vec![];
            for handle in handles {
                let person = handle
                    .await
                    .expect("task should finish")
                    .expect("should save");
                ids.push(person.id.expect("should have id"));
            }
            ids.sort();
            ids.dedup();

            assert_eq!(ids.len(), 20);
        }
    }

    mod lifecycle {
        use super::*;

        #[test_log::test(tokio::test)]
        async fn requests_after_shutdown_fail() {
            let rm = new_test_request_manager();

            rm.send_shutdown_request().await.expect("should shut down");

            let err = rm.find_all().await.expect_err("should fail");

            // A request racing the thread exit can sit in the queue until the timeout fires
            assert!(matches!(
                err,
                StoreError::Disconnected | StoreError::Timeout
            ));
        }
    }
}
