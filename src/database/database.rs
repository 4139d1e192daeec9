use std::thread;

use flume::Receiver;

use super::{
    commands::{
        Control, DatabaseCommand, DatabaseCommandRequest, DatabaseCommandResponse, Statement,
    },
    options::DatabaseOptions,
    request_manager::RequestManager,
    table::table::PersonTable,
};

pub struct Database {
    person_table: PersonTable,
    options: DatabaseOptions,
}

impl Database {
    pub fn new(options: DatabaseOptions) -> Self {
        Self {
            person_table: PersonTable::new(),
            options,
        }
    }

    /// Moves the database onto its own thread and returns the handle used to talk to it.
    ///
    /// The thread applies one command at a time, so every statement is atomic with respect to
    /// every other caller.
    pub fn run(self) -> RequestManager {
        let (database_sender, database_receiver) = flume::unbounded::<DatabaseCommandRequest>();

        let request_timeout = self.options.request_timeout;

        thread::spawn(move || self.process_requests(database_receiver));

        RequestManager::new(database_sender, request_timeout)
    }

    fn process_requests(mut self, database_receiver: Receiver<DatabaseCommandRequest>) {
        log::info!("📀 In-memory database started");

        // Process incoming requests until shutdown or until every request manager is dropped
        while let Ok(DatabaseCommandRequest { resolver, command }) = database_receiver.recv() {
            log::debug!("Received command: {:?}", command);

            let response = match command {
                DatabaseCommand::Statement(statement) => self.process_statement(statement),
                DatabaseCommand::Control(Control::Shutdown) => {
                    let _ = resolver.send(DatabaseCommandResponse::ControlSuccess(
                        "Successfully shutdown database".to_string(),
                    ));

                    log::info!("Database shut down");

                    return;
                }
            };

            // The caller may have stopped waiting (timeout), the result is dropped in that case
            let _ = resolver.send(response);
        }

        log::info!("Database stopped, no request managers left");
    }

    pub fn process_statement(&mut self, statement: Statement) -> DatabaseCommandResponse {
        let is_mutation = statement.is_mutation();

        match self.person_table.apply(statement) {
            Ok(result) => {
                if is_mutation {
                    log::debug!("✅ Committed: {:?}", result);
                }

                DatabaseCommandResponse::Commit(result)
            }
            Err(err) => {
                log::info!("⚠️  Rolled back: {}", err);

                DatabaseCommandResponse::Rollback(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        consts::consts::PersonId,
        database::{commands::StatementResult, table::table::ApplyErrors},
        model::person::Person,
    };

    fn commit(response: DatabaseCommandResponse) -> StatementResult {
        match response {
            DatabaseCommandResponse::Commit(result) => result,
            other => panic!("expected commit, got {:?}", other),
        }
    }

    mod process_statement {
        use super::*;

        #[test]
        fn save_happy_path() {
            let mut database = Database::new(DatabaseOptions::new_test());

            let result = commit(database.process_statement(Statement::Save(Person::new_test())));

            assert_eq!(
                result,
                StatementResult::Single(Person::with_id(PersonId(1), "Name"))
            );
        }

        #[test]
        fn rejected_statement_rolls_back() {
            let mut database = Database::new(DatabaseOptions::new_test());

            let response =
                database.process_statement(Statement::Save(Person::with_id(PersonId(5), "Nope")));

            assert!(matches!(
                response,
                DatabaseCommandResponse::Rollback(ApplyErrors::CannotUpdateDoesNotExist(PersonId(
                    5
                )))
            ));
        }
    }

    mod run {
        use super::*;

        #[tokio::test]
        async fn shutdown_is_acknowledged() {
            let request_manager = Database::new(DatabaseOptions::new_test()).run();

            let status = request_manager
                .send_shutdown_request()
                .await
                .expect("should shut down");

            assert_eq!(status, "Successfully shutdown database");
        }
    }
}
