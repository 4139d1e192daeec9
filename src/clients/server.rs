use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    middleware::{self, Condition},
    web::Data,
    App, HttpServer,
};

use crate::{
    database::repository::PersonRepository,
    model::validation::{PersonValidator, Validator},
};

use super::{handlers::PersonHandler, router::configure};

pub struct Server {
    address: String,
    port: u16,
    http_workers: usize,
    log_http: bool,
}

impl Server {
    pub fn new(address: String, port: u16, http_workers: usize, log_http: bool) -> Self {
        Self {
            address,
            port,
            http_workers,
            log_http,
        }
    }

    /// Serves the person API until the process receives a shutdown signal
    pub async fn run(self, repository: Arc<dyn PersonRepository>) -> std::io::Result<()> {
        let validator: Arc<dyn Validator> = Arc::new(PersonValidator::default());
        let handler = Data::new(PersonHandler::new(repository, validator));

        log::info!(
            "starting HTTP server on http://{}:{}",
            self.address,
            self.port
        );

        let log_http = self.log_http;

        HttpServer::new(move || {
            App::new()
                .configure(configure(handler.clone()))
                .wrap(Cors::permissive())
                .wrap(Condition::new(log_http, middleware::Logger::default()))
        })
        .workers(self.http_workers)
        .bind((self.address, self.port))?
        .run()
        .await
    }
}
