use std::sync::Arc;

use actix_web::{
    http::header::{self, ContentType},
    HttpResponse,
};

use crate::{
    consts::consts::{person_location, PersonId, DELETE_SUCCESS_MESSAGE},
    database::repository::{PersonRepository, StoreError},
    model::{
        person::{Person, PersonPayload},
        validation::Validator,
    },
};

use super::error::ApiError;

/// Per-operation orchestration between the HTTP surface, the validator and the store.
///
/// Every operation yields exactly one response. Input is validated before any write is
/// attempted, and store failures are passed through untouched (no retries).
pub struct PersonHandler {
    repository: Arc<dyn PersonRepository>,
    validator: Arc<dyn Validator>,
}

impl PersonHandler {
    pub fn new(repository: Arc<dyn PersonRepository>, validator: Arc<dyn Validator>) -> Self {
        Self {
            repository,
            validator,
        }
    }

    pub async fn find_all(&self) -> Result<HttpResponse, ApiError> {
        let people = self.repository.find_all().await?;

        Ok(HttpResponse::Ok().json(people))
    }

    pub async fn find_by_id(&self, id: PersonId) -> Result<HttpResponse, ApiError> {
        let person = self.existing(id).await?;

        Ok(HttpResponse::Ok().json(person))
    }

    pub async fn find_first_by_name(&self, name: &str) -> Result<HttpResponse, ApiError> {
        log::info!("Handle request GET first by name [{}]", name);

        let person = self
            .repository
            .find_first_by_name(name)
            .await?
            .ok_or(ApiError::NotFound)?;

        Ok(HttpResponse::Ok().json(person))
    }

    pub async fn create(&self, body: &[u8]) -> Result<HttpResponse, ApiError> {
        let candidate = parse_payload(body, "person must not be null")?;
        let person = self.validate(candidate)?;

        let saved = self.repository.save(person).await?;

        let id = saved.id.ok_or_else(|| {
            StoreError::UnexpectedResult("save did not assign an id".to_string())
        })?;

        Ok(HttpResponse::Created()
            .insert_header((header::LOCATION, person_location(id)))
            .json(saved))
    }

    /// Existence is checked first, so an unknown id is a 404 even when the body is also invalid
    pub async fn update(&self, id: PersonId, body: &[u8]) -> Result<HttpResponse, ApiError> {
        let existing = self.existing(id).await?;

        let candidate = parse_payload(body, "Body is required")?;
        let update = self.validate(candidate)?;

        // Whole value replacement, the body's own id never wins over the path id
        let saved = self.repository.save(existing.with_name(update.name)).await?;

        Ok(HttpResponse::Ok().json(saved))
    }

    pub async fn delete_by_id(&self, id: PersonId) -> Result<HttpResponse, ApiError> {
        let existing = self.existing(id).await?;

        self.repository.delete(&existing).await?;

        Ok(HttpResponse::Ok()
            .content_type(ContentType::json())
            .body(DELETE_SUCCESS_MESSAGE))
    }

    async fn existing(&self, id: PersonId) -> Result<Person, ApiError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ApiError::NotFound)
    }

    fn validate(&self, candidate: PersonPayload) -> Result<Person, ApiError> {
        self.validator.validate(candidate).map_err(|err| {
            log::info!("person not valid -> {}", err);
            ApiError::from(err)
        })
    }
}

fn parse_payload(body: &[u8], missing_message: &str) -> Result<PersonPayload, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::InvalidInput(missing_message.to_string()));
    }

    serde_json::from_slice(body)
        .map_err(|err| ApiError::InvalidInput(format!("invalid person body: {}", err)))
}
