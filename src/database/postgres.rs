use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use crate::{consts::consts::PersonId, model::person::Person};

use super::repository::{PersonRepository, StoreError, StoreResult};

const CREATE_PERSON_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS "public"."person" (
        "id" BIGSERIAL NOT NULL,
        "name" VARCHAR(255) NOT NULL,
        PRIMARY KEY ("id")
    );
"#;

/// Person store backed by a single tokio-postgres connection.
///
/// `Client` pipelines concurrent queries over the connection, so one instance is shared by
/// every request.
pub struct PgStore {
    client: Client,
}

impl PgStore {
    /// Connects, spawns the connection driver onto the current tokio runtime and makes sure the
    /// person table exists
    pub async fn connect(config: &str) -> StoreResult<Self> {
        let (client, connection) = tokio_postgres::connect(config, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                log::error!("Postgres connection error: {}", e);
            }
        });

        client.batch_execute(CREATE_PERSON_TABLE).await?;

        log::info!("Connected to postgres, person table ready");

        Ok(Self { client })
    }
}

fn person_from_row(row: &Row) -> StoreResult<Person> {
    let id: i64 = row.try_get("id")?;
    let name: String = row.try_get("name")?;

    Ok(Person::with_id(PersonId(id), name))
}

fn first_person(rows: Vec<Row>) -> StoreResult<Option<Person>> {
    rows.first().map(person_from_row).transpose()
}

#[async_trait]
impl PersonRepository for PgStore {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn find_all(&self) -> StoreResult<Vec<Person>> {
        let select_all = r#"
            SELECT "id", "name" FROM "public"."person" ORDER BY "id";
        "#;

        self.client
            .query(select_all, &[])
            .await?
            .iter()
            .map(person_from_row)
            .collect()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn find_by_id(&self, id: PersonId) -> StoreResult<Option<Person>> {
        let select_by_id = r#"
            SELECT "id", "name" FROM "public"."person" WHERE "id" = $1;
        "#;

        first_person(self.client.query(select_by_id, &[&id.to_number()]).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn find_first_by_name(&self, name: &str) -> StoreResult<Option<Person>> {
        let select_by_name = r#"
            SELECT "id", "name" FROM "public"."person" WHERE "name" = $1 ORDER BY "id" LIMIT 1;
        "#;

        first_person(self.client.query(select_by_name, &[&name]).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn find_lowest_id(&self) -> StoreResult<Option<Person>> {
        let select_lowest = r#"
            SELECT "id", "name" FROM "public"."person" ORDER BY "id" ASC LIMIT 1;
        "#;

        first_person(self.client.query(select_lowest, &[]).await?)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn count(&self) -> StoreResult<usize> {
        let select_count = r#"
            SELECT COUNT(*) AS "count" FROM "public"."person";
        "#;

        let row = self.client.query_one(select_count, &[]).await?;
        let count: i64 = row.try_get("count")?;

        Ok(usize::try_from(count).unwrap_or_default())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn save(&self, person: Person) -> StoreResult<Person> {
        match person.id {
            None => {
                let insert = r#"
                    INSERT INTO "public"."person" ("name") VALUES ($1) RETURNING "id", "name";
                "#;

                let row = self.client.query_one(insert, &[&person.name]).await?;

                person_from_row(&row)
            }
            Some(id) => {
                let update = r#"
                    UPDATE "public"."person" SET "name" = $2 WHERE "id" = $1 RETURNING "id", "name";
                "#;

                let rows = self
                    .client
                    .query(update, &[&id.to_number(), &person.name])
                    .await?;

                first_person(rows)?.ok_or(StoreError::RowDoesNotExist(id))
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete(&self, person: &Person) -> StoreResult<()> {
        let id = person.id.ok_or(StoreError::NotPersisted)?;

        let delete = r#"
            DELETE FROM "public"."person" WHERE "id" = $1;
        "#;

        self.client.execute(delete, &[&id.to_number()]).await?;

        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_all(&self) -> StoreResult<()> {
        let delete_all = r#"
            DELETE FROM "public"."person";
        "#;

        self.client.execute(delete_all, &[]).await?;

        Ok(())
    }
}
