use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use num_format::{Locale, ToFormattedString};
use people::{
    clients::server::Server,
    database::options::{DatabaseOptions, StorageEngine},
};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StorageKind {
    Memory,
    Postgres,
}

/// 📇 People server, a small REST API for creating, reading, updating and deleting people
#[derive(Parser, Debug)]
struct Cli {
    /// Address the http server will run on
    #[clap(short, long, env = "PEOPLE_ADDRESS", default_value = "0.0.0.0")]
    address: String,

    /// Port the http server will run on
    #[clap(short, long, env = "PEOPLE_PORT", default_value = "8080")]
    port: u16,

    #[clap(long, env = "PEOPLE_HTTP_WORKERS", default_value_t = 2)]
    http_workers: usize,

    /// Log every http request
    #[clap(long, env = "PEOPLE_LOG_HTTP")]
    log_http: bool,

    #[clap(long, env = "PEOPLE_STORAGE", value_enum, default_value = "memory")]
    storage: StorageKind,

    /// tokio-postgres connection string, required for postgres storage
    #[clap(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// How long a request waits on the in-memory database before failing
    #[clap(long, env = "PEOPLE_REQUEST_TIMEOUT_MS", default_value_t = 2000)]
    request_timeout_ms: u64,
}

impl Cli {
    fn storage_engine(&self) -> anyhow::Result<StorageEngine> {
        match self.storage {
            StorageKind::Memory => Ok(StorageEngine::Memory),
            StorageKind::Postgres => {
                let url = self
                    .database_url
                    .clone()
                    .context("--database-url (or DATABASE_URL) is required for postgres storage")?;

                Ok(StorageEngine::Postgres(url))
            }
        }
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    let storage_engine = args.storage_engine()?;

    log::info!("Opening {} storage", storage_engine);

    let repository = DatabaseOptions::default()
        .set_storage_engine(storage_engine)
        .set_request_timeout(Duration::from_millis(args.request_timeout_ms))
        .open()
        .await
        .context("failed to open person store")?;

    let count = repository.count().await?;

    log::info!("Store ready with {} people", count.to_formatted_string(&Locale::en));

    Server::new(args.address, args.port, args.http_workers, args.log_http)
        .run(repository)
        .await?;

    Ok(())
}
