use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls, config::Host};

use super::embedded::migrations;

const UNPARSEABLE_DSN: &str = "<unparseable connection string>";

/// Owned handle to the notes database.
///
/// The connection driver runs on its own task until the client is dropped;
/// [`Database::shutdown`] does both and waits for the driver to finish.
pub struct Database {
    client: Client,
    driver: JoinHandle<()>,
}

impl Database {
    pub async fn connect(database_dsn: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        let driver = tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client, driver })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    pub const fn client(&self) -> &Client {
        &self.client
    }

    pub async fn shutdown(self) {
        let Self { client, driver } = self;
        drop(client);

        if let Err(e) = driver.await {
            tracing::error!("database connection task failed: {e}");
        }

        tracing::info!("Database connection closed");
    }
}

/// Opens the database and applies migrations, terminating the process on
/// any failure.
pub async fn bootstrap(database_dsn: &str) -> Database {
    tracing::info!("Connecting to database at {}", redact_dsn(database_dsn));

    let mut database = match Database::connect(database_dsn).await {
        Ok(database) => database,
        Err(e) => {
            tracing::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!("Database connected");

    if let Err(e) = database.migrate().await {
        tracing::error!("Failed to migrate database: {e}");
        std::process::exit(1);
    }

    database
}

/// Describes a connection string without its secrets.
///
/// Only user, hosts, ports and database name survive. A string the driver
/// cannot parse is replaced wholesale.
pub fn redact_dsn(dsn: &str) -> String {
    let Ok(config) = dsn.parse::<Config>() else {
        return UNPARSEABLE_DSN.to_string();
    };

    let hosts = config
        .get_hosts()
        .iter()
        .map(|host| match host {
            Host::Tcp(name) => name.clone(),
            #[cfg(unix)]
            Host::Unix(path) => path.display().to_string(),
        })
        .collect::<Vec<_>>()
        .join(",");
    let ports = config
        .get_ports()
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let mut parts = Vec::new();
    if let Some(user) = config.get_user() {
        parts.push(format!("user={user}"));
    }
    if !hosts.is_empty() {
        parts.push(format!("host={hosts}"));
    }
    if !ports.is_empty() {
        parts.push(format!("port={ports}"));
    }
    if let Some(dbname) = config.get_dbname() {
        parts.push(format!("dbname={dbname}"));
    }

    parts.join(" ")
}
