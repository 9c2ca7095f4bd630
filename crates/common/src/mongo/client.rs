use anyhow::{Context, Result};
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::info;

#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    database: String,
}

impl MongoClient {
    /// Connect to the deployment and verify it answers a ping
    ///
    /// The connection string may embed credentials and is never logged.
    pub async fn connect(url: &str, database: &str) -> Result<Self> {
        info!(database = %database, "Connecting to MongoDB");

        let options = ClientOptions::parse(url)
            .await
            .context("Failed to parse MongoDB connection string")?;
        let client = Client::with_options(options).context("Failed to build MongoDB client")?;

        client
            .database(database)
            .run_command(doc! { "ping": 1 }, None)
            .await
            .context("Failed to ping MongoDB")?;

        info!("Successfully connected to MongoDB");
        Ok(Self {
            client,
            database: database.to_string(),
        })
    }

    /// Handle to the configured database
    pub fn database(&self) -> Database {
        self.client.database(&self.database)
    }

    pub async fn close(self) {
        info!("Closing MongoDB connection");
        // Driver tears the pool down when the last clone is dropped
    }
}
