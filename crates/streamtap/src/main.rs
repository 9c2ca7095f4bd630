mod config;
mod telemetry;

use common::{endpoint_url, EventSink, MongoClient, StreamSession};
use config::ServiceConfig;
use ingest_worker::{supervise, IngestWorker, LoopExit, MongoEventSink, ShutdownOutcome};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize configuration and tracing
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            eprintln!("{}", config::USAGE);
            std::process::exit(2);
        }
    };

    if let Err(e) = telemetry::init_telemetry(&config.log_level) {
        eprintln!("Failed to initialize telemetry: {}", e);
        std::process::exit(1);
    }

    info!(host = %config.stream_host, "Starting streamtap");

    // Connect the stream first so a bad endpoint fails before Mongo spins up
    let endpoint = match endpoint_url(&config.stream_host, &config.access_key) {
        Ok(endpoint) => endpoint,
        Err(e) => {
            error!(error = %e, "Invalid stream host");
            std::process::exit(1);
        }
    };

    let session = match StreamSession::connect(&endpoint).await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Failed to connect to stream");
            std::process::exit(1);
        }
    };
    let (reader, mut control) = session.split();

    let mongo_client = match MongoClient::connect(&config.mongo_url, &config.mongo_database).await {
        Ok(client) => client,
        Err(e) => {
            error!(error = %e, "Failed to connect to MongoDB");
            std::process::exit(1);
        }
    };

    let sink: Arc<dyn EventSink> =
        Arc::new(MongoEventSink::new(&mongo_client, &config.mongo_collection));

    let (done_tx, done_rx) = oneshot::channel();
    let worker = IngestWorker::new(Box::new(reader), sink);
    let loop_handle = tokio::spawn(worker.run(done_tx));

    let interrupt = CancellationToken::new();
    {
        let interrupt = interrupt.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Received interrupt signal, starting close handshake");
                    interrupt.cancel();
                }
                Err(e) => {
                    error!(error = %e, "Failed to listen for interrupt signal");
                }
            }
        });
    }

    let outcome = supervise(
        &mut control,
        done_rx,
        interrupt,
        Duration::from_secs(config.shutdown_grace_secs),
    )
    .await;

    // Teardown runs on every exit path
    if matches!(outcome, ShutdownOutcome::Abandoned) {
        loop_handle.abort();
    }
    let _ = loop_handle.await;
    control.close().await;
    mongo_client.close().await;

    match outcome {
        ShutdownOutcome::Completed(LoopExit::SinkFailed(e)) => {
            error!(error = %e, "Exiting after sink failure");
            std::process::exit(1);
        }
        ShutdownOutcome::Completed(LoopExit::ReadFailed(e)) => {
            error!(error = %e, "Exiting after stream read failure");
            std::process::exit(1);
        }
        _ => {
            info!("Shutdown complete");
        }
    }
}
