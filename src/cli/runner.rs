//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::config::TapConfig;
use crate::engine::{SyncConfig, SyncEngine};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::output::{JsonLinesWriter, Message, MessageSink, Status};
use crate::state::StateManager;
use crate::streams::{catalog, find_stream, select_streams};
use std::time::Duration;
use tracing::{info, warn};

/// Stream fetched by `check`
const CHECK_STREAM: &str = "products";

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing messages to stdout
    pub async fn run(&self) -> Result<()> {
        let mut out = JsonLinesWriter::stdout(self.cli.format);
        let result = self.run_with(&mut out).await;
        out.flush()?;
        result
    }

    /// Run the CLI command, writing messages to `sink`
    pub async fn run_with(&self, sink: &mut dyn MessageSink) -> Result<()> {
        match &self.cli.command {
            Commands::Spec => sink.emit(Message::spec()),
            Commands::Check { config_json } => self.check(config_json.as_deref(), sink).await,
            Commands::Discover { config_json } => self.discover(config_json.as_deref(), sink),
            Commands::Read {
                streams,
                config_json,
                state_per_page,
            } => {
                self.read(
                    streams.as_deref(),
                    config_json.as_deref(),
                    *state_per_page,
                    sink,
                )
                .await
            }
        }
    }

    /// Load configuration
    fn load_config(&self, inline: Option<&str>) -> Result<TapConfig> {
        // Inline config takes precedence
        if let Some(json_str) = inline {
            return TapConfig::from_json(json_str);
        }

        if let Some(path) = &self.cli.config {
            return TapConfig::from_file(path);
        }

        Err(Error::config(
            "No configuration given (use --config or --config-json)",
        ))
    }

    /// Load state
    fn load_state(&self) -> Result<StateManager> {
        // Inline state takes precedence
        if let Some(state_json) = &self.cli.state_json {
            StateManager::from_json(state_json)
        } else if let Some(path) = &self.cli.state {
            StateManager::from_file(path)
        } else {
            Ok(StateManager::in_memory())
        }
    }

    /// Check connection by fetching the first page of products
    async fn check(&self, config_json: Option<&str>, sink: &mut dyn MessageSink) -> Result<()> {
        let config = self.load_config(config_json)?;
        let stream = find_stream(CHECK_STREAM)?;

        sink.emit(Message::info(format!(
            "Checking connection to {}",
            config.base_url
        )))?;

        let mut http_config = config.http_config();
        http_config.page_delay = Duration::ZERO;
        let client = HttpClient::with_config(http_config)?.with_credentials(config.credentials());

        let message = match client
            .get_records(stream.path, &stream.request_params(None, None))
            .await
        {
            Ok(_) => Message::connection_status(Status::Succeeded, "Connection successful"),
            Err(e) => {
                warn!(error = %e, "connection check failed");
                Message::connection_status(Status::Failed, format!("Connection failed: {e}"))
            }
        };

        sink.emit(message)
    }

    /// Print the catalog
    fn discover(&self, config_json: Option<&str>, sink: &mut dyn MessageSink) -> Result<()> {
        // The catalog is static; a given config is still validated
        if config_json.is_some() || self.cli.config.is_some() {
            self.load_config(config_json)?;
        }

        sink.emit(Message::catalog(catalog()))
    }

    /// Read data
    async fn read(
        &self,
        streams: Option<&str>,
        config_json: Option<&str>,
        state_per_page: bool,
        sink: &mut dyn MessageSink,
    ) -> Result<()> {
        let config = self.load_config(config_json)?;
        let state = self.load_state()?;
        let selected = select_streams(streams)?;

        let client =
            HttpClient::with_config(config.http_config())?.with_credentials(config.credentials());

        let sync_config = SyncConfig::new()
            .with_start_date(config.start_date.clone())
            .with_state_per_page(state_per_page);

        let mut engine = SyncEngine::new(client, state).with_config(sync_config);

        info!(streams = selected.len(), "starting sync");
        let summary = engine.run(&selected, sink).await?;

        // Output final state
        let state_file = if let Some(state_path) = &self.cli.state {
            engine.state().save_to_file(state_path).await?;
            Some(state_path.to_string_lossy().to_string())
        } else {
            None
        };

        // Always emit final state to stdout so caller can capture it
        sink.emit(Message::state(engine.state().snapshot().await))?;

        let failed = summary.failed_streams;
        info!(
            records = summary.total_records,
            failed,
            duration_ms = summary.duration_ms,
            "sync finished"
        );
        sink.emit(Message::summary(summary.with_state_file(state_file)))?;

        if failed > 0 {
            return Err(Error::SyncFailed { failed });
        }

        Ok(())
    }
}
