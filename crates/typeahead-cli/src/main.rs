use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use typeahead_client::{SuggestionClient, SuggestionSource};
use typeahead_core::config::FieldConfig;
use typeahead_core::TypeaheadConfig;

/// typeahead — search-as-you-type suggestions in the terminal.
///
/// Each keystroke in a search field is debounced, sent to the autocomplete
/// endpoint, and the answer is shown as a dropdown beneath the field.
#[derive(Parser, Debug)]
#[command(name = "typeahead", version, about)]
struct Cli {
    /// Autocomplete endpoint URL (overrides the config file).
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Search field to register, as `id` or `id=Label`. Repeatable; replaces
    /// the configured fields.
    #[arg(short, long = "field")]
    fields: Vec<String>,

    /// Quiet period after the last keystroke before fetching, in milliseconds.
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Text to type into the first field on startup.
    #[arg(short, long)]
    query: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut TypeaheadConfig) {
        if let Some(ref endpoint) = self.endpoint {
            config.endpoint.url = endpoint.clone();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.controller.debounce_ms = debounce_ms;
        }
        if !self.fields.is_empty() {
            config.fields = self.fields.iter().map(|f| parse_field(f)).collect();
        }
    }
}

fn parse_field(arg: &str) -> FieldConfig {
    match arg.split_once('=') {
        Some((id, label)) => FieldConfig::new(id.trim(), label.trim()),
        None => FieldConfig::new(arg.trim(), ""),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging.
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file so the alternate screen stays clean. If the file can't
    // be opened, logs are discarded.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("typeahead");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("typeahead.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    // Load config.
    let mut config = TypeaheadConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        TypeaheadConfig::default()
    });
    cli.apply(&mut config);
    config.validate()?;

    tracing::info!(
        endpoint = %config.endpoint.url,
        fields = config.fields.len(),
        "Starting typeahead v{}",
        env!("CARGO_PKG_VERSION")
    );

    let source: Arc<dyn SuggestionSource> =
        Arc::new(SuggestionClient::from_config(&config.endpoint));

    let mut app = typeahead_tui::App::new(&config, source);
    if let Some(query) = cli.query {
        app.set_initial_query(query);
    }

    app.run().await?;

    tracing::info!("typeahead exited cleanly");
    Ok(())
}
