//! Deployment configuration validator.
//!
//! # Architecture Overview
//!
//! ```text
//!   config file ──▶ config::loader ──▶ validation ──▶ exit status
//!                      (parse,          (general →       (0 valid,
//!                       normalize)       components →     1 invalid)
//!                                        sites)
//!                                           │
//!                                           ▼
//!                                 observability::advisory
//!                                 (non-fatal notices)
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use deploy_validator::config::loader::load_config_with;
use deploy_validator::config::watcher::{ConfigWatcher, WatchOutcome};
use deploy_validator::config::DeployConfig;
use deploy_validator::lifecycle::shutdown::Shutdown;
use deploy_validator::lifecycle::signals::spawn_signal_listener;
use deploy_validator::observability::advisory::{ConsoleNotifier, Notifier, TracingNotifier};
use deploy_validator::observability::logging::{self, LogFormat};

#[derive(Parser)]
#[command(name = "deploy-validator", version)]
#[command(about = "Validate deployment configuration before generating infrastructure", long_about = None)]
struct Cli {
    /// Log output format (pretty or json)
    #[arg(long, global = true, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Default log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Validate {
        file: PathBuf,

        /// Keep running and validate again whenever the file changes
        #[arg(long)]
        watch: bool,
    },
    /// Validate and print the normalized configuration as JSON
    Show {
        file: PathBuf,

        /// Only print the site with this identifier
        #[arg(long)]
        site: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_format, &cli.log_level);

    let notifier: Arc<dyn Notifier> = match cli.log_format {
        LogFormat::Pretty => Arc::new(ConsoleNotifier::stderr()),
        LogFormat::Json => Arc::new(TracingNotifier),
    };

    let result = match cli.command {
        Commands::Validate { file, watch } => {
            let valid = validate_once(&file, notifier.as_ref());
            if watch {
                watch_file(&file, notifier).await
            } else if valid {
                Ok(())
            } else {
                return ExitCode::FAILURE;
            }
        }
        Commands::Show { file, site } => show(&file, site.as_deref(), notifier.as_ref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn validate_once(file: &Path, notifier: &dyn Notifier) -> bool {
    match load_config_with(file, notifier) {
        Ok(config) => {
            report_valid(file, &config);
            true
        }
        Err(e) => {
            eprintln!("Error: {e}");
            false
        }
    }
}

fn report_valid(file: &Path, config: &DeployConfig) {
    tracing::info!(
        path = %file.display(),
        cloud = %config.general.cloud,
        sites = config.sites.len(),
        components = config.components.len(),
        "Configuration is valid"
    );
}

fn show(
    file: &Path,
    site: Option<&str>,
    notifier: &dyn Notifier,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with(file, notifier)?;

    let output = match site {
        Some(identifier) => {
            let site = config
                .sites
                .iter()
                .find(|s| s.identifier == identifier)
                .ok_or_else(|| format!("Site {identifier} not found in {}", file.display()))?;
            serde_json::to_string_pretty(site)?
        }
        None => serde_json::to_string_pretty(&config)?,
    };

    println!("{output}");
    Ok(())
}

async fn watch_file(
    file: &Path,
    notifier: Arc<dyn Notifier>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (watcher, mut updates) = ConfigWatcher::new(file, notifier);
    let _guard = watcher.run()?;

    let shutdown = Shutdown::new();
    let mut stop = shutdown.subscribe();
    let _signals = spawn_signal_listener(&shutdown);

    loop {
        tokio::select! {
            Some(outcome) = updates.recv() => match outcome {
                WatchOutcome::Valid(config) => report_valid(file, &config),
                WatchOutcome::Invalid(message) => eprintln!("Error: {message}"),
            },
            _ = stop.recv() => break,
        }
    }

    tracing::info!("Watcher stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CONFIG: &str = r#"
[mach_composer]
version = "1"

[general]
cloud = "azure"

[general.terraform_config.azure_remote_state]
resource_group = "rg"
storage_account = "tfstate"
container_name = "state"
state_folder = "unittest"

[[sites]]
identifier = "nl-unittest"
"#;

    #[test]
    fn test_show_site_filter() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        assert!(show(file.path(), None, &TracingNotifier).is_ok());
        assert!(show(file.path(), Some("nl-unittest"), &TracingNotifier).is_ok());

        let err = show(file.path(), Some("de-unittest"), &TracingNotifier).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Site de-unittest not found in {}", file.path().display())
        );
    }
}
