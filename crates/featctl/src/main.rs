mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use featctl_config::{self as config, RegistrySettings};
use featctl_core::{RegistryClient, TlsMode};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a registry connection
        Command::Config(args) => commands::config_cmd::handle(args.command, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "featctl", &mut std::io::stdout());
            Ok(())
        }

        // All other commands require a registry client
        cmd => {
            let settings = resolve_registry(&cli.global)?;
            let client = RegistryClient::new(settings.url.clone(), &settings.transport)
                .map_err(|e| error::from_api_error(e, settings.url.as_str()))?;

            tracing::debug!(command = ?cmd, registry = %settings.url, "dispatching command");
            commands::dispatch(cmd, &client, &cli.global).await
        }
    }
}

/// Resolve registry settings from the config file, profile, and CLI
/// overrides. `--registry` wins over the profile URL; `--insecure` and
/// `--timeout` override in either case.
fn resolve_registry(global: &GlobalOpts) -> Result<RegistrySettings, CliError> {
    let cfg = config::load_config_or_default();
    let profile_name = global
        .profile
        .clone()
        .or_else(|| cfg.default_profile.clone())
        .unwrap_or_else(|| "default".into());

    let mut settings = if let Some(profile) = cfg.profiles.get(&profile_name) {
        config::profile_to_settings(profile)?
    } else if let Some(ref url_str) = global.registry {
        // No profile -- build from the flag / env var alone.
        let url: url::Url = url_str.parse().map_err(|_| CliError::Validation {
            field: "registry".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
        RegistrySettings {
            url,
            transport: featctl_core::TransportConfig::default(),
        }
    } else if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: {
                let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
                names.sort_unstable();
                if names.is_empty() { "(none)".into() } else { names.join(", ") }
            },
        });
    } else {
        return Err(CliError::NoConfig {
            path: config::config_path().display().to_string(),
        });
    };

    if let Some(ref url_str) = global.registry {
        settings.url = url_str.parse().map_err(|_| CliError::Validation {
            field: "registry".into(),
            reason: format!("invalid URL: {url_str}"),
        })?;
    }
    if global.insecure {
        settings.transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        settings.transport.timeout = std::time::Duration::from_secs(secs);
    }

    Ok(settings)
}
