//! Config subcommand handlers.

use dialoguer::{Confirm, Input};
use owo_colors::OwoColorize;

use featctl_config::{Config, Profile, config_path, load_config_or_default, save_config};

use crate::cli::{ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(cmd: ConfigCommand, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let path = config_path();
            eprintln!("featctl — configuration wizard");
            eprintln!("   Config path: {}\n", path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let registry: String = Input::new()
                .with_prompt("Registry URL")
                .default("http://localhost:8000".into())
                .interact_text()
                .map_err(prompt_err)?;

            registry.parse::<url::Url>().map_err(|_| CliError::Validation {
                field: "registry".into(),
                reason: format!("invalid URL: {registry}"),
            })?;

            let insecure = Confirm::new()
                .with_prompt("Accept self-signed TLS certificates?")
                .default(false)
                .interact()
                .map_err(prompt_err)?;

            let mut cfg = load_config_or_default();
            cfg.profiles.insert(
                profile_name.clone(),
                Profile {
                    registry,
                    ca_cert: None,
                    insecure: insecure.then_some(true),
                    timeout: None,
                },
            );
            if cfg.profiles.len() == 1 {
                cfg.default_profile = Some(profile_name.clone());
            }
            save_config(&cfg)?;

            let color = output::should_color(&global.color);
            if color {
                eprintln!("{} Profile '{profile_name}' saved", "✓".green());
            } else {
                eprintln!("✓ Profile '{profile_name}' saved");
            }
            Ok(())
        }

        // ── Show: resolved configuration ────────────────────────────
        ConfigCommand::Show => {
            let cfg = load_config_or_default();
            let text = toml::to_string_pretty(&cfg).map_err(|e| CliError::Validation {
                field: "config".into(),
                reason: format!("failed to render config: {e}"),
            })?;
            eprintln!("# {}", config_path().display());
            output::print_output(text.trim_end(), global.quiet);
            Ok(())
        }

        // ── Profiles: one name per line, default marked ─────────────
        ConfigCommand::Profiles => {
            let cfg = load_config_or_default();
            let mut names: Vec<&String> = cfg.profiles.keys().collect();
            names.sort();
            let default = cfg.default_profile.as_deref();
            for name in names {
                let marker = if Some(name.as_str()) == default {
                    " (default)"
                } else {
                    ""
                };
                output::print_output(&format!("{name}{marker}"), global.quiet);
            }
            Ok(())
        }

        // ── Use: set the default profile ────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            save_config(&cfg)?;
            eprintln!("Default profile set to '{name}'");
            Ok(())
        }
    }
}

fn available_profiles(cfg: &Config) -> String {
    let mut names: Vec<&str> = cfg.profiles.keys().map(String::as_str).collect();
    names.sort_unstable();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}
