use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::{get_config_path, validate_config, ApiConfig, Config};
use crate::prompt::{prompt_with_default, prompt_yes_no};

/// Serialize `config` and write it to `path`, creating parent directories.
pub fn write_config(path: &PathBuf, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, &yaml)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Run the init wizard to create a config file.
///
/// With `accept_defaults` no questions are asked and the built-in defaults
/// are written. An existing file is only replaced after confirmation, or
/// when `force` is set.
pub fn run_init_wizard(path: Option<PathBuf>, accept_defaults: bool, force: bool) -> Result<()> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    let config = if accept_defaults {
        Config::default()
    } else {
        println!("Credit Score Configuration");
        println!("==========================");
        println!();
        println!("The prediction API serves /predict, /health, /metrics and friends.");
        let defaults = Config::default();

        let config = loop {
            let base_url = prompt_with_default("Prediction API base URL", &defaults.api.base_url)?;
            let timeout = prompt_with_default("Request timeout", &defaults.api.timeout)?;
            let auth_delay =
                prompt_with_default("Simulated login delay", &defaults.auth_delay)?;

            let candidate = Config {
                api: ApiConfig { base_url, timeout },
                auth_delay,
                state_path: None,
            };
            match validate_config(&candidate) {
                Ok(()) => break candidate,
                Err(errors) => {
                    for error in errors {
                        println!("  Invalid: {}", error);
                    }
                    println!("Try again.");
                }
            }
        };
        config
    };

    if config_path.exists() && !force {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    write_config(&config_path, &config)?;
    println!("Config written to {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::env;

    #[test]
    fn test_write_config_roundtrip() {
        let dir = env::temp_dir().join("credit_score_test_init");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.yaml");

        let config = Config {
            auth_delay: "250ms".to_string(),
            ..Config::default()
        };
        write_config(&path, &config).unwrap();

        let loaded = load_config(Some(path)).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_init_with_defaults_and_force() {
        let path = env::temp_dir().join("credit_score_test_init_force.yaml");
        std::fs::write(&path, "auth_delay: 9s\n").unwrap();

        run_init_wizard(Some(path.clone()), true, true).unwrap();

        let loaded = load_config(Some(path.clone())).unwrap();
        assert_eq!(loaded, Config::default());

        let _ = std::fs::remove_file(&path);
    }
}
