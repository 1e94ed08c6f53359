//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::Result;
use std::path::PathBuf;

/// Run the config command.
///
/// `config_path` is the file given with `--config`, if any.
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: Option<PathBuf>) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Settings::default_config_path);

    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Edit => {
            // Create default config if it doesn't exist
            if !config_path.exists() {
                settings.save_to(&config_path)?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(&config_path)
                .status();

            match status {
                Ok(s) if s.success() => {
                    Output::success("Config saved.");
                }
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}
