//! Prompt templates for Reelsmith.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{\{(\w+)\}\}").expect("valid placeholder pattern"))
}

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    /// Prompts for narration script generation.
    pub script: ScriptPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Prompts for narration script generation.
///
/// The user template receives `{{topic}}` and `{{duration}}` (seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptPrompts {
    /// Optional system message. Empty means none is sent.
    pub system: String,
    pub user: String,
}

impl Default for ScriptPrompts {
    fn default() -> Self {
        Self {
            system: String::new(),
            user: "Write a {{duration}}-second script about: {{topic}}".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let script_path = custom_path.join("script.toml");
            if script_path.exists() {
                let content = std::fs::read_to_string(&script_path)?;
                prompts.script = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are substituted in a single pass, so placeholder text
    /// inside a substituted value is kept literally. Unknown placeholders are
    /// left untouched.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        placeholder_regex()
            .replace_all(template, |caps: &Captures| match vars.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
