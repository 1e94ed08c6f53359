//! Doctor command - verify system requirements and configuration.

use crate::cli::Output;
use crate::config::{Settings, SpeechProvider};
use console::style;
use std::path::PathBuf;
use std::process::Command;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub fn run_doctor(settings: &Settings, config_path: Option<&PathBuf>) -> anyhow::Result<()> {
    Output::header("Reelsmith Doctor");
    println!();
    println!("Checking system requirements and configuration...\n");

    let mut sections: Vec<(&str, Vec<CheckResult>)> = Vec::new();

    let mut tools = vec![check_tool(
        &settings.video.ffmpeg_binary,
        "-version",
        install_hint_ffmpeg(),
    )];
    if settings.speech.provider == SpeechProvider::Piper {
        tools.push(check_tool(
            &settings.speech.piper_binary,
            "--version",
            "Install from: https://github.com/rhasspy/piper",
        ));
        tools.push(check_piper_model(settings));
    }
    sections.push(("External Tools", tools));

    sections.push((
        "API Configuration",
        vec![
            check_key(
                "OPENAI_API_KEY",
                settings.openai_api_key(),
                "Set with: export OPENAI_API_KEY='sk-...' or add it to .env",
            ),
            check_key(
                "PEXELS_KEY",
                settings.pexels_api_key(),
                "Get a key at https://www.pexels.com/api/ and export PEXELS_KEY='...'",
            ),
        ],
    ));

    sections.push(("Inputs & Outputs", check_paths(settings)));
    sections.push(("Configuration", vec![check_config_file(config_path)]));

    for (title, checks) in &sections {
        println!("{}", style(title).bold());
        for check in checks {
            check.print();
        }
        println!();
    }

    let checks: Vec<&CheckResult> = sections.iter().flat_map(|(_, c)| c).collect();
    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before running Reelsmith.",
            errors
        ));
        anyhow::bail!("{} doctor check(s) failed", errors);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Reelsmith is ready to use.");
    }

    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str, version_arg: &str, hint: &str) -> CheckResult {
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .unwrap_or("installed")
                .trim()
                .to_string();

            CheckResult::ok(name, &truncate(&version, 50))
        }
        Ok(_) => CheckResult::error(name, "installed but not working", hint),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            CheckResult::error(name, "not found", hint)
        }
        Err(e) => CheckResult::error(name, &format!("error: {}", e), hint),
    }
}

fn check_piper_model(settings: &Settings) -> CheckResult {
    match settings.speech.piper_model.as_deref() {
        Some(model) => {
            let path = Settings::expand_path(model);
            if path.is_file() {
                CheckResult::ok("Piper voice", &path.display().to_string())
            } else {
                CheckResult::error(
                    "Piper voice",
                    &format!("{} not found", path.display()),
                    "Download a voice (.onnx + .onnx.json) and set speech.piper_model",
                )
            }
        }
        None => CheckResult::error(
            "Piper voice",
            "not configured",
            "Set speech.piper_model in the config file",
        ),
    }
}

/// Check that an API key is present, showing it masked.
fn check_key(name: &str, value: Option<String>, hint: &str) -> CheckResult {
    match value {
        Some(key) => CheckResult::ok(name, &format!("configured ({})", mask_key(&key))),
        None => CheckResult::error(name, "not set", hint),
    }
}

/// Check the topics file and output directory.
fn check_paths(settings: &Settings) -> Vec<CheckResult> {
    let mut results = Vec::new();

    let topics_file = settings.topics_file();
    match crate::topics::read_topics(&topics_file) {
        Ok(topics) if topics.is_empty() => results.push(CheckResult::warning(
            "Topics file",
            &format!("{} (no topics)", topics_file.display()),
            "Add one topic per line",
        )),
        Ok(topics) => results.push(CheckResult::ok(
            "Topics file",
            &format!("{} ({} topics)", topics_file.display(), topics.len()),
        )),
        Err(e) => results.push(CheckResult::error(
            "Topics file",
            &e.to_string(),
            "Create it with one topic per line, or pass --topics",
        )),
    }

    let output_dir = settings.output_dir();
    if output_dir.exists() {
        results.push(CheckResult::ok(
            "Output directory",
            &output_dir.display().to_string(),
        ));
    } else {
        results.push(CheckResult::warning(
            "Output directory",
            &format!("{} (will be created)", output_dir.display()),
            "Directory will be created on first run",
        ));
    }

    results
}

/// Check if config file exists.
fn check_config_file(explicit: Option<&PathBuf>) -> CheckResult {
    let config_path = explicit
        .cloned()
        .unwrap_or_else(Settings::default_config_path);
    if config_path.exists() {
        CheckResult::ok("Config file", &config_path.display().to_string())
    } else if explicit.is_some() {
        CheckResult::warning(
            "Config file",
            &format!("{} not found, using defaults", config_path.display()),
            "Check the path passed with -c/--config",
        )
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: reelsmith config edit",
        )
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Platform-specific install hint for ffmpeg.
fn install_hint_ffmpeg() -> &'static str {
    if cfg!(target_os = "macos") {
        "Install with: brew install ffmpeg"
    } else if cfg!(target_os = "linux") {
        "Install with: sudo apt install ffmpeg (or your package manager)"
    } else {
        "Install from: https://ffmpeg.org/download.html"
    }
}
