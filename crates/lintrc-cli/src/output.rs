//! Output formatting
//!
//! Human output is colored (and falls back to plain text when colors are
//! disabled); JSON and YAML serialize `EffectiveConfig` directly.

use anyhow::Context;
use colored::*;
use lintrc_core::{EffectiveConfig, LintrcError, Profile, RuleIssue, RuleSetting, Severity};
use std::fmt::Write as _;
use std::path::Path;

use crate::OutputFormat;

/// Print resolved configurations in the requested format
///
/// A single configuration is emitted as an object, several as a list.
pub fn print_configs(configs: &[EffectiveConfig], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => {
            for (i, config) in configs.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!("{}", render_human(config));
            }
        }
        OutputFormat::Json => {
            let text = match configs {
                [single] => serde_json::to_string_pretty(single),
                many => serde_json::to_string_pretty(many),
            }
            .context("Failed to serialize configuration as JSON")?;
            println!("{text}");
        }
        OutputFormat::Yaml => {
            let text = match configs {
                [single] => serde_yaml::to_string(single),
                many => serde_yaml::to_string(many),
            }
            .context("Failed to serialize configuration as YAML")?;
            print!("{text}");
        }
    }
    Ok(())
}

/// Render one configuration for the terminal
pub fn render_human(config: &EffectiveConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        config.file.display().to_string().bold(),
        format!("({})", config.profile).dimmed()
    );
    let _ = writeln!(out, "  {:<10} {}", "chain:".cyan(), config.chain.join(" → "));

    if !config.applied_overrides.is_empty() {
        let _ = writeln!(
            out,
            "  {:<10} {}",
            "overrides:".cyan(),
            config.applied_overrides.join(", ")
        );
    }
    if let Some(parser) = &config.parser {
        let _ = writeln!(out, "  {:<10} {}", "parser:".cyan(), parser);
    }
    if !config.plugins.is_empty() {
        let _ = writeln!(out, "  {:<10} {}", "plugins:".cyan(), config.plugins.join(", "));
    }
    if !config.env.is_empty() {
        let env: Vec<String> = config
            .env
            .iter()
            .map(|(flag, enabled)| if *enabled { flag.clone() } else { format!("!{flag}") })
            .collect();
        let _ = writeln!(out, "  {:<10} {}", "env:".cyan(), env.join(", "));
    }
    if !config.globals.is_empty() {
        let globals: Vec<String> = config
            .globals
            .iter()
            .map(|(name, access)| format!("{name}={}", access.as_str()))
            .collect();
        let _ = writeln!(out, "  {:<10} {}", "globals:".cyan(), globals.join(", "));
    }

    let _ = writeln!(out, "  {} ({})", "rules:".cyan(), config.rules.len());
    for (name, setting) in &config.rules {
        let _ = writeln!(
            out,
            "    {} {}{}",
            severity_label(setting.severity()),
            name,
            options_suffix(setting)
        );
    }
    out
}

fn severity_label(severity: Severity) -> ColoredString {
    let label = format!("{:<5}", severity.as_str());
    match severity {
        Severity::Error => label.red().bold(),
        Severity::Warn => label.yellow(),
        Severity::Off => label.dimmed(),
    }
}

fn options_suffix(setting: &RuleSetting) -> String {
    if setting.options().is_empty() {
        return String::new();
    }
    match serde_json::to_string(setting.options()) {
        Ok(json) => format!(" {}", json.dimmed()),
        Err(_) => String::new(),
    }
}

/// Report a per-path resolution failure on stderr
pub fn print_failure(path: &Path, error: &LintrcError) {
    eprintln!("{} {}: {}", "error:".red().bold(), path.display(), error);
}

/// Print an extension chain in merge order
pub fn print_chain(chain: &[&Profile]) {
    for (i, profile) in chain.iter().enumerate() {
        let overrides = match profile.overrides.len() {
            0 => String::new(),
            n => format!(", {n} overrides"),
        };
        println!(
            "{:>3}. {} {}",
            i + 1,
            profile.id.bold(),
            format!("({} rules{})", profile.layer.rules.len(), overrides).dimmed()
        );
    }
}

/// List registered profiles with what they extend
pub fn print_profiles<'a>(profiles: impl Iterator<Item = &'a Profile>) {
    for profile in profiles {
        let mut line = profile.id.bold().to_string();
        if profile.root {
            let _ = write!(line, " {}", "[root]".yellow());
        }
        if !profile.extends().is_empty() {
            let _ = write!(line, " {} {}", "extends".dimmed(), profile.extends().join(", "));
        }
        println!("{line}");
    }
}

/// Print validation issues for one target
pub fn print_issues(path: &Path, issues: &[RuleIssue]) {
    if issues.is_empty() {
        println!("{} {}", "✓".green(), path.display());
        return;
    }
    println!("{} {} ({} issues)", "✗".red(), path.display(), issues.len());
    for issue in issues {
        println!("    {issue}");
    }
}

/// Confirm a valid profile file
pub fn print_valid(path: &Path, profile: &Profile) {
    println!(
        "{} Configuration is valid: {}",
        "✓".green(),
        path.display()
    );
    println!(
        "  id: {}, rules: {}, overrides: {}",
        profile.id,
        profile.layer.rules.len(),
        profile.overrides.len()
    );
}
