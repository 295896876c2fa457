use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::{get_config_dir, get_config_path, Config};
use crate::scoring::ScoringConfig;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

fn prompt_threshold(message: &str, default: u32) -> Result<u32> {
    loop {
        let input = prompt_with_default(message, &default.to_string())?;
        match input.parse::<u32>() {
            Ok(v) if v <= 100 => return Ok(v),
            _ => println!("  Invalid: must be a number between 0 and 100. Try again."),
        }
    }
}

/// Write a starter config file carrying the full default scoring tables so
/// deployments have every tunable point value in front of them.
///
/// If `path` is Some, writes there; otherwise uses the default config path.
pub fn run_init(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(get_config_path);

    println!("leadrank configuration");
    println!("======================");
    println!();

    if config_path.exists()
        && !prompt_yes_no(
            &format!("{} already exists. Overwrite?", config_path.display()),
            false,
        )?
    {
        println!("Keeping existing config.");
        return Ok(());
    }

    let mut scoring = ScoringConfig::default();

    println!();
    println!("Tier thresholds on the normalized 0-100 score.");
    scoring.tiers.hot = prompt_threshold("Hot threshold (normalized score >= this is Hot)", 80)?;
    let warm_default = scoring.tiers.warm.min(scoring.tiers.hot);
    loop {
        let warm = prompt_threshold(
            "Warm threshold (normalized score >= this is Warm)",
            warm_default,
        )?;
        if warm <= scoring.tiers.hot {
            scoring.tiers.warm = warm;
            break;
        }
        println!("  Invalid: must not exceed the hot threshold. Try again.");
    }

    println!();
    let leads = prompt_with_default("Default leads file", "leads.json")?;

    let config = Config {
        scoring: Some(scoring),
        leads: Some(leads),
    };

    let config_dir = get_config_dir();
    if config_path.parent() == Some(config_dir.as_path()) && !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).with_context(|| {
            format!("Failed to create config directory at {}", config_dir.display())
        })?;
    }

    let yaml = serde_saphyr::to_string(&config).context("Failed to serialize config")?;
    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open config file at {}", config_path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config file at {}", config_path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to commit config file at {}", config_path.display()))?;

    println!();
    println!("Wrote {}", config_path.display());
    println!("Edit the scoring tables there to tune point values per deployment.");
    Ok(())
}
