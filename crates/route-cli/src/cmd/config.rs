use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use route_core::config::{Config, WarnLevel};
use route_core::paths;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the effective configuration (defaults applied)
    Show,
    /// Check the configuration for errors and suspicious values
    Validate,
    /// Write .beads/routing.yaml with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Validate => validate(root, json),
        ConfigSubcommand::Init { force } => init(root, force, json),
    }
}

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    if json {
        return print_json(&config);
    }
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();
    let has_errors = config.has_errors();

    if json {
        print_json(&serde_json::json!({
            "valid": !has_errors,
            "warnings": warnings,
        }))?;
    } else if warnings.is_empty() {
        println!("Config OK");
    } else {
        let rows = warnings
            .iter()
            .map(|w| {
                let level = match w.level {
                    WarnLevel::Warning => "warning",
                    WarnLevel::Error => "error",
                };
                vec![level.to_string(), w.message.clone()]
            })
            .collect();
        print_table(&["LEVEL", "MESSAGE"], &[], rows);
    }

    if has_errors {
        anyhow::bail!("config has errors");
    }
    Ok(())
}

fn init(root: &Path, force: bool, json: bool) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Config::default()
        .save(root)
        .with_context(|| format!("failed to write {}", path.display()))?;

    if json {
        print_json(&serde_json::json!({ "path": path.display().to_string(), "written": true }))?;
    } else {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
