//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use tracing::info;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
    }
}

/// Write a default configuration file
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = args.path.unwrap_or_else(Config::default_project_path);

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    info!(path = %path.display(), "config file written");
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to customize output, logging and validation settings.")?;

    Ok(())
}

/// Print the effective configuration
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = match args.format {
        ConfigFormat::Toml => config.to_toml()?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };

    output.writeln(content.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ModeArg, OutputFormat};
    use crate::output::test_support::capture;
    use std::fs;
    use tempfile::TempDir;

    fn show(format: ConfigFormat, config: &Config) -> String {
        let (mut output, buffer) = capture(OutputFormat::Human, false);
        handle_config(
            ConfigArgs {
                action: ConfigAction::Show(ConfigShowArgs { format }),
            },
            config,
            &mut output,
        )
        .unwrap();
        buffer.contents()
    }

    fn init(path: &std::path::Path, force: bool) -> String {
        let (mut output, buffer) = capture(OutputFormat::Human, false);
        handle_config(
            ConfigArgs {
                action: ConfigAction::Init(ConfigInitArgs {
                    path: Some(path.to_path_buf()),
                    force,
                }),
            },
            &Config::default(),
            &mut output,
        )
        .unwrap();
        buffer.contents()
    }

    #[test]
    fn test_show_formats() {
        let mut config = Config::default();
        config.validation.mode = ModeArg::Basic;
        config.validation.max_errors = 5;

        let toml = show(ConfigFormat::Toml, &config);
        assert!(toml.contains("[validation]"));
        assert!(toml.contains("mode = \"basic\""));

        let json: serde_json::Value = serde_json::from_str(&show(ConfigFormat::Json, &config)).unwrap();
        assert_eq!(json["validation"]["max_errors"], 5);
        assert_eq!(json["output"]["format"], "human");

        let yaml = show(ConfigFormat::Yaml, &config);
        assert!(yaml.contains("mode: basic"));
    }

    #[test]
    fn test_init_writes_loadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(".techform.toml");

        let text = init(&path, false);
        assert!(text.contains("Created config at"));
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_keeps_existing_file_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("techform.yaml");
        fs::write(&path, "validation:\n  mode: basic\n").unwrap();

        let text = init(&path, false);
        assert!(text.contains("WARNING: Config already exists"));
        assert_eq!(Config::from_file(&path).unwrap().validation.mode, ModeArg::Basic);

        init(&path, true);
        assert_eq!(Config::from_file(&path).unwrap().validation.mode, ModeArg::Strict);
    }
}
