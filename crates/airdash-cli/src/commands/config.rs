//! Config command implementation.

use anyhow::{Result, bail};

use crate::cli::{ConfigAction, ConfigKey};
use crate::config::Config;

pub fn cmd_config(action: ConfigAction, quiet: bool) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load();
            let content = toml::to_string_pretty(&config)?;
            print!("{}", content);
        }

        ConfigAction::Get { key } => {
            let config = Config::load();
            let value = match key {
                ConfigKey::Url => config.url.unwrap_or_default(),
                ConfigKey::Format => config.format.unwrap_or_default(),
                ConfigKey::Timeout => config
                    .timeout
                    .map(|t| t.to_string())
                    .unwrap_or_default(),
                ConfigKey::NoColor => config.no_color.to_string(),
                ConfigKey::Email => config.email.unwrap_or_default(),
                // Never echo the token itself.
                ConfigKey::Token => {
                    let state = if config.token.is_some() { "set" } else { "unset" };
                    state.to_string()
                }
            };
            println!("{}", value);
        }

        ConfigAction::Set { key, value } => {
            let mut config = Config::load();
            match key {
                ConfigKey::Url => {
                    if !value.starts_with("http://") && !value.starts_with("https://") {
                        bail!("URL must start with http:// or https://");
                    }
                    config.url = Some(value);
                }
                ConfigKey::Format => {
                    if !matches!(value.as_str(), "text" | "json" | "csv") {
                        bail!("Invalid format '{}'. Use: text, json, csv", value);
                    }
                    config.format = Some(value);
                }
                ConfigKey::Timeout => {
                    let timeout: u64 = value
                        .parse()
                        .map_err(|_| anyhow::anyhow!("'{}' is not a valid number", value))?;
                    config.timeout = Some(timeout);
                }
                ConfigKey::NoColor => {
                    config.no_color = parse_bool(&value)?;
                }
                ConfigKey::Email => config.email = Some(value),
                ConfigKey::Token => config.token = Some(value),
            }
            config.save()?;
            if !quiet {
                eprintln!("Configuration saved.");
            }
        }

        ConfigAction::Unset { key } => {
            let mut config = Config::load();
            match key {
                ConfigKey::Url => config.url = None,
                ConfigKey::Format => config.format = None,
                ConfigKey::Timeout => config.timeout = None,
                ConfigKey::NoColor => config.no_color = false,
                ConfigKey::Email => config.email = None,
                ConfigKey::Token => config.token = None,
            }
            config.save()?;
            if !quiet {
                eprintln!("Configuration saved.");
            }
        }

        ConfigAction::Path => {
            println!("{}", Config::path().display());
        }

        ConfigAction::Init => {
            let path = Config::path();
            if path.exists() {
                bail!("Configuration already exists at {}", path.display());
            }
            Config::default().save()?;
            if !quiet {
                eprintln!("Created {}", path.display());
            }
        }
    }

    Ok(())
}

/// Parse boolean argument with flexible input
fn parse_bool(s: &str) -> Result<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => bail!("Invalid boolean value '{}'. Use: true/false, yes/no, on/off, 1/0", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }
}
