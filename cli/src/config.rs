use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tilepop_core::GameConfig;

/// Reads a TOML game config, missing fields fall back to the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read config file {}", path.display()))?;
    let config = parse_config(&text)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    log::debug!("Loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

fn parse_config(text: &str) -> Result<GameConfig> {
    let config: GameConfig = toml::from_str(text)?;
    let sanitized = config.sanitized();
    if sanitized != config {
        log::warn!("Config values out of range, using {:?}", sanitized);
    }
    Ok(sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse_config("").unwrap(), GameConfig::default());
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let config = parse_config("size = [6, 10]\nmax_moves = 25\n").unwrap();

        assert_eq!(config.size, (6, 10));
        assert_eq!(config.max_moves, 25);
        assert_eq!(config.kinds, 5);
        assert_eq!(config.target_score, 500);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = parse_config("kinds = 1\nmax_moves = 0\n").unwrap();

        assert_eq!(config.kinds, tilepop_core::MIN_KINDS);
        assert_eq!(config.max_moves, 1);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(parse_config("size = \"big\"").is_err());
    }

    #[test]
    fn missing_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), GameConfig::default());
    }
}
