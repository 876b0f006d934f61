use anyhow::Result;
use common::{Config, ConfigLoader};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BookOptions {
    pub solve_depth: usize,
    pub deviation_penalty: i32,
    pub max_expansions: usize,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            solve_depth: 12,
            deviation_penalty: 0,
            max_expansions: 100,
        }
    }
}

impl Config for BookOptions {
    fn load(config: &ConfigLoader) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            solve_depth: config
                .get("solve_depth")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.solve_depth),
            deviation_penalty: config
                .get("deviation_penalty")
                .and_then(|v| v.as_i32())
                .unwrap_or(defaults.deviation_penalty),
            max_expansions: config
                .get("max_expansions")
                .and_then(|v| v.as_usize())
                .unwrap_or(defaults.max_expansions),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let config = ConfigLoader::load_str("{}", "book".to_string()).unwrap();
        let options: BookOptions = config.load().unwrap();

        assert_eq!(options, BookOptions::default());
    }

    #[test]
    fn test_scoped_values() {
        let config = ConfigLoader::load_str(
            "deviation_penalty = 25\nbook { max_expansions = 7 }",
            "book".to_string(),
        )
        .unwrap();
        let options: BookOptions = config.load().unwrap();

        assert_eq!(options.deviation_penalty, 25);
        assert_eq!(options.max_expansions, 7);
    }
}
