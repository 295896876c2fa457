use serde::{Deserialize, Serialize};

use crate::scoring::ScoringConfig;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Scoring overrides; omitted sections fall back to the stock weighting
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,

    /// Default leads file path, overridable with --leads
    #[serde(default)]
    pub leads: Option<String>,
}

impl Config {
    pub fn effective_scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.scoring.is_none());
        assert!(config.leads.is_none());
        assert_eq!(config.effective_scoring(), ScoringConfig::default());
    }

    #[test]
    fn test_config_with_overrides() {
        let yaml = r#"
leads: "pipeline/leads.json"
scoring:
  tiers:
    hot: 85
    warm: 55
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.leads.as_deref(), Some("pipeline/leads.json"));
        let scoring = config.effective_scoring();
        assert_eq!(scoring.tiers.hot, 85);
        assert_eq!(scoring.tiers.warm, 55);
    }
}
