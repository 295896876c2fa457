use serde::{Deserialize, Serialize};

/// Main scoring configuration.
///
/// Defines how lead propensity scores are calculated. Every rule table is
/// plain data so point values can be tuned per deployment without touching
/// the engine. The default carries the stock biotech weighting.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   tiers:
///     hot: 80
///     warm: 50
///   role_fit:
///     cap: 30
///     keywords:
///       - { terms: ["toxicology", "toxicologist"], points: 30 }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub role_fit: RoleFitConfig,

    #[serde(default)]
    pub company_intent: CompanyIntentConfig,

    #[serde(default)]
    pub technographic: TechnographicConfig,

    #[serde(default)]
    pub location: LocationConfig,

    #[serde(default)]
    pub scientific_intent: ScientificIntentConfig,

    #[serde(default)]
    pub tiers: TierThresholds,
}

impl ScoringConfig {
    /// Normalization denominator: the sum of all category caps.
    ///
    /// Computed rather than hard-coded so that overriding a cap can never
    /// silently skew normalized scores.
    pub fn max_raw_score(&self) -> u32 {
        self.role_fit.cap
            + self.company_intent.cap
            + self.technographic.cap
            + self.location.cap
            + self.scientific_intent.cap
    }
}

/// One keyword rule: a group of interchangeable phrases worth `points`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KeywordRule {
    /// Phrases matched case-insensitively as substrings
    pub terms: Vec<String>,

    /// Points awarded when any phrase matches
    pub points: u32,
}

impl KeywordRule {
    fn new(terms: &[&str], points: u32) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            points,
        }
    }
}

/// Role fit: job-title keywords plus a seniority bonus.
///
/// The highest-value matching keyword wins (never summed), and only the
/// first matching seniority rule applies.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RoleFitConfig {
    pub cap: u32,

    /// Topic keywords: the single highest-value hit counts
    pub keywords: Vec<KeywordRule>,

    /// Seniority rules in priority order: first match wins
    pub seniority: Vec<KeywordRule>,
}

impl Default for RoleFitConfig {
    fn default() -> Self {
        Self {
            cap: 30,
            keywords: vec![
                KeywordRule::new(&["toxicology", "toxicologist"], 30),
                KeywordRule::new(&["safety"], 30),
                KeywordRule::new(&["3d"], 30),
                KeywordRule::new(&["in vitro", "in-vitro"], 30),
                KeywordRule::new(&["hepatic"], 25),
                KeywordRule::new(&["liver"], 25),
            ],
            seniority: vec![
                KeywordRule::new(&["director", "head", "vp", "vice president", "chief"], 20),
                KeywordRule::new(&["principal"], 16),
                KeywordRule::new(&["scientist"], 10),
            ],
        }
    }
}

/// Company intent: funding stage base points plus an NIH grant bonus.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompanyIntentConfig {
    pub cap: u32,
    pub series_ab_recent: u32,
    pub series_ab_older: u32,
    pub series_c_plus: u32,
    pub bootstrapped: u32,
    pub nih_grant: u32,
}

impl Default for CompanyIntentConfig {
    fn default() -> Self {
        Self {
            cap: 20,
            series_ab_recent: 20,
            series_ab_older: 10,
            series_c_plus: 15,
            bootstrapped: 5,
            nih_grant: 15,
        }
    }
}

/// Technographic: signal categories plus a company-name bonus.
///
/// Each category contributes at most once; categories are additive across
/// one another.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TechnographicConfig {
    pub cap: u32,

    /// Independent signal categories, each scored at most once
    pub categories: Vec<KeywordRule>,

    /// Company-name terms that earn `company_bonus`
    pub company_terms: Vec<String>,
    pub company_bonus: u32,
}

impl Default for TechnographicConfig {
    fn default() -> Self {
        Self {
            cap: 25,
            categories: vec![
                KeywordRule::new(&["3d models", "3d cell culture"], 15),
                KeywordRule::new(&["nams", "alternative methods"], 10),
                KeywordRule::new(&["liver disease", "hepatology"], 15),
                KeywordRule::new(&["in vitro models"], 20),
            ],
            company_terms: ["liver", "hepat", "organ", "organoid", "biotech"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            company_bonus: 5,
        }
    }
}

/// Location: a fixed hub table with first-match-wins lookup.
///
/// Non-matching locations get `default_points` (a floor, not zero).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LocationConfig {
    pub cap: u32,
    pub hubs: Vec<KeywordRule>,
    pub default_points: u32,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            cap: 10,
            hubs: vec![
                KeywordRule::new(&["boston", "cambridge, ma"], 10),
                KeywordRule::new(&["san francisco", "sf", "bay area", "palo alto"], 10),
                KeywordRule::new(&["basel"], 10),
                KeywordRule::new(&["cambridge, uk", "oxford"], 10),
                KeywordRule::new(&["san diego"], 8),
            ],
            default_points: 3,
        }
    }
}

/// Scientific intent: publication recency windows plus a conference bonus.
///
/// The single strongest publication determines the publication component.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScientificIntentConfig {
    pub cap: u32,

    /// DILI topic phrases
    pub dili_terms: Vec<String>,

    /// Months back a DILI paper counts as recent
    pub dili_recent_months: u32,
    pub dili_recent_points: u32,

    /// Months back a DILI paper still counts, at reduced value
    pub dili_older_months: u32,
    pub dili_older_points: u32,

    /// 3D cell culture topic phrases
    pub culture_terms: Vec<String>,
    pub culture_months: u32,
    pub culture_points: u32,

    pub conference_bonus: u32,
}

impl Default for ScientificIntentConfig {
    fn default() -> Self {
        Self {
            cap: 40,
            dili_terms: [
                "dili",
                "drug-induced liver injury",
                "hepatotoxicity",
                "liver injury",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            dili_recent_months: 12,
            dili_recent_points: 40,
            dili_older_months: 24,
            dili_older_points: 25,
            culture_terms: ["3d", "spheroid", "organoid", "organ-on-chip"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            culture_months: 24,
            culture_points: 30,
            conference_bonus: 35,
        }
    }
}

/// Tier thresholds on the normalized 0-100 score, inclusive on the lower edge.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TierThresholds {
    /// normalized >= hot -> Hot
    pub hot: u32,

    /// normalized >= warm (and < hot) -> Warm
    pub warm: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self { hot: 80, warm: 50 }
    }
}
