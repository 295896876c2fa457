use serde::Serialize;
use std::fmt;

use super::config::{
    CompanyIntentConfig, LocationConfig, RoleFitConfig, ScientificIntentConfig, ScoringConfig,
    TechnographicConfig, TierThresholds,
};
use crate::leads::types::{Company, FundingStage, LeadRecord, Publication};

/// Lead classification derived from the normalized score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tier {
    Hot,
    Warm,
    Cold,
}

impl Tier {
    /// Thresholds are inclusive on the lower edge: 80 is Hot, 50 is Warm.
    pub fn from_normalized(normalized: u32, tiers: &TierThresholds) -> Self {
        if normalized >= tiers.hot {
            Tier::Hot
        } else if normalized >= tiers.warm {
            Tier::Warm
        } else {
            Tier::Cold
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Hot => write!(f, "Hot"),
            Tier::Warm => write!(f, "Warm"),
            Tier::Cold => write!(f, "Cold"),
        }
    }
}

/// Full scoring outcome for one lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub role_fit: u32,
    pub company_intent: u32,
    pub technographic: u32,
    pub location_hub: u32,
    pub scientific_intent: u32,

    /// Sum of the five capped sub-scores, 0..=125 with default caps
    pub raw_score: u32,

    /// raw_score rescaled to 0..=100 against the sum of caps
    pub normalized_score: u32,

    pub tier: Tier,
}

/// Score a lead. Pure and total: every structurally valid `LeadRecord`
/// produces a result, and identical input always yields identical output.
pub fn score(lead: &LeadRecord, config: &ScoringConfig) -> ScoreResult {
    let role_fit = role_fit_score(&lead.title, &config.role_fit);
    let company_intent = company_intent_score(&lead.company, &config.company_intent);
    let technographic =
        technographic_score(&lead.technographics, &lead.company.name, &config.technographic);
    let location_hub = location_score(&lead.location, &config.location);
    let scientific_intent = scientific_intent_score(
        &lead.publications,
        lead.conference_presenter,
        &config.scientific_intent,
    );

    let raw_score = role_fit + company_intent + technographic + location_hub + scientific_intent;
    let normalized_score = normalize(raw_score, config.max_raw_score());
    let tier = Tier::from_normalized(normalized_score, &config.tiers);

    ScoreResult {
        role_fit,
        company_intent,
        technographic,
        location_hub,
        scientific_intent,
        raw_score,
        normalized_score,
        tier,
    }
}

/// Rescale a raw score to 0..=100, rounding half away from zero.
pub fn normalize(raw: u32, max_raw: u32) -> u32 {
    if max_raw == 0 {
        return 0;
    }
    let scaled = (raw as f64 * 100.0 / max_raw as f64).round() as u32;
    scaled.min(100)
}

/// True when `text` (already lowercased) contains any of the phrases.
fn contains_any(text: &str, terms: &[String]) -> bool {
    terms.iter().any(|t| text.contains(&t.to_lowercase()))
}

/// Role fit, capped. Highest matching keyword wins; the seniority bonus is
/// the first matching rule only. Matches are never summed within a table.
fn role_fit_score(title: &str, config: &RoleFitConfig) -> u32 {
    if title.is_empty() {
        return 0;
    }
    let title = title.to_lowercase();

    let keyword_points = config
        .keywords
        .iter()
        .filter(|rule| contains_any(&title, &rule.terms))
        .map(|rule| rule.points)
        .max()
        .unwrap_or(0);

    let seniority_points = config
        .seniority
        .iter()
        .find(|rule| contains_any(&title, &rule.terms))
        .map(|rule| rule.points)
        .unwrap_or(0);

    (keyword_points + seniority_points).min(config.cap)
}

/// Company intent, capped: funding stage base plus NIH grant bonus.
fn company_intent_score(company: &Company, config: &CompanyIntentConfig) -> u32 {
    let base = match company.funding_stage {
        FundingStage::SeriesAbRecent => config.series_ab_recent,
        FundingStage::SeriesAbOlder => config.series_ab_older,
        FundingStage::SeriesCPlus => config.series_c_plus,
        FundingStage::Bootstrapped => config.bootstrapped,
        FundingStage::Unknown => 0,
    };
    let grant = if company.has_nih_grant {
        config.nih_grant
    } else {
        0
    };
    (base + grant).min(config.cap)
}

/// Technographic, capped. Each category contributes at most once even when
/// several of its phrases appear; categories add up across one another.
fn technographic_score(signals: &[String], company_name: &str, config: &TechnographicConfig) -> u32 {
    let signals: Vec<String> = signals.iter().map(|s| s.to_lowercase()).collect();

    let mut total = 0;
    for rule in &config.categories {
        if signals.iter().any(|s| contains_any(s, &rule.terms)) {
            total += rule.points;
        }
    }

    let company_name = company_name.to_lowercase();
    if contains_any(&company_name, &config.company_terms) {
        total += config.company_bonus;
    }

    total.min(config.cap)
}

/// Location hub: exactly one table lookup, first matching hub wins.
/// Non-matching locations floor at `default_points`, not zero.
fn location_score(location: &str, config: &LocationConfig) -> u32 {
    let location = location.to_lowercase();
    config
        .hubs
        .iter()
        .find(|hub| contains_any(&location, &hub.terms))
        .map(|hub| hub.points)
        .unwrap_or(config.default_points)
}

/// Scientific intent, capped: the single strongest publication plus the
/// conference bonus.
fn scientific_intent_score(
    publications: &[Publication],
    conference_presenter: bool,
    config: &ScientificIntentConfig,
) -> u32 {
    let publication_points = publications
        .iter()
        .map(|p| publication_points(p, config))
        .max()
        .unwrap_or(0);

    let conference = if conference_presenter {
        config.conference_bonus
    } else {
        0
    };

    (publication_points + conference).min(config.cap)
}

/// Classify one publication by topic and recency window.
fn publication_points(publication: &Publication, config: &ScientificIntentConfig) -> u32 {
    let topics: Vec<String> = publication
        .topic_keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect();
    let has_topic = |terms: &[String]| topics.iter().any(|t| contains_any(t, terms));
    let months = publication.months_since;

    if has_topic(&config.dili_terms) && months <= config.dili_recent_months {
        config.dili_recent_points
    } else if has_topic(&config.dili_terms) && months <= config.dili_older_months {
        config.dili_older_points
    } else if has_topic(&config.culture_terms) && months <= config.culture_months {
        config.culture_points
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(title: &str) -> LeadRecord {
        LeadRecord {
            name: "Test Lead".to_string(),
            title: title.to_string(),
            company: Company {
                name: String::new(),
                funding_stage: FundingStage::Unknown,
                has_nih_grant: false,
            },
            technographics: vec![],
            location: String::new(),
            publications: vec![],
            conference_presenter: false,
        }
    }

    fn publication(keywords: &[&str], months_since: u32) -> Publication {
        Publication {
            topic_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            months_since,
        }
    }

    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn test_scenario_hot_lead_maxes_every_category() {
        let mut lead = lead("Director of Toxicology");
        lead.company.name = "BioTech Innovations".to_string();
        lead.company.funding_stage = FundingStage::SeriesAbRecent;
        lead.company.has_nih_grant = true;
        lead.technographics = vec!["3D models".to_string(), "NAMs".to_string()];
        lead.location = "Boston, MA".to_string();
        lead.publications = vec![publication(&["DILI", "hepatic spheroids"], 3)];
        lead.conference_presenter = true;

        let result = score(&lead, &config());
        assert_eq!(result.role_fit, 30);
        assert_eq!(result.company_intent, 20);
        assert_eq!(result.technographic, 25);
        assert_eq!(result.location_hub, 10);
        assert_eq!(result.scientific_intent, 40);
        assert_eq!(result.raw_score, 125);
        assert_eq!(result.normalized_score, 100);
        assert_eq!(result.tier, Tier::Hot);
    }

    #[test]
    fn test_scenario_mid_lead_lands_cold() {
        let mut lead = lead("Research Scientist - In Vitro Models");
        lead.company.name = "Pharma Corp".to_string();
        lead.company.funding_stage = FundingStage::SeriesCPlus;
        lead.location = "San Diego, CA".to_string();
        lead.publications = vec![publication(&["drug metabolism"], 20)];

        let result = score(&lead, &config());
        assert_eq!(result.role_fit, 30); // "in vitro" 30 + "scientist" 10, capped
        assert_eq!(result.company_intent, 15);
        assert_eq!(result.technographic, 0);
        assert_eq!(result.location_hub, 8);
        assert_eq!(result.scientific_intent, 0);
        assert_eq!(result.raw_score, 53);
        assert_eq!(result.normalized_score, 42);
        assert_eq!(result.tier, Tier::Cold);
    }

    #[test]
    fn test_scenario_empty_lead_scores_location_floor_only() {
        let mut lead = lead("Postdoctoral Fellow");
        lead.location = "Other".to_string();

        let result = score(&lead, &config());
        assert_eq!(result.role_fit, 0);
        assert_eq!(result.company_intent, 0);
        assert_eq!(result.technographic, 0);
        assert_eq!(result.location_hub, 3);
        assert_eq!(result.scientific_intent, 0);
        assert_eq!(result.raw_score, 3);
        assert_eq!(result.normalized_score, 2);
        assert_eq!(result.tier, Tier::Cold);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let mut lead = lead("Head of Hepatic Research");
        lead.technographics = vec!["liver disease".to_string()];
        lead.publications = vec![publication(&["hepatotoxicity"], 18)];

        let cfg = config();
        assert_eq!(score(&lead, &cfg), score(&lead, &cfg));
    }

    #[test]
    fn test_role_fit_takes_max_keyword_not_sum() {
        // "liver" (25) and "toxicology" (30) both match; only 30 counts
        let result = score(&lead("Liver Toxicology Researcher"), &config());
        assert_eq!(result.role_fit, 30);
    }

    #[test]
    fn test_role_fit_single_seniority_bonus() {
        // "director" and "scientist" both present; only the first rule (20) applies
        let cfg = config();
        let with_both = role_fit_score("Director Scientist of Hepatic Biology", &cfg.role_fit);
        let with_director = role_fit_score("Director of Hepatic Biology", &cfg.role_fit);
        assert_eq!(with_both, with_director);
        assert_eq!(with_both, 30); // 25 + 20 clamped to the cap
    }

    #[test]
    fn test_role_fit_seniority_without_keyword() {
        let result = score(&lead("VP of Engineering"), &config());
        assert_eq!(result.role_fit, 20);
    }

    #[test]
    fn test_role_fit_case_insensitive() {
        assert_eq!(
            score(&lead("TOXICOLOGIST"), &config()).role_fit,
            score(&lead("toxicologist"), &config()).role_fit
        );
    }

    #[test]
    fn test_role_fit_empty_title_scores_zero() {
        assert_eq!(score(&lead(""), &config()).role_fit, 0);
    }

    #[test]
    fn test_company_intent_stage_table() {
        let cfg = config();
        let stage_score = |stage| {
            let company = Company {
                name: String::new(),
                funding_stage: stage,
                has_nih_grant: false,
            };
            company_intent_score(&company, &cfg.company_intent)
        };
        assert_eq!(stage_score(FundingStage::SeriesAbRecent), 20);
        assert_eq!(stage_score(FundingStage::SeriesAbOlder), 10);
        assert_eq!(stage_score(FundingStage::SeriesCPlus), 15);
        assert_eq!(stage_score(FundingStage::Bootstrapped), 5);
        assert_eq!(stage_score(FundingStage::Unknown), 0);
    }

    #[test]
    fn test_company_intent_nih_grant_clamps_at_cap() {
        let cfg = config();
        let company = Company {
            name: String::new(),
            funding_stage: FundingStage::SeriesCPlus,
            has_nih_grant: true,
        };
        // 15 + 15 clamps to 20
        assert_eq!(company_intent_score(&company, &cfg.company_intent), 20);
    }

    #[test]
    fn test_company_intent_grant_alone() {
        let cfg = config();
        let company = Company {
            name: String::new(),
            funding_stage: FundingStage::Unknown,
            has_nih_grant: true,
        };
        assert_eq!(company_intent_score(&company, &cfg.company_intent), 15);
    }

    #[test]
    fn test_technographic_category_counts_once() {
        let cfg = config();
        // Two phrases from the same category must not stack
        let single = technographic_score(&["3d models".to_string()], "", &cfg.technographic);
        let double = technographic_score(
            &["3d models".to_string(), "3d cell culture".to_string()],
            "",
            &cfg.technographic,
        );
        assert_eq!(single, 15);
        assert_eq!(single, double);
    }

    #[test]
    fn test_technographic_categories_add_across() {
        let cfg = config();
        let signals = vec!["3d models".to_string(), "alternative methods".to_string()];
        assert_eq!(technographic_score(&signals, "", &cfg.technographic), 25);
    }

    #[test]
    fn test_technographic_company_name_bonus() {
        let cfg = config();
        assert_eq!(
            technographic_score(&[], "Hepatica Organoids Inc", &cfg.technographic),
            5
        );
        assert_eq!(technographic_score(&[], "Acme Widgets", &cfg.technographic), 0);
    }

    #[test]
    fn test_technographic_clamps_at_cap() {
        let cfg = config();
        let signals = vec![
            "3d cell culture".to_string(),
            "nams".to_string(),
            "hepatology".to_string(),
            "in vitro models".to_string(),
        ];
        // 15 + 10 + 15 + 20 clamps to 25
        assert_eq!(technographic_score(&signals, "BioTech", &cfg.technographic), 25);
    }

    #[test]
    fn test_location_hub_table() {
        let cfg = config();
        assert_eq!(location_score("Boston, MA", &cfg.location), 10);
        assert_eq!(location_score("Cambridge, MA", &cfg.location), 10);
        assert_eq!(location_score("South San Francisco", &cfg.location), 10);
        assert_eq!(location_score("Basel, Switzerland", &cfg.location), 10);
        assert_eq!(location_score("Oxford", &cfg.location), 10);
        assert_eq!(location_score("San Diego, CA", &cfg.location), 8);
    }

    #[test]
    fn test_location_defaults_to_floor() {
        let cfg = config();
        assert_eq!(location_score("Berlin", &cfg.location), 3);
        assert_eq!(location_score("", &cfg.location), 3);
    }

    #[test]
    fn test_scientific_intent_recency_windows() {
        let cfg = config();
        let points = |keywords: &[&str], months| {
            publication_points(&publication(keywords, months), &cfg.scientific_intent)
        };
        assert_eq!(points(&["DILI"], 12), 40);
        assert_eq!(points(&["DILI"], 13), 25);
        assert_eq!(points(&["DILI"], 24), 25);
        assert_eq!(points(&["DILI"], 25), 0);
        assert_eq!(points(&["3D cell culture"], 24), 30);
        assert_eq!(points(&["3D cell culture"], 25), 0);
        assert_eq!(points(&["drug metabolism"], 1), 0);
    }

    #[test]
    fn test_scientific_intent_strongest_publication_wins() {
        let cfg = config();
        let pubs = vec![
            publication(&["organoid"], 6),  // 30
            publication(&["DILI"], 20),     // 25
            publication(&["DILI"], 3),      // 40
        ];
        assert_eq!(scientific_intent_score(&pubs, false, &cfg.scientific_intent), 40);
    }

    #[test]
    fn test_scientific_intent_conference_bonus_clamps() {
        let cfg = config();
        let pubs = vec![publication(&["DILI"], 3)];
        // 40 + 35 clamps to 40
        assert_eq!(scientific_intent_score(&pubs, true, &cfg.scientific_intent), 40);
        assert_eq!(scientific_intent_score(&[], true, &cfg.scientific_intent), 35);
        assert_eq!(scientific_intent_score(&[], false, &cfg.scientific_intent), 0);
    }

    #[test]
    fn test_unknown_publication_date_out_of_window() {
        let cfg = config();
        let p = publication(&["DILI"], u32::MAX);
        assert_eq!(publication_points(&p, &cfg.scientific_intent), 0);
    }

    #[test]
    fn test_normalize_exact_rounding() {
        assert_eq!(normalize(0, 125), 0);
        assert_eq!(normalize(3, 125), 2); // 2.4 rounds down
        assert_eq!(normalize(53, 125), 42); // 42.4 rounds down
        assert_eq!(normalize(62, 125), 50); // 49.6 rounds up
        assert_eq!(normalize(99, 125), 79); // 79.2 rounds down
        assert_eq!(normalize(100, 125), 80);
        assert_eq!(normalize(125, 125), 100);
    }

    #[test]
    fn test_normalize_zero_denominator() {
        assert_eq!(normalize(50, 0), 0);
    }

    #[test]
    fn test_tier_boundaries() {
        let tiers = TierThresholds::default();
        assert_eq!(Tier::from_normalized(49, &tiers), Tier::Cold);
        assert_eq!(Tier::from_normalized(50, &tiers), Tier::Warm);
        assert_eq!(Tier::from_normalized(79, &tiers), Tier::Warm);
        assert_eq!(Tier::from_normalized(80, &tiers), Tier::Hot);
        assert_eq!(Tier::from_normalized(100, &tiers), Tier::Hot);
        assert_eq!(Tier::from_normalized(0, &tiers), Tier::Cold);
    }

    #[test]
    fn test_adding_signal_never_decreases_subscore() {
        let cfg = config();
        let mut lead = lead("Principal Scientist");
        let before = score(&lead, &cfg);

        lead.technographics.push("nams".to_string());
        lead.publications.push(publication(&["DILI"], 6));
        let after = score(&lead, &cfg);

        assert!(after.technographic >= before.technographic);
        assert!(after.scientific_intent >= before.scientific_intent);
        assert!(after.raw_score >= before.raw_score);
    }

    #[test]
    fn test_bounds_hold_for_oversignaled_lead() {
        let mut lead = lead("Chief Director Principal Scientist of 3D Liver Toxicology Safety");
        lead.company.name = "Liver Hepat Organoid Biotech".to_string();
        lead.company.funding_stage = FundingStage::SeriesAbRecent;
        lead.company.has_nih_grant = true;
        lead.technographics = vec![
            "3d models".to_string(),
            "3d cell culture".to_string(),
            "nams".to_string(),
            "alternative methods".to_string(),
            "liver disease".to_string(),
            "hepatology".to_string(),
            "in vitro models".to_string(),
        ];
        lead.location = "Boston".to_string();
        lead.publications = vec![
            publication(&["DILI"], 1),
            publication(&["DILI"], 2),
            publication(&["organoid"], 3),
        ];
        lead.conference_presenter = true;

        let result = score(&lead, &config());
        assert_eq!(result.role_fit, 30);
        assert_eq!(result.company_intent, 20);
        assert_eq!(result.technographic, 25);
        assert_eq!(result.location_hub, 10);
        assert_eq!(result.scientific_intent, 40);
        assert_eq!(result.raw_score, 125);
        assert_eq!(result.normalized_score, 100);
    }

    #[test]
    fn test_lead_record_not_mutated() {
        let mut lead = lead("Director of Toxicology");
        lead.publications = vec![publication(&["DILI"], 3)];
        let snapshot = lead.clone();
        let _ = score(&lead, &config());
        assert_eq!(lead, snapshot);
    }
}
