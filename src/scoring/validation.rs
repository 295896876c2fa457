use super::config::{KeywordRule, ScoringConfig};

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    check_cap("scoring.role_fit.cap", config.role_fit.cap, &mut errors);
    check_cap(
        "scoring.company_intent.cap",
        config.company_intent.cap,
        &mut errors,
    );
    check_cap(
        "scoring.technographic.cap",
        config.technographic.cap,
        &mut errors,
    );
    check_cap("scoring.location.cap", config.location.cap, &mut errors);
    check_cap(
        "scoring.scientific_intent.cap",
        config.scientific_intent.cap,
        &mut errors,
    );

    check_rules("scoring.role_fit.keywords", &config.role_fit.keywords, &mut errors);
    check_rules(
        "scoring.role_fit.seniority",
        &config.role_fit.seniority,
        &mut errors,
    );
    check_rules(
        "scoring.technographic.categories",
        &config.technographic.categories,
        &mut errors,
    );
    check_rules("scoring.location.hubs", &config.location.hubs, &mut errors);

    if config.location.default_points > config.location.cap {
        errors.push(format!(
            "scoring.location.default_points: {} exceeds the category cap {}",
            config.location.default_points, config.location.cap
        ));
    }

    if config.scientific_intent.dili_terms.is_empty() {
        errors.push("scoring.scientific_intent.dili_terms: must not be empty".to_string());
    }
    if config.scientific_intent.culture_terms.is_empty() {
        errors.push("scoring.scientific_intent.culture_terms: must not be empty".to_string());
    }
    if config.scientific_intent.dili_recent_months > config.scientific_intent.dili_older_months {
        errors.push(format!(
            "scoring.scientific_intent: recent window ({} months) exceeds older window ({} months)",
            config.scientific_intent.dili_recent_months, config.scientific_intent.dili_older_months
        ));
    }

    if config.tiers.warm > config.tiers.hot {
        errors.push(format!(
            "scoring.tiers: warm threshold {} exceeds hot threshold {}",
            config.tiers.warm, config.tiers.hot
        ));
    }
    if config.tiers.hot > 100 {
        errors.push(format!(
            "scoring.tiers.hot: {} is outside the normalized 0-100 range",
            config.tiers.hot
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_cap(path: &str, cap: u32, errors: &mut Vec<String>) {
    if cap == 0 {
        errors.push(format!("{}: must be positive", path));
    }
}

fn check_rules(path: &str, rules: &[KeywordRule], errors: &mut Vec<String>) {
    if rules.is_empty() {
        errors.push(format!("{}: must contain at least one rule", path));
        return;
    }
    for (i, rule) in rules.iter().enumerate() {
        if rule.terms.is_empty() {
            errors.push(format!("{}[{}].terms: must not be empty", path, i));
        }
        if rule.terms.iter().any(|t| t.trim().is_empty()) {
            errors.push(format!("{}[{}].terms: contains a blank phrase", path, i));
        }
    }
}
