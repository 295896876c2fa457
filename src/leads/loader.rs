use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::types::{Company, FundingStage, LeadRecord, Publication};

/// Raw lead as emitted by the enrichment pipeline: free-text everywhere,
/// every field but `name` optional. Resolved into a typed [`LeadRecord`]
/// exactly once, here at the boundary.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLead {
    name: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    funding_stage: String,
    #[serde(default)]
    funding_date: String,
    #[serde(default)]
    nih_grant: Option<bool>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    tech_keywords: Vec<String>,
    #[serde(default)]
    publications: Vec<RawPublication>,
    #[serde(default)]
    conference_presenter: Option<bool>,
    /// Free-text conference participation ("SOT 2026 Speaker"); a non-empty
    /// value counts as presenting when `conference_presenter` is absent
    #[serde(default)]
    conference: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPublication {
    #[serde(default)]
    title: String,
    /// "YYYY" or "YYYY-MM"
    #[serde(default)]
    published: String,
    #[serde(default)]
    keywords: Vec<String>,
}

/// Load and resolve leads from a JSON array file.
pub fn load_leads(path: &Path) -> Result<Vec<LeadRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read leads file at {}", path.display()))?;
    parse_leads(&content, Utc::now().date_naive())
        .with_context(|| format!("Failed to parse leads file at {}", path.display()))
}

/// Parse a JSON array of raw leads, resolving dates against `today`.
pub fn parse_leads(json: &str, today: NaiveDate) -> Result<Vec<LeadRecord>> {
    let raw: Vec<RawLead> = serde_json::from_str(json).context("Expected a JSON array of leads")?;
    Ok(raw.into_iter().map(|lead| resolve_lead(lead, today)).collect())
}

fn resolve_lead(raw: RawLead, today: NaiveDate) -> LeadRecord {
    let funding_stage = resolve_funding_stage(&raw.funding_stage, &raw.funding_date, today);
    let notes = raw.notes.to_lowercase();
    let has_nih_grant = raw
        .nih_grant
        .unwrap_or_else(|| notes.contains("nih") || notes.contains("grant"));
    let conference_presenter = raw
        .conference_presenter
        .unwrap_or_else(|| !raw.conference.trim().is_empty());

    let publications = raw
        .publications
        .into_iter()
        .map(|p| resolve_publication(p, today))
        .collect();

    LeadRecord {
        name: raw.name,
        title: raw.title,
        company: Company {
            name: raw.company,
            funding_stage,
            has_nih_grant,
        },
        technographics: raw.tech_keywords,
        location: raw.location,
        publications,
        conference_presenter,
    }
}

fn resolve_publication(raw: RawPublication, today: NaiveDate) -> Publication {
    // Unknown dates fall outside every recency window rather than erroring
    let months_since = parse_months_since(&raw.published, today).unwrap_or(u32::MAX);
    let topic_keywords = if raw.keywords.is_empty() {
        vec![raw.title]
    } else {
        raw.keywords
    };
    Publication {
        topic_keywords,
        months_since,
    }
}

/// Map a free-text funding stage to the enum. Series A/B recency depends on
/// the funding date; unrecognized stages score as `Unknown`.
fn resolve_funding_stage(stage: &str, funding_date: &str, today: NaiveDate) -> FundingStage {
    match stage.trim().to_lowercase().as_str() {
        "series a" | "series b" => match parse_months_since(funding_date, today) {
            Some(months) if months <= 12 => FundingStage::SeriesAbRecent,
            _ => FundingStage::SeriesAbOlder,
        },
        "series c" | "series d" | "series d+" | "ipo" | "public" => FundingStage::SeriesCPlus,
        "bootstrapped" => FundingStage::Bootstrapped,
        _ => FundingStage::Unknown,
    }
}

/// Whole months between a "YYYY" or "YYYY-MM" date and `today`. Year-only
/// dates resolve to December, matching the year-granularity recency the
/// upstream publication data carries. Future dates clamp to 0.
fn parse_months_since(date: &str, today: NaiveDate) -> Option<u32> {
    let date = date.trim();
    if date.is_empty() {
        return None;
    }

    let mut parts = date.splitn(2, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = match parts.next() {
        Some(m) => {
            let m: u32 = m.parse().ok()?;
            if !(1..=12).contains(&m) {
                return None;
            }
            m
        }
        None => 12,
    };

    let delta = (today.year() - year) * 12 + today.month() as i32 - month as i32;
    Some(delta.max(0) as u32)
}
