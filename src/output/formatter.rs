use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::leads::types::LeadRecord;
use crate::scoring::{ScoreResult, Tier};

/// A lead with its calculated score for display
pub struct ScoredLead<'a> {
    pub lead: &'a LeadRecord,
    pub result: &'a ScoreResult,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Tier badge, colored to match the tier when colors are on.
pub fn format_tier(tier: Tier, use_colors: bool) -> String {
    let label = format!("{:<4}", tier.to_string());
    if !use_colors {
        return label;
    }
    match tier {
        Tier::Hot => label.green().to_string(),
        Tier::Warm => label.yellow().to_string(),
        Tier::Cold => label.dimmed().to_string(),
    }
}

/// Format leads as a ranked table: Index, Score, Tier, Name, Title.
/// No headers (minimal format).
/// Index column: 3 chars (fits "99."), right-aligned.
/// Score column: 3 chars, right-aligned (normalized scores are 0-100).
pub fn format_scored_table(leads: &[ScoredLead], use_colors: bool) -> String {
    if leads.is_empty() {
        return "No leads found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 3;
    let score_width = 3;
    let tier_width = 4;
    let separator = "  ";

    leads
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!("{:>width$}", scored.result.normalized_score, width = score_width);
            let tier_str = format_tier(scored.result.tier, use_colors);
            let name = scored.lead.short_ref();

            let fixed_width =
                index_width + 1 + score_width + tier_width + separator.len() * 3 + name.chars().count();
            let title = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate(&scored.lead.title, width - fixed_width)
                } else {
                    truncate(&scored.lead.title, 20)
                }
            } else {
                // No terminal (pipe), don't truncate
                scored.lead.title.clone()
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    tier_str,
                    separator,
                    name.cyan(),
                    separator,
                    title
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    index_str, score_str, separator, tier_str, separator, name, separator, title
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single lead with detailed multi-line output, including the
/// five-category score breakdown.
pub fn format_lead_detail(scored: &ScoredLead, use_colors: bool) -> String {
    let lead = scored.lead;
    let result = scored.result;
    let header = if use_colors {
        format!(
            "{} - {} {}",
            lead.short_ref().bold(),
            result.normalized_score.bold(),
            format_tier(result.tier, use_colors)
        )
    } else {
        format!(
            "{} - {} {}",
            lead.short_ref(),
            result.normalized_score,
            format_tier(result.tier, use_colors)
        )
    };

    let title = if lead.title.is_empty() {
        "(no title)"
    } else {
        lead.title.as_str()
    };
    let location = if lead.location.is_empty() {
        "(no location)"
    } else {
        lead.location.as_str()
    };

    format!(
        "{}\n  Title: {}\n  Location: {}\n  Publications: {}\n  Role fit: {}\n  \
         Company intent: {}\n  Technographic: {}\n  Location hub: {}\n  \
         Scientific intent: {}\n  Raw score: {}",
        header,
        title,
        location,
        lead.publications.len(),
        result.role_fit,
        result.company_intent,
        result.technographic,
        result.location_hub,
        result.scientific_intent,
        result.raw_score,
    )
}

/// Format leads as tab-separated values for scripting.
/// Columns: score, tier, name, company, title (no headers, no colors).
pub fn format_tsv(leads: &[ScoredLead]) -> String {
    if leads.is_empty() {
        return String::new();
    }

    leads
        .iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{}\t{}",
                scored.result.normalized_score,
                scored.result.tier,
                scored.lead.name,
                scored.lead.company.name,
                scored.lead.title
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
