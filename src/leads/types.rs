use serde::{Deserialize, Serialize};

/// A prospective sales lead, fully resolved at the loader boundary.
///
/// The scoring engine only ever borrows this and never mutates it; all
/// derived values land in a separate [`crate::scoring::ScoreResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct LeadRecord {
    /// Display name ("Dr. Jane Smith")
    pub name: String,

    /// Free-text job title, possibly empty
    pub title: String,

    pub company: Company,

    /// Free-text technology signals found on company web properties
    /// and job postings
    pub technographics: Vec<String>,

    /// Free-text location, matched case-insensitively against the hub table
    pub location: String,

    pub publications: Vec<Publication>,

    /// Presenting at a recognized relevant conference this year
    pub conference_presenter: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    pub name: String,
    pub funding_stage: FundingStage,
    pub has_nih_grant: bool,
}

/// Funding stage with recency already resolved by the loader.
///
/// Unrecognized stage strings map to `Unknown`, which scores zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum FundingStage {
    /// Series A/B closed within the last 12 months
    SeriesAbRecent,
    /// Series A/B, older than 12 months
    SeriesAbOlder,
    /// Series C or later, incl. IPO/public
    SeriesCPlus,
    Bootstrapped,
    Unknown,
}

/// One publication summary attached to a lead.
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    /// Topic phrases; the loader falls back to the title when the source
    /// carries no explicit keyword list
    pub topic_keywords: Vec<String>,

    /// Whole months elapsed since publication. Unknown dates are mapped to
    /// `u32::MAX` so they fall outside every recency window.
    pub months_since: u32,
}

impl LeadRecord {
    /// Short one-line reference for logs and error messages.
    pub fn short_ref(&self) -> String {
        if self.company.name.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.company.name)
        }
    }
}
