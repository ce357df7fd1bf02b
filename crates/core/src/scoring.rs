//! Lead qualification scoring.
//!
//! A lead starts at [`BASE_SCORE`] and gains points for its budget,
//! buying timeline, company size and industry. Each dimension is first
//! classified into a tier, then the tier is mapped to points. The result
//! is clamped to `0..=100`.
//!
//! Budget and company size are matched by substring containment against
//! the canonical intake labels, highest tier first, so a label such as
//! `"Budget: $150K+"` still lands in the top tier. Timeline and industry
//! are matched exactly. Unrecognized values contribute nothing.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Score every lead starts from.
pub const BASE_SCORE: i32 = 50;

/// Lower bound of a qualification score.
pub const MIN_SCORE: i32 = 0;

/// Upper bound of a qualification score.
pub const MAX_SCORE: i32 = 100;

/// Industries considered a strong fit.
pub const HIGH_VALUE_INDUSTRIES: &[&str] = &["Healthcare", "Technology", "Finance"];

/// Points awarded for a high-value industry.
const INDUSTRY_FIT_POINTS: i32 = 10;

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Budget bracket declared on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BudgetTier {
    /// `$5K - $15K`, absent, or unrecognized.
    Minimal,
    /// `$15K - $30K`
    Small,
    /// `$30K - $75K`
    Medium,
    /// `$75K - $150K`
    Large,
    /// `$150K+`
    Enterprise,
}

impl BudgetTier {
    /// Canonical labels checked in order, highest tier first.
    const LABELS: [(&'static str, BudgetTier); 4] = [
        ("$150K+", BudgetTier::Enterprise),
        ("$75K - $150K", BudgetTier::Large),
        ("$30K - $75K", BudgetTier::Medium),
        ("$15K - $30K", BudgetTier::Small),
    ];

    pub fn classify(budget_range: Option<&str>) -> Self {
        budget_range
            .and_then(|value| {
                Self::LABELS
                    .iter()
                    .find(|(label, _)| value.contains(label))
                    .map(|&(_, tier)| tier)
            })
            .unwrap_or(BudgetTier::Minimal)
    }

    pub fn points(self) -> i32 {
        match self {
            BudgetTier::Enterprise => 25,
            BudgetTier::Large => 20,
            BudgetTier::Medium => 15,
            BudgetTier::Small => 10,
            BudgetTier::Minimal => 0,
        }
    }
}

/// How soon the prospect intends to buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TimelineTier {
    /// `6+ months`, absent, or unrecognized.
    Distant,
    /// `3-6 months`
    Quarter,
    /// `1-3 months`
    Soon,
    /// `Immediate`
    Immediate,
}

impl TimelineTier {
    pub fn classify(timeline: Option<&str>) -> Self {
        match timeline {
            Some("Immediate") => TimelineTier::Immediate,
            Some("1-3 months") => TimelineTier::Soon,
            Some("3-6 months") => TimelineTier::Quarter,
            _ => TimelineTier::Distant,
        }
    }

    pub fn points(self) -> i32 {
        match self {
            TimelineTier::Immediate => 20,
            TimelineTier::Soon => 15,
            TimelineTier::Quarter => 10,
            TimelineTier::Distant => 0,
        }
    }
}

/// Headcount bracket of the prospect company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CompanySizeTier {
    /// `1-10`, absent, or unrecognized.
    Micro,
    /// `11-50`
    Small,
    /// `51-200`
    Medium,
    /// `201-1000`
    Large,
    /// `1000+`
    Enterprise,
}

impl CompanySizeTier {
    /// Canonical labels checked in order, highest tier first.
    const LABELS: [(&'static str, CompanySizeTier); 4] = [
        ("1000+", CompanySizeTier::Enterprise),
        ("201-1000", CompanySizeTier::Large),
        ("51-200", CompanySizeTier::Medium),
        ("11-50", CompanySizeTier::Small),
    ];

    pub fn classify(employee_count: Option<&str>) -> Self {
        employee_count
            .and_then(|value| {
                Self::LABELS
                    .iter()
                    .find(|(label, _)| value.contains(label))
                    .map(|&(_, tier)| tier)
            })
            .unwrap_or(CompanySizeTier::Micro)
    }

    pub fn points(self) -> i32 {
        match self {
            CompanySizeTier::Enterprise => 15,
            CompanySizeTier::Large => 12,
            CompanySizeTier::Medium => 8,
            CompanySizeTier::Small => 5,
            CompanySizeTier::Micro => 0,
        }
    }
}

/// Whether the industry is one the sales team prioritises.
pub fn is_high_value_industry(industry: Option<&str>) -> bool {
    industry.is_some_and(|i| HIGH_VALUE_INDUSTRIES.contains(&i))
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// The lead attributes that feed the score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringInput<'a> {
    pub budget_range: Option<&'a str>,
    pub timeline: Option<&'a str>,
    pub employee_count: Option<&'a str>,
    pub industry: Option<&'a str>,
}

/// Per-dimension contributions, returned by the intake preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: i32,
    pub budget: i32,
    pub timeline: i32,
    pub company_size: i32,
    pub industry: i32,
    /// Clamped sum of all contributions.
    pub total: i32,
}

/// Compute the full breakdown for a lead.
pub fn score_breakdown(input: &ScoringInput<'_>) -> ScoreBreakdown {
    let budget = BudgetTier::classify(input.budget_range).points();
    let timeline = TimelineTier::classify(input.timeline).points();
    let company_size = CompanySizeTier::classify(input.employee_count).points();
    let industry = if is_high_value_industry(input.industry) {
        INDUSTRY_FIT_POINTS
    } else {
        0
    };

    let raw = BASE_SCORE + budget + timeline + company_size + industry;

    ScoreBreakdown {
        base: BASE_SCORE,
        budget,
        timeline,
        company_size,
        industry,
        total: raw.clamp(MIN_SCORE, MAX_SCORE),
    }
}

/// Qualification score in `0..=100`.
pub fn score(input: &ScoringInput<'_>) -> i32 {
    score_breakdown(input).total
}

// ---------------------------------------------------------------------------
// Display bands
// ---------------------------------------------------------------------------

/// Coarse band used to colour scores in the lead table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

/// Scores at or above this are "hot".
pub const HOT_LEAD_THRESHOLD: i32 = 80;

/// Scores at or above this (and below [`HOT_LEAD_THRESHOLD`]) are medium.
pub const WARM_LEAD_THRESHOLD: i32 = 60;

impl ScoreBand {
    pub fn from_score(score: i32) -> Self {
        if score >= HOT_LEAD_THRESHOLD {
            ScoreBand::High
        } else if score >= WARM_LEAD_THRESHOLD {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
