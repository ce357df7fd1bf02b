//! Pipeline aggregation: per-stage summaries and portfolio metrics.
//!
//! Functions here are generic over [`DealRecord`] / [`LeadRecord`] so the
//! store's model types can be passed straight in. Empty inputs produce
//! zeroed results, never errors.

use serde::Serialize;

use crate::record::{DealRecord, LeadRecord};
use crate::status::{DealStage, LeadStatus};
use crate::types::Cents;

// ---------------------------------------------------------------------------
// Stage summary
// ---------------------------------------------------------------------------

/// Deals grouped under a single pipeline stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageSummary<D> {
    pub stage: DealStage,
    pub count: usize,
    /// Sum of deal values in cents.
    pub total_value: Cents,
    pub deals: Vec<D>,
}

impl<D> StageSummary<D> {
    /// Keep only the first `n` deals for display. `count` and
    /// `total_value` still describe the whole stage.
    pub fn truncate_deals(&mut self, n: usize) {
        self.deals.truncate(n);
    }
}

/// Group `deals` by stage, one entry per stage in `stages` order.
///
/// Stages with no deals still get an entry. Deals whose stage is not in
/// `stages` are left out. Within a stage, deals keep their input order.
pub fn summarize_by_stage<D>(deals: &[D], stages: &[DealStage]) -> Vec<StageSummary<D>>
where
    D: DealRecord + Clone,
{
    stages
        .iter()
        .map(|&stage| {
            let stage_deals: Vec<D> = deals.iter().filter(|d| d.stage() == stage).cloned().collect();
            StageSummary {
                stage,
                count: stage_deals.len(),
                total_value: saturate(sum_cents(stage_deals.iter())),
                deals: stage_deals,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Portfolio metrics
// ---------------------------------------------------------------------------

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PortfolioMetrics {
    /// Leads not marked lost.
    pub active_leads: usize,
    /// Value of every non-lost deal, in whole currency units.
    pub pipeline_value: i64,
    /// Won deals as a rounded percentage of all deals.
    pub win_rate: i64,
    /// Mean value of won deals, in whole currency units.
    pub avg_deal_size: i64,
}

/// Sum deal values without overflow.
fn sum_cents<'a, D: DealRecord + 'a>(deals: impl Iterator<Item = &'a D>) -> i128 {
    deals.map(|d| i128::from(d.value_cents())).sum()
}

/// Clamp a wide intermediate back into `i64`.
fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Convert cents to whole units, rounding half up.
pub fn cents_to_major(cents: Cents) -> i64 {
    saturate(wide_cents_to_major(i128::from(cents)))
}

fn wide_cents_to_major(cents: i128) -> i128 {
    (cents + 50).div_euclid(100)
}

/// `numerator / denominator` rounded half up; `0` when the denominator is 0.
fn rounded_ratio(numerator: i128, denominator: i128) -> i64 {
    if denominator == 0 {
        return 0;
    }
    saturate((2 * numerator + denominator).div_euclid(2 * denominator))
}

/// Compute the portfolio metrics over every lead and deal.
///
/// Sums run in `i128`, so any number of valid deals aggregates without
/// overflow; results beyond `i64` saturate.
pub fn compute_metrics<L, D>(leads: &[L], deals: &[D]) -> PortfolioMetrics
where
    L: LeadRecord,
    D: DealRecord,
{
    let active_leads = leads
        .iter()
        .filter(|l| l.status() != LeadStatus::Lost)
        .count();

    let pipeline_cents = sum_cents(deals.iter().filter(|d| d.stage() != DealStage::Lost));

    let won: Vec<&D> = deals.iter().filter(|d| d.stage() == DealStage::Won).collect();
    let won_count = won.len() as i128;
    let won_cents = sum_cents(won.into_iter());

    PortfolioMetrics {
        active_leads,
        pipeline_value: saturate(wide_cents_to_major(pipeline_cents)),
        win_rate: rounded_ratio(100 * won_count, deals.len() as i128),
        avg_deal_size: rounded_ratio(won_cents, won_count * 100),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ACTIVE_PIPELINE_STAGES;
    use crate::types::Timestamp;

    #[derive(Debug, Clone, PartialEq)]
    struct TestDeal {
        name: &'static str,
        stage: DealStage,
        value: Cents,
    }

    impl DealRecord for TestDeal {
        fn company_name(&self) -> &str {
            self.name
        }
        fn stage(&self) -> DealStage {
            self.stage
        }
        fn value_cents(&self) -> Cents {
            self.value
        }
        fn health_score(&self) -> i32 {
            50
        }
        fn last_contact_date(&self) -> Option<Timestamp> {
            None
        }
    }

    struct TestLead(LeadStatus);

    impl LeadRecord for TestLead {
        fn company_name(&self) -> &str {
            "Acme"
        }
        fn industry(&self) -> Option<&str> {
            None
        }
        fn budget_range(&self) -> Option<&str> {
            None
        }
        fn timeline(&self) -> Option<&str> {
            None
        }
        fn status(&self) -> LeadStatus {
            self.0
        }
        fn ai_score(&self) -> i32 {
            50
        }
    }

    fn deal(name: &'static str, stage: DealStage, value: Cents) -> TestDeal {
        TestDeal { name, stage, value }
    }

    // -- summarize_by_stage ----------------------------------------------

    #[test]
    fn empty_deals_yield_four_zeroed_stages() {
        let summary = summarize_by_stage::<TestDeal>(&[], &ACTIVE_PIPELINE_STAGES);

        assert_eq!(summary.len(), 4);
        let stages: Vec<DealStage> = summary.iter().map(|s| s.stage).collect();
        assert_eq!(stages, ACTIVE_PIPELINE_STAGES.to_vec());
        for entry in &summary {
            assert_eq!(entry.count, 0);
            assert_eq!(entry.total_value, 0);
            assert!(entry.deals.is_empty());
        }
    }

    #[test]
    fn closed_deals_are_excluded_from_active_summary() {
        let deals = vec![
            deal("a", DealStage::Proposal, 100),
            deal("b", DealStage::Won, 200),
            deal("c", DealStage::Lost, 300),
            deal("d", DealStage::Proposal, 400),
        ];

        let summary = summarize_by_stage(&deals, &ACTIVE_PIPELINE_STAGES);
        let total: usize = summary.iter().map(|s| s.count).sum();
        assert_eq!(total, 2);

        let proposal = &summary[1];
        assert_eq!(proposal.stage, DealStage::Proposal);
        assert_eq!(proposal.count, 2);
        assert_eq!(proposal.total_value, 500);
        assert_eq!(proposal.deals[0].name, "a");
        assert_eq!(proposal.deals[1].name, "d");
    }

    #[test]
    fn truncate_keeps_totals() {
        let deals = vec![
            deal("a", DealStage::Closing, 1),
            deal("b", DealStage::Closing, 2),
            deal("c", DealStage::Closing, 3),
            deal("d", DealStage::Closing, 4),
        ];
        let mut summary = summarize_by_stage(&deals, &[DealStage::Closing]);
        summary[0].truncate_deals(3);

        assert_eq!(summary[0].deals.len(), 3);
        assert_eq!(summary[0].count, 4);
        assert_eq!(summary[0].total_value, 10);
    }

    // -- compute_metrics ----------------------------------------------------

    #[test]
    fn empty_inputs_yield_zero_metrics() {
        let metrics = compute_metrics::<TestLead, TestDeal>(&[], &[]);
        assert_eq!(metrics, PortfolioMetrics::default());
    }

    #[test]
    fn mixed_portfolio_metrics() {
        let leads = vec![TestLead(LeadStatus::Qualified)];
        let deals = vec![
            deal("q", DealStage::Qualified, 4_500_000),
            deal("w", DealStage::Won, 6_700_000),
            deal("l", DealStage::Lost, 1_000_000),
        ];

        let metrics = compute_metrics(&leads, &deals);

        assert_eq!(metrics.active_leads, 1);
        assert_eq!(metrics.pipeline_value, 112_000);
        assert_eq!(metrics.win_rate, 33);
        assert_eq!(metrics.avg_deal_size, 67_000);
    }

    #[test]
    fn lost_leads_are_not_active() {
        let leads = vec![
            TestLead(LeadStatus::New),
            TestLead(LeadStatus::Lost),
            TestLead(LeadStatus::Nurturing),
        ];
        let metrics = compute_metrics::<_, TestDeal>(&leads, &[]);
        assert_eq!(metrics.active_leads, 2);
        assert_eq!(metrics.win_rate, 0);
    }

    #[test]
    fn no_won_deals_gives_zero_average() {
        let deals = vec![deal("p", DealStage::Proposal, 999)];
        let metrics = compute_metrics::<TestLead, _>(&[], &deals);
        assert_eq!(metrics.avg_deal_size, 0);
        assert_eq!(metrics.win_rate, 0);
        assert_eq!(metrics.pipeline_value, 10);
    }

    #[test]
    fn win_rate_rounds_half_up() {
        let deals = vec![
            deal("w", DealStage::Won, 0),
            deal("p", DealStage::Proposal, 0),
            deal("p2", DealStage::Proposal, 0),
            deal("p3", DealStage::Proposal, 0),
            deal("p4", DealStage::Proposal, 0),
            deal("p5", DealStage::Proposal, 0),
            deal("p6", DealStage::Proposal, 0),
            deal("p7", DealStage::Proposal, 0),
        ];
        // 1/8 = 12.5%
        let metrics = compute_metrics::<TestLead, _>(&[], &deals);
        assert_eq!(metrics.win_rate, 13);
    }

    #[test]
    fn huge_deal_values_do_not_overflow() {
        let half = i64::MAX / 2 + 1;
        let deals = vec![
            deal("w1", DealStage::Won, half),
            deal("w2", DealStage::Won, half),
            deal("p", DealStage::Proposal, i64::MAX),
        ];

        let metrics = compute_metrics::<TestLead, _>(&[], &deals);

        assert_eq!(metrics.win_rate, 67);
        assert_eq!(metrics.avg_deal_size, (half as i128 + 50).div_euclid(100) as i64);
        let expected_pipeline = (2 * half as i128 + i64::MAX as i128 + 50).div_euclid(100);
        assert_eq!(metrics.pipeline_value, expected_pipeline as i64);

        let summary = summarize_by_stage(&deals, &[DealStage::Won]);
        assert_eq!(summary[0].total_value, i64::MAX);
    }

    #[test]
    fn cents_to_major_at_i64_limit() {
        assert_eq!(cents_to_major(i64::MAX), (i64::MAX as i128 + 50).div_euclid(100) as i64);
    }

    #[test]
    fn cents_conversion_rounds_to_nearest_unit() {
        assert_eq!(cents_to_major(4_500_000), 45_000);
        assert_eq!(cents_to_major(149), 1);
        assert_eq!(cents_to_major(150), 2);
        assert_eq!(cents_to_major(0), 0);
    }

    #[test]
    fn average_deal_size_rounds_once() {
        let deals = vec![
            deal("a", DealStage::Won, 100),
            deal("b", DealStage::Won, 151),
        ];
        // (100 + 151) / 2 / 100 = 1.255
        let metrics = compute_metrics::<TestLead, _>(&[], &deals);
        assert_eq!(metrics.avg_deal_size, 1);
    }
}
