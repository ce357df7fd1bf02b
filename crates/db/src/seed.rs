//! Sample dashboard data.
//!
//! Seeded leads carry preset qualification scores and seeded deals carry
//! last-contact dates spread over the previous week, so a fresh store
//! already shows hot leads and silent deals.

use chrono::{Duration, Utc};
use dealpulse_core::status::{ActivityType, DealStage, LeadStatus, Priority};
use dealpulse_core::types::{Cents, DbId};

use crate::models::activity::Activity;
use crate::models::deal::Deal;
use crate::models::lead::Lead;
use crate::store::MemStore;

struct SampleLead {
    company_name: &'static str,
    industry: &'static str,
    employee_count: &'static str,
    budget_range: &'static str,
    timeline: &'static str,
    interest_area: &'static str,
    notes: &'static str,
    priority: Priority,
    status: LeadStatus,
    ai_score: i32,
}

const SAMPLE_LEADS: &[SampleLead] = &[
    SampleLead {
        company_name: "Acme Corporation",
        industry: "Manufacturing",
        employee_count: "201-1000",
        budget_range: "$50K - $100K",
        timeline: "Q1 2024",
        interest_area: "Office Snacks",
        notes: "Large manufacturing company looking for comprehensive snack program",
        priority: Priority::High,
        status: LeadStatus::Qualified,
        ai_score: 92,
    },
    SampleLead {
        company_name: "NutriCorp Health",
        industry: "Healthcare",
        employee_count: "51-200",
        budget_range: "$25K - $75K",
        timeline: "Immediate",
        interest_area: "Employee Wellness",
        notes: "Healthcare company focused on employee wellness programs",
        priority: Priority::High,
        status: LeadStatus::Qualified,
        ai_score: 88,
    },
    SampleLead {
        company_name: "FoodTech Ltd",
        industry: "Technology",
        employee_count: "11-50",
        budget_range: "$10K - $30K",
        timeline: "Q2 2024",
        interest_area: "Corporate Events",
        notes: "Tech startup interested in event catering",
        priority: Priority::Medium,
        status: LeadStatus::Contacted,
        ai_score: 65,
    },
];

struct SampleDeal {
    lead_id: Option<DbId>,
    company_name: &'static str,
    value: Cents,
    stage: DealStage,
    probability: i32,
    health_score: i32,
    notes: &'static str,
    /// Hours between the last contact and seeding time.
    contact_hours_ago: i64,
}

const SAMPLE_DEALS: &[SampleDeal] = &[
    SampleDeal {
        lead_id: Some(1),
        company_name: "Acme Corporation",
        value: 4_500_000,
        stage: DealStage::Qualified,
        probability: 25,
        health_score: 85,
        notes: "Strong initial interest, need to present proposal",
        contact_hours_ago: 30,
    },
    SampleDeal {
        lead_id: Some(2),
        company_name: "NutriCorp Health",
        value: 6_700_000,
        stage: DealStage::Proposal,
        probability: 60,
        health_score: 90,
        notes: "Proposal submitted, awaiting feedback",
        contact_hours_ago: 80,
    },
    SampleDeal {
        lead_id: None,
        company_name: "GlobalCo",
        value: 12_500_000,
        stage: DealStage::Proposal,
        probability: 50,
        health_score: 75,
        notes: "Multi-location program in proposal stage",
        contact_hours_ago: 150,
    },
    SampleDeal {
        lead_id: None,
        company_name: "MegaFirm",
        value: 8_900_000,
        stage: DealStage::Negotiation,
        probability: 80,
        health_score: 70,
        notes: "In contract negotiation phase",
        contact_hours_ago: 50,
    },
    SampleDeal {
        lead_id: None,
        company_name: "SmartCorp",
        value: 15_600_000,
        stage: DealStage::Closing,
        probability: 95,
        health_score: 95,
        notes: "Final contract review, close expected this week",
        contact_hours_ago: 130,
    },
];

struct SampleActivity {
    deal_id: Option<DbId>,
    lead_id: Option<DbId>,
    activity_type: ActivityType,
    description: &'static str,
    outcome: &'static str,
    next_steps: &'static str,
    hours_ago: i64,
}

const SAMPLE_ACTIVITIES: &[SampleActivity] = &[
    SampleActivity {
        deal_id: Some(1),
        lead_id: Some(1),
        activity_type: ActivityType::Call,
        description: "Discovery call completed",
        outcome: "Positive response, interested in full program",
        next_steps: "Send proposal by end of week",
        hours_ago: 6,
    },
    SampleActivity {
        deal_id: Some(2),
        lead_id: Some(2),
        activity_type: ActivityType::Email,
        description: "Follow-up proposal sent",
        outcome: "Proposal delivered successfully",
        next_steps: "Schedule follow-up call for next week",
        hours_ago: 30,
    },
    SampleActivity {
        deal_id: None,
        lead_id: Some(3),
        activity_type: ActivityType::Call,
        description: "Initial qualification call",
        outcome: "Budget confirmed, timeline extended",
        next_steps: "Send information packet",
        hours_ago: 54,
    },
];

/// Fill the store with the sample leads, deals and activities.
pub async fn seed_sample_data(pool: &MemStore) {
    let now = Utc::now();

    for sample in SAMPLE_LEADS {
        pool.leads
            .insert_with(|id| Lead {
                id,
                company_name: sample.company_name.to_string(),
                industry: Some(sample.industry.to_string()),
                employee_count: Some(sample.employee_count.to_string()),
                budget_range: Some(sample.budget_range.to_string()),
                timeline: Some(sample.timeline.to_string()),
                interest_area: Some(sample.interest_area.to_string()),
                notes: Some(sample.notes.to_string()),
                ai_score: sample.ai_score,
                priority: sample.priority,
                status: sample.status,
                created_at: now,
                updated_at: now,
            })
            .await;
    }

    for sample in SAMPLE_DEALS {
        pool.deals
            .insert_with(|id| Deal {
                id,
                lead_id: sample.lead_id,
                company_name: sample.company_name.to_string(),
                value: sample.value,
                stage: sample.stage,
                probability: sample.probability,
                close_date: None,
                notes: Some(sample.notes.to_string()),
                last_contact_date: Some(now - Duration::hours(sample.contact_hours_ago)),
                health_score: sample.health_score,
                created_at: now,
                updated_at: now,
            })
            .await;
    }

    for sample in SAMPLE_ACTIVITIES {
        pool.activities
            .insert_with(|id| Activity {
                id,
                deal_id: sample.deal_id,
                lead_id: sample.lead_id,
                activity_type: sample.activity_type,
                description: sample.description.to_string(),
                outcome: Some(sample.outcome.to_string()),
                next_steps: Some(sample.next_steps.to_string()),
                created_at: now - Duration::hours(sample.hours_ago),
            })
            .await;
    }

    tracing::info!(
        leads = SAMPLE_LEADS.len(),
        deals = SAMPLE_DEALS.len(),
        activities = SAMPLE_ACTIVITIES.len(),
        "Sample data seeded",
    );
}
