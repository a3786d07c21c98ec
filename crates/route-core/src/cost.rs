//! Per-tier cost table and savings reporting.
//!
//! Costs are an abstract per-request unit (roughly USD for a typical coding
//! turn). They only need to be comparable with each other.

use crate::tier::Tier;
use serde::{Deserialize, Serialize};

/// Tier used as the reference point for savings: the safe default route.
pub const BASELINE: Tier = Tier::Sonnet;

/// Unit cost per tier, indexed by `Tier::index()`.
const COST_TABLE: [f64; 5] = [0.0003, 0.00125, 0.004, 0.015, 0.10];

pub fn unit_cost(tier: Tier) -> f64 {
    COST_TABLE[tier.index()]
}

// ---------------------------------------------------------------------------
// Savings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Savings {
    pub baseline: Tier,
    pub chosen: Tier,
    pub baseline_cost: f64,
    pub chosen_cost: f64,
    /// Negative when the chosen tier is more expensive than the baseline.
    pub savings: f64,
    pub savings_percent: f64,
}

/// Compare `chosen` against the baseline tier.
pub fn savings(chosen: Tier) -> Savings {
    let baseline_cost = unit_cost(BASELINE);
    let chosen_cost = unit_cost(chosen);
    let saved = baseline_cost - chosen_cost;
    Savings {
        baseline: BASELINE,
        chosen,
        baseline_cost,
        chosen_cost,
        savings: saved,
        savings_percent: saved / baseline_cost * 100.0,
    }
}

/// Render a cost with enough precision for the cheapest tier: `$0.0003`.
pub fn format_cost(cost: f64) -> String {
    if cost != 0.0 && cost.abs() < 0.01 {
        format!("${cost:.4}")
    } else {
        format!("${cost:.2}")
    }
}

/// Render a signed percentage: `+98.0%`, `-566.7%`.
pub fn format_percent(percent: f64) -> String {
    format!("{percent:+.1}%")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
