//! Staged model escalation for bounded retry loops.
//!
//! A plan holds the starting tier for `threshold` iterations, then steps one
//! tier up per block until `max_escalations` steps were taken or the top of
//! the ladder is reached. The last band runs to the end of the budget.
//!
//! Plans are data only. Running each band in a fresh agent session is left to
//! the operator.

use crate::cost;
use crate::error::{Result, RouteError};
use crate::tier::Tier;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EscalationConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationConfig {
    pub enabled: bool,
    pub initial_tier: Tier,
    /// Iterations spent on a tier before stepping up.
    pub threshold: u32,
    pub max_escalations: u32,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_tier: Tier::Haiku,
            threshold: 3,
            max_escalations: 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Band / EscalationPlan (output)
// ---------------------------------------------------------------------------

/// Iterations `start..end` run on `tier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub start: u32,
    pub end: u32,
    pub tier: Tier,
}

impl Band {
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn cost(&self) -> f64 {
        cost::unit_cost(self.tier) * f64::from(self.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationPlan {
    pub enabled: bool,
    pub initial_tier: Tier,
    pub threshold: u32,
    pub max_escalations: u32,
    pub max_iterations: u32,
    pub bands: Vec<Band>,
    pub total_estimated_cost: f64,
}

impl EscalationPlan {
    /// Number of tier steps the plan actually takes.
    pub fn escalation_count(&self) -> u32 {
        self.bands.len().saturating_sub(1) as u32
    }

    pub fn final_tier(&self) -> Tier {
        self.bands.last().map_or(self.initial_tier, |b| b.tier)
    }
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

/// Build the band schedule for `max_iterations` iterations.
///
/// Fails only when `threshold` is zero. A disabled config, or one with
/// `max_escalations == 0`, yields a single band at the initial tier.
pub fn plan_escalation(config: &EscalationConfig, max_iterations: u32) -> Result<EscalationPlan> {
    if config.threshold == 0 {
        return Err(RouteError::InvalidThreshold(config.threshold));
    }

    let mut bands = Vec::new();
    let mut tier = config.initial_tier;
    let mut escalations = 0;
    let mut start = 0;

    while start < max_iterations {
        let next = if config.enabled && escalations < config.max_escalations {
            tier.next()
        } else {
            None
        };

        match next {
            Some(next_tier) if max_iterations - start > config.threshold => {
                let end = start + config.threshold;
                bands.push(Band { start, end, tier });
                tracing::debug!(iteration = end, from = %tier, to = %next_tier, "escalating tier");
                tier = next_tier;
                escalations += 1;
                start = end;
            }
            _ => {
                bands.push(Band {
                    start,
                    end: max_iterations,
                    tier,
                });
                start = max_iterations;
            }
        }
    }

    let total_estimated_cost: f64 = bands.iter().map(Band::cost).sum();

    Ok(EscalationPlan {
        enabled: config.enabled,
        initial_tier: config.initial_tier,
        threshold: config.threshold,
        max_escalations: config.max_escalations,
        max_iterations,
        bands,
        total_estimated_cost,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
