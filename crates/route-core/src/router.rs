use crate::cost::{self, BASELINE};
use crate::task::TaskDescriptor;
use crate::tier::Tier;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    ExplicitLabel,
    ComplexityLabel,
    PatternMatch,
    Default,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::ExplicitLabel => "explicit-label",
            Strategy::ComplexityLabel => "complexity-label",
            Strategy::PatternMatch => "pattern-match",
            Strategy::Default => "default",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RoutingDecision (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub agent: Tier,
    pub confidence: f64,
    pub rationale: String,
    pub strategy: Strategy,
    /// Always `cost::unit_cost(agent)`.
    pub estimated_cost: f64,
}

impl RoutingDecision {
    fn new(agent: Tier, confidence: f64, rationale: String, strategy: Strategy) -> Self {
        Self {
            agent,
            confidence,
            rationale,
            strategy,
            estimated_cost: cost::unit_cost(agent),
        }
    }
}

/// What a strategy reports when it fires.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub tier: Tier,
    pub confidence: f64,
    pub rationale: String,
}

// ---------------------------------------------------------------------------
// StrategyRule
// ---------------------------------------------------------------------------

/// A fn-pointer strategy. Returns `None` to fall through to the next one.
pub struct StrategyRule {
    pub strategy: Strategy,
    pub evaluate: fn(&TaskDescriptor) -> Option<Verdict>,
}

/// Label-driven strategies first, then free text.
pub fn default_rules() -> Vec<StrategyRule> {
    vec![
        StrategyRule {
            strategy: Strategy::ExplicitLabel,
            evaluate: explicit_label,
        },
        StrategyRule {
            strategy: Strategy::ComplexityLabel,
            evaluate: complexity_label,
        },
        StrategyRule {
            strategy: Strategy::PatternMatch,
            evaluate: pattern_match,
        },
    ]
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub const DEFAULT_TIER: Tier = Tier::Sonnet;
pub const DEFAULT_CONFIDENCE: f64 = 0.6;
pub const DEFAULT_RATIONALE: &str = "no routing indicators, using safe default";

pub struct Router {
    rules: Vec<StrategyRule>,
}

impl Router {
    pub fn new(rules: Vec<StrategyRule>) -> Self {
        Self { rules }
    }

    /// Route a task. Never fails: when no rule fires the safe default applies.
    pub fn route(&self, task: &TaskDescriptor) -> RoutingDecision {
        for rule in &self.rules {
            if let Some(verdict) = (rule.evaluate)(task) {
                tracing::debug!(
                    task = %task.id,
                    strategy = %rule.strategy,
                    tier = %verdict.tier,
                    confidence = verdict.confidence,
                    "routing strategy matched"
                );
                return RoutingDecision::new(
                    verdict.tier,
                    verdict.confidence,
                    verdict.rationale,
                    rule.strategy,
                );
            }
        }

        tracing::debug!(task = %task.id, "no routing indicators");
        RoutingDecision::new(
            DEFAULT_TIER,
            DEFAULT_CONFIDENCE,
            DEFAULT_RATIONALE.to_string(),
            Strategy::Default,
        )
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

// ---------------------------------------------------------------------------
// Explicit label: agent:<alias> / model:<alias>
// ---------------------------------------------------------------------------

const EXPLICIT_PREFIXES: [&str; 2] = ["agent:", "model:"];

fn explicit_value(label: &str) -> Option<&str> {
    EXPLICIT_PREFIXES
        .iter()
        .find_map(|prefix| label.strip_prefix(prefix))
}

fn explicit_label(task: &TaskDescriptor) -> Option<Verdict> {
    let mut explicit = task
        .labels
        .iter()
        .filter_map(|l| explicit_value(l).map(|v| (l, v)));
    let (label, value) = explicit.next()?;
    let tier = Tier::from_alias(value)?;

    // First label wins; later ones that disagree are only reported.
    for (other, other_value) in explicit {
        if Tier::from_alias(other_value).is_some_and(|t| t != tier) {
            tracing::warn!(
                task = %task.id,
                used = %label,
                ignored = %other,
                "conflicting explicit model labels"
            );
        }
    }

    Some(Verdict {
        tier,
        confidence: 1.0,
        rationale: format!("explicit label '{label}' selects {tier}"),
    })
}

// ---------------------------------------------------------------------------
// Complexity label: complexity:<trivial|simple|standard|complex>
// ---------------------------------------------------------------------------

const COMPLEXITY_PREFIX: &str = "complexity:";

fn complexity_tier(value: &str) -> Option<Tier> {
    match value {
        "trivial" | "simple" => Some(Tier::Flash),
        "standard" => Some(Tier::Sonnet),
        "complex" => Some(Tier::Opus),
        _ => None,
    }
}

fn complexity_label(task: &TaskDescriptor) -> Option<Verdict> {
    let (label, value) = task
        .labels
        .iter()
        .find_map(|l| l.strip_prefix(COMPLEXITY_PREFIX).map(|v| (l, v)))?;
    let value = value.trim().to_lowercase();

    let (tier, rationale) = match complexity_tier(&value) {
        Some(tier) => (tier, format!("complexity label '{label}' maps to {tier}")),
        None => (
            Tier::Sonnet,
            format!("unknown complexity '{value}' in label '{label}', using {}", Tier::Sonnet),
        ),
    };

    Some(Verdict {
        tier,
        confidence: 0.9,
        rationale,
    })
}

// ---------------------------------------------------------------------------
// Pattern match over title + description
// ---------------------------------------------------------------------------

pub struct PatternGroup {
    pub name: &'static str,
    pub tier: Tier,
    pub confidence: f64,
    pub pattern: Regex,
}

static PATTERN_GROUPS: OnceLock<Vec<PatternGroup>> = OnceLock::new();

/// Checked in order; the first group with a hit decides. A title that is both
/// a typo fix and security work is treated as a typo fix.
pub fn pattern_groups() -> &'static [PatternGroup] {
    PATTERN_GROUPS.get_or_init(|| {
        let group = |name, tier, confidence, pattern: &str| PatternGroup {
            name,
            tier,
            confidence,
            pattern: Regex::new(pattern).unwrap(),
        };
        vec![
            group(
                "trivial",
                Tier::Flash,
                0.85,
                r"\b(?:typos?|renam(?:e|es|ed|ing)|formatting|reformat\w*|fmt|lint(?:ing)?|whitespace|punctuation|spelling|indent(?:ation)?)\b",
            ),
            group(
                "simple",
                Tier::Haiku,
                0.75,
                r"\b(?:docs?|documentation|readme|changelog|comments?|bump|minor|small|add (?:a )?(?:unit )?tests?|update (?:the )?(?:copy|text|link)s?)\b",
            ),
            group(
                "complex",
                Tier::Opus,
                0.8,
                r"\b(?:design|architect\w*|security|secure|o?auth(?:n|z|enticat\w*|oriz\w*|\d*)?|payments?|performance|optimi[sz]\w*|migrat\w*|refactor\w*|concurren\w*|distributed|scalab\w*|encrypt\w*)\b",
            ),
            group(
                "standard",
                Tier::Sonnet,
                0.7,
                r"\b(?:implement\w*|features?|endpoints?|api|integrat\w*|components?|bugs?|fix(?:es)?|add|build|create|support)\b",
            ),
        ]
    })
}

fn pattern_match(task: &TaskDescriptor) -> Option<Verdict> {
    let text = task.text().to_lowercase();
    pattern_groups().iter().find_map(|group| {
        group.pattern.find(&text).map(|m| Verdict {
            tier: group.tier,
            confidence: group.confidence,
            rationale: format!("matched {} pattern '{}'", group.name, m.as_str()),
        })
    })
}

// ---------------------------------------------------------------------------
// Batch summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingSummary {
    pub count: usize,
    pub by_tier: BTreeMap<Tier, usize>,
    pub by_strategy: BTreeMap<Strategy, usize>,
    pub total_cost: f64,
    /// What the same tasks would cost if every one ran on the baseline tier.
    pub baseline_cost: f64,
    pub savings: f64,
    pub savings_percent: f64,
}

pub fn summarize(decisions: &[RoutingDecision]) -> RoutingSummary {
    let mut by_tier = BTreeMap::new();
    let mut by_strategy = BTreeMap::new();
    let mut total_cost = 0.0;
    for d in decisions {
        *by_tier.entry(d.agent).or_insert(0) += 1;
        *by_strategy.entry(d.strategy).or_insert(0) += 1;
        total_cost += d.estimated_cost;
    }

    let baseline_cost = cost::unit_cost(BASELINE) * decisions.len() as f64;
    let savings = baseline_cost - total_cost;
    let savings_percent = if baseline_cost > 0.0 {
        savings / baseline_cost * 100.0
    } else {
        0.0
    };

    RoutingSummary {
        count: decisions.len(),
        by_tier,
        by_strategy,
        total_cost,
        baseline_cost,
        savings,
        savings_percent,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
