use crate::output::{print_json, print_table};
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Args;
use route_core::config::{Config, MAX_ITERATIONS, MIN_ITERATIONS};
use route_core::cost::format_cost;
use route_core::escalation::{plan_escalation, EscalationPlan};
use route_core::{io, paths, Router, RoutingDecision, TaskDescriptor, Tier};
use serde::Serialize;
use std::path::Path;

#[derive(Args)]
pub struct PlanArgs {
    /// Prompt the agent loop works on
    #[arg(required = true)]
    pub prompt: Vec<String>,

    /// Iteration budget (1-50) [default: loop.max_iterations from config]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub max_iterations: Option<u32>,

    /// Phrase the agent prints when the work is complete
    #[arg(long)]
    pub completion_phrase: Option<String>,

    /// Step up one model tier every --escalate-after iterations
    #[arg(long)]
    pub escalate: bool,

    /// Starting tier, e.g. haiku, sonnet, gemini-pro [default: routed from the prompt]
    #[arg(long)]
    pub model: Option<Tier>,

    /// Iterations per tier before escalating
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub escalate_after: Option<u32>,

    /// Maximum number of tier steps
    #[arg(long)]
    pub max_escalations: Option<u32>,

    /// Print the plan without writing .beads/escalation-plan.json
    #[arg(long)]
    pub dry_run: bool,
}

/// Where the starting tier came from.
#[derive(Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
enum StartTier {
    Flag,
    Config,
    Routed { decision: RoutingDecision },
}

#[derive(Serialize)]
struct LoopPlan {
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    completion_phrase: Option<String>,
    created_at: DateTime<Utc>,
    start: StartTier,
    plan: EscalationPlan,
}

pub fn run(root: &Path, args: PlanArgs, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load .beads/routing.yaml")?;
    let prompt = args.prompt.join(" ");

    let max_iterations = args.max_iterations.unwrap_or(config.loop_.max_iterations);
    if !(MIN_ITERATIONS..=MAX_ITERATIONS).contains(&max_iterations) {
        anyhow::bail!(
            "iteration budget {max_iterations} is outside {MIN_ITERATIONS}..={MAX_ITERATIONS}"
        );
    }

    let (initial_tier, start) = match (args.model, config.escalation.initial_tier) {
        (Some(tier), _) => (tier, StartTier::Flag),
        (None, Some(tier)) => (tier, StartTier::Config),
        (None, None) => {
            let decision = Router::default().route(&TaskDescriptor::new("prompt", prompt.as_str()));
            (decision.agent, StartTier::Routed { decision })
        }
    };

    let mut settings = config.escalation.clone();
    settings.enabled |= args.escalate;
    if let Some(n) = args.escalate_after {
        settings.threshold = n;
    }
    if let Some(n) = args.max_escalations {
        settings.max_escalations = n;
    }
    if !settings.enabled && (args.escalate_after.is_some() || args.max_escalations.is_some()) {
        tracing::warn!(
            "escalation is disabled: --escalate-after and --max-escalations have no effect without --escalate"
        );
    }

    let plan = plan_escalation(&settings.with_initial_tier(initial_tier), max_iterations)
        .context("cannot build escalation plan")?;

    let loop_plan = LoopPlan {
        prompt,
        completion_phrase: args.completion_phrase.or(config.loop_.completion_phrase),
        created_at: Utc::now(),
        start,
        plan,
    };

    let plan_path = paths::plan_path(root);
    if !args.dry_run {
        io::write_json(&plan_path, &loop_plan)
            .with_context(|| format!("failed to write {}", plan_path.display()))?;
        tracing::info!(path = %plan_path.display(), "escalation plan written");
    }

    if json {
        return print_json(&loop_plan);
    }

    print_plan(&loop_plan);
    println!();
    if args.dry_run {
        println!("Dry run: nothing written.");
    } else {
        println!("Plan written to {}", plan_path.display());
    }
    println!("Run each band in a fresh session on the listed model; stop as soon as the completion phrase appears.");
    Ok(())
}

fn print_plan(lp: &LoopPlan) {
    let plan = &lp.plan;

    println!("Prompt:      {}", lp.prompt);
    match &lp.start {
        StartTier::Flag => println!("Start tier:  {} (--model)", plan.initial_tier),
        StartTier::Config => println!("Start tier:  {} (config)", plan.initial_tier),
        StartTier::Routed { decision } => println!(
            "Start tier:  {} (routed: {})",
            plan.initial_tier, decision.rationale
        ),
    }
    if plan.enabled && plan.max_escalations > 0 {
        println!(
            "Iterations:  {} (escalate every {}, at most {} step(s))",
            plan.max_iterations, plan.threshold, plan.max_escalations
        );
    } else {
        println!("Iterations:  {} (escalation off)", plan.max_iterations);
    }
    if let Some(phrase) = &lp.completion_phrase {
        println!("Completion:  \"{phrase}\"");
    }
    println!();

    let rows: Vec<Vec<String>> = plan
        .bands
        .iter()
        .enumerate()
        .map(|(i, b)| {
            vec![
                (i + 1).to_string(),
                format!("{}-{}", b.start + 1, b.end),
                b.tier.to_string(),
                format_cost(b.cost()),
            ]
        })
        .collect();
    print_table(&["BAND", "ITERATIONS", "TIER", "COST"], &["COST"], rows);
    println!();
    println!(
        "Total estimated cost: {} ({} escalation(s), ending on {})",
        format_cost(plan.total_estimated_cost),
        plan.escalation_count(),
        plan.final_tier()
    );
}
