use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Args;
use route_core::cost::{self, format_cost, format_percent, Savings};
use route_core::router::{summarize, RoutingSummary};
use route_core::{task, Router, RoutingDecision, TaskDescriptor};
use serde::Serialize;
use std::path::Path;

#[derive(Args)]
pub struct RouteArgs {
    /// Issue id to look up in .beads/issues.jsonl
    #[arg(conflicts_with_all = ["title", "all"])]
    pub id: Option<String>,

    /// Route an ad-hoc task with this title instead of a stored issue
    #[arg(long, conflicts_with = "all")]
    pub title: Option<String>,

    /// Description for the ad-hoc task
    #[arg(long, requires = "title")]
    pub description: Option<String>,

    /// Label for the ad-hoc task (repeatable, e.g. -l agent:opus -l complexity:simple)
    #[arg(long = "label", short = 'l', requires = "title")]
    pub labels: Vec<String>,

    /// Route every open issue in the store
    #[arg(long)]
    pub all: bool,
}

#[derive(Serialize)]
struct RouteReport<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(flatten)]
    decision: &'a RoutingDecision,
    savings: Savings,
}

#[derive(Serialize)]
struct BatchReport<'a> {
    decisions: Vec<RouteReport<'a>>,
    summary: RoutingSummary,
}

pub fn run(root: &Path, args: RouteArgs, json: bool) -> anyhow::Result<()> {
    let router = Router::default();

    if args.all {
        return route_all(root, &router, json);
    }

    let task = match (args.id, args.title) {
        (Some(id), _) => task::find(root, &id)
            .with_context(|| format!("cannot route '{id}': no such issue in the store"))?,
        (None, Some(title)) => {
            let mut t = TaskDescriptor::new("ad-hoc", title);
            t.description = args.description;
            t.labels = args.labels;
            t
        }
        (None, None) => anyhow::bail!("specify an issue id, --title, or --all"),
    };

    let decision = router.route(&task);
    let report = RouteReport {
        id: &task.id,
        title: &task.title,
        decision: &decision,
        savings: cost::savings(decision.agent),
    };

    if json {
        return print_json(&report);
    }

    println!("Issue:      {}  {}", report.id, report.title);
    println!(
        "Agent:      {} ({})",
        decision.agent,
        decision.agent.class()
    );
    println!("Strategy:   {}", decision.strategy);
    println!("Confidence: {:.2}", decision.confidence);
    println!("Rationale:  {}", decision.rationale);
    println!(
        "Est. cost:  {} ({} vs {})",
        format_cost(decision.estimated_cost),
        format_percent(report.savings.savings_percent),
        report.savings.baseline
    );
    Ok(())
}

fn route_all(root: &Path, router: &Router, json: bool) -> anyhow::Result<()> {
    let tasks = task::load_all(root).context("failed to read issue store")?;
    let open = task::open_tasks(&tasks);
    let decisions: Vec<RoutingDecision> = open.iter().map(|t| router.route(t)).collect();
    let summary = summarize(&decisions);

    if json {
        let reports = open
            .iter()
            .zip(&decisions)
            .map(|(t, d)| RouteReport {
                id: &t.id,
                title: &t.title,
                decision: d,
                savings: cost::savings(d.agent),
            })
            .collect();
        return print_json(&BatchReport {
            decisions: reports,
            summary,
        });
    }

    if open.is_empty() {
        println!("No open issues.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = open
        .iter()
        .zip(&decisions)
        .map(|(t, d)| {
            vec![
                t.id.clone(),
                d.agent.to_string(),
                d.strategy.to_string(),
                format!("{:.2}", d.confidence),
                format_cost(d.estimated_cost),
                t.title.clone(),
            ]
        })
        .collect();
    print_table(
        &["ID", "TIER", "STRATEGY", "CONF", "COST", "TITLE"],
        &["CONF", "COST"],
        rows,
    );

    println!();
    println!(
        "{} issue(s): {} routed vs {} on {} ({} saved, {})",
        summary.count,
        format_cost(summary.total_cost),
        format_cost(summary.baseline_cost),
        cost::BASELINE,
        format_cost(summary.savings),
        format_percent(summary.savings_percent)
    );
    Ok(())
}
