use crate::output::{print_json, print_table};
use route_core::cost::{self, format_cost, format_percent};
use route_core::Tier;
use serde::Serialize;

#[derive(Serialize)]
struct TierRow {
    tier: Tier,
    class: &'static str,
    unit_cost: f64,
    savings_percent: f64,
}

pub fn run(json: bool) -> anyhow::Result<()> {
    let rows: Vec<TierRow> = Tier::all()
        .iter()
        .map(|&tier| TierRow {
            tier,
            class: tier.class(),
            unit_cost: cost::unit_cost(tier),
            savings_percent: cost::savings(tier).savings_percent,
        })
        .collect();

    if json {
        return print_json(&rows);
    }

    print_table(
        &["TIER", "CLASS", "UNIT COST", "VS BASELINE"],
        &["UNIT COST", "VS BASELINE"],
        rows.iter()
            .map(|r| {
                vec![
                    r.tier.to_string(),
                    r.class.to_string(),
                    format_cost(r.unit_cost),
                    format_percent(r.savings_percent),
                ]
            })
            .collect(),
    );
    println!();
    println!("Baseline: {} (the default route)", cost::BASELINE);
    Ok(())
}
