//! Run projections for a batch of scenarios from a CSV file
//!
//! Reads one scenario per row, projects them in parallel, and writes one
//! output row per scenario-year. Rows with an InitialBalance also get the
//! balance trajectory columns filled in.

use rayon::prelude::*;
use std::time::Instant;

use repayment_engine::scenario::{load_scenarios, ScenarioRecord};
use repayment_engine::{ScenarioOutcome, ScenarioRunner};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let input = args.next().unwrap_or_else(|| "scenarios.csv".to_string());
    let output = args.next().unwrap_or_else(|| "batch_output.csv".to_string());

    let start = Instant::now();
    println!("Loading scenarios from {}...", input);

    let records = load_scenarios(&input)
        .map_err(|e| anyhow::anyhow!("failed to load {}: {}", input, e))?;
    println!("Loaded {} scenarios in {:?}", records.len(), start.elapsed());

    let runner = ScenarioRunner::new();

    println!("Running projections...");
    let proj_start = Instant::now();

    let results: Vec<(u32, repayment_engine::Result<ScenarioOutcome>)> = records
        .par_iter()
        .map(|record: &ScenarioRecord| {
            let outcome = match record.initial_balance {
                Some(balance) => runner.run_with_balance(&record.scenario, balance),
                None => runner.run(&record.scenario),
            };
            (record.scenario_id, outcome)
        })
        .collect();

    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&output)?;
    writer.write_record([
        "ScenarioID",
        "Year",
        "Salary",
        "AboveThreshold",
        "AnnualRepayment",
        "MonthlyRepayment",
        "DistanceFromThreshold",
        "OpeningBalance",
        "InterestAccrued",
        "RepaymentMade",
        "ClosingBalance",
    ])?;

    let mut failures = 0usize;
    for (scenario_id, outcome) in &results {
        let outcome = match outcome {
            Ok(o) => o,
            Err(e) => {
                log::warn!("scenario {} failed: {}", scenario_id, e);
                failures += 1;
                continue;
            }
        };

        for (offset, row) in outcome.projection.years.iter().enumerate() {
            let balance_year = outcome
                .balance
                .as_ref()
                .and_then(|b| b.years.get(offset));

            let (opening, interest, repaid, closing) = match balance_year {
                Some(y) => (
                    format!("{:.8}", y.opening_balance),
                    format!("{:.8}", y.interest_accrued),
                    format!("{:.8}", y.repayment_made),
                    format!("{:.8}", y.closing_balance),
                ),
                None => (String::new(), String::new(), String::new(), String::new()),
            };

            writer.write_record([
                scenario_id.to_string(),
                row.year.to_string(),
                format!("{:.8}", row.salary),
                (row.above_threshold as u8).to_string(),
                format!("{:.8}", row.annual_repayment),
                format!("{:.8}", row.monthly_repayment),
                format!("{:.8}", row.distance_from_threshold),
                opening,
                interest,
                repaid,
                closing,
            ])?;
        }
    }
    writer.flush()?;

    println!("Output written to {}", output);

    // Print crossing milestones per scenario for spot checks
    println!("\nCrossing summary:");
    for (scenario_id, outcome) in &results {
        if let Ok(o) = outcome {
            match (o.crossing.below_threshold_initially, o.crossing.year_reached) {
                (false, _) => println!("  Scenario {:>4}: repaying from year one", scenario_id),
                (true, Some(year)) => println!(
                    "  Scenario {:>4}: crosses in {} (~{} months)",
                    scenario_id,
                    year,
                    o.crossing.months_until_crossing.unwrap_or(0)
                ),
                (true, None) => {
                    println!("  Scenario {:>4}: no crossing within horizon", scenario_id)
                }
            }
        }
    }

    if failures > 0 {
        println!("\n{} scenarios failed; see log for details", failures);
    }
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
