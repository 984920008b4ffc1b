//! Repayment Engine CLI
//!
//! Command-line interface for running a single repayment projection

use chrono::Datelike;
use clap::Parser;

use repayment_engine::{PlanId, Scenario, ScenarioRunner};

/// Project UK student-loan repayments for one salary scenario
#[derive(Debug, Parser)]
#[command(name = "repayment_engine", about)]
struct Args {
    /// Annual salary today
    #[arg(long)]
    salary: f64,

    /// Assumed annual salary growth percentage (may be negative)
    #[arg(long, default_value_t = 0.0)]
    growth: f64,

    /// Repayment plan: plan1, plan2, plan4, plan5, postgraduate
    #[arg(long, default_value = "plan2")]
    plan: String,

    /// First projected calendar year (defaults to the current year)
    #[arg(long)]
    start_year: Option<i32>,

    /// Projection horizon in years
    #[arg(long, default_value_t = 10)]
    horizon: u32,

    /// Opening loan balance; enables the interest/balance simulation
    #[arg(long)]
    balance: Option<f64>,

    /// Second plan for a combined two-loan view
    #[arg(long)]
    with_plan: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start_year = args
        .start_year
        .unwrap_or_else(|| chrono::Utc::now().year());

    let runner = ScenarioRunner::new();
    let plan = PlanId::parse(&args.plan)?;
    let scenario = Scenario::with_horizon(args.salary, args.growth, plan, start_year, args.horizon);

    let outcome = match args.balance {
        Some(balance) => runner.run_with_balance(&scenario, balance)?,
        None => runner.run(&scenario)?,
    };

    println!("Repayment projection: {}", outcome.projection.plan_name);
    println!(
        "Salary £{:.2}, growth {:.1}%/yr, {} years from {}\n",
        args.salary, args.growth, args.horizon, start_year
    );

    println!(
        "{:>6} {:>12} {:>7} {:>12} {:>10} {:>12}",
        "Year", "Salary", "Above", "Annual", "Monthly", "Distance"
    );
    println!("{}", "-".repeat(64));
    for row in &outcome.projection.years {
        println!(
            "{:>6} {:>12.2} {:>7} {:>12.2} {:>10.2} {:>12.2}",
            row.year,
            row.salary,
            if row.above_threshold { "yes" } else { "no" },
            row.annual_repayment,
            row.monthly_repayment,
            row.distance_from_threshold,
        );
    }

    let crossing = &outcome.crossing;
    println!();
    if !crossing.below_threshold_initially {
        println!("Already at or above the repayment threshold; deductions apply from year one.");
    } else if let (Some(year), Some(months)) = (crossing.year_reached, crossing.months_until_crossing)
    {
        println!(
            "Threshold reached in {} (~{} months in, salary £{:.2}).",
            year,
            months,
            crossing.salary_at_crossing.unwrap_or(0.0),
        );
    } else {
        println!("No threshold crossing predicted within the horizon.");
    }

    if let Some(balance) = &outcome.balance {
        println!("\nBalance trajectory:");
        println!(
            "{:>6} {:>14} {:>12} {:>12} {:>14}",
            "Offset", "Opening", "Interest", "Repaid", "Closing"
        );
        println!("{}", "-".repeat(62));
        for y in &balance.years {
            println!(
                "{:>6} {:>14.2} {:>12.2} {:>12.2} {:>14.2}",
                y.year_offset, y.opening_balance, y.interest_accrued, y.repayment_made, y.closing_balance,
            );
        }

        let summary = balance.summary();
        println!(
            "\nOver {} years: £{:.2} interest accrued, £{:.2} repaid, final balance £{:.2}{}",
            summary.years_simulated,
            summary.total_interest,
            summary.total_repaid,
            summary.final_balance,
            if summary.written_off { " (written off)" } else { "" },
        );
    }

    if let Some(second) = &args.with_plan {
        let plan_b = PlanId::parse(second)?;
        let combined = runner.run_combined(&scenario, plan, plan_b)?;

        println!("\nCombined deductions ({} + {}):", plan, plan_b);
        println!(
            "{:>6} {:>12} {:>12} {:>12} {:>10}",
            "Year", "Loan A", "Loan B", "Total", "Marginal"
        );
        println!("{}", "-".repeat(56));
        for row in &combined {
            println!(
                "{:>6} {:>12.2} {:>12.2} {:>12.2} {:>9.0}%",
                row.year,
                row.repayment_a,
                row.repayment_b,
                row.total_repayment,
                row.combined_marginal_rate * 100.0,
            );
        }
    }

    let summary = outcome.projection.summary();
    println!(
        "\nSummary: £{:.2} repaid over {} years ({} above threshold).",
        summary.total_repaid, summary.horizon_years, summary.years_above_threshold,
    );

    Ok(())
}
