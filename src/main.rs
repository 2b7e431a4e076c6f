//! School ROI CLI
//!
//! Command-line interface for running ROI projections

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use school_roi::assumptions::AssumptionsInput;
use school_roi::report::{calculate_with, RoiReport};
use school_roi::scenario::{NamedScenario, ScenarioRunner, DEFAULT_ADOPTION_MULTIPLIERS};
use school_roi::Assumptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Project the return on investment of an AI tool for a school
#[derive(Debug, Parser)]
#[command(name = "school-roi", version, about)]
struct Cli {
    /// Assumptions JSON file, or "-" for stdin. All defaults when omitted
    input: Option<PathBuf>,

    /// Base assumptions JSON resolved over the defaults before the input and scenarios
    #[arg(long)]
    base: Option<PathBuf>,

    /// Output format for a single projection
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, conflicts_with_all = ["scenarios", "sweep"])]
    format: OutputFormat,

    /// Also write the rounded annual breakdown to this CSV file
    #[arg(long, conflicts_with_all = ["scenarios", "sweep"])]
    csv: Option<PathBuf>,

    /// JSON array of {"name": ..., "assumptions": {...}} scenarios to run as a batch
    #[arg(long, conflicts_with = "input")]
    scenarios: Option<PathBuf>,

    /// Print an adoption sensitivity table instead of a single projection
    #[arg(long, conflicts_with_all = ["input", "scenarios"])]
    sweep: bool,
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let mut text = String::new();
    if path.as_os_str() == "-" {
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read assumptions from stdin")?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut text))
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_report(report: &RoiReport) {
    let inputs = &report.inputs_used;
    println!("School AI ROI Projection");
    println!("========================\n");
    println!("  Teachers:             {}", inputs.assumptions.workforce.teachers);
    println!("  Pricing:              {}", inputs.assumptions.pricing.pricing_mode);
    println!("  Hourly rate:          £{:.2}", inputs.hourly_rate);
    println!("  Daily rate:           £{:.2}", inputs.daily_rate);
    println!("  Baseline supply cost: £{:.2}", inputs.baseline_supply_cost);
    println!();

    println!(
        "{:>4} {:>8} {:>14} {:>12} {:>12} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "Year", "Adoption", "Productivity", "Absence", "Retention", "Benefits", "Costs", "Net", "NPV", "Cumulative"
    );
    println!("{}", "-".repeat(130));
    for row in &report.annual_breakdown {
        println!(
            "{:>4} {:>7.0}% {:>14.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2} {:>14.2}",
            row.year,
            row.adoption_rate * 100.0,
            row.productivity_savings,
            row.absence_savings,
            row.retention_savings,
            row.year_benefits,
            row.year_costs,
            row.net_benefit,
            row.npv,
            row.cumulative_net_benefit,
        );
    }

    let summary = &report.summary;
    println!("\nSummary:");
    println!("  Total benefits: £{:.2}", summary.total_benefits);
    println!("  Total costs:    £{:.2}", summary.total_costs);
    println!("  Net benefit:    £{:.2}", summary.net_benefit);
    println!("  ROI:            {:.1}%", summary.roi_percent);
    println!("  NPV:            £{:.2}", summary.npv_total);
    match summary.payback_year {
        Some(year) => println!("  Payback:        year {}", year),
        None => println!("  Payback:        not within the horizon"),
    }
}

fn write_csv(path: &Path, report: &RoiReport) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create {}", path.display()))?;
    for row in &report.annual_breakdown {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn run_scenarios(runner: &ScenarioRunner, path: &Path) -> anyhow::Result<()> {
    let scenarios: Vec<NamedScenario> = serde_json::from_value(read_json(path)?)
        .with_context(|| format!("{} is not a list of named scenarios", path.display()))?;

    println!(
        "{:<24} {:>14} {:>14} {:>10} {:>14} {:>8}",
        "Scenario", "Benefits", "Costs", "ROI %", "NPV", "Payback"
    );
    println!("{}", "-".repeat(89));

    let outcomes = runner.run_batch(&scenarios);
    let mut failures = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(projection) => {
                let s = &projection.summary;
                println!(
                    "{:<24} {:>14.2} {:>14.2} {:>10.1} {:>14.2} {:>8}",
                    outcome.name,
                    s.total_benefits,
                    s.total_costs,
                    s.roi_percent,
                    s.npv_total,
                    s.payback_year.map_or_else(|| "-".to_string(), |y| y.to_string()),
                );
            }
            Err(e) => {
                failures += 1;
                println!("{:<24} error: {}", outcome.name, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} scenarios failed", failures, outcomes.len());
    }
    Ok(())
}

fn run_sweep(runner: &ScenarioRunner) -> anyhow::Result<()> {
    let points = runner.adoption_sweep(&DEFAULT_ADOPTION_MULTIPLIERS)?;

    println!("Adoption sensitivity (base ramp scaled, capped at 100%)\n");
    println!(
        "{:>10} {:>14} {:>14} {:>10} {:>14} {:>8}",
        "Multiplier", "Benefits", "Costs", "ROI %", "NPV", "Payback"
    );
    println!("{}", "-".repeat(75));
    for p in &points {
        println!(
            "{:>9.2}x {:>14.2} {:>14.2} {:>10.1} {:>14.2} {:>8}",
            p.adoption_multiplier,
            p.total_benefits,
            p.total_costs,
            p.roi_percent,
            p.npv_total,
            p.payback_year.map_or_else(|| "-".to_string(), |y| y.to_string()),
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let base = match &cli.base {
        Some(path) => Assumptions::from_json(&read_json(path)?)
            .with_context(|| format!("Invalid base assumptions in {}", path.display()))?,
        None => Assumptions::default(),
    };

    if let Some(path) = &cli.scenarios {
        return run_scenarios(&ScenarioRunner::with_assumptions(base), path);
    }
    if cli.sweep {
        return run_sweep(&ScenarioRunner::with_assumptions(base));
    }

    let overrides = match &cli.input {
        Some(path) => AssumptionsInput::from_json(&read_json(path)?)?,
        None => AssumptionsInput::default(),
    };
    let assumptions = overrides.resolve_over(&base)?;
    let report = calculate_with(&assumptions)?;

    match cli.format {
        OutputFormat::Table => print_report(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(path) = &cli.csv {
        write_csv(path, &report)?;
        eprintln!("Annual breakdown written to: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["school-roi", "inputs.json", "--format", "json", "--csv", "out.csv"]);
        assert_eq!(cli.input, Some(PathBuf::from("inputs.json")));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.csv, Some(PathBuf::from("out.csv")));
        assert!(!cli.sweep);
    }

    #[test]
    fn test_sweep_conflicts_with_input() {
        assert!(Cli::try_parse_from(["school-roi", "inputs.json", "--sweep"]).is_err());
    }

    #[test]
    fn test_single_projection_flags_rejected_for_batches() {
        assert!(Cli::try_parse_from(["school-roi", "--sweep", "--format", "json"]).is_err());
        assert!(Cli::try_parse_from(["school-roi", "--sweep", "--csv", "out.csv"]).is_err());
        assert!(Cli::try_parse_from(["school-roi", "--scenarios", "s.json", "--csv", "out.csv"]).is_err());
        assert!(Cli::try_parse_from(["school-roi", "--scenarios", "s.json", "--format", "table"]).is_err());

        let cli = Cli::try_parse_from(["school-roi", "--sweep"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Table);
    }
}
