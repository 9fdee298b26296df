//! Nest Egg CLI
//!
//! Estimates the odds of running out of money in retirement by replaying
//! random windows of historical returns and inflation.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use nest_egg::prompt::Prompter;
use nest_egg::request::{SimulationRequest, SimulationResponse};
use nest_egg::series::DEFAULT_DATA_PATH;
use nest_egg::{
    ChartData, EngineOptions, HistoricalData, InvestmentType, Report, RunSummary, ScenarioRunner,
    SimulationConfig,
};

#[derive(Parser, Debug)]
#[command(name = "nest_egg", version)]
#[command(about = "Monte Carlo odds of outliving a retirement portfolio", long_about = None)]
struct Cli {
    /// Directory holding the historical percent series files
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    /// Prompt for every input, with defaults in brackets
    #[arg(short, long)]
    interactive: bool,

    /// Read inputs from a JSON request file (investment form fields)
    #[arg(long, conflicts_with = "interactive")]
    request: Option<PathBuf>,

    /// Return series to sample
    #[arg(short = 't', long, value_enum, default_value_t = InvestmentType::SbcBlend)]
    investment_type: InvestmentType,

    /// Starting value of investment
    #[arg(long, default_value_t = 10_000)]
    start_value: u64,

    /// Annual pre-tax withdrawal (today's $)
    #[arg(short, long, default_value_t = 10_000)]
    withdrawal: u64,

    /// Minimum years in retirement
    #[arg(long, default_value_t = 10)]
    min_years: u32,

    /// Most likely years in retirement
    #[arg(long, default_value_t = 25)]
    most_likely_years: u32,

    /// Maximum years in retirement
    #[arg(long, default_value_t = 40)]
    max_years: u32,

    /// Number of cases to run
    #[arg(short = 'n', long, default_value_t = 50_000)]
    cases: u32,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials on a single thread
    #[arg(long)]
    sequential: bool,

    /// Write chart data (case, remaining balance) to this CSV file
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Number of leading cases to chart (default and maximum 3000)
    #[arg(long)]
    chart_limit: Option<usize>,

    /// Print the result as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn flag_config(&self) -> SimulationConfig {
        SimulationConfig {
            start_value: self.start_value,
            annual_withdrawal: self.withdrawal,
            min_years: self.min_years,
            most_likely_years: self.most_likely_years,
            max_years: self.max_years,
            trial_count: self.cases,
        }
    }

    fn inputs(&self) -> Result<(InvestmentType, SimulationConfig)> {
        if let Some(path) = &self.request {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Error reading request {}", path.display()))?;
            return Ok(SimulationRequest::from_json(&json)?.into_parts()?);
        }

        let (investment_type, config) = if self.interactive {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            prompter.collect()?
        } else {
            (self.investment_type, self.flag_config())
        };

        Ok((investment_type, config.validated()?))
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if !cli.json {
        println!("\nNote: Input data should be in percent format (e.g. 5.0 for 5%)");
    }

    let data = HistoricalData::load_from(&cli.data_dir)?;
    let (investment_type, config) = cli.inputs()?;

    let options = EngineOptions {
        seed: cli.seed,
        parallel: !cli.sequential,
    };
    info!(
        "Simulating {} cases of {} ({} years of returns)",
        config.trial_count,
        investment_type,
        data.returns_for(investment_type).len()
    );

    let runner = ScenarioRunner::new(data, options);
    let result = runner.run(investment_type, &config)?;
    let report = Report::from_result(&result).context("No outcomes generated")?;
    let chart = ChartData::new(&result, &report, cli.chart_limit);
    if let Some(path) = &cli.chart {
        chart.write_csv(path)?;
    }

    if cli.json {
        let response = SimulationResponse {
            investment_type,
            config,
            report,
            chart,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!();
    println!(
        "{}",
        RunSummary {
            investment_type,
            config: &config,
            report: &report,
        }
    );

    if let Some(path) = &cli.chart {
        println!("\n{}", chart.title);
        println!("{} written to: {}", chart.figure_name(), path.display());
    }

    Ok(())
}
