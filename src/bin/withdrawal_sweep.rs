//! Sweep annual withdrawals for one investment type
//!
//! Every withdrawal level replays the same trial draws, so the odds column
//! only moves because of the withdrawal. Outputs one CSV row per level.
//!
//! Usage: cargo run --release --bin withdrawal_sweep -- --start-value 1000000 --from 20000 --to 80000 --step 5000

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use rayon::prelude::*;

use nest_egg::series::DEFAULT_DATA_PATH;
use nest_egg::simulation::{draw_trials, RandomSampler};
use nest_egg::{EngineOptions, HistoricalData, InvestmentType, Report, SimulationConfig, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "withdrawal_sweep", about = "Bankruptcy odds across a range of withdrawals")]
struct Args {
    #[arg(long, default_value = DEFAULT_DATA_PATH)]
    data_dir: PathBuf,

    #[arg(short = 't', long, value_enum, default_value_t = InvestmentType::SbcBlend)]
    investment_type: InvestmentType,

    #[arg(long, default_value_t = 1_000_000)]
    start_value: u64,

    /// First withdrawal level
    #[arg(long, default_value_t = 20_000)]
    from: u64,

    /// Last withdrawal level (inclusive)
    #[arg(long, default_value_t = 80_000)]
    to: u64,

    #[arg(long, default_value_t = 5_000)]
    step: u64,

    #[arg(long, default_value_t = 10)]
    min_years: u32,

    #[arg(long, default_value_t = 25)]
    most_likely_years: u32,

    #[arg(long, default_value_t = 40)]
    max_years: u32,

    #[arg(short = 'n', long, default_value_t = 50_000)]
    cases: u32,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, default_value = "withdrawal_sweep.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.step == 0 || args.from > args.to {
        bail!("Withdrawal range needs step > 0 and from <= to");
    }

    let start = Instant::now();
    let data = HistoricalData::load_from(&args.data_dir)?;
    let returns = data.returns_for(args.investment_type);

    let base = SimulationConfig {
        start_value: args.start_value,
        annual_withdrawal: args.from,
        min_years: args.min_years,
        most_likely_years: args.most_likely_years,
        max_years: args.max_years,
        trial_count: args.cases,
    }
    .validated()?;
    returns.ensure_non_empty()?;

    let mut sampler = RandomSampler::from_seed(base.duration_range(), args.seed)?;
    let draws = draw_trials(&mut sampler, base.trial_count as usize, returns.len());

    // Levels run in parallel; trials within a level stay on one thread
    let engine = SimulationEngine::new(EngineOptions {
        parallel: false,
        ..Default::default()
    });
    let withdrawals: Vec<u64> = (args.from..=args.to).step_by(args.step as usize).collect();

    println!(
        "Running {} withdrawal levels x {} cases ({})...",
        withdrawals.len(),
        base.trial_count,
        args.investment_type
    );

    let rows: Vec<(u64, Report)> = withdrawals
        .par_iter()
        .map(|&withdrawal| -> Result<(u64, Report)> {
            let config = base.with_withdrawal(withdrawal);
            let result = engine.run_draws(&config, &draws, returns, &data.inflation)?;
            let report = Report::from_result(&result).context("No outcomes generated")?;
            Ok((withdrawal, report))
        })
        .collect::<Result<_>>()?;

    let mut file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    writeln!(file, "Withdrawal,BankruptcyPct,Average,Median,Best,Worst")?;
    for (withdrawal, report) in &rows {
        writeln!(
            file,
            "{},{:.1},{},{},{},{}",
            withdrawal, report.bankruptcy_pct, report.average, report.median, report.best, report.worst
        )?;
    }

    info!("Sweep finished in {:?}", start.elapsed());
    println!("Output written to {}", args.output.display());
    for (withdrawal, report) in &rows {
        println!("  ${:>9}: {:>5.1}% bankrupt", withdrawal, report.bankruptcy_pct);
    }

    Ok(())
}
