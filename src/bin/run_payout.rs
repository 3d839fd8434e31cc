//! Compute sales incentive payouts from a raw deal export
//!
//! Reads a CSV of deal rows (header row first, fuzzy column names),
//! runs the full payout pipeline, writes the per-person report CSV, and
//! prints the run's KPI summary.

use anyhow::Context;
use clap::Parser;
use incentive_engine::deal::load_deals;
use incentive_engine::{
    CourseTaxonomy, EngineParams, PatternClassifier, PayoutEngine, SlabTable,
};
use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_payout", about = "Sales incentive payout run")]
struct Args {
    /// Input CSV of raw deal rows
    input: PathBuf,

    /// JSON slab profile table; uses the builtin team table when omitted
    #[arg(long)]
    profiles: Option<PathBuf>,

    /// JSON course taxonomy; uses the builtin catalog when omitted
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// JSON run parameters (GST divisor, block size, rates, target,
    /// penalty rate); defaults when omitted
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long, default_value = "payout_report.csv")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let deals = load_deals(&args.input)
        .with_context(|| format!("loading deals from {}", args.input.display()))?;
    println!("Loaded {} deals in {:?}", deals.len(), start.elapsed());

    let slab_table = match &args.profiles {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening profile table {}", path.display()))?;
            SlabTable::from_json_reader(file)
                .with_context(|| format!("parsing profile table {}", path.display()))?
        }
        None => SlabTable::default_team(),
    };

    let taxonomy = match &args.taxonomy {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening taxonomy {}", path.display()))?;
            CourseTaxonomy::from_json_reader(file)
                .with_context(|| format!("parsing taxonomy {}", path.display()))?
        }
        None => CourseTaxonomy::default_catalog(),
    };

    let params = match &args.params {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening params {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("parsing params {}", path.display()))?
        }
        None => EngineParams::default(),
    };

    let engine = PayoutEngine::new(slab_table, Box::new(PatternClassifier::new(&taxonomy)), params);

    println!("Running payout computation...");
    let run_start = Instant::now();
    let report = engine.run(&deals);
    println!("Computed {} rows in {:?}", report.rows.len(), run_start.elapsed());

    let output = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    report.write_csv(output)?;
    println!("Report written to {}", args.output.display());

    let kpis = report.kpis();
    println!("\nPayout Summary:");
    println!("  Total Net Revenue:     ₹{:.0}", kpis.total_net_revenue);
    println!("  Total First Incentive: ₹{:.2}", kpis.total_first_incentive);
    println!("  Total Final Incentive: ₹{:.2}", kpis.total_final_incentive);
    println!("  Eligible People:       {}", kpis.eligible_people);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
