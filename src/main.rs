//! Wildfire Dashboard - California Wildfire Incidents Explorer
//!
//! Launches the interactive dashboard, or writes a static report with `report`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use eframe::egui;
use std::path::{Path, PathBuf};
use wildfire_dashboard::data::load_incidents;
use wildfire_dashboard::gui::WildfireApp;
use wildfire_dashboard::report::ReportGenerator;

const DEFAULT_CSV: &str = "California_Fire_Incidents.csv";

#[derive(Parser)]
#[command(
    name = "wildfire-dashboard",
    version,
    about = "California wildfire incidents dashboard"
)]
struct Cli {
    /// Incident CSV to load
    #[arg(long, default_value = DEFAULT_CSV, global = true)]
    csv: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the cost charts and summary numbers without opening a window
    Report {
        /// Output directory for PNG charts and summary.json
        #[arg(short, long, default_value = "report")]
        out: PathBuf,

        /// Open the output directory when done
        #[arg(long)]
        open: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Report { out, open }) => run_report(&cli.csv, &out, open),
        None => run_dashboard(cli.csv),
    }
}

fn run_report(csv: &Path, out: &Path, open: bool) -> anyhow::Result<()> {
    let table = load_incidents(csv)
        .with_context(|| format!("Could not load incidents from {}", csv.display()))?;
    let written = ReportGenerator::generate(&table, out)
        .with_context(|| format!("Could not write report to {}", out.display()))?;
    for path in &written {
        println!("{}", path.display());
    }

    if open {
        open::that(out).with_context(|| format!("Could not open {}", out.display()))?;
    }
    Ok(())
}

fn run_dashboard(csv: PathBuf) -> anyhow::Result<()> {
    // A bad input aborts startup before any window opens
    let table = load_incidents(&csv)
        .with_context(|| format!("Could not load incidents from {}", csv.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Fire Incidents in California"),
        ..Default::default()
    };

    eframe::run_native(
        "Wildfire Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(WildfireApp::new(cc, table, csv)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard failed: {}", e))
}
