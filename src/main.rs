use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

use lipid_cohort::{
    ExtractionStage, FileTableStore, PipelineConfig, RiskStage, StudyContext, TableFormat,
    run_pipeline,
};

#[derive(Parser)]
#[command(name = "lipid-cohort")]
#[command(about = "Cholesterol extraction and ASCVD risk estimation for clinic exports")]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConfigOverrides {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Root directory of the input tables
    #[arg(long, global = true)]
    input_dir: Option<PathBuf>,
    /// Root directory of the intermediate tables
    #[arg(long, global = true)]
    intermediates_dir: Option<PathBuf>,
    /// Root directory of the output tables
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
    /// Table format (csv or parquet)
    #[arg(long, global = true)]
    format: Option<TableFormat>,
    /// Year ages are computed at
    #[arg(long, global = true)]
    reference_year: Option<i32>,
    /// Skip writing the cohort and consult intermediates
    #[arg(long, global = true)]
    no_intermediates: bool,
    /// Do not draw progress bars
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract cholesterol records for a community
    Extract {
        /// Community directory name
        community: String,
    },
    /// Compute 10-year ASCVD risk from extracted records
    Ascvd {
        /// Community directory name
        community: String,
    },
    /// Run extraction and risk estimation in sequence
    Run {
        /// Community directory name
        community: String,
    },
}

impl ConfigOverrides {
    fn resolve(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        if let Some(dir) = &self.input_dir {
            config.input_dir.clone_from(dir);
        }
        if let Some(dir) = &self.intermediates_dir {
            config.intermediates_dir.clone_from(dir);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(format) = self.format {
            config.table_format = format;
        }
        if self.reference_year.is_some() {
            config.reference_year = self.reference_year;
        }
        if self.no_intermediates {
            config.write_intermediates = false;
        }
        if self.no_progress {
            config.show_progress = false;
        }
        Ok(config)
    }
}

fn context(config: &PipelineConfig, community: &str) -> anyhow::Result<StudyContext> {
    config
        .context(community)
        .context("Invalid run configuration")
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.overrides.resolve()?;
    let store = FileTableStore::from_config(&config);
    let start = Instant::now();

    match cli.command {
        Commands::Extract { community } => {
            let ctx = context(&config, &community)?;
            info!("{config}");
            let output = ExtractionStage::new()
                .run(&ctx, &store, &store)
                .with_context(|| format!("Extraction failed for {community}"))?;
            info!(
                "Wrote {} consolidated records to {}",
                output.consolidated.len(),
                ctx.consolidated_table().display()
            );
        }
        Commands::Ascvd { community } => {
            let ctx = context(&config, &community)?;
            info!("{config}");
            let output = RiskStage
                .run(&ctx, &store, &store)
                .with_context(|| format!("Risk estimation failed for {community}"))?;
            info!(
                "Wrote {} records to {}",
                output.scored.len(),
                ctx.risk_output_table().display()
            );
        }
        Commands::Run { community } => {
            let ctx = context(&config, &community)?;
            info!("{config}");
            let (extraction, risk) = run_pipeline(&ctx, &store, &store)
                .with_context(|| format!("Pipeline failed for {community}"))?;
            info!(
                "{} patients with DM or HTN, {} with cholesterol data, {} scored",
                extraction.stats.cohort_patients,
                extraction.stats.consolidated_records,
                risk.stats.scored
            );
        }
    }

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}
