//! Configuration for the lipid cohort pipeline.
//!
//! Configuration is resolved once at startup. The community being processed is the only
//! run-specific value; it is validated into a [`StudyContext`] from which every table
//! location is derived, and that context is passed explicitly to each stage.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::algorithm::risk::{RiskAssumptions, RiskSettings};
use crate::error::util::safe_read_to_string;
use crate::error::{PipelineError, Result};
use crate::schema::DateFormatConfig;

/// Default number of rows per batch when reading tables
pub const DEFAULT_BATCH_SIZE: usize = 8192;

/// Environment variable overriding the batch size
pub const BATCH_SIZE_ENV: &str = "LIPID_COHORT_BATCH_SIZE";

const PATIENTS_TABLE: &str = "Pacientes";
const CONSULTS_TABLE: &str = "Consultas";
const COHORT_TABLE: &str = "has-dm-or-htn";
const FOCUS_CONSULTS_TABLE: &str = "all-focus-pt-consults";
const HDL_CONSULTS_TABLE: &str = "has-hdl-data";
const CONSOLIDATED_TABLE: &str = "ascvd-input";
const GAP_TABLE: &str = "no-colesterol-data";
const RISK_OUTPUT_TABLE: &str = "ascvd-output";
const STATS_FILE: &str = "col-stats.txt";

/// Storage format of the tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Comma separated values with a header row
    #[default]
    Csv,
    /// Apache Parquet
    Parquet,
}

impl TableFormat {
    /// File extension for this format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// Detect the format from a file extension
    ///
    /// # Errors
    /// Returns [`PipelineError::UnsupportedFormat`] for unknown or missing extensions
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        extension
            .parse()
            .map_err(|_| PipelineError::UnsupportedFormat(path.display().to_string()))
    }
}

impl FromStr for TableFormat {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" | "pq" => Ok(Self::Parquet),
            other => Err(PipelineError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Configuration for a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Root of the per-community input tables
    pub input_dir: PathBuf,
    /// Root of the per-community intermediate tables
    pub intermediates_dir: PathBuf,
    /// Root of the per-community output tables
    pub output_dir: PathBuf,
    /// Storage format of every table
    pub table_format: TableFormat,
    /// Whether to persist the cohort and consult intermediates
    pub write_intermediates: bool,
    /// Whether to draw progress bars on the console
    pub show_progress: bool,
    /// Rows per batch when reading tables
    pub batch_size: usize,
    /// Year ages are computed at; the current year when unset
    pub reference_year: Option<i32>,
    /// Formats tried when parsing visit dates
    pub date_formats: DateFormatConfig,
    /// Risk inputs missing from the clinic export
    pub risk: RiskAssumptions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("Input CSVs"),
            intermediates_dir: PathBuf::from("Intermediates"),
            output_dir: PathBuf::from("Output"),
            table_format: TableFormat::Csv,
            write_intermediates: true,
            show_progress: true,
            batch_size: DEFAULT_BATCH_SIZE,
            reference_year: None,
            date_formats: DateFormatConfig::default(),
            risk: RiskAssumptions::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "pipeline configuration")?;
        let config = serde_json::from_str(&content)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate the community and build the run context
    ///
    /// # Errors
    /// Returns [`PipelineError::Config`] when the community is empty or is not a plain name
    pub fn context(&self, community: &str) -> Result<StudyContext> {
        let community = community.trim();
        if community.is_empty() {
            return Err(PipelineError::config(
                "Please supply a value for \"community\"",
            ));
        }
        if community.contains(['/', '\\']) || community == "." || community == ".." {
            return Err(PipelineError::config(format!(
                "Community \"{community}\" must be a plain directory name"
            )));
        }
        if self.batch_size == 0 {
            return Err(PipelineError::config("batch_size must be greater than zero"));
        }

        Ok(StudyContext {
            community: community.to_string(),
            config: self.clone(),
        })
    }

    /// Batch size, honouring the environment override
    #[must_use]
    pub fn effective_batch_size(&self) -> usize {
        std::env::var(BATCH_SIZE_ENV)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(self.batch_size)
    }

    /// Year ages are computed at
    #[must_use]
    pub fn reference_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}

impl fmt::Display for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pipeline Configuration:")?;
        writeln!(f, "  Input Directory: {}", self.input_dir.display())?;
        writeln!(f, "  Intermediates Directory: {}", self.intermediates_dir.display())?;
        writeln!(f, "  Output Directory: {}", self.output_dir.display())?;
        writeln!(f, "  Table Format: {}", self.table_format)?;
        writeln!(f, "  Write Intermediates: {}", self.write_intermediates)?;
        writeln!(f, "  Reference Year: {}", self.reference_year())?;
        write!(
            f,
            "  Risk Assumptions: black={}, smoker={}",
            self.risk.black, self.risk.smoker
        )
    }
}

/// The community being processed together with the configuration
///
/// Every table location is a function of this value.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyContext {
    community: String,
    config: PipelineConfig,
}

impl StudyContext {
    /// Community name
    #[must_use]
    pub fn community(&self) -> &str {
        &self.community
    }

    /// Run configuration
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn table_in(&self, root: &Path, name: &str) -> PathBuf {
        root.join(&self.community)
            .join(format!("{name}.{}", self.config.table_format.extension()))
    }

    /// Patient table
    #[must_use]
    pub fn patients_table(&self) -> PathBuf {
        self.table_in(&self.config.input_dir, PATIENTS_TABLE)
    }

    /// Consult table
    #[must_use]
    pub fn consults_table(&self) -> PathBuf {
        self.table_in(&self.config.input_dir, CONSULTS_TABLE)
    }

    /// Cohort patients
    #[must_use]
    pub fn cohort_table(&self) -> PathBuf {
        self.table_in(&self.config.intermediates_dir, COHORT_TABLE)
    }

    /// Consults of cohort patients, before enrichment
    #[must_use]
    pub fn focus_consults_table(&self) -> PathBuf {
        self.table_in(&self.config.intermediates_dir, FOCUS_CONSULTS_TABLE)
    }

    /// Enriched consults with HDL evidence
    #[must_use]
    pub fn hdl_consults_table(&self) -> PathBuf {
        self.table_in(&self.config.intermediates_dir, HDL_CONSULTS_TABLE)
    }

    /// Consolidated records, input of the risk stage
    #[must_use]
    pub fn consolidated_table(&self) -> PathBuf {
        self.table_in(&self.config.output_dir, CONSOLIDATED_TABLE)
    }

    /// Cohort patients without lab evidence
    #[must_use]
    pub fn gap_table(&self) -> PathBuf {
        self.table_in(&self.config.output_dir, GAP_TABLE)
    }

    /// Consolidated records with risk estimates
    #[must_use]
    pub fn risk_output_table(&self) -> PathBuf {
        self.table_in(&self.config.output_dir, RISK_OUTPUT_TABLE)
    }

    /// One-line gap statistics file
    #[must_use]
    pub fn stats_file(&self) -> PathBuf {
        self.config.output_dir.join(&self.community).join(STATS_FILE)
    }

    /// Settings of the risk stage
    #[must_use]
    pub fn risk_settings(&self) -> RiskSettings {
        RiskSettings {
            reference_year: self.config.reference_year(),
            assumptions: self.config.risk,
        }
    }
}
