//! Command Line Interface (CLI) arguments.

use std::path::PathBuf;

use clap::Parser;

/// AHS accessibility prevalence command line interface
#[derive(Clone, Debug, Parser)]
pub struct CommandLineArgs {
    /// Path to the AHS national microdata CSV extract
    #[arg(long, env = "AHS_PREVALENCE_INPUT_FILE")]
    pub input_file: PathBuf,
    /// Directory into which the summary artifacts are written
    #[arg(long, default_value = "processed", env = "AHS_PREVALENCE_OUTPUT_DIR")]
    pub output_dir: PathBuf,
    /// Survey year recorded in the metadata artifact
    #[arg(long, default_value_t = 2019, env = "AHS_PREVALENCE_SURVEY_YEAR")]
    pub survey_year: u16,
}

/// Returns parsed command line arguments.
pub fn parse() -> CommandLineArgs {
    CommandLineArgs::parse()
}
