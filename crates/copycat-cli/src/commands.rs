use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "copycat")]
#[command(about = "Find copy-paste plagiarism across student submissions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compare every submitted file and report clusters of similar files
    Detect {
        /// Directory with one extracted folder per submission
        #[arg(short, long)]
        root: Option<String>,

        /// Minimum similarity percentage (0-100) for two files to be linked
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Decimal places for similarity percentages in the text report
        #[arg(short, long)]
        precision: Option<usize>,
    },
    /// Print configuration values
    PrintConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}
