use clap::Parser;
use std::path::PathBuf;

use refrectify::config::{
    RectifyOptions, DEFAULT_CUTOFF, DEFAULT_MAX_INDEL_VARIANTS, DEFAULT_MAX_LINE_LENGTH,
    DEFAULT_MAX_REPORT_ENTRIES, DEFAULT_MIN_DEPTH, DEFAULT_REPORT_NAME,
};
use refrectify::io::fasta::LINE_WIDTH;

#[derive(Parser, Debug)]
#[command(
    name = "refrectify",
    version,
    about = "Rectify the reference (germline SNP, insertion, deletion) from an mpileup",
    long_about = None
)]
pub struct Cli {
    /// Input mpileup file (.gz accepted)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output FASTA for the rectified reference (appended to)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Original reference FASTA, indexed with `samtools faidx`
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Alternate frequency cutoff, must be above 0.5
    #[arg(short, long, default_value_t = DEFAULT_CUTOFF)]
    pub cutoff: f64,

    /// Report of rectified positions
    #[arg(long, default_value = DEFAULT_REPORT_NAME)]
    pub report: PathBuf,

    /// Optional JSON summary of the run
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Positions with fewer observations keep the reference base
    #[arg(long, default_value_t = DEFAULT_MIN_DEPTH)]
    pub min_depth: usize,

    /// Maximum distinct indel variants at one position
    #[arg(long, default_value_t = DEFAULT_MAX_INDEL_VARIANTS)]
    pub max_indel_variants: usize,

    /// Maximum number of corrections in one run
    #[arg(long, default_value_t = DEFAULT_MAX_REPORT_ENTRIES)]
    pub max_report_entries: usize,

    /// Maximum pileup line length in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LENGTH)]
    pub max_line_length: usize,

    /// Bases per FASTA line
    #[arg(long, default_value_t = LINE_WIDTH)]
    pub line_width: usize,

    /// Log every correction
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn into_options(self) -> RectifyOptions {
        RectifyOptions {
            input: self.input,
            output: self.output,
            reference: self.reference,
            report: self.report,
            summary: self.summary,
            cutoff: self.cutoff,
            min_depth: self.min_depth,
            max_indel_variants: self.max_indel_variants,
            max_report_entries: self.max_report_entries,
            max_line_length: self.max_line_length,
            line_width: self.line_width,
        }
    }
}
