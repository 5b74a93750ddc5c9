use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "pcrforge - design synthetic DNA templates with primer and probe sites for quantitative PCR.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used for batch generation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for one or more templates satisfying the design rules.
    Generate(GenerateArgs),
    /// Sample random sequences and summarise their melting temperature and GC content.
    Analyze(AnalyzeArgs),
    /// Score an existing template against the design rules.
    Score(ScoreArgs),
}

/// Template geometry overrides shared by `generate` and `score`.
#[derive(Args, Debug, Default, Clone)]
pub struct LayoutArgs {
    /// Total template length in bases.
    #[arg(long, value_name = "INT")]
    pub seq_length: Option<usize>,

    /// Length of each primer.
    #[arg(long, value_name = "INT")]
    pub primer_length: Option<usize>,

    /// Length of the probe.
    #[arg(long, value_name = "INT")]
    pub probe_length: Option<usize>,

    /// Bases between the probe and the reverse primer.
    #[arg(long, value_name = "INT")]
    pub probe_gap: Option<usize>,

    /// Target primer melting temperature in °C.
    #[arg(long = "primer-melt", value_name = "FLOAT")]
    pub target_primer_tm: Option<f64>,
}

/// Design constraint overrides shared by `generate` and `score`.
#[derive(Args, Debug, Default, Clone)]
pub struct ConstraintArgs {
    /// Minimum overall GC content in percent.
    #[arg(long, value_name = "FLOAT")]
    pub overall_gc_min: Option<f64>,
    /// Maximum overall GC content in percent.
    #[arg(long, value_name = "FLOAT")]
    pub overall_gc_max: Option<f64>,
    /// Minimum primer GC content in percent.
    #[arg(long, value_name = "FLOAT")]
    pub primer_gc_min: Option<f64>,
    /// Maximum primer GC content in percent.
    #[arg(long, value_name = "FLOAT")]
    pub primer_gc_max: Option<f64>,
    /// Allowed deviation of primer Tm from the target, in °C.
    #[arg(long, value_name = "FLOAT")]
    pub primer_tm_tolerance: Option<f64>,
    /// Minimum GC content of the primer 3' clamp windows, in percent.
    #[arg(long, value_name = "FLOAT")]
    pub gc_clamp_min: Option<f64>,
    /// Maximum GC content of the primer 3' clamp windows, in percent.
    #[arg(long, value_name = "FLOAT")]
    pub gc_clamp_max: Option<f64>,
    /// Minimum probe Tm above the primer target, in °C.
    #[arg(long, value_name = "FLOAT")]
    pub probe_tm_delta_min: Option<f64>,
    /// Maximum probe Tm above the primer target, in °C.
    #[arg(long, value_name = "FLOAT")]
    pub probe_tm_delta_max: Option<f64>,
    /// Minimum probe GC content in percent.
    #[arg(long, value_name = "FLOAT")]
    pub probe_gc_min: Option<f64>,
    /// Maximum probe GC content in percent.
    #[arg(long, value_name = "FLOAT")]
    pub probe_gc_max: Option<f64>,
    /// Longest allowed run of one base.
    #[arg(long, value_name = "INT")]
    pub max_run_length: Option<usize>,
    /// Length of the 3' ends that must be unique across strands and primers.
    #[arg(long, value_name = "INT")]
    pub unique_end_length: Option<usize>,
    /// Window length for self-complementarity checks.
    #[arg(long, value_name = "INT")]
    pub max_secondary_length: Option<usize>,
}

/// Optimizer overrides for `generate`.
#[derive(Args, Debug, Default, Clone)]
pub struct SearchArgs {
    /// Maximum optimization iterations per template.
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Cost at or below which a template is accepted.
    #[arg(long, value_name = "FLOAT")]
    pub target_cost: Option<f64>,

    /// Use greedy acceptance even if the config file defines annealing.
    #[arg(long)]
    pub no_annealing: bool,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of templates to generate.
    #[arg(short = 'n', long, default_value_t = 1, value_name = "INT")]
    pub count: usize,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub layout: LayoutArgs,

    #[command(flatten)]
    pub constraints: ConstraintArgs,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Print the final cost and rule violations of each template.
    #[arg(short, long)]
    pub report: bool,

    /// With --report, list every rule rather than only violations.
    #[arg(long, requires = "report")]
    pub all_rules: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S search.max-iterations=5000
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Length of each random sequence.
    #[arg(short, long, default_value_t = 22, value_name = "INT")]
    pub length: usize,

    /// Number of random sequences to sample.
    #[arg(short, long, default_value_t = 10_000, value_name = "INT")]
    pub samples: usize,

    /// Write every sample to a CSV file.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Template sequence to score (A, C, G, T; case-insensitive).
    #[arg(required = true, value_name = "SEQUENCE")]
    pub sequence: String,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub layout: LayoutArgs,

    #[command(flatten)]
    pub constraints: ConstraintArgs,

    /// List every rule rather than only violations.
    #[arg(long)]
    pub all_rules: bool,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
