//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Reusable API connection arguments
#[derive(Debug, Clone, Args)]
pub struct ApiArgs {
    /// Base URL of the air-quality API, or use AIRDASH_URL env var
    #[arg(short, long, env = "AIRDASH_URL")]
    pub url: Option<String>,

    /// Request timeout in seconds
    #[arg(short = 'T', long, default_value = "10")]
    pub timeout: u64,
}

/// Reusable day/time-window selection arguments
#[derive(Debug, Clone, Args)]
pub struct WindowArgs {
    /// Calendar day to inspect (YYYY-MM-DD, default: today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Window start time of day (HH:MM)
    #[arg(long, default_value = "00:00")]
    pub from: String,

    /// Window end time of day (HH:MM)
    #[arg(long, default_value = "23:59")]
    pub to: String,

    /// Metrics to display - comma-separated (co2,nh3,benzene,lpg,co), default all
    #[arg(short, long, value_delimiter = ',')]
    pub metrics: Vec<String>,
}

/// Reusable output format arguments
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Omit header row in CSV output (useful for appending)
    #[arg(long)]
    pub no_header: bool,
}

#[derive(Parser)]
#[command(name = "airdash")]
#[command(author, version, about = "CLI dashboard for an air-quality station API", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output as JSON (shorthand for --format json)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output compact JSON (no pretty-printing)
    #[arg(long, global = true)]
    pub compact: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// One-line air-quality verdict from the latest reading
    Status {
        #[command(flatten)]
        api: ApiArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show the most recent reading in full
    Latest {
        #[command(flatten)]
        api: ApiArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List readings inside a day/time window
    Readings {
        #[command(flatten)]
        api: ApiArgs,

        #[command(flatten)]
        window: WindowArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Averaged time series over a day/time window
    Series {
        #[command(flatten)]
        api: ApiArgs,

        #[command(flatten)]
        window: WindowArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List threshold exceedances across the whole dataset
    Critical {
        #[command(flatten)]
        api: ApiArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Continuously poll the latest reading
    Watch {
        #[command(flatten)]
        api: ApiArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Polling interval in seconds
        #[arg(short, long, default_value = "60")]
        interval: u64,

        /// Number of readings to take before exiting (0 for unlimited)
        #[arg(short = 'n', long, default_value = "0")]
        count: u32,
    },

    /// Log in and store the API token
    Login {
        #[command(flatten)]
        api: ApiArgs,

        /// Account email (default: the configured email)
        email: Option<String>,

        /// Account password (prompted interactively when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Subscribe an email address to threshold notifications
    Subscribe {
        #[command(flatten)]
        api: ApiArgs,

        /// Email to subscribe (default: the configured email)
        email: Option<String>,
    },

    /// Submit a new reading to the station
    Submit {
        #[command(flatten)]
        api: ApiArgs,

        /// Timestamp (RFC3339, default: now)
        #[arg(long)]
        timestamp: Option<String>,

        /// Temperature in degrees Celsius
        #[arg(long, default_value = "0")]
        temperature: f64,

        /// Relative humidity percentage
        #[arg(long, default_value = "0")]
        humidity: f64,

        /// CO2 concentration in ppm
        #[arg(long, default_value = "0")]
        co2: f64,

        /// NH3 concentration in ppm
        #[arg(long, default_value = "0")]
        nh3: f64,

        /// Benzene concentration in ppm
        #[arg(long, default_value = "0")]
        benzene: f64,

        /// LPG concentration in ppm
        #[arg(long, default_value = "0")]
        lpg: f64,

        /// CO concentration in ppm
        #[arg(long, default_value = "0")]
        co: f64,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Configuration keys
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConfigKey {
    /// API base URL
    Url,
    /// Default output format
    Format,
    /// Request timeout in seconds
    Timeout,
    /// Disable colored output
    NoColor,
    /// Account email for login/subscribe
    Email,
    /// Stored bearer token (unset to log out)
    Token,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Unset (remove) a configuration value
    Unset {
        /// Configuration key to remove
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init,
}
