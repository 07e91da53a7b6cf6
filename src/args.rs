use crate::errors::{Result, VariantError};
use crate::props::Props;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tailwind Variants CLI - Resolves variant configurations into class strings
#[derive(Parser, Debug)]
#[command(name = "tv-cli")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        global = true,
        default_value = "warn",
        env = "TV_LOG_LEVEL",
        help = "Log level (error, warn, info, debug, trace)"
    )]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a variant configuration against a set of props
    Resolve(ResolveArgs),
    /// Merge class strings from stdin and write them to stdout
    Merge(MergeArgs),
    /// Validate variant configuration files
    Check(CheckArgs),
}

/// Arguments for the resolve command
#[derive(Parser, Debug, Clone)]
pub struct ResolveArgs {
    /// Variant configuration file (YAML or JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        required = true,
        help = "Path to the variant configuration (YAML or JSON)"
    )]
    pub config: PathBuf,

    /// Variant props as name=value pairs
    #[arg(
        short = 'p',
        long = "prop",
        value_name = "NAME=VALUE",
        num_args = 0..,
        help = "Variant props, e.g. -p size=sm -p disabled=true"
    )]
    pub props: Vec<String>,

    /// Variant props as a JSON object
    #[arg(
        long = "props-json",
        value_name = "JSON",
        help = "Variant props as a JSON object; -p pairs override its entries"
    )]
    pub props_json: Option<String>,

    /// Resolve a single slot
    #[arg(
        short = 's',
        long = "slot",
        value_name = "NAME",
        help = "Resolve only this slot of a slotted configuration"
    )]
    pub slot: Option<String>,

    /// Extra classes appended last, to `--slot` or else the base slot
    #[arg(
        long = "class",
        value_name = "CLASSES",
        help = "Caller classes appended last (to --slot if given, otherwise the base slot)"
    )]
    pub class: Option<String>,

    /// Disable conflict merging
    #[arg(
        long = "no-merge",
        default_value_t = false,
        help = "Join classes without resolving Tailwind conflicts"
    )]
    pub no_merge: bool,

    /// Additional merge configuration
    #[arg(
        long = "merge-config",
        value_name = "PATH",
        help = "Path to a merge configuration (custom class groups and theme scales)"
    )]
    pub merge_config: Option<PathBuf>,

    /// Reject compound slots that name undeclared slots
    #[arg(
        long = "strict",
        default_value_t = false,
        help = "Fail on compound slots that reference undeclared slots"
    )]
    pub strict: bool,
}

/// Arguments for the merge command
#[derive(Parser, Debug, Clone)]
pub struct MergeArgs {
    /// Disable conflict merging
    #[arg(
        long = "no-merge",
        default_value_t = false,
        help = "Only normalize whitespace, keep conflicting classes"
    )]
    pub no_merge: bool,

    /// Additional merge configuration
    #[arg(
        long = "merge-config",
        value_name = "PATH",
        help = "Path to a merge configuration (custom class groups and theme scales)"
    )]
    pub merge_config: Option<PathBuf>,
}

/// Arguments for the check command
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Input file patterns (glob patterns supported)
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATTERN",
        required = true,
        num_args = 1..,
        help = "Configuration file patterns to validate"
    )]
    pub input: Vec<String>,

    /// Exclude patterns (glob patterns to exclude)
    #[arg(
        short = 'e',
        long = "exclude",
        value_name = "PATTERN",
        num_args = 0..,
        help = "Patterns to exclude from validation"
    )]
    pub exclude: Vec<String>,

    /// Reject compound slots that name undeclared slots
    #[arg(
        long = "strict",
        default_value_t = false,
        help = "Fail on compound slots that reference undeclared slots"
    )]
    pub strict: bool,

    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        default_value_t = false,
        help = "List the variant keys of every valid configuration"
    )]
    pub verbose: bool,
}

impl ResolveArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(slot) = &self.slot {
            if slot.trim().is_empty() {
                return Err("Slot name must not be empty".to_string());
            }
        }

        if let Some(pair) = self.props.iter().find(|pair| !pair.contains('=')) {
            return Err(format!("Prop '{}' must be written as name=value", pair));
        }

        if self.no_merge && self.merge_config.is_some() {
            return Err("--merge-config has no effect with --no-merge".to_string());
        }

        Ok(())
    }

    /// Collect props from `--props-json`, then `-p` pairs, then `--class`
    pub fn props(&self) -> Result<Props> {
        let mut props = match &self.props_json {
            Some(raw) => {
                let value: serde_json::Value = serde_json::from_str(raw)?;
                Props::from_json(&value)?
            }
            None => Props::new(),
        };

        for pair in &self.props {
            let (name, value) = Props::parse_pair(pair)?;
            props.set(name, value);
        }

        if let Some(class) = &self.class {
            if class.trim().is_empty() {
                return Err(VariantError::InvalidInput("--class must not be empty".to_string()));
            }
            props = props.class(class.as_str());
        }

        Ok(props)
    }
}

impl CheckArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.input.is_empty() {
            return Err("At least one input pattern must be provided".to_string());
        }
        if self.input.iter().any(|pattern| pattern.trim().is_empty()) {
            return Err("Input patterns must not be empty".to_string());
        }
        Ok(())
    }
}
