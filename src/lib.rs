pub mod accumulator;
pub mod args;
pub mod cache;
pub mod class_groups;
pub mod class_value;
pub mod cn;
pub mod config;
pub mod errors;
pub mod merge;
pub mod merge_config;
pub mod props;
pub mod resolver;
pub mod schema;
pub mod selector;

pub use args::{CheckArgs, Cli, Commands, MergeArgs, ResolveArgs};
pub use class_value::{falsy_to_string, ClassValue, PropValue};
pub use cn::{cn, Cn};
pub use config::{ClassContribution, CompoundSlot, CompoundVariant, MatchValue, TvOptions, VariantConfig};
pub use errors::{Result, VariantError};
pub use merge::{tw_merge, tw_merge_with, ClassMerger, TailwindMerger};
pub use merge_config::{MergeConfig, ThemeScales};
pub use props::Props;
pub use resolver::{create_tv, tv, tv_with, Resolver, SlotResolver, Slots, TvFactory};
pub use schema::{ResolvedSchema, BASE_SLOT};

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of validating configuration files
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Files that loaded and normalized cleanly, with their variant keys
    pub valid: Vec<(PathBuf, Vec<String>)>,
    /// Files that failed, with the error message
    pub invalid: Vec<(PathBuf, String)>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Resolve options shared by the CLI commands
fn cli_options(no_merge: bool, merge_config: Option<&Path>, strict: bool) -> Result<TvOptions> {
    let mut options = TvOptions::default();
    if no_merge {
        options = options.without_merge();
    }
    if let Some(path) = merge_config {
        options = options.with_merge_config(MergeConfig::from_file(path)?);
    }
    if strict {
        options = options.strict();
    }
    Ok(options)
}

/// Handle the resolve command and return the text to print
pub fn run_resolve(args: &ResolveArgs) -> Result<String> {
    args.validate().map_err(VariantError::InvalidInput)?;

    let config = VariantConfig::from_file(&args.config)?;
    let options = cli_options(args.no_merge, args.merge_config.as_deref(), args.strict)?;
    let resolver = tv_with(config, options)?;
    let props = args.props()?;

    debug!(
        config = %args.config.display(),
        variant_keys = ?resolver.variant_keys(),
        "resolving configuration"
    );

    if let Some(slot) = &args.slot {
        // --class applies to the requested slot only
        let slots = resolver.slots(&props);
        let target = slots.get(slot).ok_or_else(|| {
            VariantError::InvalidInput(format!(
                "Unknown slot '{}'. Declared slots: {}",
                slot,
                resolver.slot_names().join(", ")
            ))
        })?;
        return Ok(target.resolve(&props).unwrap_or_default());
    }

    if !resolver.has_slots() {
        return Ok(resolver.resolve(&props).unwrap_or_default());
    }

    // --class lands on the base slot, like an outer class on a slotted resolve
    let slots = resolver.slots(&props);
    let lines: Vec<String> = resolver
        .slot_names()
        .into_iter()
        .map(|slot| {
            let classes = if slot == BASE_SLOT {
                resolver.resolve(&props)
            } else {
                slots.resolve(slot, &Props::new())
            };
            format!("{}: {}", slot, classes.unwrap_or_default())
        })
        .collect();
    Ok(lines.join("\n"))
}

/// Merge each line of `input` independently, keeping line structure
pub fn merge_lines(input: &str, options: &TvOptions) -> String {
    input
        .lines()
        .map(|line| cn([line]).resolve(options).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Handle merge command - read class strings from stdin, write merged strings to stdout
#[cfg(feature = "cli")]
pub async fn handle_merge_command(args: MergeArgs) -> Result<()> {
    use tokio::io::{self, AsyncReadExt, AsyncWriteExt};

    let options = cli_options(args.no_merge, args.merge_config.as_deref(), false)?;

    let mut input = String::new();
    let mut stdin = io::stdin();
    stdin
        .read_to_string(&mut input)
        .await
        .map_err(|e| VariantError::InputError(format!("Failed to read from stdin: {}", e)))?;

    if input.trim().is_empty() {
        return Ok(());
    }

    let mut output = merge_lines(&input, &options);
    output.push('\n');

    let mut stdout = io::stdout();
    stdout
        .write_all(output.as_bytes())
        .await
        .map_err(|e| VariantError::OutputError {
            path: "stdout".to_string(),
            message: e.to_string(),
        })?;
    stdout.flush().await.map_err(|e| VariantError::OutputError {
        path: "stdout".to_string(),
        message: e.to_string(),
    })?;

    Ok(())
}

/// Load and normalize every configuration file matching the patterns
pub fn check_configs(args: &CheckArgs) -> Result<CheckReport> {
    args.validate().map_err(VariantError::InvalidInput)?;

    let files = collect_files(&args.input, &args.exclude)?;
    if files.is_empty() {
        return Err(VariantError::NoFilesFound);
    }
    info!(files = files.len(), "checking variant configurations");

    let options = if args.strict {
        TvOptions::default().strict()
    } else {
        TvOptions::default()
    };

    let mut report = CheckReport::default();
    for path in files {
        match VariantConfig::from_file(&path).and_then(|config| tv_with(config, options.clone())) {
            Ok(resolver) => {
                debug!(path = %path.display(), "configuration is valid");
                report.valid.push((path, resolver.variant_keys().to_vec()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid configuration");
                report.invalid.push((path, e.to_string()));
            }
        }
    }

    Ok(report)
}

/// Collect files matching the given patterns, skipping exclusions and directories
fn collect_files(patterns: &[String], exclude_patterns: &[String]) -> Result<Vec<PathBuf>> {
    let excludes = exclude_patterns
        .iter()
        .map(|pattern| glob::Pattern::new(pattern))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut files = Vec::new();
    let mut seen = std::collections::HashSet::new();

    for pattern in patterns {
        for entry in glob::glob(pattern)? {
            let path = entry?;

            if excludes.iter().any(|exclude| exclude.matches_path(&path)) {
                continue;
            }
            if path.is_dir() {
                continue;
            }
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}
