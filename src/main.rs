use anyhow::Context;
use clap::Parser;
use tailwind_variants::{check_configs, handle_merge_command, run_resolve, Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Resolve(args) => {
            let output = run_resolve(&args)
                .with_context(|| format!("Failed to resolve {}", args.config.display()))?;
            println!("{}", output);
            Ok(())
        }
        Commands::Merge(args) => {
            handle_merge_command(args).await?;
            Ok(())
        }
        Commands::Check(args) => {
            let verbose = args.verbose;
            let report = check_configs(&args).context("Failed to check configurations")?;

            for (path, keys) in &report.valid {
                if verbose {
                    println!("ok    {} [{}]", path.display(), keys.join(", "));
                } else {
                    println!("ok    {}", path.display());
                }
            }
            for (path, message) in &report.invalid {
                eprintln!("error {}: {}", path.display(), message);
            }

            if !report.is_ok() {
                eprintln!(
                    "{} of {} configurations are invalid",
                    report.invalid.len(),
                    report.valid.len() + report.invalid.len()
                );
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
