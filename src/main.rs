//! Wordbucket - word frequency counting split by starting letter
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use wordbucket::cli::Args;
use wordbucket::error::{ErrorKind, PipelineError};
use wordbucket::processor::{Processor, ProcessorConfig};
use wordbucket::progress::{print_banner, print_error, print_header, print_info};

/// Exit status for configuration errors
const EXIT_CONFIG: i32 = 2;

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; RUST_LOG wins when set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        let is_config = e
            .downcast_ref::<PipelineError>()
            .map(|err| err.kind() == ErrorKind::Config)
            .unwrap_or(false);

        process::exit(if is_config { EXIT_CONFIG } else { 1 });
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    let config = ProcessorConfig::from_args(&args)?;

    if args.verbose {
        print_config(&args, &config);
    }

    let processor = Processor::new(config);
    processor.process(&args.input)?;

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &ProcessorConfig) {
    print_header("Configuration");

    print_info(&format!("Input:        {}", args.input.display()));
    print_info(&format!("Output dir:   {}", config.output_dir.display()));
    print_info(&format!("Exclude list: {}", config.exclude_file.display()));
    print_info(&format!("Report:       {}", config.excluded_report.display()));
    print_info(&format!("Recursive:    {}", config.recursive));
    if !config.extensions.is_empty() {
        print_info(&format!("Extensions:   {:?}", config.extensions));
    }
    print_info(&format!(
        "Threads:      {}",
        config.max_threads.unwrap_or_else(num_cpus::get)
    ));
}
