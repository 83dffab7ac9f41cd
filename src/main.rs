use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use subenum::cli::Args;
use subenum::output::{self, print_block, ConsoleSink};
use subenum::scan::Scanner;

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if let Err(e) = subenum::logging::init() {
        eprintln!("Failed to initialise logging: {e}");
    }

    if args.simulate {
        print_block(&output::simulation_banner());
    }

    if args.version {
        print_block(&output::version_report(args.simulate));
        return ExitCode::SUCCESS;
    }

    let config = match args.into_config() {
        Ok(config) => config,
        Err(e) => {
            print_block(&output::error_report(&e));
            return ExitCode::FAILURE;
        }
    };

    if config.verbose {
        print_block(&output::settings_banner(&config, args.wordlist()));
    }

    let scanner = match Scanner::new(config) {
        Ok(scanner) => scanner,
        Err(e) => {
            print_block(&output::error_report(&e));
            return ExitCode::FAILURE;
        }
    };

    let sink = Arc::new(ConsoleSink::new(
        scanner.is_simulated(),
        scanner.config().verbose,
    ));
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    match scanner.scan_wordlist(args.wordlist(), sink, interrupt).await {
        Ok(summary) => {
            if scanner.config().verbose || summary.interrupted {
                print_block(&output::summary_report(&summary, scanner.is_simulated()));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            print_block(&output::error_report(&e));
            ExitCode::FAILURE
        }
    }
}
