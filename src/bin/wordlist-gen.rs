//! Generate a subdomain wordlist for `subenum`.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use subenum::output::print_block;
use subenum::wordlist::WordlistBuilder;

#[derive(Parser, Debug)]
#[command(name = "wordlist-gen", version, about = "Generate custom wordlists for subdomain enumeration")]
struct Args {
    /// Path to output wordlist file
    #[arg(short = 'o', long = "output", default_value = "wordlist.txt")]
    output: PathBuf,

    /// Combine each word with these prefixes (comma-separated)
    #[arg(long, value_delimiter = ',')]
    combine: Vec<String>,

    /// Add common subdomain prefixes
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    common: bool,

    /// Domain to extract potential subdomains from (e.g., company-name.com -> company, name)
    #[arg(long)]
    domain: Option<String>,
}

fn report(added: &[String]) {
    for word in added {
        print_block(&format!("Added: {word}"));
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = subenum::logging::init() {
        eprintln!("Failed to initialise logging: {e}");
    }

    if args.output.as_os_str().is_empty() {
        print_block("Error: Output file cannot be empty");
        return ExitCode::FAILURE;
    }

    let mut builder = WordlistBuilder::new();

    if args.common {
        print_block("Adding common subdomain prefixes...");
        report(&builder.add_common());
    }

    if let Some(domain) = args.domain.as_deref() {
        print_block(&format!("Extracting terms from domain: {domain}"));
        report(&builder.add_domain_terms(domain));
    }

    if !args.combine.is_empty() {
        print_block(&format!("Combining with prefixes: {:?}", args.combine));
        report(&builder.add_combinations(args.combine.iter().map(String::as_str)));
    }

    if let Err(e) = builder.write_file(&args.output) {
        print_block(&format!("Error: {e}"));
        return ExitCode::FAILURE;
    }

    print_block(&format!(
        "\nWordlist generated at {} with {} unique entries",
        args.output.display(),
        builder.len()
    ));
    print_block(
        "\nNOTE: Only use this tool to generate wordlists for domains you have explicit permission to test.",
    );
    ExitCode::SUCCESS
}
