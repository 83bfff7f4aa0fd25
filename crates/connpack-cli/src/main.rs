//! connpack - Convert exported Airflow connections into Kubernetes secrets

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;
mod exit_codes;
mod logging;
mod util;

#[derive(Parser)]
#[command(name = "connpack")]
#[command(author = "connpack Contributors")]
#[command(version)]
#[command(
    about = "Convert an exported Airflow connections file into Helm values and a Kubernetes Secret",
    long_about = None
)]
struct Cli {
    /// K8s namespace to create secrets in
    #[arg(long)]
    namespace: String,

    /// An exported Airflow connections yaml file
    #[arg(long)]
    source: PathBuf,
}

fn main() -> ExitCode {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::from(exit_codes::USAGE_ERROR)
            } else {
                ExitCode::from(exit_codes::SUCCESS)
            };
        }
    };

    logging::init();

    let result = util::program_root()
        .and_then(|root| commands::convert::run(&cli.namespace, &cli.source, &root));

    match result {
        Ok(_) => ExitCode::from(exit_codes::SUCCESS),
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            ExitCode::from(code)
        }
    }
}
