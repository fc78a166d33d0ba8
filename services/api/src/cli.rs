use crate::estimate::{run_estimate, run_fields, EstimateArgs, FieldsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use oas_estimator::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Old Age Benefits Estimator",
    about = "Serve or query the old age benefits estimator from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Estimate benefits for a JSON file of answers
    Estimate(EstimateArgs),
    /// List the questionnaire fields, optionally resolved against answers
    Fields(FieldsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Fields(args) => run_fields(args),
    }
}
