mod cli;
mod infra;
mod report;
mod routes;
mod server;

use aerograde::error::AppError;
use std::process::ExitCode;

pub async fn run() -> Result<ExitCode, AppError> {
    cli::run().await
}
