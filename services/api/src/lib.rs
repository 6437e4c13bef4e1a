//! HTTP and command-line front end for the credit report quality engine.

mod cli;
mod error;
mod infra;
mod routes;
mod server;

pub use error::AppError;

/// Parse the command line and dispatch.
///
/// With no subcommand the HTTP service starts. `assess`, `quick` and `dashboard` read JSON
/// files, print their result and return.
pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
