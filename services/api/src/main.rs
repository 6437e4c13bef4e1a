use credit_qa_api::run;
use std::process::ExitCode;

/// Exit status when the report, letter or history files could not be used.
const USAGE_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("credit-qa: {err}");
            if err.is_caller_error() {
                ExitCode::from(USAGE_FAILURE)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
