//! Print the OpenAPI document as JSON.

use std::process::ExitCode;

use roster::ApiDoc;
use utoipa::OpenApi;

#[expect(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "the document and failures are written to the terminal"
)]
fn main() -> ExitCode {
    match ApiDoc::openapi().to_pretty_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("failed to serialise OpenAPI document: {error}");
            ExitCode::FAILURE
        }
    }
}
