use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    pim_match_api::run().await
}
