mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use pim_match::error::AppError;
use std::process::ExitCode;

/// Runs the selected command and maps failures onto sysexits-style codes.
pub async fn run() -> ExitCode {
    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("application error: {err}");
            ExitCode::from(exit_status(&err))
        }
    }
}

fn exit_status(err: &AppError) -> u8 {
    match err {
        AppError::Config(_) | AppError::Telemetry(_) => 78,
        AppError::Catalog(_) | AppError::Analysis(_) => 65,
        AppError::Io(_) => 74,
        AppError::Server(_) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pim_match::analysis::AnalysisError;
    use pim_match::config::ConfigError;
    use pim_match::mentions::MalformedInputError;

    #[test]
    fn configuration_problems_exit_with_config_code() {
        assert_eq!(exit_status(&AppError::Config(ConfigError::InvalidPort)), 78);
    }

    #[test]
    fn rejected_input_exits_with_data_code() {
        let err = AppError::Analysis(AnalysisError::MalformedInput(
            MalformedInputError::MissingProducts,
        ));
        assert_eq!(exit_status(&err), 65);
    }

    #[test]
    fn missing_files_exit_with_io_code() {
        let err = AppError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(exit_status(&err), 74);
    }
}
