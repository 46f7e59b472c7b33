mod cli;
mod commands;
mod infra;

use filing_control::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
