use crate::commands::{
    run_assess, run_evaluate, run_monitor, run_notify, run_obligations, run_questions,
    AssessArgs, EvaluateArgs, MonitorArgs, NotifyArgs, ObligationsArgs,
};
use clap::{Parser, Subcommand};
use filing_control::config::AppConfig;
use filing_control::error::AppError;
use filing_control::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "filing-control",
    about = "Evaluate U.S. entity filing obligations and compute deadline notifications",
    version
)]
struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the compliance questionnaire
    Questions,
    /// Score risk and list required forms for a questionnaire answer set
    Evaluate(EvaluateArgs),
    /// List filing obligations for an entity
    Obligations(ObligationsArgs),
    /// Build an assessment snapshot with obligations and statutory deadlines
    Assess(AssessArgs),
    /// Compute notification events for a single deadline transition
    Notify(NotifyArgs),
    /// Recompute deadline states from a CSV export and queue notifications
    Monitor(MonitorArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Questions => run_questions(cli.json),
        Command::Evaluate(args) => run_evaluate(args, cli.json),
        Command::Obligations(args) => run_obligations(args, cli.json),
        Command::Assess(args) => run_assess(args, cli.json),
        Command::Notify(args) => run_notify(args, cli.json),
        Command::Monitor(args) => run_monitor(args, &config, cli.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn notify_accepts_negative_day_counts() {
        let cli = Cli::try_parse_from([
            "filing-control",
            "notify",
            "--entity-id",
            "ent-1",
            "--form",
            "Form 5472",
            "--due-date",
            "2026-04-15",
            "--prev-days",
            "0",
            "--next-days",
            "-1",
            "--json",
        ])
        .expect("arguments parse");

        assert!(cli.json);
        match cli.command {
            Command::Notify(args) => {
                assert_eq!(args.prev_days, Some(0));
                assert_eq!(args.next_days, -1);
                assert_eq!(args.engine_version, "1.0.0");
            }
            other => panic!("expected notify, got {other:?}"),
        }
    }

    #[test]
    fn write_state_requires_state_path() {
        let result = Cli::try_parse_from([
            "filing-control",
            "monitor",
            "--deadlines",
            "deadlines.csv",
            "--write-state",
        ]);
        assert!(result.is_err());
    }
}
