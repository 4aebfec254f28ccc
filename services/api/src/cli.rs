use crate::report::{run_compare, run_grade, CompareArgs, GradeArgs};
use crate::server;
use aerograde::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "aerograde",
    about = "Grade aircraft design workbooks and serve the grading API",
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
    /// Grade one workbook and print its feedback log
    Grade(GradeArgs),
    /// Grade one workbook and diff the log against a recorded baseline
    Compare(CompareArgs),
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

pub(crate) async fn run() -> Result<ExitCode, AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await.map(|()| ExitCode::SUCCESS),
        Command::Grade(args) => run_grade(args),
        Command::Compare(args) => run_compare(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn compare_accepts_baselines_and_name() {
        let cli = Cli::try_parse_from([
            "aerograde",
            "compare",
            "submissions/team-07",
            "--baselines",
            "baselines.json",
            "--name",
            "Team-07.xlsm",
        ])
        .expect("arguments parse");

        let Some(Command::Compare(args)) = cli.command else {
            panic!("expected compare command");
        };
        assert_eq!(args.workbook, PathBuf::from("submissions/team-07"));
        assert_eq!(args.baselines, Some(PathBuf::from("baselines.json")));
        assert_eq!(args.name.as_deref(), Some("Team-07.xlsm"));
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["aerograde"]).expect("arguments parse");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["aerograde", "grade", "team-07", "--json"])
            .expect("arguments parse");
        assert!(matches!(cli.command, Some(Command::Grade(GradeArgs { json: true, .. }))));
    }
}
