use super::super::args::*;
use crate::exit_codes::SUCCESS;

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Submit(args) => super::submit::run(&cli.config, args),
        Command::Ingest(args) => super::ingest::run(&cli.config, args),
        Command::Leaderboard(args) => super::leaderboard::run(&cli.config, args),
        Command::Runs(args) => super::runs::run(&cli.config, args),
        Command::Validate => super::validate::run(&cli.config),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
