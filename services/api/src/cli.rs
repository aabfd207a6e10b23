use crate::commands::{run_filter, run_recommend, run_vocabulary, FilterArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruit_finder::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recruit Finder",
    about = "Resolve recruitment tag combinations against an operator roster",
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
    /// Group roster operators by every sub-combination of the selected tags
    Filter(FilterArgs),
    /// List tag combinations that guarantee a 4★ or 5★ outcome
    Recommend(RecommendArgs),
    /// Print every selectable tag, type, position and rarity alias
    Vocabulary,
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

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Filter(args) => run_filter(args),
        Command::Recommend(args) => run_recommend(args),
        Command::Vocabulary => {
            run_vocabulary();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn filter_tags_split_on_commas() {
        let cli = Cli::try_parse_from(["recruit-finder", "filter", "--tags", "caster,burst", "--json"])
            .expect("filter args parse");
        match cli.command {
            Some(Command::Filter(args)) => {
                assert_eq!(args.tags, vec!["caster", "burst"]);
                assert!(args.json);
            }
            other => panic!("expected filter command, got {other:?}"),
        }
    }

    #[test]
    fn recommend_accepts_tier_filter() {
        let cli = Cli::try_parse_from(["recruit-finder", "recommend", "--tier", "4-plus"])
            .expect("recommend args parse");
        match cli.command {
            Some(Command::Recommend(args)) => {
                assert_eq!(args.tier, Some(recruit_finder::recruit::Tier::FourPlus));
            }
            other => panic!("expected recommend command, got {other:?}"),
        }
    }
}
