use crate::infra::load_engine;
use clap::Args;
use recruit_finder::config::AppConfig;
use recruit_finder::error::AppError;
use recruit_finder::recruit::{
    FilterResult, Item, Operator, Recommendations, RecruitEngine, Tier,
};
use recruit_finder::telemetry;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct FilterArgs {
    /// Selected tags, types, positions or rarity aliases (comma separated, at most 6)
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) tags: Vec<String>,
    /// Roster JSON to use instead of the configured dataset
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Print the grouped result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Roster JSON to use instead of the configured dataset
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Only show one tier (`5` or `4-plus`)
    #[arg(long)]
    pub(crate) tier: Option<Tier>,
    /// Print the labeled combinations as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

fn prepare_engine(roster: Option<PathBuf>) -> Result<std::sync::Arc<RecruitEngine>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    load_engine(&config.engine, roster)
}

pub(crate) fn run_filter(args: FilterArgs) -> Result<(), AppError> {
    let FilterArgs { tags, roster, json } = args;

    let engine = prepare_engine(roster)?;
    let selection = engine.parse_selection(tags.as_slice())?;
    let result = engine.filter(&selection);

    if json {
        println!("{}", serde_json::to_string_pretty(&*result)?);
    } else {
        let labels: Vec<&str> = selection.items().iter().map(|item| item.label()).collect();
        render_filter_result(&labels, &result);
    }

    Ok(())
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs { roster, tier, json } = args;

    let engine = prepare_engine(roster)?;
    let recommendations = engine.recommendations();
    let recommendations = match tier {
        Some(tier) => recommendations.only(tier),
        None => (*recommendations).clone(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        render_recommendations(&recommendations, engine.roster().len());
    }

    Ok(())
}

pub(crate) fn run_vocabulary() {
    let mut family = "";
    for item in Item::vocabulary() {
        let heading = match item {
            Item::Type(_) => "Types",
            Item::Position(_) => "Positions",
            Item::Tag(_) => "Tags",
            Item::Alias(_) => "Rarity aliases",
        };
        if heading != family {
            if !family.is_empty() {
                println!();
            }
            println!("{heading}");
            family = heading;
        }
        println!("  {:<16} {}", item.label(), item.native_label());
    }
}

fn render_filter_result(selection: &[&str], result: &FilterResult) {
    println!("Selection: {}", selection.join(", "));

    if result.is_empty() {
        println!("No operators match any combination of the selection.");
        return;
    }

    for group in result.groups() {
        println!("\n{} ({})", group.key(), group.operators.len());
        for operator in &group.operators {
            println!("  {}", operator_line(operator));
        }
    }
}

fn render_recommendations(recommendations: &Recommendations, roster_size: usize) {
    println!(
        "Guaranteed combinations across {} operators: {}",
        roster_size,
        recommendations.len()
    );

    for tier in Tier::ordered() {
        let entries: Vec<_> = recommendations.tier(tier).collect();
        if entries.is_empty() {
            continue;
        }

        let heading = match tier {
            Tier::Five => "5★ guaranteed",
            Tier::FourPlus => "4★ or better guaranteed",
        };
        println!("\n{heading}");
        for entry in entries {
            let names: Vec<&str> = entry
                .operators
                .iter()
                .map(|operator| operator.name.as_str())
                .collect();
            println!("  {:<32} {}", entry.combination.key(), names.join(", "));
        }
    }
}

fn operator_line(operator: &Operator) -> String {
    let operator_type = operator
        .operator_type
        .map(|value| value.label())
        .unwrap_or("unknown");
    let traits: Vec<&str> = operator.tags.iter().map(|item| item.label()).collect();
    format!(
        "{} {:<14} {:<10} {}",
        operator.rarity,
        operator.name,
        operator_type,
        traits.join(", ")
    )
}
