use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{debug, error};

use travel_planner::input::{CITY_QUESTION, DATE_QUESTION, value_or_prompt};
use travel_planner::{Pipeline, PlannerConfig, PlannerError, TripRequest, logging};

/// Plan a trip: resolve the travel date, describe the city, build an itinerary
#[derive(Debug, Parser)]
#[command(name = "travel-planner", version)]
struct Cli {
    /// When you travel, e.g. "next Saturday" (asked interactively if omitted)
    #[arg(long)]
    date: Option<String>,

    /// Destination city (asked interactively if omitted)
    #[arg(long)]
    city: Option<String>,

    /// Reference date for relative expressions, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

async fn run(cli: Cli) -> Result<()> {
    let config = PlannerConfig::load_from_path(cli.config.clone())
        .with_context(|| "Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;
    debug!("Using model '{}' at {}", config.llm.model, config.llm.base_url);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    let date_expression = value_or_prompt(cli.date, &mut reader, &mut writer, DATE_QUESTION)?;
    let city = value_or_prompt(cli.city, &mut reader, &mut writer, CITY_QUESTION)?;

    let request = TripRequest {
        date_expression,
        city,
        today: cli.today.unwrap_or_else(|| Local::now().date_naive()),
    };

    let pipeline = Pipeline::from_config(&config)?;
    let plan = pipeline.run(&request).await?;

    println!("Generated Travel Plan:\n{}", plan.itinerary);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            match err.downcast_ref::<PlannerError>() {
                Some(planner_err) => eprintln!("{}", planner_err.user_message()),
                None => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
