use std::path::PathBuf;

use draft_slots::config::{load_config, Config, DEFAULT_CONFIG_PATH};
use draft_slots::display::{print_sorting_result, write_announcement_to_file};
use draft_slots::export::{default_league_names, export_groups_to_csv, map_groups_to_leagues};
use draft_slots::parser::load_request;
use draft_slots::sorting::run_sort;
use draft_slots::web;
use tracing::info;

const DEFAULT_PLAYERS_CSV: &str = "data/players.csv";
const DEFAULT_PREFERENCES_CSV: &str = "data/preferences.csv";
const DEFAULT_SLOTS_CSV: &str = "data/slots.csv";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(DEFAULT_CONFIG_PATH)?;
    init_tracing(&config.logging.level);

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(String::as_str) == Some("web") {
        if let Some(port) = args.get(2).and_then(|p| p.parse::<u16>().ok()) {
            config.server.port = port;
        }

        println!("Starting web server on port {}...", config.server.port);
        println!("Access the API at http://localhost:{}/api/health", config.server.port);

        web::start_server(&config).await?;
        return Ok(());
    }

    let sort_args = match args.get(1).map(String::as_str) {
        Some("sort") => &args[2..],
        _ => &args[1..],
    };
    run_cli(sort_args, &mut config)
}

/// `sort [players.csv preferences.csv slots.csv] [--season YEAR]`
fn run_cli(args: &[String], config: &mut Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut paths: Vec<PathBuf> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--season" {
            let year = iter
                .next()
                .ok_or("--season needs a year")?
                .parse::<i32>()?;
            config.season.year = Some(year);
        } else {
            paths.push(PathBuf::from(arg));
        }
    }

    let (players_csv, preferences_csv, slots_csv) = match paths.as_slice() {
        [] => (
            PathBuf::from(DEFAULT_PLAYERS_CSV),
            PathBuf::from(DEFAULT_PREFERENCES_CSV),
            PathBuf::from(DEFAULT_SLOTS_CSV),
        ),
        [players, preferences, slots] => (players.clone(), preferences.clone(), slots.clone()),
        _ => return Err("usage: draft-slots sort <players.csv> <preferences.csv> <slots.csv> [--season YEAR]".into()),
    };

    println!("Loading players, preferences and slots from CSV...");
    let mut request = load_request(&players_csv, &preferences_csv, &slots_csv)?;
    if let Some(year) = config.season.year {
        request.restrict_to_season(year);
        info!(season = year, slots = request.candidate_slots.len(), "restricted slots to season");
    }

    println!(
        "Loaded {} players, {} preference records, {} candidate slots",
        request.selected_players.len(),
        request.preferences.len(),
        request.candidate_slots.len()
    );

    println!("\n\n=== Running Draft Slot Sort ===");
    let result = run_sort(&request, &mut rand::thread_rng())?;
    print_sorting_result(&result);

    if result.completed_groups.is_empty() {
        println!("\nNo completed groups; nothing to export.");
        return Ok(());
    }

    let groups = map_groups_to_leagues(&result, &default_league_names(&result))?;
    println!("\n=== Writing Groups to Files ===");
    export_groups_to_csv(&groups, &config.output.groups_csv)?;
    write_announcement_to_file(&groups, &config.output.announcement)?;
    println!("Groups saved to:");
    println!("  - {}", config.output.groups_csv.display());
    println!("  - {}", config.output.announcement.display());

    Ok(())
}

fn init_tracing(default_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("draft_slots={},actix_web=info,warn", default_level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
