use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use carousel::{
    config::{load_items, load_settings},
    navigation::NavBar,
    CarouselError, CarouselEvent, CarouselHandle, DirectionMode, ManualIntersectionSource,
    RegionId, VisibilityTracker,
};
use clap::Parser;
use shared::{
    domain::{CarouselState, Item},
    error::ErrorReport,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::{wrappers::BroadcastStream, StreamExt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod demo;
mod input;
mod render;

use input::{parse_input, Input, HELP};

/// The terminal is the page; the carousel section is its only observed region.
const SECTION_REGION: RegionId = RegionId(1);

#[derive(Parser, Debug)]
#[command(name = "carousel", about = "Terminal renderer for a showcase carousel")]
struct Cli {
    /// Settings file (defaults to ./carousel.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// TOML file with [[items]] tables.
    #[arg(long)]
    items: Option<PathBuf>,
    #[arg(long)]
    interval_ms: Option<u64>,
    #[arg(long, value_parser = parse_direction_mode)]
    direction_mode: Option<DirectionMode>,
    #[arg(long)]
    autoplay: bool,
    #[arg(long)]
    pause_on_hover: bool,
    /// Print snapshots as JSON lines instead of cards.
    #[arg(long)]
    json: bool,
    /// Route the page is currently on, for navigation links.
    #[arg(long, default_value = "/")]
    path: String,
}

fn parse_direction_mode(raw: &str) -> Result<DirectionMode, String> {
    raw.parse().map_err(|error| format!("{error}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(interval_ms) = cli.interval_ms {
        settings.interval_ms = interval_ms;
    }
    if let Some(mode) = cli.direction_mode {
        settings.direction_mode = mode;
    }
    settings.autoplay |= cli.autoplay;
    settings.pause_on_hover |= cli.pause_on_hover;
    let options = settings
        .to_options()
        .context("invalid carousel settings")?;

    let items = match cli.items.as_ref().or(settings.items_path.as_ref()) {
        Some(path) => load_items(path)?,
        None => demo::showcase_items(),
    };
    info!(items = items.len(), interval_ms = settings.interval_ms, "starting carousel");

    let source = ManualIntersectionSource::new();
    let tracker = VisibilityTracker::attach(
        source.clone(),
        SECTION_REGION,
        settings.threshold,
        settings.visibility_mode,
    )
    .await?;
    source.report(SECTION_REGION, 1.0);

    let handle = CarouselHandle::attach(items, options, Some(tracker.subscribe()))?;
    let mut nav = NavBar::new(settings.nav_variant, demo::social_links()?);

    println!("{}", render::nav_header(&nav));
    let items: Arc<[Item]> = handle.items().into();
    print_state(&items, &handle.snapshot(), cli.json);
    let renderer = tokio::spawn(render_events(
        Arc::clone(&items),
        BroadcastStream::new(handle.subscribe()),
        cli.json,
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match input {
            Input::Command(command) => {
                if let Err(error) = handle.send(command).await {
                    report_error(&error, cli.json);
                    break;
                }
            }
            Input::Ratio(ratio) => {
                if !source.report(SECTION_REGION, ratio) {
                    warn!("carousel section is no longer observed");
                }
            }
            Input::Scroll(offset) => {
                if nav.on_scroll(offset) {
                    println!("{}", render::nav_header(&nav));
                }
            }
            Input::Section(section) => {
                let action = nav.scroll_to_section(&section, &cli.path);
                println!("{}", render::nav_action(&action));
            }
            Input::Menu => {
                if nav.toggle_menu() {
                    println!("{}", render::nav_header(&nav));
                } else {
                    eprintln!("this navigation bar has no mobile menu");
                }
            }
            Input::Show => print_state(&items, &handle.snapshot(), cli.json),
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
        }
    }

    tracker.detach().await?;
    handle.detach().await;
    if let Err(error) = renderer.await {
        warn!(%error, "renderer task ended abnormally");
    }
    Ok(())
}

async fn render_events(
    items: Arc<[Item]>,
    mut events: BroadcastStream<CarouselEvent>,
    json: bool,
) {
    while let Some(event) = events.next().await {
        match event {
            Ok(CarouselEvent::StateChanged { state, .. }) => print_state(&items, &state, json),
            Ok(CarouselEvent::Detached) => break,
            Err(error) => warn!(%error, "renderer fell behind"),
        }
    }
}

fn print_state(items: &[Item], state: &CarouselState, json: bool) {
    if json {
        match serde_json::to_string(state) {
            Ok(line) => println!("{line}"),
            Err(error) => warn!(%error, "failed to encode snapshot"),
        }
        return;
    }
    let item = state.current_index.and_then(|index| items.get(index));
    print!("{}", render::card(item, state));
}

fn report_error(error: &CarouselError, json: bool) {
    if json {
        if let Ok(line) = serde_json::to_string(&ErrorReport::from(error)) {
            println!("{line}");
            return;
        }
    }
    eprintln!("{error}");
}
