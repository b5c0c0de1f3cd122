// Main entry point
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cardex::application::cash_games::{cash_game_listing, CashGameView};
use cardex::application::detail::{venue_detail, DetailView};
use cardex::application::events::{festival_listing, FestivalView};
use cardex::application::listing::{country_listing, ListingView};
use cardex::domain::error::DirectoryError;
use cardex::domain::model::{CashGame, Tournament};
use cardex::domain::pagination::PageMark;
use cardex::infrastructure::config::{generate_config_sample, get_config_path, load_config};
use cardex::interfaces::cli::{Cli, Command};
use cardex::presentation::theme::Theme;
use cardex::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup graceful shutdown handler
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Spawn signal handler task
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            eprintln!("Failed to listen for shutdown signal: {}", e);
        } else {
            let _ = shutdown_tx.send(());
        }
    });

    let cli = Cli::parse();
    let config = load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    if matches!(cli.command, Command::GenerateConfig) {
        generate_config_sample()?;
        return Ok(());
    }

    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);
    let spinner_enabled = config.spinner && !cli.no_spinner && !cli.json;

    let state = AppState::new(config)?;

    // Fetch sequences can run long under retry backoff; keep ctrl-c working
    tokio::select! {
        result = run_command(&state, &cli, &theme, spinner_enabled) => result,
        _ = shutdown_rx => {
            eprintln!("\nInterrupted.");
            Ok(())
        }
    }
}

async fn run_command(
    state: &AppState,
    cli: &Cli,
    theme: &Theme,
    spinner_enabled: bool,
) -> anyhow::Result<()> {
    match &cli.command {
        Command::Casinos {
            country,
            search,
            page,
        } => {
            let spinner = start_spinner(
                spinner_enabled,
                &format!("Fetching casinos in {}...", country.to_uppercase()),
            );
            let result =
                country_listing(&state.client, state, country, search.as_deref(), *page).await;
            stop_spinner(spinner);
            match result {
                Ok(view) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&view)?);
                    } else {
                        print!("{}", format_listing(&view, theme));
                    }
                }
                Err(err) => fail_page(&err, theme, "casino listing"),
            }
        }
        Command::Casino { selector, country } => {
            let spinner = start_spinner(spinner_enabled, "Fetching casino detail...");
            let result = venue_detail(&state.client, state, selector, country.as_deref()).await;
            stop_spinner(spinner);
            match result {
                Ok(view) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&view)?);
                    } else {
                        print!("{}", format_detail(&view, theme));
                    }
                }
                Err(err) => fail_page(&err, theme, "casino detail"),
            }
        }
        Command::Events { search, page } => {
            let spinner = start_spinner(spinner_enabled, "Fetching tournament festivals...");
            let result = festival_listing(&state.client, state, search.as_deref(), *page).await;
            stop_spinner(spinner);
            match result {
                Ok(view) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&view)?);
                    } else {
                        print!("{}", format_festivals(&view, theme));
                    }
                }
                Err(err) => fail_page(&err, theme, "festival listing"),
            }
        }
        Command::Cash { venue, page } => {
            let spinner = start_spinner(spinner_enabled, "Fetching cash games...");
            let result = cash_game_listing(&state.client, state, venue.as_deref(), *page).await;
            stop_spinner(spinner);
            match result {
                Ok(view) => {
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&view)?);
                    } else {
                        print!("{}", format_cash_games(&view, theme));
                    }
                }
                Err(err) => fail_page(&err, theme, "cash-game listing"),
            }
        }
        Command::Status => print_status(state).await,
        Command::GenerateConfig => {
            // handled before state construction
        }
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &cardex::infrastructure::config::Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_level()));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt().with_env_filter(filter).init();

    Ok(())
}

fn start_spinner(enabled: bool, message: &str) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());
    Some(spinner)
}

fn stop_spinner(spinner: Option<ProgressBar>) {
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}

/// Primary data failed: render the page-level error with retry guidance and
/// exit nonzero. Secondary failures never come through here.
fn fail_page(err: &DirectoryError, theme: &Theme, what: &str) -> ! {
    eprintln!(
        "{}",
        (theme.error)(&format!("✘ Couldn't load the {}: {}", what, err))
    );
    match err {
        DirectoryError::NotFound(selector) => {
            eprintln!(
                "{}",
                (theme.hint)(&format!(
                    "  No venue has the slug {:?}. Browse `cardex casinos --country <CC>` to find it.",
                    selector
                ))
            );
        }
        DirectoryError::InvalidFormat(_) => {
            eprintln!(
                "{}",
                (theme.hint)("  The endpoint answered with unexpected data; retrying won't help. Check the endpoint URLs in your config.")
            );
        }
        _ => {
            eprintln!(
                "{}",
                (theme.hint)("  Run the same command again to retry from a fresh attempt counter.")
            );
        }
    }
    std::process::exit(1);
}

fn na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "N/A",
    }
}

fn format_page_controls(window: &[PageMark], current: usize, theme: &Theme) -> String {
    if window.is_empty() {
        return String::new();
    }
    let marks: Vec<String> = window
        .iter()
        .map(|mark| match mark {
            PageMark::Page(p) if *p == current => (theme.page_current)(&format!("[{}]", p)),
            PageMark::Page(p) => (theme.page_other)(&p.to_string()),
            PageMark::Gap => (theme.page_other)("…"),
        })
        .collect();
    format!("  Pages: {}\n", marks.join(" "))
}

fn format_listing(view: &ListingView, theme: &Theme) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    writeln!(
        output,
        "{} {}",
        (theme.title)(&format!("Casinos in {}", view.country)),
        (theme.count)(&format!(
            "({} venue{}, page {}/{})",
            view.page.total_items,
            if view.page.total_items == 1 { "" } else { "s" },
            view.page.current_page,
            view.page.total_pages
        ))
    )
    .ok();
    if let Some(query) = &view.query {
        writeln!(output, "  {} {:?}", (theme.label)("filter:"), query).ok();
    }

    if view.page.total_items == 0 {
        // loaded-but-empty is its own state, distinct from a failure
        let message = match &view.query {
            Some(query) => format!("No casinos match {:?}.", query),
            None => format!("No casinos found for {}.", view.country),
        };
        writeln!(output, "\n  {}\n", (theme.empty)(&message)).ok();
        return output;
    }

    writeln!(output).ok();
    let offset = view.page.offset();
    for (i, venue) in view.page.items.iter().enumerate() {
        writeln!(
            output,
            "  {}. {} {}",
            offset + i + 1,
            (theme.venue)(&venue.name),
            (theme.count)(&format!("#{}", venue.id))
        )
        .ok();
        if !venue.description_line.is_empty() {
            writeln!(output, "     {}", (theme.meta)(&venue.description_line)).ok();
        }
        if let Some(logo) = &venue.logo_url {
            writeln!(output, "     {}", (theme.url)(logo)).ok();
        }
    }
    writeln!(output).ok();
    output.push_str(&format_page_controls(
        &view.window,
        view.page.current_page,
        theme,
    ));
    output
}

fn format_detail(view: &DetailView, theme: &Theme) -> String {
    use std::fmt::Write;

    let detail = &view.detail;
    let mut output = String::new();
    writeln!(
        output,
        "{} {}",
        (theme.title)(&detail.name),
        (theme.count)(&format!("#{}", detail.id))
    )
    .ok();

    if let Some(requested) = &view.requested_slug {
        if requested != &view.canonical_slug {
            writeln!(
                output,
                "  {}",
                (theme.hint)(&format!("canonical slug: {}", view.canonical_slug))
            )
            .ok();
        }
    }

    writeln!(
        output,
        "  {} {}",
        (theme.label)("Address:"),
        na(Some(detail.address.as_str()))
    )
    .ok();
    writeln!(
        output,
        "  {} {}, {}",
        (theme.label)("City:"),
        na(Some(detail.city.as_str())),
        detail.country_code
    )
    .ok();
    writeln!(
        output,
        "  {} {}",
        (theme.label)("Contact:"),
        na(detail.contact.as_deref())
    )
    .ok();
    if let Some(website) = &detail.website {
        writeln!(output, "  {} {}", (theme.label)("Website:"), (theme.url)(website)).ok();
    }
    if let Some(coordinates) = &detail.coordinates {
        writeln!(output, "  {} {}", (theme.label)("GPS:"), coordinates).ok();
    }
    writeln!(
        output,
        "  {} {}   {} {}",
        (theme.label)("Size:"),
        na(detail.size.as_deref()),
        (theme.label)("Rank:"),
        na(detail.rank.as_deref())
    )
    .ok();
    if !detail.picture_urls.is_empty() {
        writeln!(
            output,
            "  {} {}",
            (theme.label)("Pictures:"),
            (theme.count)(&detail.picture_urls.len().to_string())
        )
        .ok();
    }

    writeln!(output, "\n{}", (theme.header)("Live tournaments")).ok();
    if detail.live_tournaments.is_empty() {
        writeln!(output, "  {}", (theme.empty)("No tournaments scheduled.")).ok();
    } else {
        for tournament in &detail.live_tournaments {
            writeln!(
                output,
                "  • {} {} {}",
                (theme.venue)(&tournament.title),
                (theme.meta)(na(tournament.date.as_deref())),
                (theme.meta)(na(tournament.buyin.as_deref()))
            )
            .ok();
        }
    }

    writeln!(output, "\n{}", (theme.header)("Cash games")).ok();
    if view.cash_games.is_empty() {
        writeln!(output, "  {}", (theme.empty)("No cash games reported.")).ok();
    } else {
        for game in &view.cash_games {
            writeln!(output, "  • {}", format_cash_game_line(game, theme)).ok();
        }
    }
    writeln!(output).ok();
    output
}

fn format_cash_game_line(game: &CashGame, theme: &Theme) -> String {
    let updated = game
        .updated()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string());
    format!(
        "{} {} {} {} {}",
        (theme.venue)(na(game.game_type.as_deref())),
        na(game.blinds.as_deref()),
        na(game.currency.as_deref()),
        (theme.meta)(&format!(
            "{} player{}",
            game.players.map_or_else(|| "N/A".to_string(), |p| p.to_string()),
            if game.players == Some(1) { "" } else { "s" }
        )),
        (theme.count)(na(updated.as_deref()))
    )
}

fn format_tournament_line(tournament: &Tournament, theme: &Theme) -> String {
    let buyin = match (&tournament.buyin, &tournament.currency) {
        (Some(buyin), Some(currency)) => format!("{} {}", buyin, currency),
        (Some(buyin), None) => buyin.clone(),
        _ => "N/A".to_string(),
    };
    format!(
        "{} {} {}",
        (theme.meta)(na(tournament.start_date.as_deref())),
        na(tournament.title.as_deref()),
        (theme.count)(&buyin)
    )
}

fn format_festivals(view: &FestivalView, theme: &Theme) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    writeln!(
        output,
        "{} {}",
        (theme.title)("Tournament festivals"),
        (theme.count)(&format!(
            "({} festival{}, page {}/{})",
            view.page.total_items,
            if view.page.total_items == 1 { "" } else { "s" },
            view.page.current_page,
            view.page.total_pages
        ))
    )
    .ok();
    if let Some(query) = &view.query {
        writeln!(output, "  {} {:?}", (theme.label)("filter:"), query).ok();
    }

    if view.page.total_items == 0 {
        let message = match &view.query {
            Some(query) => format!("No festivals match {:?}.", query),
            None => "No upcoming festivals.".to_string(),
        };
        writeln!(output, "\n  {}\n", (theme.empty)(&message)).ok();
        return output;
    }

    for festival in &view.page.items {
        let span = match (festival.first_day, festival.last_day) {
            (Some(first), Some(last)) if first != last => format!("{} to {}", first, last),
            (Some(first), _) => first.to_string(),
            _ => "dates TBA".to_string(),
        };
        writeln!(
            output,
            "\n  {} {}",
            (theme.venue)(&festival.venue_name),
            (theme.count)(&format!("#{}", festival.venue_id))
        )
        .ok();
        writeln!(
            output,
            "     {} {}",
            (theme.meta)(&festival.city),
            (theme.meta)(&span)
        )
        .ok();
        writeln!(
            output,
            "     {}",
            (theme.count)(&format!(
                "{} tournament{}",
                festival.tournaments.len(),
                if festival.tournaments.len() == 1 { "" } else { "s" }
            ))
        )
        .ok();
        for tournament in &festival.tournaments {
            writeln!(output, "       {}", format_tournament_line(tournament, theme)).ok();
        }
    }
    writeln!(output).ok();
    output.push_str(&format_page_controls(
        &view.window,
        view.page.current_page,
        theme,
    ));
    output
}

fn format_cash_games(view: &CashGameView, theme: &Theme) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    let scope = match &view.venue {
        Some(venue) => format!("Cash games at venue #{}", venue),
        None => "Cash games".to_string(),
    };
    writeln!(
        output,
        "{} {}",
        (theme.title)(&scope),
        (theme.count)(&format!(
            "({} game{}, page {}/{})",
            view.page.total_items,
            if view.page.total_items == 1 { "" } else { "s" },
            view.page.current_page,
            view.page.total_pages
        ))
    )
    .ok();

    if view.page.total_items == 0 {
        writeln!(output, "\n  {}\n", (theme.empty)("No running cash games.")).ok();
        return output;
    }

    writeln!(output).ok();
    for game in &view.page.items {
        writeln!(output, "  • {}", format_cash_game_line(game, theme)).ok();
    }
    writeln!(output).ok();
    output.push_str(&format_page_controls(
        &view.window,
        view.page.current_page,
        theme,
    ));
    output
}

async fn print_status(state: &AppState) {
    println!("{}", "cardex Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let config = state.config.read().await;
    println!(
        "Config: {}",
        get_config_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found".to_string())
    );
    println!("Theme: {}", config.theme);
    println!(
        "Page size: {}   Search debounce: {}ms",
        config.page_size, config.search_debounce_ms
    );
    println!(
        "Retry: {} attempts, {}ms base delay",
        config.retry.max_attempts, config.retry.base_delay_ms
    );
    println!("Events endpoint: {}", config.endpoints.events_url);
    println!("Cash-games endpoint: {}", config.endpoints.cash_games_url);
    println!("Casino API endpoint: {}", config.endpoints.casino_api_url);
    println!("Logo cache: {} entries", state.detail_cache.len());
}
