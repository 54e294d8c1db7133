use clap::Parser;
use color_eyre::Result;
use log::LevelFilter;
use std::fs::OpenOptions;
use std::sync::Arc;
use traffic_dashboard::api::HttpPredictionApi;
use traffic_dashboard::app::actions::AppActions;
use traffic_dashboard::app::App;
use traffic_dashboard::cli::CliArgs;
use traffic_dashboard::config::{init_app_config, AppConfig};
use traffic_dashboard::{event, terminal};

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();
    let config = init_app_config()?;

    let headless = args.headless || !is_terminal();
    init_logging(&config, headless)?;
    log::info!("Using prediction service at {}", config.api_url);

    let api = Arc::new(HttpPredictionApi::new(&config.api_url));

    if headless {
        let mut actions = AppActions::new();
        if let Err(e) = actions.initialize(&config.database_url).await {
            log::warn!("Preference store unavailable: {e}");
        }
        let mut stdout = std::io::stdout();
        return event::run_headless(api.as_ref(), &mut actions, &args, &mut stdout).await;
    }

    let mut app = App::new();
    app.initialize(&config).await;
    if let Some(variant) = args.model {
        app.choose_model(variant).await?;
    }

    let mut terminal = terminal::setup()?;

    let result = event::run(&mut terminal, &mut app, api).await;

    terminal::cleanup(true, true);

    result
}

/// Log records go to stderr when headless, otherwise to the log file so the
/// screen stays clean.
fn init_logging(config: &AppConfig, headless: bool) -> Result<()> {
    let level = if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .filter_module("sqlx", LevelFilter::Warn)
        .parse_default_env();

    if !headless {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
