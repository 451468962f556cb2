//! Noughts console game.

use noughts_core::{GameState, SymbolPalette};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod console;
mod session;

use config::{Config, SummaryFormat};
use session::Session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout belongs to the board
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let palette = SymbolPalette::default();
    let game = if config.random_start {
        GameState::with_random_first_player(config.game, &palette, &mut rand::thread_rng())?
    } else {
        GameState::new(config.game, &palette)?
    };

    let mut session = Session::new(game);
    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();
    let outcome = session.run(input, &mut output).await?;
    info!(
        "Game over after {} turns: {:?}",
        session.game().turn_number(),
        outcome
    );

    if config.summary == SummaryFormat::Json {
        let summary = session.summary(outcome);
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
