//! Runs the storefront in a terminal, outside any chat client.
//!
//! Each input line is parsed into a [`Command`]; the active screen is printed after every
//! command and every completed remote call.

use bakery_miniapp::bridge::Host;
use bakery_miniapp::config::AppConfig;
use bakery_miniapp::lifecycle::{App, Command, HELP};
use bakery_miniapp::router::Route;
use session_actor::tracing::setup_tracing;
use std::error::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = AppConfig::from_env()?;
    info!(api = %config.api_base_url, "Starting bakery mini-app");

    let start = std::env::args()
        .nth(1)
        .map(|path| Route::parse(&path))
        .unwrap_or(Route::Home);

    let mut app = App::with_http(Host::Absent, config)?;
    app.start_at(start).await?;
    for (name, value) in app.palette().css_variables() {
        println!("{name}: {value};");
    }

    let (commands, inbox) = mpsc::channel(16);
    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim() == "help" {
                println!("{HELP}");
                continue;
            }
            match Command::parse(&line) {
                Ok(Some(command)) => {
                    let quit = command == Command::Quit;
                    if commands.send(command).await.is_err() || quit {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("{e}"),
            }
        }
    });

    app.run(inbox, |view| println!("\n{view}\n> ")).await?;

    reader.abort();
    app.shutdown().await?;
    Ok(())
}
