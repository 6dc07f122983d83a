use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use realfake::banner::{BannerInfo, print_banner, print_session_summary};
use realfake::commands::{CommandResult, SessionInfo, handle_command};
use realfake::config::Config;
use realfake::consts::default_db_path;
use realfake::navigator::browser::BrowserNavigator;
use realfake::navigator::history::SessionHistory;
use realfake::navigator::page::PageLoader;
use realfake::navigator::{Chain, Navigator};
use realfake::predict::{PredictError, PredictReply, Predictor};
use realfake::prediction::Prediction;
use realfake::transport::Transport;
use realfake::transport::http::HttpTransport;

/// Location a fresh session starts from.
const START_PAGE: &str = "/";

#[derive(Parser)]
#[command(
    name = "realfake",
    version,
    about = "Call each image real or fake, then follow the server to the next one."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Server base URL (overrides the stored `base_url`)
    #[arg(short, long, global = true)]
    base_url: Option<String>,

    /// SQLite database for config and history (use :memory: for ephemeral)
    #[arg(short, long, global = true)]
    db: Option<String>,

    /// Also open every new location in the system browser
    #[arg(long, default_value_t = false, global = true)]
    open: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Submit one prediction and print where the server sends you
    Predict {
        /// A number, or `real` / `fake`
        #[arg(allow_negative_numbers = true)]
        value: Prediction,
    },
    /// Read or change stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print a setting
    Get { key: String },
    /// Store a setting
    Set { key: String, value: String },
    /// Forget a setting
    Unset { key: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("realfake=info".parse()?))
        .init();

    let cli = Cli::parse();

    let db = match &cli.db {
        Some(db) => db.clone(),
        None => {
            let path = default_db_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            path.to_string_lossy().into_owned()
        }
    };

    let config = Config::open(&db)?;

    if let Some(Command::Config { action }) = &cli.command {
        handle_config(&config, action)?;
        return Ok(ExitCode::SUCCESS);
    }

    let server = config.base_url(cli.base_url.as_deref())?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&server)?);
    let loader = Arc::new(PageLoader::new(transport.clone()));
    let history = Arc::new(SessionHistory::open(&db)?);

    // Every run is a new game: the server only hands out a session on its
    // start page.
    loader.load(START_PAGE).await?;
    history.visit(START_PAGE)?;

    // The history records a location only once it was actually reached.
    let mut chain: Vec<Arc<dyn Navigator>> = vec![loader as Arc<dyn Navigator>];
    if cli.open {
        chain.push(Arc::new(BrowserNavigator::new(&server)?));
    }
    chain.push(history.clone());
    let predictor = Predictor::new(transport, Arc::new(Chain::new(chain)));

    if let Some(Command::Predict { value }) = &cli.command {
        let result = predictor.predict(value).await;
        if let Ok(reply) = &result {
            println!("=> {}", reply.new_url);
        }
        // Failures are already logged by the predictor.
        return Ok(ExitCode::from(exit_status(&result)));
    }

    let storage = if db == ":memory:" { "ephemeral" } else { &db };
    let location = history.current()?;
    print_banner(&BannerInfo {
        server: &server,
        storage,
        location: location.as_deref(),
        browser: cli.open,
    });

    let mut accepted = 0;

    // REPL — async stdin so Ctrl+C is caught at the prompt too
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("\nrealfake> ");
        io::stdout().flush()?;

        let line = tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        // Ctrl+D (EOF)
                        println!();
                        break;
                    }
                    Err(e) => {
                        eprintln!("input error: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let info = SessionInfo {
            server: &server,
            history: history.as_ref(),
            accepted,
        };
        match handle_command(input, &info) {
            CommandResult::Quit => break,
            CommandResult::Handled => continue,
            CommandResult::NotACommand => {}
        }

        let prediction: Prediction = match input.parse() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };

        // Ctrl+C while waiting drops the request, not the REPL
        tokio::select! {
            result = predictor.predict(&prediction) => {
                // Failures are logged by the predictor.
                if let Ok(reply) = result {
                    accepted += 1;
                    println!("=> {}", reply.new_url);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\n\ninterrupted");
            }
        }
    }

    print_session_summary(accepted, history.current()?.as_deref());
    Ok(ExitCode::SUCCESS)
}

/// Process exit status for a one-shot prediction.
fn exit_status(result: &Result<PredictReply, PredictError>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

fn handle_config(config: &Config, action: &ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => match config.get(key)? {
            Some(value) => println!("{value}"),
            None => println!("(unset)"),
        },
        ConfigAction::Set { key, value } => {
            config.set(key, value)?;
            println!("✓ {key} = {value}");
        }
        ConfigAction::Unset { key } => {
            config.remove(key)?;
            println!("✓ {key} unset");
        }
    }
    Ok(())
}
