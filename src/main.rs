use chrono::Utc;
use clap::{Parser, Subcommand};
use futures::future::join_all;
use livetrader_agent::config::{load_config, AppConfig};
use livetrader_agent::handler::{QueryRequest, RequestHandler};
use livetrader_agent::loader::SeriesLoader;
use livetrader_agent::narrative::{BedrockStyleGenerator, NarrativeComposer};
use livetrader_agent::{sample, server, store};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "livetrader-agent", about = "Answers questions about historical index behaviour")]
struct Cli {
    /// Path to the JSON config file.
    #[arg(long, default_value = "config.json")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve POST /query over HTTP.
    Serve,
    /// Answer one or more queries and print the JSON responses.
    Ask {
        #[arg(required = true)]
        queries: Vec<String>,
        #[arg(long, default_value = "anonymous")]
        user_id: String,
    },
    /// Write sample series for every dataset into a local store directory.
    Seed {
        #[arg(long)]
        root: PathBuf,
        #[arg(long, default_value_t = 1000)]
        days: u32,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let cli = Cli::parse();

    if let Command::Seed { root, days } = &cli.command {
        return match sample::write_samples(root, Utc::now().date_naive(), *days) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Seeding failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    // Load configuration from file
    let config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let handler = match build_handler(&config) {
        Ok(h) => Arc::new(h),
        Err(e) => {
            error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Serve => {
            if let Err(e) = server::serve(handler, &config.bind_addr).await {
                error!("Server error: {}", e);
                return ExitCode::FAILURE;
            }
        }
        Command::Ask { queries, user_id } => {
            info!("Queries to process: {}", queries.len());
            // Process all queries concurrently
            let tasks: Vec<_> = queries
                .into_iter()
                .map(|query| {
                    let request = QueryRequest { query, user_id: user_id.clone() };
                    handler.handle(request, Utc::now())
                })
                .collect();
            for response in join_all(tasks).await {
                match serde_json::to_string_pretty(&response) {
                    Ok(json) => println!("{json}"),
                    Err(e) => error!("Cannot encode response: {}", e),
                }
            }
        }
        Command::Seed { .. } => {}
    }

    ExitCode::SUCCESS
}

fn build_handler(config: &AppConfig) -> Result<RequestHandler, Box<dyn std::error::Error>> {
    let store = store::from_config(&config.store)?;
    let generator = BedrockStyleGenerator::new(&config.llm)?;
    Ok(RequestHandler::new(
        SeriesLoader::new(store),
        NarrativeComposer::new(Arc::new(generator)),
    ))
}
