//! ContractNL: natural-language contract and parts query server.

use std::sync::Arc;

use contractnl_core::ContractNlConfig;
use contractnl_nlp::QueryProcessor;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

fn print_usage() {
    println!("ContractNL: natural-language contract and parts queries");
    println!();
    println!("Usage: contractnl [command]");
    println!();
    println!("Commands:");
    println!("  (none)                   Start the server");
    println!("  process <query...>       Process one query and print the JSON result");
    println!("  intent <query...>        Classify one query's intent");
    println!("  help                     Show this help message");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = ContractNlConfig::from_env()?;

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "--process" | "process" => {
                if args.len() < 3 {
                    eprintln!("Usage: contractnl process <query...>");
                    std::process::exit(1);
                }
                let query = args[2..].join(" ");
                let result = QueryProcessor::new(config.pipeline).process(&query);
                println!("{}", result.to_json_pretty()?);
                std::process::exit(if result.has_blocker() { 2 } else { 0 });
            }
            "--intent" | "intent" => {
                if args.len() < 3 {
                    eprintln!("Usage: contractnl intent <query...>");
                    std::process::exit(1);
                }
                let query = args[2..].join(" ");
                let outcome = QueryProcessor::new(config.pipeline).classify_intent(&query);
                println!("{}", serde_json::to_string_pretty(&outcome)?);
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_usage();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'contractnl help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal server startup
    let addr = config.listen_addr();
    info!(
        spell_correction = config.pipeline.spell_correction,
        "Pipeline configured"
    );

    let state = Arc::new(AppState::new(config));
    let app = routes::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("ContractNL server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
