//! Gleaner server binary
//!
//! Starts the HTTP server for note generation and span lookup.

use gleaner_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("Warning: No config file specified, using default configuration");
        eprintln!("Usage: gleaner-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Gleaner Server - Note extraction and source alignment");
    println!();
    println!("USAGE:");
    println!("    gleaner-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address, bind_port: where to listen (default 127.0.0.1:3000)");
    println!("    - [provider]: kind = \"openai\" | \"ollama\" | \"mock\", model, endpoint, api_key_env");
    println!("    - [extractor]: chunk size, text length limit, timeouts, pacing");
    println!("    - [locator]: span location thresholds");
    println!();
    println!("    API keys are read from the environment variable named by api_key_env");
    println!("    (OPENAI_API_KEY by default).");
    println!();
}
