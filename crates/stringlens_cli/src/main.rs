//! Command-line driver over the StringLens API facade.
//!
//! # Responsibility
//! - Resolve database and logging configuration from flags and environment.
//! - Dispatch one subcommand and print its response body as JSON.
//! - Exit non-zero for any non-2xx response.

use clap::Parser;
use log::info;
use std::process::ExitCode;
use stringlens_core::db::{close_db, open_db};
use stringlens_core::{default_log_level, init_logging, ApiResponse, StringApi};

mod args;
use args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, log_dir) {
            eprintln!("stringlens: logging disabled: {err}");
        }
    }

    let conn = match open_db(&cli.db) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("stringlens: failed to open `{}`: {err}", cli.db.display());
            return ExitCode::FAILURE;
        }
    };

    let response = {
        let api = StringApi::new(&conn);
        match &cli.command {
            Commands::Analyze { text } => {
                api.create_string(&serde_json::json!({ "value": text }).to_string())
            }
            Commands::Get { text } => api.get_string(text),
            command @ Commands::List { .. } => api.list_strings(command.list_params()),
            Commands::Query { phrase } => api.filter_by_natural_language(phrase),
            Commands::Delete { text } => api.delete_string(text),
        }
    };
    info!(
        "event=cli_command module=cli status={} http_status={}",
        if response.is_success() { "ok" } else { "error" },
        response.status
    );

    if let Err(err) = close_db(conn) {
        eprintln!("stringlens: failed to close database: {err}");
    }

    print_response(&response)
}

fn print_response(response: &ApiResponse) -> ExitCode {
    if let Some(body) = &response.body {
        match serde_json::to_string_pretty(body) {
            Ok(text) if response.is_success() => println!("{text}"),
            Ok(text) => eprintln!("{text}"),
            Err(err) => eprintln!("stringlens: failed to render response: {err}"),
        }
    }

    if response.is_success() {
        ExitCode::SUCCESS
    } else {
        eprintln!("stringlens: request failed with status {}", response.status);
        ExitCode::FAILURE
    }
}
