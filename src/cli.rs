use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::assistant::AssistModule;
use crate::matcher::EmptyQueryPolicy;
use crate::providers::Provider;

/// Models tried by `probe` when none are given on the command line.
pub const DEFAULT_PROBE_MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-1.0-pro",
    "models/gemini-1.5-flash",
    "models/gemini-pro",
];

#[derive(Parser, Debug)]
#[command(name = "lumina-assist")]
#[command(version)]
#[command(about = "Code debugger, simplifier and checker backed by an LLM, with offline sample answers")]
pub struct Args {
    /// Config file (defaults to ./lumina.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the /chat backend
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,

        /// LLM provider: gemini or openai
        #[arg(long, value_enum)]
        provider: Option<Provider>,

        #[arg(long)]
        model: Option<String>,
    },

    /// Ask the backend, falling back to sample answers when it is unreachable
    Ask {
        #[arg(value_enum)]
        module: AssistModule,

        message: String,

        /// Backend URL (defaults to http://localhost:5000/chat)
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Look a query up in the offline sample corpus only
    Match {
        #[arg(value_enum)]
        module: AssistModule,

        query: String,

        /// JSON or TOML corpus replacing the built-in one
        #[arg(long)]
        corpus: Option<PathBuf>,

        #[arg(long, value_enum)]
        empty_query: Option<EmptyQueryPolicy>,
    },

    /// List Gemini models that support generateContent
    Models,

    /// Find the first Gemini model that answers
    Probe {
        /// Candidates in order; built-in list when empty
        models: Vec<String>,
    },
}

/// `tracing` filter directive for the given `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "lumina_assist=info",
        1 => "lumina_assist=debug",
        _ => "lumina_assist=trace",
    }
}

pub fn probe_candidates(models: &[String]) -> Vec<String> {
    if models.is_empty() {
        DEFAULT_PROBE_MODELS.iter().map(|m| m.to_string()).collect()
    } else {
        models.to_vec()
    }
}
