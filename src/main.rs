use clap::Parser;
use colored::*;
use tracing_subscriber::{fmt, EnvFilter};

use lumina_assist::backend::{build_backend, resolve_model, GeminiBackend};
use lumina_assist::cli::{log_filter, probe_candidates, Args, Command};
use lumina_assist::client::{ChatClient, ReplySource};
use lumina_assist::config::Config;
use lumina_assist::corpus::{Corpus, CorpusSet};
use lumina_assist::matcher::{MatchOutcome, SampleMatcher};
use lumina_assist::providers::Provider;
use lumina_assist::{server, AssistModule};

/// Gemini client for `models` and `probe`, whatever provider `serve` uses.
fn gemini_backend(cfg: &Config) -> Result<GeminiBackend, Box<dyn std::error::Error>> {
    let (api_key, base_url) = if cfg.provider.kind == Provider::Gemini {
        (cfg.provider.api_key().map(str::to_string), cfg.provider.base_url().to_string())
    } else {
        (
            std::env::var(Provider::Gemini.api_key_var()).ok(),
            Provider::Gemini.default_base_url().to_string(),
        )
    };
    let model = resolve_model(Provider::Gemini, &cfg.provider.model);
    Ok(GeminiBackend::new(api_key, model, base_url, cfg.provider.timeout_secs)?)
}

fn print_match(module: AssistModule, corpus: &Corpus, outcome: MatchOutcome) {
    match outcome {
        MatchOutcome::Exact { index } => {
            eprintln!("{}", format!("  [{module}] exact match, sample #{index}").bright_green());
        }
        MatchOutcome::Similar { index, score } => {
            eprintln!(
                "{}",
                format!("  [{module}] similar match, sample #{index} (score {score:.3})").bright_yellow()
            );
        }
        MatchOutcome::NoMatch { best_score } => {
            eprintln!(
                "{}",
                format!("  [{module}] no match (best score {best_score:.3})").bright_red()
            );
            println!("{}", module.no_match_message());
            return;
        }
    }
    if let Some(answer) = outcome.answer(corpus.as_slice()) {
        println!("{answer}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter(args.verbose)));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut cfg = Config::load(args.config.as_deref())?;

    match args.command {
        Command::Serve { host, port, provider, model } => {
            if let Some(host) = host {
                cfg.server.host = host;
            }
            if let Some(port) = port {
                cfg.server.port = port;
            }
            if let Some(provider) = provider {
                if provider != cfg.provider.kind {
                    cfg.provider.kind = provider;
                    cfg.provider.base_url = None;
                    cfg.provider.api_key = None;
                    cfg.apply_env(|name| std::env::var(name).ok());
                }
            }
            if let Some(model) = model {
                cfg.provider.model = model;
            }
            let backend = build_backend(&cfg.provider)?;
            server::serve(&cfg.server, backend).await?;
        }

        Command::Ask { module, message, endpoint } => {
            if let Some(endpoint) = endpoint {
                cfg.client.endpoint = endpoint;
            }
            let corpora = CorpusSet::from_config(&cfg.corpus)?;
            let client = ChatClient::from_config(&cfg, corpora)?;
            let reply = client.ask(module, &message).await;
            let label = match reply.source {
                ReplySource::Backend => format!("  [{module}] answered by {}", client.endpoint()).bright_green(),
                ReplySource::Sample => format!("  [{module}] backend unavailable, sample answer").bright_yellow(),
                ReplySource::NoMatch => format!("  [{module}] backend unavailable, no sample matched").bright_red(),
            };
            eprintln!("{label}");
            println!("{}", reply.text);
        }

        Command::Match { module, query, corpus, empty_query } => {
            let mut corpora = CorpusSet::from_config(&cfg.corpus)?;
            if let Some(path) = corpus {
                corpora = corpora.with_override(module, Corpus::load(&path)?);
            }
            let matcher = SampleMatcher::new(empty_query.unwrap_or(cfg.matcher.empty_query));
            let corpus = corpora.get(module);
            let outcome = matcher.find(corpus.as_slice(), &query);
            print_match(module, corpus, outcome);
        }

        Command::Models => {
            let gemini = gemini_backend(&cfg)?;
            let models = gemini.list_models().await?;
            let usable: Vec<_> = models.iter().filter(|m| m.supports_generate_content()).collect();
            eprintln!(
                "{}",
                format!("  {} of {} models support generateContent", usable.len(), models.len())
                    .bright_blue()
            );
            for model in usable {
                match &model.display_name {
                    Some(display) => println!("{}  {}", model.name, display.dimmed()),
                    None => println!("{}", model.name),
                }
            }
        }

        Command::Probe { models } => {
            let gemini = gemini_backend(&cfg)?;
            let report = gemini.probe_models(&probe_candidates(&models)).await;
            for (model, error) in &report.failures {
                eprintln!("{} {}: {}", "  FAIL".bright_red(), model, error);
            }
            match report.working {
                Some((model, reply)) => {
                    eprintln!("{} {}", "  OK".bright_green(), model);
                    println!("{}", reply.trim());
                }
                None => {
                    eprintln!("{}", "  No candidate model answered.".bright_red());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
