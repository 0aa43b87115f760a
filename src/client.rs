//! # Stage: ChatClient
//!
//! ## Responsibility
//! Ask the `/chat` backend first; when that fails for any reason, answer
//! from the module's offline corpus instead.
//!
//! ## Guarantees
//! - `ask` never returns an error and never panics: every failure path ends
//!   in a user-visible [`Reply`]
//! - A miss maps to the module's fixed "Invalid Question" text, never to an
//!   empty reply
//!
//! ## NOT Responsible For
//! - Rendering or escaping the reply text
//! - Persisting conversation history

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::assistant::AssistModule;
use crate::config::Config;
use crate::corpus::CorpusSet;
use crate::error::{AssistError, Result};
use crate::matcher::{MatchOutcome, SampleMatcher};
use crate::providers::{ChatRequest, ChatResponse};

/// Where a [`Reply`]'s text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Backend,
    Sample,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

pub struct ChatClient {
    http: Client,
    endpoint: String,
    matcher: SampleMatcher,
    corpora: CorpusSet,
}

impl ChatClient {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        matcher: SampleMatcher,
        corpora: CorpusSet,
    ) -> Result<Self> {
        let endpoint = endpoint.into();
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssistError::transport(&endpoint, e))?;
        Ok(ChatClient { http, endpoint, matcher, corpora })
    }

    pub fn from_config(cfg: &Config, corpora: CorpusSet) -> Result<Self> {
        ChatClient::new(
            cfg.client.endpoint.clone(),
            Duration::from_secs(cfg.client.timeout_secs),
            SampleMatcher::new(cfg.matcher.empty_query),
            corpora,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Answer `message` for `module`, falling back to the offline corpus when
    /// the backend cannot produce a reply.
    pub async fn ask(&self, module: AssistModule, message: &str) -> Reply {
        let message = message.trim();
        if message.is_empty() {
            debug!(%module, "empty message, skipping backend");
            return self.fallback(module, message);
        }
        match self.request_backend(module, message).await {
            Ok(text) => {
                debug!(%module, "backend answered");
                Reply { text, source: ReplySource::Backend }
            }
            Err(e) => {
                warn!(%module, error = %e, "backend request failed, falling back to sample data");
                self.fallback(module, message)
            }
        }
    }

    /// Offline answer only.
    pub fn fallback(&self, module: AssistModule, message: &str) -> Reply {
        let corpus = self.corpora.get(module);
        let outcome = self.matcher.find(corpus.as_slice(), message);
        match outcome.answer(corpus.as_slice()) {
            Some(text) => {
                info!(%module, outcome = ?outcome, "answered from sample data");
                Reply { text: text.to_string(), source: ReplySource::Sample }
            }
            None => {
                let best_score = match outcome {
                    MatchOutcome::NoMatch { best_score } => best_score,
                    _ => 0.0,
                };
                info!(%module, best_score, "no sample matched");
                Reply { text: module.no_match_message().to_string(), source: ReplySource::NoMatch }
            }
        }
    }

    /// POST `{message, module}` and return the `response` field. Every
    /// failure here is a transport failure from the caller's point of view.
    pub async fn request_backend(&self, module: AssistModule, message: &str) -> Result<String> {
        let body = ChatRequest { message: Some(message.to_string()), module: Some(module.to_string()) };
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistError::transport(&self.endpoint, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AssistError::Http {
                status: status.as_u16(),
                url: self.endpoint.clone(),
                body: resp.text().await.unwrap_or_default(),
            });
        }

        let parsed: ChatResponse = resp.json().await.map_err(|e| AssistError::Decode {
            what: "chat response",
            detail: e.to_string(),
        })?;
        Ok(parsed.response)
    }
}
