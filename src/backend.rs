//! LLM providers behind the `/chat` endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::error::{AssistError, Result};
use crate::providers::*;

/// Turns a fully built prompt into the model's reply text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Short label for logs, e.g. `gemini/gemini-2.5-flash`.
    fn describe(&self) -> String;
}

/// Pick a model for `provider`, swapping the other provider's default for
/// this one's when the config only changed `kind`.
pub fn resolve_model(provider: Provider, model: &str) -> String {
    let other_default = match provider {
        Provider::Gemini => Provider::Openai.default_model(),
        Provider::Openai => Provider::Gemini.default_model(),
    };
    if model.is_empty() || model == other_default {
        provider.default_model().to_string()
    } else {
        model.to_string()
    }
}

fn http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AssistError::Provider(format!("could not build HTTP client: {e}")))
}

async fn read_error_body(resp: reqwest::Response) -> String {
    resp.text().await.unwrap_or_default()
}

/// Build the backend named by `cfg`.
///
/// A missing API key is not an error here: the server still starts and every
/// completion fails with [`AssistError::MissingApiKey`], which front-ends
/// treat like any other backend failure.
pub fn build_backend(cfg: &ProviderConfig) -> Result<Arc<dyn CompletionBackend>> {
    let api_key = cfg.api_key().map(str::to_string);
    if api_key.is_none() {
        warn!(var = cfg.kind.api_key_var(), "no API key configured; /chat will return errors");
    }
    let model = resolve_model(cfg.kind, &cfg.model);
    let backend: Arc<dyn CompletionBackend> = match cfg.kind {
        Provider::Gemini => Arc::new(GeminiBackend::new(
            api_key,
            model,
            cfg.base_url().to_string(),
            cfg.timeout_secs,
        )?),
        Provider::Openai => Arc::new(OpenAiBackend::new(
            api_key,
            model,
            cfg.base_url().to_string(),
            cfg.timeout_secs,
        )?),
    };
    info!(backend = %backend.describe(), "completion backend ready");
    Ok(backend)
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

pub struct GeminiBackend {
    client: Client,
    api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeminiBackend {
    pub fn new(
        api_key: Option<String>,
        model: String,
        base_url: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(GeminiBackend {
            client: http_client(timeout_secs)?,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(AssistError::MissingApiKey { var: "GEMINI_API_KEY" })
    }

    /// `models/` is part of the resource name; accept it with or without.
    fn model_path(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    pub fn generate_url(&self, model: &str) -> String {
        format!("{}/v1beta/{}:generateContent", self.base_url, Self::model_path(model))
    }

    async fn generate_with(&self, model: &str, prompt: &str) -> Result<String> {
        let key = self.key()?;
        let url = self.generate_url(model);
        debug!(%url, prompt_len = prompt.len(), "gemini generateContent");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&GeminiRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| AssistError::transport(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AssistError::Http {
                status: status.as_u16(),
                url,
                body: read_error_body(resp).await,
            });
        }

        let parsed: GeminiResponse = resp.json().await.map_err(|e| AssistError::Decode {
            what: "gemini response",
            detail: e.to_string(),
        })?;

        if let Some(text) = parsed.text() {
            return Ok(text);
        }
        let reason = parsed
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .or_else(|| parsed.candidates.first().and_then(|c| c.finish_reason.clone()))
            .unwrap_or_else(|| "no candidates".to_string());
        Err(AssistError::Provider(format!("gemini returned no text ({reason})")))
    }

    /// Every model visible to the key, following pagination.
    pub async fn list_models(&self) -> Result<Vec<GeminiModel>> {
        let key = self.key()?;
        let url = format!("{}/v1beta/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self.client.get(&url).header("x-goog-api-key", key);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }
            let resp = req.send().await.map_err(|e| AssistError::transport(&url, e))?;
            let status = resp.status();
            if !status.is_success() {
                return Err(AssistError::Http {
                    status: status.as_u16(),
                    url,
                    body: read_error_body(resp).await,
                });
            }
            let page: GeminiModelList = resp.json().await.map_err(|e| AssistError::Decode {
                what: "gemini model list",
                detail: e.to_string(),
            })?;
            models.extend(page.models);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        Ok(models)
    }

    /// Try each candidate with a tiny prompt and return the first that
    /// answers, together with every failure seen before it.
    pub async fn probe_models(&self, candidates: &[String]) -> ProbeReport {
        let mut report = ProbeReport::default();
        for model in candidates {
            match self.generate_with(model, "Hi").await {
                Ok(reply) => {
                    info!(%model, "model answered");
                    report.working = Some((model.clone(), reply));
                    break;
                }
                Err(e) => {
                    warn!(%model, error = %e, "model failed");
                    report.failures.push((model.clone(), e.to_string()));
                }
            }
        }
        report
    }
}

#[async_trait]
impl CompletionBackend for GeminiBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate_with(&self.model, prompt).await
    }

    fn describe(&self) -> String {
        format!("gemini/{}", self.model)
    }
}

/// Outcome of [`GeminiBackend::probe_models`].
#[derive(Debug, Default)]
pub struct ProbeReport {
    /// First model that answered and its reply.
    pub working: Option<(String, String)>,
    /// `(model, error)` for every candidate tried before it.
    pub failures: Vec<(String, String)>,
}

// ---------------------------------------------------------------------------
// OpenAI
// ---------------------------------------------------------------------------

pub struct OpenAiBackend {
    client: Client,
    api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl OpenAiBackend {
    pub fn new(
        api_key: Option<String>,
        model: String,
        base_url: String,
        timeout_secs: u64,
    ) -> Result<Self> {
        Ok(OpenAiBackend {
            client: http_client(timeout_secs)?,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let key = self.api_key.as_deref().ok_or(AssistError::MissingApiKey { var: "OPENAI_API_KEY" })?;
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = OpenAIChatRequest {
            model: self.model.clone(),
            messages: vec![OpenAIChatMessage { role: "user".to_string(), content: prompt.to_string() }],
            temperature: 0.7,
        };

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {key}"))
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistError::transport(&url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AssistError::Http {
                status: status.as_u16(),
                url,
                body: read_error_body(resp).await,
            });
        }

        let parsed: OpenAIChatResponse = resp.json().await.map_err(|e| AssistError::Decode {
            what: "openai response",
            detail: e.to_string(),
        })?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AssistError::Provider("openai returned no text".to_string()))
    }

    fn describe(&self) -> String {
        format!("openai/{}", self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_model_swaps_other_default() {
        assert_eq!(resolve_model(Provider::Openai, "gemini-2.5-flash"), "gpt-4o-mini");
        assert_eq!(resolve_model(Provider::Gemini, "gpt-4o-mini"), "gemini-2.5-flash");
    }

    #[test]
    fn test_resolve_model_keeps_explicit_choice() {
        assert_eq!(resolve_model(Provider::Gemini, "gemini-1.5-pro"), "gemini-1.5-pro");
        assert_eq!(resolve_model(Provider::Openai, "gpt-4"), "gpt-4");
    }

    #[test]
    fn test_resolve_model_empty_uses_default() {
        assert_eq!(resolve_model(Provider::Gemini, ""), "gemini-2.5-flash");
    }

    #[test]
    fn test_gemini_generate_url_adds_models_prefix() {
        let b = GeminiBackend::new(None, "gemini-2.5-flash".into(), "https://x.test/".into(), 5)
            .unwrap();
        assert_eq!(
            b.generate_url("gemini-2.5-flash"),
            "https://x.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            b.generate_url("models/gemini-pro"),
            "https://x.test/v1beta/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_describe_labels() {
        let g = GeminiBackend::new(None, "m1".into(), "http://h".into(), 5).unwrap();
        let o = OpenAiBackend::new(None, "m2".into(), "http://h".into(), 5).unwrap();
        assert_eq!(g.describe(), "gemini/m1");
        assert_eq!(o.describe(), "openai/m2");
    }

    #[tokio::test]
    async fn test_gemini_without_key_fails_fast() {
        let g = GeminiBackend::new(None, "m".into(), "http://127.0.0.1:1".into(), 5).unwrap();
        let err = g.complete("hello").await.unwrap_err();
        assert!(matches!(err, AssistError::MissingApiKey { var: "GEMINI_API_KEY" }));
    }

    #[tokio::test]
    async fn test_openai_without_key_fails_fast() {
        let o = OpenAiBackend::new(None, "m".into(), "http://127.0.0.1:1".into(), 5).unwrap();
        let err = o.complete("hello").await.unwrap_err();
        assert!(matches!(err, AssistError::MissingApiKey { var: "OPENAI_API_KEY" }));
    }

    #[tokio::test]
    async fn test_gemini_unreachable_is_transport_error() {
        let g = GeminiBackend::new(Some("k".into()), "m".into(), "http://127.0.0.1:1".into(), 5)
            .unwrap();
        let err = g.complete("hello").await.unwrap_err();
        assert!(err.is_transport_failure(), "got {err}");
    }

    #[test]
    fn test_build_backend_without_key_still_builds() {
        let cfg = ProviderConfig::default();
        let backend = build_backend(&cfg).unwrap();
        assert_eq!(backend.describe(), "gemini/gemini-2.5-flash");
    }

    #[tokio::test]
    async fn test_probe_records_failures() {
        let g = GeminiBackend::new(Some("k".into()), "m".into(), "http://127.0.0.1:1".into(), 5)
            .unwrap();
        let report = g.probe_models(&["a".to_string(), "b".to_string()]).await;
        assert!(report.working.is_none());
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].0, "a");
    }
}
