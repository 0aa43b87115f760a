//! End-to-end tests: `ChatClient` talking to the real `/chat` server over a
//! loopback socket, and to a few misbehaving hand-rolled servers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lumina_assist::backend::CompletionBackend;
use lumina_assist::client::{ChatClient, ReplySource};
use lumina_assist::corpus::{Corpus, CorpusSet};
use lumina_assist::error::{AssistError, Result};
use lumina_assist::matcher::SampleMatcher;
use lumina_assist::server::{parse_head, serve_on};
use lumina_assist::AssistModule;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

struct FixedBackend(&'static str);

#[async_trait]
impl CompletionBackend for FixedBackend {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }

    fn describe(&self) -> String {
        "fixed".to_string()
    }
}

struct FailingBackend;

#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(AssistError::MissingApiKey { var: "GEMINI_API_KEY" })
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

async fn spawn_server(backend: Arc<dyn CompletionBackend>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_on(listener, backend, 64 * 1024));
    format!("http://{addr}/chat")
}

/// Answer every connection with `status` and `body`, after reading the full
/// request.
async fn spawn_canned(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else { return };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = stream.read(&mut chunk).await.unwrap_or(0);
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if let Ok(Some(head)) = parse_head(&buf) {
                    if buf.len() >= head.header_len + head.content_length {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });
    format!("http://{addr}/chat")
}

fn client_for(endpoint: &str, corpora: CorpusSet) -> ChatClient {
    ChatClient::new(endpoint, Duration::from_secs(5), SampleMatcher::default(), corpora).unwrap()
}

#[tokio::test]
async fn test_backend_reply_is_used_when_available() {
    let endpoint = spawn_server(Arc::new(FixedBackend("Looks fine to me."))).await;
    let client = client_for(&endpoint, CorpusSet::builtin());

    let reply = client.ask(AssistModule::Debugger, "print(Hello World)").await;
    assert_eq!(reply.source, ReplySource::Backend);
    assert_eq!(reply.text, "Looks fine to me.");
}

#[tokio::test]
async fn test_server_500_falls_back_to_samples() {
    let endpoint = spawn_server(Arc::new(FailingBackend)).await;
    let client = client_for(&endpoint, CorpusSet::builtin());

    let err = client.request_backend(AssistModule::Debugger, "print(x)").await.unwrap_err();
    assert!(matches!(err, AssistError::Http { status: 500, .. }));

    let reply = client.ask(AssistModule::Debugger, "print(Hello World)").await;
    assert_eq!(reply.source, ReplySource::Sample);
    assert!(reply.text.contains("Corrected Code"));
}

#[tokio::test]
async fn test_server_500_with_unknown_text_reports_no_match() {
    let endpoint = spawn_server(Arc::new(FailingBackend)).await;
    let client = client_for(&endpoint, CorpusSet::builtin());

    let reply = client.ask(AssistModule::Checker, "qwertyuiop zxcvbnm").await;
    assert_eq!(reply.source, ReplySource::NoMatch);
    assert_eq!(reply.text, AssistModule::Checker.no_match_message());
}

#[tokio::test]
async fn test_connection_refused_falls_back() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let corpora = CorpusSet::builtin()
        .with_override(AssistModule::Simplifier, Corpus::from_pairs(&[("x = x + 1", "x += 1")]));
    let client = client_for(&format!("http://{addr}/chat"), corpora);

    let reply = client.ask(AssistModule::Simplifier, "X = X + 1").await;
    assert_eq!(reply.source, ReplySource::Sample);
    assert_eq!(reply.text, "x += 1");
}

#[tokio::test]
async fn test_malformed_success_body_falls_back() {
    let endpoint = spawn_canned("200 OK", "{\"unexpected\":true}").await;
    let client = client_for(&endpoint, CorpusSet::builtin());

    let err = client.request_backend(AssistModule::Debugger, "print(x)").await.unwrap_err();
    assert!(matches!(err, AssistError::Decode { .. }));

    let reply = client.ask(AssistModule::Debugger, "print(Hello World)").await;
    assert_eq!(reply.source, ReplySource::Sample);
}

#[tokio::test]
async fn test_service_unavailable_falls_back() {
    let endpoint = spawn_canned("503 Service Unavailable", "{\"error\":\"busy\"}").await;
    let client = client_for(&endpoint, CorpusSet::builtin());

    let reply = client.ask(AssistModule::Debugger, "print(Hello World)").await;
    assert_eq!(reply.source, ReplySource::Sample);
}

#[tokio::test]
async fn test_evaluator_module_reaches_checker_backend() {
    let endpoint = spawn_server(Arc::new(FixedBackend("Likely human-written."))).await;
    let client = client_for(&endpoint, CorpusSet::builtin());

    let module: AssistModule = "evaluator".parse().unwrap();
    let reply = client.ask(module, "def f(): pass").await;
    assert_eq!(reply.source, ReplySource::Backend);
    assert_eq!(reply.text, "Likely human-written.");
}
