//! The `/chat` HTTP endpoint shared by the three assistants.
//!
//! Minimal HTTP/1.1 server: one request per connection, `Connection: close`,
//! JSON in and out. Every response carries `Access-Control-Allow-Origin: *`
//! for the browser front-ends.

use std::sync::Arc;

use colored::*;
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use crate::assistant::AssistModule;
use crate::backend::CompletionBackend;
use crate::config::ServerConfig;
use crate::providers::{ChatRequest, ChatResponse, ErrorResponse};

const DEFAULT_MODULE: &str = "debugger";
const READ_CHUNK: usize = 8192;

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        HttpResponse {
            status,
            content_type: "application/json",
            body: serde_json::to_string(value).unwrap_or_default(),
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        HttpResponse::json(status, &ErrorResponse { error: message.into() })
    }

    pub fn no_content() -> Self {
        HttpResponse { status: 204, content_type: "text/plain", body: String::new() }
    }

    fn reason(&self) -> &'static str {
        match self.status {
            200 => "OK",
            204 => "No Content",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            413 => "Payload Too Large",
            500 => "Internal Server Error",
            _ => "Unknown",
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}; charset=utf-8\r\nContent-Length: {}\r\nAccess-Control-Allow-Origin: *\r\nAccess-Control-Allow-Methods: POST, OPTIONS\r\nAccess-Control-Allow-Headers: Content-Type\r\nConnection: close\r\n\r\n{}",
            self.status,
            self.reason(),
            self.content_type,
            self.body.len(),
            self.body,
        )
        .into_bytes()
    }
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// Dispatch one parsed request. Socket-free so it can be tested directly.
pub async fn route(
    method: &str,
    path: &str,
    body: &[u8],
    backend: &dyn CompletionBackend,
) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    match (method, path) {
        ("OPTIONS", _) => HttpResponse::no_content(),
        ("POST", "/chat") => handle_chat(body, backend).await,
        (_, "/chat") => HttpResponse::error(405, "Method not allowed"),
        _ => HttpResponse::error(404, "Not found"),
    }
}

async fn handle_chat(body: &[u8], backend: &dyn CompletionBackend) -> HttpResponse {
    let request: ChatRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => return HttpResponse::error(400, format!("Invalid JSON body: {e}")),
    };

    let message = request.message.unwrap_or_default();
    if message.is_empty() {
        return HttpResponse::error(400, "No message provided");
    }

    let module_name = request.module.as_deref().unwrap_or(DEFAULT_MODULE);
    let module = match AssistModule::from_str_loose(module_name) {
        Ok(m) => m,
        Err(_) => return HttpResponse::error(400, "Invalid module type"),
    };

    let prompt = module.build_prompt(&message);
    match backend.complete(&prompt).await {
        Ok(text) => {
            info!(%module, reply_len = text.len(), "chat answered");
            HttpResponse::json(
                200,
                &ChatResponse { response: text, module: Some(module.to_string()) },
            )
        }
        Err(e) => {
            error!(%module, error = %e, "completion failed");
            HttpResponse::error(500, format!("Failed to generate response: {e}"))
        }
    }
}

// ---------------------------------------------------------------------------
// Request parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    pub method: String,
    pub path: String,
    pub header_len: usize,
    pub content_length: usize,
}

/// Parse the request line and headers. `Ok(None)` means more bytes are
/// needed.
pub fn parse_head(buf: &[u8]) -> Result<Option<RequestHead>, httparse::Error> {
    let mut headers = [httparse::EMPTY_HEADER; 64];
    let mut req = httparse::Request::new(&mut headers);
    match req.parse(buf)? {
        httparse::Status::Partial => Ok(None),
        httparse::Status::Complete(header_len) => {
            let content_length = req
                .headers
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case("content-length"))
                .and_then(|h| std::str::from_utf8(h.value).ok())
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            Ok(Some(RequestHead {
                method: req.method.unwrap_or("GET").to_string(),
                path: req.path.unwrap_or("/").to_string(),
                header_len,
                content_length,
            }))
        }
    }
}

enum ReadOutcome {
    Request { head: RequestHead, body: Vec<u8> },
    TooLarge,
    Closed,
}

async fn read_request(
    stream: &mut TcpStream,
    max_body: usize,
) -> Result<ReadOutcome, Box<dyn std::error::Error + Send + Sync>> {
    let mut buf: Vec<u8> = Vec::with_capacity(READ_CHUNK);
    let mut chunk = vec![0u8; READ_CHUNK];

    let head = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(ReadOutcome::Closed);
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(head) = parse_head(&buf)? {
            break head;
        }
        if buf.len() > READ_CHUNK * 8 {
            return Ok(ReadOutcome::TooLarge);
        }
    };

    if head.content_length > max_body {
        return Ok(ReadOutcome::TooLarge);
    }

    let wanted = head.header_len + head.content_length;
    while buf.len() < wanted {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let end = wanted.min(buf.len());
    let body = buf[head.header_len..end].to_vec();
    Ok(ReadOutcome::Request { head, body })
}

// ---------------------------------------------------------------------------
// Server loop
// ---------------------------------------------------------------------------

/// Bind `cfg.host:cfg.port` and serve until the process is stopped.
pub async fn serve(
    cfg: &ServerConfig,
    backend: Arc<dyn CompletionBackend>,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind((cfg.host.as_str(), cfg.port)).await?;
    eprintln!(
        "{}",
        format!("  Chat backend running at http://{}:{}/chat", cfg.host, cfg.port).bright_green()
    );
    eprintln!("{}", format!("  Provider: {}", backend.describe()).bright_blue());
    eprintln!("{}", "  Press Ctrl+C to stop.".bright_blue());
    serve_on(listener, backend, cfg.max_body_bytes).await?;
    Ok(())
}

/// Accept loop over an already bound listener.
pub async fn serve_on(
    listener: TcpListener,
    backend: Arc<dyn CompletionBackend>,
    max_body_bytes: usize,
) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "listening");
    loop {
        let (stream, addr) = listener.accept().await?;
        let backend = Arc::clone(&backend);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, backend, max_body_bytes).await {
                warn!(%addr, error = %e, "connection error");
            }
        });
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    backend: Arc<dyn CompletionBackend>,
    max_body_bytes: usize,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let response = match read_request(&mut stream, max_body_bytes).await? {
        ReadOutcome::Closed => return Ok(()),
        ReadOutcome::TooLarge => HttpResponse::error(413, "Request too large"),
        ReadOutcome::Request { head, body } => {
            debug!(method = %head.method, path = %head.path, body_len = body.len(), "request");
            route(&head.method, &head.path, &body, backend.as_ref()).await
        }
    };
    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AssistError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes the prompt back, or fails when `fail` is set.
    struct EchoBackend {
        fail: bool,
        seen: Mutex<Vec<String>>,
    }

    impl EchoBackend {
        fn ok() -> Self {
            EchoBackend { fail: false, seen: Mutex::new(Vec::new()) }
        }
        fn failing() -> Self {
            EchoBackend { fail: true, seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl CompletionBackend for EchoBackend {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.seen.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(AssistError::Provider("quota exceeded".into()))
            } else {
                Ok(format!("echo: {}", prompt.len()))
            }
        }
        fn describe(&self) -> String {
            "echo".into()
        }
    }

    fn json_body(resp: &HttpResponse) -> serde_json::Value {
        serde_json::from_str(&resp.body).expect("json body")
    }

    #[tokio::test]
    async fn test_chat_success_returns_response_and_module() {
        let backend = EchoBackend::ok();
        let body = br#"{"message":"print(x)","module":"simplifier"}"#;
        let resp = route("POST", "/chat", body, &backend).await;
        assert_eq!(resp.status, 200);
        let v = json_body(&resp);
        assert!(v["response"].as_str().unwrap().starts_with("echo: "));
        assert_eq!(v["module"], "simplifier");
        let seen = backend.seen.lock().unwrap();
        assert!(seen[0].starts_with("You are an expert code refactoring assistant."));
        assert!(seen[0].ends_with("User request: print(x)"));
    }

    #[tokio::test]
    async fn test_chat_module_defaults_to_debugger() {
        let backend = EchoBackend::ok();
        let resp = route("POST", "/chat", br#"{"message":"hi"}"#, &backend).await;
        assert_eq!(json_body(&resp)["module"], "debugger");
    }

    #[tokio::test]
    async fn test_chat_accepts_evaluator_alias() {
        let backend = EchoBackend::ok();
        let resp =
            route("POST", "/chat", br#"{"message":"hi","module":"evaluator"}"#, &backend).await;
        assert_eq!(resp.status, 200);
        assert_eq!(json_body(&resp)["module"], "checker");
    }

    #[tokio::test]
    async fn test_chat_empty_message_is_400() {
        let backend = EchoBackend::ok();
        let resp = route("POST", "/chat", br#"{"message":""}"#, &backend).await;
        assert_eq!(resp.status, 400);
        assert_eq!(json_body(&resp)["error"], "No message provided");
        assert!(backend.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_chat_null_message_is_400_no_message() {
        let backend = EchoBackend::ok();
        let resp = route("POST", "/chat", br#"{"message":null,"module":"debugger"}"#, &backend).await;
        assert_eq!(resp.status, 400);
        assert_eq!(json_body(&resp)["error"], "No message provided");
    }

    #[tokio::test]
    async fn test_chat_missing_message_is_400() {
        let backend = EchoBackend::ok();
        let resp = route("POST", "/chat", br#"{"module":"checker"}"#, &backend).await;
        assert_eq!(resp.status, 400);
    }

    #[tokio::test]
    async fn test_chat_unknown_module_is_400() {
        let backend = EchoBackend::ok();
        let resp = route("POST", "/chat", br#"{"message":"x","module":"poet"}"#, &backend).await;
        assert_eq!(resp.status, 400);
        assert_eq!(json_body(&resp)["error"], "Invalid module type");
    }

    #[tokio::test]
    async fn test_chat_malformed_json_is_400() {
        let backend = EchoBackend::ok();
        let resp = route("POST", "/chat", b"{not json", &backend).await;
        assert_eq!(resp.status, 400);
        assert!(json_body(&resp)["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[tokio::test]
    async fn test_chat_backend_failure_is_500() {
        let backend = EchoBackend::failing();
        let resp = route("POST", "/chat", br#"{"message":"x"}"#, &backend).await;
        assert_eq!(resp.status, 500);
        assert_eq!(
            json_body(&resp)["error"],
            "Failed to generate response: provider error: quota exceeded"
        );
    }

    #[tokio::test]
    async fn test_options_preflight() {
        let backend = EchoBackend::ok();
        let resp = route("OPTIONS", "/chat", b"", &backend).await;
        assert_eq!(resp.status, 204);
        assert!(resp.body.is_empty());
    }

    #[tokio::test]
    async fn test_get_chat_is_405_and_unknown_path_404() {
        let backend = EchoBackend::ok();
        assert_eq!(route("GET", "/chat", b"", &backend).await.status, 405);
        assert_eq!(route("GET", "/dashboard", b"", &backend).await.status, 404);
    }

    #[tokio::test]
    async fn test_query_string_ignored_for_routing() {
        let backend = EchoBackend::ok();
        let resp = route("POST", "/chat?v=2", br#"{"message":"x"}"#, &backend).await;
        assert_eq!(resp.status, 200);
    }

    #[test]
    fn test_response_bytes_have_cors_and_length() {
        let resp = HttpResponse::error(404, "Not found");
        let text = String::from_utf8(resp.to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(text.contains(&format!("Content-Length: {}\r\n", resp.body.len())));
        assert!(text.ends_with(r#"{"error":"Not found"}"#));
    }

    #[test]
    fn test_parse_head_complete() {
        let raw = b"POST /chat HTTP/1.1\r\nHost: x\r\nContent-Length: 16\r\n\r\n{\"message\":\"hi\"}";
        let head = parse_head(raw).unwrap().unwrap();
        assert_eq!(head.method, "POST");
        assert_eq!(head.path, "/chat");
        assert_eq!(head.content_length, 16);
        assert_eq!(&raw[head.header_len..], b"{\"message\":\"hi\"}");
    }

    #[test]
    fn test_parse_head_partial() {
        assert_eq!(parse_head(b"POST /chat HTTP/1.1\r\nHost: x\r\n").unwrap(), None);
    }

    #[test]
    fn test_parse_head_without_length() {
        let head = parse_head(b"GET / HTTP/1.1\r\n\r\n").unwrap().unwrap();
        assert_eq!(head.content_length, 0);
    }

    #[test]
    fn test_parse_head_garbage_is_error() {
        assert!(parse_head(b"\x00\x01\x02 nonsense\r\n\r\n").is_err());
    }

    #[tokio::test]
    async fn test_serve_on_round_trip() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let backend: Arc<dyn CompletionBackend> = Arc::new(EchoBackend::ok());
        tokio::spawn(async move {
            let _ = serve_on(listener, backend, 1024).await;
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let body = r#"{"message":"hello","module":"checker"}"#;
        let req = format!(
            "POST /chat HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(req.as_bytes()).await.unwrap();
        let mut out = String::new();
        stream.read_to_string(&mut out).await.unwrap();
        assert!(out.starts_with("HTTP/1.1 200 OK"));
        assert!(out.contains(r#""module":"checker""#));
    }

    #[tokio::test]
    async fn test_serve_on_rejects_oversized_body() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let backend: Arc<dyn CompletionBackend> = Arc::new(EchoBackend::ok());
        tokio::spawn(async move {
            let _ = serve_on(listener, backend, 8).await;
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let req = "POST /chat HTTP/1.1\r\nContent-Length: 64\r\n\r\n";
        stream.write_all(req.as_bytes()).await.unwrap();
        let mut out = String::new();
        stream.read_to_string(&mut out).await.unwrap();
        assert!(out.starts_with("HTTP/1.1 413"));
    }
}
