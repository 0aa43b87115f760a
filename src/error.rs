use std::path::PathBuf;

/// Crate-level error type.
///
/// The matcher never produces one of these; they come from the transport,
/// provider, config and corpus-loading layers around it.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// The request never got a response (DNS, connect, timeout, ...).
    #[error("transport error talking to {url}: {detail}")]
    Transport { url: String, detail: String },

    /// The remote side replied with a non-2xx status.
    #[error("HTTP {status} from {url}: {body}")]
    Http { status: u16, url: String, body: String },

    /// A response body could not be decoded into the expected shape.
    #[error("could not decode {what}: {detail}")]
    Decode { what: &'static str, detail: String },

    /// The LLM provider answered but the answer carried no usable text.
    #[error("provider error: {0}")]
    Provider(String),

    #[error("{var} not set. Export it or add it to the config file.")]
    MissingApiKey { var: &'static str },

    #[error("invalid config {path}: {detail}")]
    Config { path: PathBuf, detail: String },

    #[error("could not load corpus {path}: {detail}")]
    CorpusLoad { path: PathBuf, detail: String },

    #[error("unknown module: {0}")]
    UnknownModule(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AssistError {
    /// True for failures on the way to (or back from) the primary backend.
    /// These are the ones a caller recovers from by consulting the offline
    /// corpus.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            AssistError::Transport { .. } | AssistError::Http { .. } | AssistError::Decode { .. }
        )
    }

    pub(crate) fn transport(url: &str, err: reqwest::Error) -> Self {
        AssistError::Transport { url: url.to_string(), detail: err.without_url().to_string() }
    }
}

pub type Result<T> = std::result::Result<T, AssistError>;
