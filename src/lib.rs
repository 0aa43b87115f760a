//! Lumina Assist: the debugger, simplifier and checker assistants.
//!
//! Each assistant sends a code snippet to a `/chat` backend which wraps an LLM
//! provider ([`server`], [`backend`]). When that backend is unreachable the
//! front-end answers from a fixed sample corpus ([`corpus`]) through a
//! two-phase lookup ([`matcher`]): normalized containment first, then token
//! overlap above [`matcher::MATCH_THRESHOLD`].
//!
//! ```
//! use lumina_assist::{corpus, find_sample_response, AssistModule};
//!
//! let samples = corpus::builtin(AssistModule::Debugger);
//! let answer = find_sample_response(samples.as_slice(), "print(Hello World)");
//! assert!(answer.is_some());
//! ```

pub mod assistant;
pub mod backend;
pub mod cli;
pub mod client;
pub mod config;
pub mod corpus;
pub mod error;
pub mod matcher;
pub mod providers;
pub mod server;

pub use assistant::AssistModule;
pub use client::{ChatClient, Reply, ReplySource};
pub use config::Config;
pub use corpus::{Corpus, CorpusSet, Sample};
pub use error::{AssistError, Result};
pub use matcher::{find_sample_response, EmptyQueryPolicy, MatchOutcome, SampleMatcher};
