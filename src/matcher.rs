//! # Stage: SampleMatcher
//!
//! ## Responsibility
//! Decide whether a free-form query corresponds to one of a corpus's known
//! samples, and if so which one. Used as the offline fallback when the chat
//! backend cannot be reached.
//!
//! ## Algorithm
//! 1. **Containment.** Both strings are lowercased and stripped of all
//!    whitespace. The first sample (in corpus order) whose normalised key
//!    contains the normalised query, or is contained by it, wins outright.
//! 2. **Token overlap.** Otherwise each key and the query are split into
//!    `[a-z0-9]+` tokens and scored with a Jaccard-like ratio. The highest
//!    score wins if it is strictly above [`MATCH_THRESHOLD`]; ties keep the
//!    earlier sample.
//!
//! ## Guarantees
//! - Total: every `&str` input yields a [`MatchOutcome`], nothing panics
//! - Pure: the result depends only on `(corpus, query)` and the policy
//! - Re-entrant: no interior state, safe to share across threads
//!
//! ## NOT Responsible For
//! - Where the corpus comes from (see [`crate::corpus`])
//! - What the caller shows for a miss (see [`crate::assistant::AssistModule::no_match_message`])

use std::collections::HashSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::corpus::Sample;

/// Phase-2 scores must be strictly greater than this to count as a match.
pub const MATCH_THRESHOLD: f64 = 0.2;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// What to do with a query that is empty once whitespace is removed.
///
/// Under plain containment the empty string is a substring of every key, so
/// such a query would always resolve to the first sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyQueryPolicy {
    /// Report no match without scanning the corpus. A sample whose key is
    /// blank can then no longer be reached with its own key.
    #[default]
    Reject,
    /// Keep the containment rule as-is: the first sample matches.
    MatchFirst,
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome {
    /// Phase 1: normalised containment in either direction.
    Exact { index: usize },
    /// Phase 2: best token-overlap score above the threshold.
    Similar { index: usize, score: f64 },
    /// Nothing matched. `best_score` is the highest phase-2 score seen.
    NoMatch { best_score: f64 },
}

impl MatchOutcome {
    pub fn index(&self) -> Option<usize> {
        match self {
            MatchOutcome::Exact { index } | MatchOutcome::Similar { index, .. } => Some(*index),
            MatchOutcome::NoMatch { .. } => None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.index().is_some()
    }

    /// Resolve the outcome against the corpus it was computed from.
    pub fn answer<'c>(&self, samples: &'c [Sample]) -> Option<&'c str> {
        self.index().and_then(|i| samples.get(i)).map(|s| s.value.as_str())
    }
}

// ---------------------------------------------------------------------------
// Text preparation
// ---------------------------------------------------------------------------

/// Lowercase and drop every whitespace character.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().chars().filter(|c| !c.is_whitespace()).collect()
}

/// Lowercase, then split on anything that is not an ASCII letter or digit.
///
/// Single-character tokens are kept, so `a = b` yields `["a", "b"]`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// `matched / (|query| + |sample| - matched)`, where `matched` counts query
/// tokens (duplicates included) found in the sample's token *set*.
///
/// Because duplicates count, the ratio can exceed 1.0 for repetitive queries.
pub fn overlap_score(query_tokens: &[String], sample_tokens: &[String]) -> f64 {
    let sample_set: HashSet<&str> = sample_tokens.iter().map(String::as_str).collect();
    let matched = query_tokens.iter().filter(|t| sample_set.contains(t.as_str())).count();
    // matched <= query_tokens.len(), so this never underflows.
    let union = query_tokens.len() + sample_tokens.len() - matched;
    if union == 0 {
        0.0
    } else {
        matched as f64 / union as f64
    }
}

// ---------------------------------------------------------------------------
// SampleMatcher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleMatcher {
    empty_query: EmptyQueryPolicy,
}

impl SampleMatcher {
    pub fn new(empty_query: EmptyQueryPolicy) -> Self {
        SampleMatcher { empty_query }
    }

    pub fn empty_query_policy(&self) -> EmptyQueryPolicy {
        self.empty_query
    }

    pub fn find(&self, samples: &[Sample], query: &str) -> MatchOutcome {
        if samples.is_empty() {
            return MatchOutcome::NoMatch { best_score: 0.0 };
        }

        let norm_query = normalize(query);
        if norm_query.is_empty() && self.empty_query == EmptyQueryPolicy::Reject {
            debug!("empty query rejected");
            return MatchOutcome::NoMatch { best_score: 0.0 };
        }

        for (index, sample) in samples.iter().enumerate() {
            let norm_key = normalize(&sample.key);
            if norm_key.contains(norm_query.as_str()) || norm_query.contains(norm_key.as_str()) {
                debug!(index, "sample matched by normalized containment");
                return MatchOutcome::Exact { index };
            }
        }

        let query_tokens = tokenize(query);
        let mut best: Option<usize> = None;
        let mut best_score = 0.0_f64;

        for (index, sample) in samples.iter().enumerate() {
            let sample_tokens = tokenize(&sample.key);
            if sample_tokens.is_empty() {
                continue;
            }
            let score = overlap_score(&query_tokens, &sample_tokens);
            trace!(index, score, "token overlap");
            if score > best_score {
                best_score = score;
                best = Some(index);
            }
        }

        match best {
            Some(index) if best_score > MATCH_THRESHOLD => {
                debug!(index, score = best_score, "sample matched by token overlap");
                MatchOutcome::Similar { index, score: best_score }
            }
            _ => {
                debug!(best_score, "no sample matched");
                MatchOutcome::NoMatch { best_score }
            }
        }
    }

    pub fn find_answer<'c>(&self, samples: &'c [Sample], query: &str) -> Option<&'c str> {
        self.find(samples, query).answer(samples)
    }
}

/// Match `query` against `samples` with the default policy.
pub fn find_sample_response<'c>(samples: &'c [Sample], query: &str) -> Option<&'c str> {
    SampleMatcher::default().find_answer(samples, query)
}
