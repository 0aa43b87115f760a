use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AssistError;

/// The three assistant front-ends that share the `/chat` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistModule {
    Debugger,
    Simplifier,
    /// The AI-authorship checker. The checker UI historically sent
    /// `evaluator`, so that name is accepted too.
    #[value(alias = "evaluator")]
    #[serde(alias = "evaluator")]
    Checker,
}

impl AssistModule {
    pub const ALL: [AssistModule; 3] =
        [AssistModule::Debugger, AssistModule::Simplifier, AssistModule::Checker];

    pub fn from_str_loose(s: &str) -> Result<Self, AssistError> {
        match s.trim().to_lowercase().as_str() {
            "debugger" => Ok(AssistModule::Debugger),
            "simplifier" => Ok(AssistModule::Simplifier),
            "checker" | "evaluator" => Ok(AssistModule::Checker),
            _ => Err(AssistError::UnknownModule(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssistModule::Debugger => "debugger",
            AssistModule::Simplifier => "simplifier",
            AssistModule::Checker => "checker",
        }
    }

    /// Instructions prepended to the user's request before it reaches the LLM.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            AssistModule::Debugger => {
                "You are an expert code debugger. When given code or a description of a bug:
1. Identify all bugs and errors
2. Explain what's wrong and why
3. Provide the corrected code
4. Give tips to avoid similar issues

Format your response in a clear, conversational way. Use code blocks for code snippets."
            }
            AssistModule::Simplifier => {
                "You are an expert code refactoring assistant. When given code:
1. Analyze the code structure
2. Suggest simplifications and improvements
3. Provide refactored code with better variable names
4. Explain why the changes make it better

Format your response in a clear, conversational way. Use code blocks for code snippets."
            }
            AssistModule::Checker => {
                "You are an AI code detection expert. When given code:
1. Analyze patterns, style, and structure
2. Determine if it's likely AI-generated or human-written
3. Provide confidence percentage
4. Explain the reasoning behind your conclusion

Format your response in a clear, conversational way."
            }
        }
    }

    /// Full prompt sent to the provider for `message`.
    pub fn build_prompt(&self, message: &str) -> String {
        format!("{}\n\nUser request: {}", self.system_prompt(), message)
    }

    /// Shown when the backend is unreachable and no offline sample matched.
    pub fn no_match_message(&self) -> &'static str {
        match self {
            AssistModule::Debugger => {
                "❌ **Invalid Question**\n\nThis specific program or error was not found in our offline sample database.\n\nPlease provide a clear Python code snippet from the common examples."
            }
            AssistModule::Simplifier => {
                "❌ **Invalid Question**\n\nThis specific program was not found in our offline simplification database.\n\nPlease provide a code snippet that needs simplification."
            }
            AssistModule::Checker => {
                "❌ **Invalid Question**\n\nThis code snippet was not found in our offline verification database.\n\nPlease provide a program to evaluate for AI generation or human authorship."
            }
        }
    }
}

impl std::fmt::Display for AssistModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AssistModule {
    type Err = AssistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssistModule::from_str_loose(s)
    }
}
