//! Prompt construction for the litigation associate persona.

use crate::llm::ChatMessage;

use super::request::AnalysisRequest;
use super::splitter::{REASONING_CLOSE, REASONING_OPEN};

/// Prefix tagging the user's fact pattern.
pub const FACT_PATTERN_TAG: &str = "FACT PATTERN: ";

/// System instruction and user message for one analysis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptPair {
    /// Role, task and formatting rules.
    pub system: String,
    /// The tagged fact pattern.
    pub user: String,
}

impl PromptPair {
    /// Ordered chat messages: system first, then user.
    #[must_use]
    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(self.system), ChatMessage::user(self.user)]
    }
}

/// Build the prompt pair for a request.
#[must_use]
pub fn build_prompts(request: &AnalysisRequest) -> PromptPair {
    PromptPair {
        system: build_system_prompt(request),
        user: format!("{FACT_PATTERN_TAG}{}", request.fact_pattern),
    }
}

fn build_system_prompt(request: &AnalysisRequest) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str("You are a Senior Litigation Associate specializing in ");
    out.push_str(request.practice_area.as_str());
    out.push_str(" within ");
    out.push_str(request.jurisdiction.as_str());
    out.push_str(".\n\n");

    out.push_str("TASK:\n");
    out.push_str(
        "Analyze the user's fact pattern using the IRAC method (Issue, Rule, Analysis, Conclusion).\n\n",
    );

    out.push_str("CRITICAL INSTRUCTION:\n");
    out.push_str(
        "You must perform a \"Chain of Thought\" analysis BEFORE writing the final client memo.\n",
    );
    out.push_str("1. Enclose your internal legal reasoning inside ");
    out.push_str(REASONING_OPEN);
    out.push_str(" tags.\n");
    out.push_str(
        "2. Inside the tags, be cynical. Look for loopholes, missing facts, and counter-arguments.\n",
    );
    out.push_str("3. After the tags, write the clean, professional Client Memo.\n\n");

    out.push_str("FORMAT:\n");
    out.push_str(REASONING_OPEN);
    out.push_str("\n[Internal monologue, checking precedents, and raw analysis]\n");
    out.push_str(REASONING_CLOSE);
    out.push_str("\n\n[Final Client Memo starts here]\n");

    out
}
