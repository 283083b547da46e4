//! Legal fact-pattern analysis.
//!
//! - `request`: submitted parameters and input gates
//! - `prompt`: system instruction and tagged user message
//! - `analyst`: one blocking provider call per action
//! - `splitter`: reasoning / memo separation

pub mod analyst;
pub mod error;
pub mod prompt;
pub mod request;
pub mod splitter;

pub use analyst::LegalAnalyst;
pub use error::{AnalysisError, AnalysisResult};
pub use prompt::{PromptPair, build_prompts};
pub use request::{AnalysisRequest, Jurisdiction, PracticeArea};
pub use splitter::{NO_REASONING_SENTINEL, ParsedAnalysis, split_response};
