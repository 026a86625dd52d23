//! Narrative enrichment adapters.
//!
//! - `OpenAINarrativeProvider` - OpenAI-compatible chat completions
//! - `MockNarrativeProvider` - Scripted responses for tests

mod mock;
mod openai;
mod prompt;

pub use mock::MockNarrativeProvider;
pub use openai::{OpenAINarrativeConfig, OpenAINarrativeProvider};
pub use prompt::{user_prompt, SYSTEM_PROMPT};
