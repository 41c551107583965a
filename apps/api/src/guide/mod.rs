pub mod generator;
pub mod handlers;
pub mod prompts;

pub use generator::{GenerationError, GuideGenerator, LlmGuideGenerator};
