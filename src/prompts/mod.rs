//! Prompts sent to the text generation provider

pub mod description_prompt;

pub use description_prompt::generate_description_prompt;
