// Resume generation: prompt assembly, the model call and post-processing.
// All model calls go through llm_client::ContentGenerator.

pub mod contact;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod user_prompt;
