pub mod api_types;
pub mod engine;
pub mod llm;
pub mod prompts;
pub mod providers;

pub use engine::{ResponseEngine, TunedResponse};
pub use llm::GenerationGateway;
pub use prompts::PromptSynthesizer;
