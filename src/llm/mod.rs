pub mod capabilities;
pub mod client;
pub mod grammar;

pub use capabilities::{
    Embedder, GenerationParams, GrammarCorrector, GrammarIssue, PassthroughCorrector,
    TextGenerator, apply_corrections,
};
pub use client::LLMClient;
pub use grammar::LanguageToolClient;
