pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod logging;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use config::Config;
pub use error::BlogError;
pub use generator::workflow::{RunOutcome, launch, run};
