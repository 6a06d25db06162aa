pub mod cache;
pub mod llm;
pub mod logging;
pub mod server;
pub mod spellcheck;
