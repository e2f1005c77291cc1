pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod orchestrator;
pub mod report;
pub mod scanner;
pub mod submitter;
