pub mod ai_provider;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod inspect;
pub mod navigation;
pub mod picker;
pub mod property_edits;
pub mod report;
pub mod session;
