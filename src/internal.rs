pub mod browser;
pub mod config;
pub mod credential;
pub mod downloader;
pub mod gate;
pub mod orchestrator;
pub mod states;
