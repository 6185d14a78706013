pub mod assessment;
pub mod config;
pub mod flow;
pub mod output;
pub mod scoring;
pub mod stderr_buffer;
pub mod tui;
