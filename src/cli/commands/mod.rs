//! CLI command implementations.

mod config;
mod doctor;
mod run;
mod slug;

pub use config::run_config;
pub use doctor::run_doctor;
pub use run::run_pipeline;
pub use slug::run_slug;
