pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod record;
pub mod stats;
pub mod status;
