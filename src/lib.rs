pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use config::AppConfig;
pub use core::{access_log::AccessLogService, resolver::AddressResolver};
pub use utils::error::{AppError, Result};
