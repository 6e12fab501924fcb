pub mod config;
pub mod logging;

pub mod dispatch;
pub mod error;
pub mod executor;
pub mod filter;
pub mod history;
pub mod media;
pub mod request;
pub mod resolve;
