pub mod config;
pub mod export;
pub mod geocoding;
pub mod pipeline;
pub mod route;
pub mod util;
