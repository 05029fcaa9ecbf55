use env_logger::{Builder, Env};
use std::env;

// keep reqwest/hyper connection chatter out of the default output
const DEFAULT_FILTER: &str = "info,reqwest=warn,hyper=warn";

/// Call after `.env` has been loaded so a `RUST_LOG` set there applies.
pub fn init_logging() {
    Builder::from_env(Env::default().default_filter_or(filter(env::var("RUST_LOG").ok())))
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .init();
}

fn filter(rust_log: Option<String>) -> String {
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}
