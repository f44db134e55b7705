pub mod analytics;
pub mod conditions;
pub mod export;
pub mod http_cache;
pub mod http_client;
pub mod persist;
pub mod prediction;
pub mod provider;
pub mod roster_fetch;
pub mod state;
