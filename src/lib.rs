pub mod charts;
pub mod config;
pub mod data_fetch;
pub mod http_cache;
pub mod http_client;
pub mod interaction;
pub mod logging;
pub mod persist;
pub mod pickers;
pub mod provider;
pub mod state;
pub mod store;
