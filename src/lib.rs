pub mod api;
pub mod builder;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod routing;
pub mod server;
