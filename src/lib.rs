pub mod codec;
pub mod command;
pub mod config;
pub mod datetime;
pub mod engine;
pub mod limits;
pub mod model;
pub mod observability;
pub mod server;
pub mod session;
