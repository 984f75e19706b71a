pub mod config;
pub mod geo;
pub mod projection;
pub mod viewport;
