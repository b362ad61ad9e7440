// Imgate image transformation gateway library

pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod image;
pub mod logging;
pub mod pipeline;
pub mod proxy;
pub mod server;
pub mod stats;
pub mod upstream;
pub mod watermark;
