pub mod config;
pub mod logging;

pub mod checksum;
pub mod fetch;
pub mod pipeline;
pub mod url_model;
