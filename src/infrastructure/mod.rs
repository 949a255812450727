pub mod config;
pub mod csv;
pub mod logging;
pub mod text;
