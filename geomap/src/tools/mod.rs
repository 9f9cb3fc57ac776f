pub mod config;
mod options;
mod output;
pub mod render;
pub mod select;
pub mod zoom;
