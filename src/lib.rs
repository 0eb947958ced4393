pub mod cli;
pub mod config;
pub mod model;
pub mod ops;
pub mod sync;
pub mod tui;
pub mod view;
