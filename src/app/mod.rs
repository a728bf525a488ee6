pub mod action;
pub mod config;
pub mod host;
pub mod input;
pub mod r#loop;
pub mod reducer;
pub mod state;
pub mod ui;
