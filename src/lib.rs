pub mod annotate;
pub mod common;
pub mod gui;
pub mod logging;
pub mod settings;
pub mod view;
