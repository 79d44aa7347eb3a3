pub mod app;
pub mod catalog_view;
pub mod controls;

#[cfg(test)]
mod app_test;

pub use app::*;
