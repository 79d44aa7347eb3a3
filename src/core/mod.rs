pub mod access;
pub mod catalog;
pub mod config;


pub use access::*;
pub use catalog::*;
pub use config::*;
