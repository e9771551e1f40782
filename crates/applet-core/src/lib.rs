pub mod activity;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feed;
pub mod io;
pub mod paths;
pub mod phrases;
pub mod types;
pub mod window;

pub use error::{FeedError, Result};
