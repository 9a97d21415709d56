#![forbid(unsafe_code)]

pub mod bookmarks;
pub mod calculator;
pub mod catalog;
pub mod error;
pub mod model;
pub mod progress;
pub mod quiz;
pub mod search;
pub mod settings;
pub mod text;
pub mod time;

pub use error::Error;
pub use time::Clock;
