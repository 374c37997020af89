//! Client and wire types for the remote directory.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::FetchError;
pub use types::{Address, Company, Geo, Post, User};
