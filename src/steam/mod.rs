// Steam upstream module.
// Provides the upstream traits, the reqwest-backed client, and wire types.

pub mod client;
pub mod endpoints;
pub mod storefront;
pub mod types;
pub mod upstream;

pub use client::SteamClient;
pub use types::*;
pub use upstream::{SteamApi, StorePage, Storefront};
