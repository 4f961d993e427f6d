//! API clients for Discogs.
//!
//! [`DiscogsApi`] queries the Discogs database API and implements
//! [`Catalog`](crate::catalog::Catalog).

pub mod discogs;

pub use discogs::DiscogsApi;
