//! Production adapters for the oracle boundary.

mod http;

pub use http::HttpPriceFeed;
