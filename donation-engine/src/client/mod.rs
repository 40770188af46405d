//! Client adapters for the surrounding application's REST backend

pub mod http;

pub use http::HttpDonationApi;
