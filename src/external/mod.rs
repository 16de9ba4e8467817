//! Clients for services this one depends on.

pub mod client;
mod orders;

pub use orders::{HttpOrderClient, ORDER_SERVICE, OrderClient};
