//! Fetcher for the PAD REST API.

pub mod client;
pub mod http_client;
pub mod selector;

pub use client::{PadClient, SampleMatch};
pub use http_client::{HttpResponse, HttpTransport, Transport};
pub use selector::ProjectSelector;
