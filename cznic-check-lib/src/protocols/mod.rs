//! Transport used to reach the lookup page.

/// Plain HTTP GET against the lookup page
pub mod web;

pub use web::{query_url, PageSource, WebClient};
