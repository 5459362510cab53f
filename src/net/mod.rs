//! Network layer: API client, endpoint calls, wire types.

pub mod api;
pub mod error;
pub mod http;
pub mod news;
pub mod scope;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
