//! HTTP request handlers for the mock server.

pub mod identity;
pub mod leads;

pub use identity::*;
pub use leads::*;
