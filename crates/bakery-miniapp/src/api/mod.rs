//! # Remote Data Client
//!
//! One outbound gateway to the bakery backend. [`ApiClient`] turns each named operation
//! into exactly one request on a [`Transport`], attaches the host credential header when a
//! host session exists, and unwraps the backend's `{ success, data?, error? }` envelope.
//!
//! Writes are never retried here. A failed order or message is re-sent only when the user
//! submits again.

pub mod client;
pub mod error;
pub mod mock;
pub mod transport;

pub use client::{ApiClient, Envelope};
pub use error::{ApiError, TransportError, GENERIC_FAILURE};
pub use transport::{ApiRequest, HttpTransport, Method, Transport, INIT_DATA_HEADER};
