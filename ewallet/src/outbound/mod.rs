//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed `HttpTransport` used by [`crate::Client::new`].
//!
//! Adapters only translate between port types and the wire. They hold no
//! eWallet-specific logic.

pub mod http;
