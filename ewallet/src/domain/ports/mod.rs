//! Ports separating the client from network and logging infrastructure.

mod macros;
pub(crate) use macros::define_port_error;

mod http_transport;
mod request_logger;
mod request_signer;

#[cfg(test)]
pub use http_transport::MockHttpTransport;
pub use http_transport::{
    FixtureTransport, HttpRequest, HttpResponse, HttpTransport, Method, TransportError,
};
#[cfg(test)]
pub use request_logger::MockRequestLogger;
pub use request_logger::{RequestLogger, TracingRequestLogger};
#[cfg(test)]
pub use request_signer::MockRequestSigner;
pub use request_signer::{BASIC_SCHEME, OMG_SERVER_SCHEME, RequestSigner, SchemeSigner};
