pub mod client;
pub mod data;
pub mod error;
pub mod stub;
pub mod transport;

pub use client::{LoginClient, LoginClientBuilder, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use data::{Credentials, Session};
pub use error::LoginError;
pub use transport::{HttpTransport, Transport};
