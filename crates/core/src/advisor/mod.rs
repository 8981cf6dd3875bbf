pub mod client;
pub mod transport;

pub use client::AdvisorClient;
pub use transport::{AdvisoryTransport, GoogleGenerativeTransport};
