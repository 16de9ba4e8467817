//! Data transfer objects for API requests and responses.

mod envelope;
mod order;
mod user;

pub use envelope::{Envelope, EnvelopeStatus, ErrorData, ErrorEnvelope, MessageEnvelope};
pub use order::OrdersData;
pub use user::{UserData, UserRequest, UserResponse, UsersData};
