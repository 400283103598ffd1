//! Mock implementations of the environment traits.

mod backend;
mod session;

pub use backend::{Endpoint, MockBackend};
pub use session::InMemorySessionStore;
