//! Auth reducers.

mod session;

pub use session::AuthReducer;
