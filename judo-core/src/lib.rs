//! Judo core library.
//!
//! Value types, the error taxonomy, session authentication and request
//! building for the Judo payment gateway. Nothing in this crate performs I/O:
//! requests leave through the [`transport::Transport`] trait.

pub mod errors;
pub mod response;
pub mod session;
pub mod transaction;
pub mod transport;
pub mod types;
