//! Value types used across Judo Kit.

mod amount;
mod card;
mod common;
mod reference;
mod wallet;

pub use amount::*;
pub use card::*;
pub use common::*;
pub use reference::*;
pub use wallet::*;
