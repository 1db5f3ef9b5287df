//! Authentication credentials and the provider contract that supplies them.

pub mod credential;
pub mod provider;

pub use credential::*;
pub use provider::*;
