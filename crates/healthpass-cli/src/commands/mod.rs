//! Subcommand implementations.

pub mod inspect;
#[cfg(feature = "dev-tools")]
pub mod sign;
pub mod verify;
