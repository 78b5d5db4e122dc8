//! Domain building blocks shared by the persistence and HTTP layers.
//!
//! Nothing in this crate performs database or network I/O. The retry loop
//! in [`retry`] only sleeps; the operation it retries is supplied by the
//! caller.

pub mod contact;
pub mod error;
pub mod filter;
pub mod retry;
pub mod types;
