//! Named, multiplexed line-buffering pseudo-terminals for a language
//! server's output channels.
//!
//! Raw output arrives in arbitrary chunks; each named stream gets exactly
//! one terminal that re-frames those chunks into complete lines and
//! carriage-return overwrites. A dispatcher routes `write`/`show`/`close`/
//! `reset` requests to the right terminal, creating it on first use.

pub mod config;
pub mod dispatch;
pub mod term;
pub mod transport;
