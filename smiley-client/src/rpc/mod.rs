//! Typed wrappers for the daemon's RPC methods.
//!
//! Each method reshapes its arguments into the positional parameter list and
//! delegates to the transport. Nothing is validated beyond what the types
//! enforce, except where noted.

mod chain;
mod messages;
mod mining;
mod network;
mod rawtx;
mod services;
mod wallet;
