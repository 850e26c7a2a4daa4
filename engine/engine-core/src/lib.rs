//! Core traits for the duelist decision engine
//!
//! This crate defines the contract between a game simulation and the search:
//! - `SearchAction`: an immutable move with a stable identity key
//! - `SearchState`: a mutable simulation the search can enumerate, step,
//!   score and clone with resampled hidden information
//!
//! The search never inspects game internals beyond these traits.

pub mod state;

pub use state::{SearchAction, SearchState};
