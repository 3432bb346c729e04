//! Core of cutstock, a one-dimensional cutting-stock optimizer.
//!
//! Stock of one length is cut into the demanded pieces using as few stock units as
//! possible. Patterns (how one stock unit is cut) are either enumerated exhaustively or
//! generated on demand by delayed column generation, and an integer master problem
//! picks how often to cut each of them.

pub mod cancel;
pub mod configuration;
pub mod engine;
pub mod enumerate;
pub mod instance;
pub mod io;
pub mod master;
pub mod optimize;
pub mod pattern;
pub mod plan;
pub mod pricing;
pub mod progress;

pub use cancel::CancellationToken;
pub use engine::{CuttingStockEngine, Method, SolveOutcome, SolveReport, SolveRequest, SolveRequestBuilder};
pub use instance::{CuttingStockInstance, Piece};
