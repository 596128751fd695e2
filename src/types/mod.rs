//! Shared data structures for the career predictor
//!
//! - `StudentProfile`: the bounded 13-field input record and its control table
//! - `Outcome`: what the prediction gate decided for one submission

mod outcome;
mod profile;

pub use outcome::*;
pub use profile::*;
