//! Archives App API service implementations.

mod archiving;
mod edits;
mod locations;

pub use archiving::*;
pub use edits::*;
pub use locations::*;
