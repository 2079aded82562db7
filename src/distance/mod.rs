//! Distance tables owned by a problem instance.

mod matrix;

pub use matrix::DistanceMatrix;
