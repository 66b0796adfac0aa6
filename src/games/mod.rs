//! Game implementations.

pub mod side_stacker;
