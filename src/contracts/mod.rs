//! Contract bindings for the PRT sale

pub mod prt;

pub use prt::*;
