//! Bempp adapters
//!
//! Building blocks for connecting boundary element operators to hierarchical matrix
//! libraries, together with analytical reference eigenvalues of boundary integral
//! operators on circles and spheres.
#![cfg_attr(feature = "strict", deny(warnings))]
#![warn(missing_docs)]

pub mod dense;
pub mod eigenvalues;
pub mod generator;
pub mod generators;
pub mod kernels;
pub mod operator;
pub mod special;
pub mod types;
