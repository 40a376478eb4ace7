//! Measure/layout on detached wrapper trees.

mod box_layout_algorithm;
mod layout_algorithm;
mod layout_wrapper;
mod linear_layout_algorithm;

pub use box_layout_algorithm::BoxLayoutAlgorithm;
pub use layout_algorithm::{LayoutAlgorithm, LayoutAlgorithmWrapper};
pub use layout_wrapper::LayoutWrapper;
pub use linear_layout_algorithm::{LinearLayoutAlgorithm, LinearLayoutProperty};

#[cfg(test)]
#[path = "tests/layout_wrapper_tests.rs"]
mod tests;
