pub mod compile;
pub mod dump;
pub mod graph_loader;
pub mod weights;

#[cfg(test)]
mod graph_loader_tests;
