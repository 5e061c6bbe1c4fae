//! Signal combination.

pub mod combiner;

pub use combiner::SignalCombiner;
