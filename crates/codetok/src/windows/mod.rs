//! # Training Windows

pub mod generator;
pub mod remap;

pub use generator::{DEFAULT_WINDOW_SIZE, Pairs, TrainingPair, WindowGenerator, WindowOptions};
pub use remap::{OffsetPolicy, WindowRemapper};
