pub mod benchmark;
pub mod stopwatch;
