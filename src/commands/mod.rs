//! Command implementations

pub mod benchmark;
pub mod simple;
pub mod solve;
pub mod test_all;

pub use benchmark::{BenchmarkResult, run_benchmark, sample_targets};
pub use simple::{Console, HumanGuesser, HumanOracle, PlayStyle, play_session, run_simple};
pub use solve::{SolveConfig, SolveResult, random_target, solve_word};
pub use test_all::{TestAllStatistics, print_test_all_statistics, run_test_all};
