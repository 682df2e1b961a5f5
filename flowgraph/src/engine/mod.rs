pub mod runner;

pub use runner::Runner;
pub use runner::RunnerArgs;
