pub mod benchmark;
pub mod plots;
pub mod sample_texts;

pub use benchmark::{Benchmarker, BenchmarkResults};
pub use plots::generate_plots;
pub use sample_texts::get_sample_passages;
