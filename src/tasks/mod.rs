mod benchmark;

pub use benchmark::{Benchmark, BenchmarkReport, ReportFormat, ReportRow};
