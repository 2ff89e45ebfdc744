pub mod build;
pub mod clock;
pub mod qsf;
pub mod script;

pub use build::{BuildConfig, BuildOutput, build};
