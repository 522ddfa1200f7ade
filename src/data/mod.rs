pub mod builtin;
pub mod delimited;
pub mod idx;
pub mod lines;
pub mod sample;

pub use builtin::builtin_dominant;
pub use sample::Sample;
