pub mod accuracy;

pub use accuracy::{accuracy, argmax, predict};
