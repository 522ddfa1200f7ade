pub mod activations;
pub mod backprop;
pub mod config;
pub mod network;

pub use activations::Activations;
pub use backprop::{one_hot, ErrorSignals};
pub use config::NetworkConfig;
pub use network::Network;
