pub mod daemon;
pub mod environment;
pub mod signals;
