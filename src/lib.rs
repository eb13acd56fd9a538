pub mod codec;
pub mod config;
pub mod consts;
pub mod error;
pub mod optimizer;
pub mod oracle;
pub mod speed;
pub mod stats;
// cmd and reports belong to the binary (main.rs).
