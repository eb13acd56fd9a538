pub mod optimize;
pub mod speed;
pub mod stats;
