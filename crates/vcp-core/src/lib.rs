pub mod checksum;
pub mod chunk;
pub mod copy;
pub mod engine;
pub mod errors;
pub mod stats;
pub mod walk;
