pub mod harness;
pub mod models;
pub mod pool;
pub mod report;
pub mod strategy;
pub mod timer;
