pub mod stats;
pub mod trip;
