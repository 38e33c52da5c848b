pub mod scale;
pub mod snapshot;
