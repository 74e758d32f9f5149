pub mod snapshot;

pub use snapshot::SnapshotData;
