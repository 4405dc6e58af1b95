//! Aggregates - consistency boundaries over entity collections

mod snapshot;

pub use snapshot::QuestSnapshot;
