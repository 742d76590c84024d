//! Domain layer - Tag recognition, indexing and consistency checks

pub mod checker;
pub mod dotted;
pub mod index;
pub mod outdated;
pub mod tags;

pub use checker::{Conflict, ConflictDetail, ConflictKind, ConflictReport, ConsistencyChecker, Severity};
pub use index::{EquationIndex, IndexBuilder, SourceLocation, Tag};
pub use outdated::{outdated_tags, OutdatedTag};
