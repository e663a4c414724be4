//! Domain layer: entities and tree-construction logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod key;

pub use arena::{CourseTree, NodeData, NodeKind, TreeNode};
pub use builder::{
    BuilderOptions, CourseLevelView, EnrolmentLookup, UnresolvedParentPolicy, ViewTreeBuilder,
};
pub use entities::*;
pub use key::{AosKey, CodeIndex, UnitKey, YearGroupKey};
