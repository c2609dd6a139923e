//! Inventories of the regular files below a tree root.
//!
//! An inventory keeps its entries in traversal order for deterministic
//! output, and a hash set of the same entries for constant time lookups.

mod inventory;

pub use inventory::{Inventory, RelativePath, TraversalOptions};
