//! Directory Scanning
//!
//! The filtered views of the analyzed tree: the shared [`PathFilter`], the
//! depth-bounded tree builder, the per-folder categorizer, and the
//! whole-tree statistics walkers. All apply the same filter, so the views
//! always agree on which entries count.

mod categorize;
mod filter;
mod stats;
mod tree;

pub use categorize::{CategoryMap, categorize_folder};
pub use filter::PathFilter;
pub use stats::{
    TreeStats, count_files_flat, count_files_recursive, folders_to_analyze, gather_stats,
};
pub use tree::{TreeBuilder, render_tree};
