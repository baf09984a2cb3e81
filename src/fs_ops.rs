//! Low-level filesystem operations shared by the handle types.
//!
//! Nothing here knows about handles or the mutable flag; callers gate first
//! and then delegate the OS work to these helpers.

mod copy;
mod helpers;
mod metadata;
mod util;

pub(crate) use copy::{copy_file, copy_tree, move_file_across, move_tree_across, relink};
pub use helpers::{describe_io_error, describe_road_error};
pub use util::has_symlink_ancestor;
pub(crate) use util::{is_cross_device, single_component};
