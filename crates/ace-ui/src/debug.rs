//! Inspector output for frame trees.
//!
//! ```rust,ignore
//! use ace_ui::{format_frame_tree, log_frame_tree};
//!
//! pipeline.flush_vsync();
//! if let Some(root) = pipeline.root_node() {
//!     log_frame_tree(&root);
//! }
//! ```

use std::fmt::Write;

use crate::frame_node::FrameNode;

/// Logs the tree under `root` at debug level.
pub fn log_frame_tree(root: &FrameNode) {
    for line in format_frame_tree(root).lines() {
        log::debug!("{line}");
    }
}

/// Returns the tree under `root`, one node per line followed by its
/// [`FrameNode::dump_info`] lines, indented by depth.
pub fn format_frame_tree(root: &FrameNode) -> String {
    let mut output = String::new();
    writeln!(output, "=== FRAME TREE ===").ok();
    format_frame_node(&mut output, root, 0);
    writeln!(output, "=== END FRAME TREE ===").ok();
    output
}

fn format_frame_node(output: &mut String, node: &FrameNode, level: usize) {
    let indent = "  ".repeat(level);
    let mut flags = String::new();
    if node.is_active() {
        flags.push_str(" active");
    }
    if node.is_layout_dirty_marked() {
        flags.push_str(" layout-dirty");
    }
    if node.is_render_dirty_marked() {
        flags.push_str(" render-dirty");
    }
    writeln!(output, "{}[{} #{}]{}", indent, node.tag(), node.id(), flags).ok();
    for line in node.dump_info() {
        writeln!(output, "{indent}  {line}").ok();
    }
    for child in node.children() {
        format_frame_node(output, &child, level + 1);
    }
}
