//! Frame node engine: dirty propagation, detached layout passes, paint
//! wrappers and hit testing over a tree of [`FrameNode`]s.

mod debug;
pub mod event;
mod frame_node;
mod geometry_node;
pub mod layout;
mod pattern;
pub mod pipeline;
mod property;
pub mod render;

pub use ace_core::{NodeError, NodeId};
pub use debug::{format_frame_tree, log_frame_tree};
pub use frame_node::{FrameChildren, FrameNode, PatternCreator};
pub use geometry_node::GeometryNode;
pub use layout::{LayoutAlgorithm, LayoutAlgorithmWrapper, LayoutWrapper};
pub use pattern::{DefaultPattern, DirtySwapConfig, LinearPattern, Pattern, PatternHost};
pub use pipeline::{PipelineConfig, PipelineContext, UiTask, UiTaskScheduler};
pub use property::{LayoutProperty, PaintProperty, PropertyExtension};
pub use render::{DrawFunction, NodePaintMethod, PaintWrapper, RenderContext};

pub mod prelude {
    pub use crate::event::{EventHub, HitTestResult, TouchEvent, TouchRestrict};
    pub use crate::frame_node::FrameNode;
    pub use crate::pattern::{DefaultPattern, Pattern};
    pub use crate::pipeline::{PipelineConfig, PipelineContext};
    pub use ace_ui_layout::prelude::*;
}
