//! Committed (or in-flight) geometry of one node.

use ace_ui_graphics::{EdgesF, OffsetF, RectF, SizeF};
use ace_ui_layout::LayoutConstraintF;

/// Frame and content rectangles of a node.
///
/// The live node owns the last committed value; every layout pass works on
/// a deep copy and the copy replaces the live value on swap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryNode {
    frame: RectF,
    /// Relative to the frame origin.
    content: Option<RectF>,
    parent_global_offset: OffsetF,
    parent_layout_constraint: Option<LayoutConstraintF>,
    margin: Option<EdgesF>,
    padding: Option<EdgesF>,
}

impl GeometryNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn frame_rect(&self) -> RectF {
        self.frame
    }

    pub fn set_frame_rect(&mut self, rect: RectF) {
        self.frame = rect;
    }

    pub fn frame_size(&self) -> SizeF {
        self.frame.size()
    }

    pub fn set_frame_size(&mut self, size: SizeF) {
        self.frame.set_size(size);
    }

    pub fn frame_offset(&self) -> OffsetF {
        self.frame.offset()
    }

    pub fn set_frame_offset(&mut self, offset: OffsetF) {
        self.frame.set_offset(offset);
    }

    /// Frame offset shifted back by the top-left margin.
    pub fn margin_frame_offset(&self) -> OffsetF {
        let margin = self.margin.unwrap_or_default();
        self.frame.offset() - margin.offset()
    }

    /// Positions the frame so that its margin box starts at `offset`.
    pub fn set_margin_frame_offset(&mut self, offset: OffsetF) {
        let margin = self.margin.unwrap_or_default();
        self.frame.set_offset(offset + margin.offset());
    }

    pub fn margin_frame_size(&self) -> SizeF {
        let margin = self.margin.unwrap_or_default();
        self.frame.size().add_edges(&margin)
    }

    /// Zero when content was never measured.
    pub fn content_size(&self) -> SizeF {
        self.content.map(|content| content.size()).unwrap_or_default()
    }

    pub fn set_content_size(&mut self, size: SizeF) {
        self.content.get_or_insert_with(RectF::default).set_size(size);
    }

    pub fn content_offset(&self) -> OffsetF {
        self.content.map(|content| content.offset()).unwrap_or_default()
    }

    pub fn set_content_offset(&mut self, offset: OffsetF) {
        self.content.get_or_insert_with(RectF::default).set_offset(offset);
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    pub fn parent_global_offset(&self) -> OffsetF {
        self.parent_global_offset
    }

    pub fn set_parent_global_offset(&mut self, offset: OffsetF) {
        self.parent_global_offset = offset;
    }

    /// Global position of this node's frame origin.
    pub fn global_offset(&self) -> OffsetF {
        self.parent_global_offset + self.frame.offset()
    }

    pub fn parent_layout_constraint(&self) -> Option<LayoutConstraintF> {
        self.parent_layout_constraint
    }

    pub fn set_parent_layout_constraint(&mut self, constraint: LayoutConstraintF) {
        self.parent_layout_constraint = Some(constraint);
    }

    pub fn margin(&self) -> Option<EdgesF> {
        self.margin
    }

    pub fn update_margin(&mut self, margin: Option<EdgesF>) {
        self.margin = margin;
    }

    /// Padding including border widths.
    pub fn padding(&self) -> Option<EdgesF> {
        self.padding
    }

    pub fn update_padding_with_border(&mut self, padding: Option<EdgesF>) {
        self.padding = padding;
    }
}
