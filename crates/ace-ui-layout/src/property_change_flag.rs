//! Accumulated reasons for reprocessing a node

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Bit set recording why a property bag needs reprocessing.
///
/// Flags are OR-merged until the owning task consumes them. The predicate
/// methods are what dirty propagation branches on; callers should not test
/// raw bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertyChangeFlag(u32);

impl PropertyChangeFlag {
    pub const NORMAL: Self = Self(0);
    /// Size-affecting change; the parent has to re-measure too.
    pub const MEASURE: Self = Self(1 << 0);
    pub const LAYOUT: Self = Self(1 << 1);
    pub const DIFF: Self = Self(1 << 2);
    /// Re-measure this node only; the parent keeps its size.
    pub const MEASURE_SELF: Self = Self(1 << 3);
    /// A descendant needs measure and forwarded the request here.
    pub const BY_CHILD_REQUEST: Self = Self(1 << 4);
    pub const RENDER: Self = Self(1 << 5);
    /// A descendant needs render and forwarded the request here.
    pub const RENDER_BY_CHILD_REQUEST: Self = Self(1 << 6);
    pub const EVENT: Self = Self(1 << 7);
    pub const MEASURE_SELF_AND_PARENT: Self = Self(1 << 8);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub const fn is_no_changed(self) -> bool {
        self.0 == Self::NORMAL.0
    }

    /// Whether a layout task has to be scheduled for this change.
    pub const fn needs_request_measure_and_layout(self) -> bool {
        self.needs_measure() || self.needs_layout()
    }

    pub const fn needs_measure(self) -> bool {
        self.intersects(Self(
            Self::MEASURE.0
                | Self::MEASURE_SELF.0
                | Self::BY_CHILD_REQUEST.0
                | Self::MEASURE_SELF_AND_PARENT.0,
        ))
    }

    pub const fn needs_layout(self) -> bool {
        self.intersects(Self::LAYOUT)
    }

    /// The change can alter this node's size, so the parent re-measures.
    pub const fn needs_request_parent_measure(self) -> bool {
        self.intersects(Self(Self::MEASURE.0 | Self::MEASURE_SELF_AND_PARENT.0))
    }

    /// True for a measure request that originated on this node rather than a child.
    pub const fn has_measure_flag(self) -> bool {
        self.intersects(Self(
            Self::MEASURE.0 | Self::MEASURE_SELF.0 | Self::MEASURE_SELF_AND_PARENT.0,
        ))
    }

    pub const fn is_update_by_child_request(self) -> bool {
        self.intersects(Self::BY_CHILD_REQUEST)
    }

    pub const fn needs_render(self) -> bool {
        self.intersects(Self(Self::RENDER.0 | Self::RENDER_BY_CHILD_REQUEST.0))
    }
}

impl Default for PropertyChangeFlag {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Debug for PropertyChangeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(PropertyChangeFlag, &str); 9] = [
            (PropertyChangeFlag::MEASURE, "MEASURE"),
            (PropertyChangeFlag::LAYOUT, "LAYOUT"),
            (PropertyChangeFlag::DIFF, "DIFF"),
            (PropertyChangeFlag::MEASURE_SELF, "MEASURE_SELF"),
            (PropertyChangeFlag::BY_CHILD_REQUEST, "BY_CHILD_REQUEST"),
            (PropertyChangeFlag::RENDER, "RENDER"),
            (
                PropertyChangeFlag::RENDER_BY_CHILD_REQUEST,
                "RENDER_BY_CHILD_REQUEST",
            ),
            (PropertyChangeFlag::EVENT, "EVENT"),
            (
                PropertyChangeFlag::MEASURE_SELF_AND_PARENT,
                "MEASURE_SELF_AND_PARENT",
            ),
        ];
        if self.is_no_changed() {
            return f.write_str("PropertyChangeFlag(NORMAL)");
        }
        let mut set = f.debug_set();
        for (flag, name) in NAMES {
            if self.contains(flag) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

impl BitOr for PropertyChangeFlag {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PropertyChangeFlag {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
#[path = "tests/property_change_flag_tests.rs"]
mod tests;
