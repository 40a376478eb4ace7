use ace_core::TaskThread;
use ace_ui_graphics::SizeF;
use ace_ui_layout::LayoutConstraintF;

use super::LayoutWrapper;

/// Widget-specific measure and layout.
///
/// A fresh instance is created for every pass. Algorithms may run on a
/// worker thread, so they only see the wrapper's cloned data.
pub trait LayoutAlgorithm: Send {
    /// Intrinsic content size, if the widget has content of its own.
    fn measure_content(
        &mut self,
        _content_constraint: &LayoutConstraintF,
        _wrapper: &LayoutWrapper,
    ) -> Option<SizeF> {
        None
    }

    /// Measures children and sets the frame size on the wrapper's geometry.
    fn measure(&mut self, wrapper: &mut LayoutWrapper);

    /// Sets the frame offsets of children inside this node.
    fn layout(&mut self, wrapper: &mut LayoutWrapper);

    fn can_run_on_which_thread(&self) -> TaskThread {
        TaskThread::MAIN
    }
}

/// A layout algorithm plus the flags that let a pass skip it.
///
/// Without an algorithm the wrapper is a placeholder: both skip flags are
/// set and the committed geometry is carried over unchanged.
pub struct LayoutAlgorithmWrapper {
    algorithm: Option<Box<dyn LayoutAlgorithm>>,
    skip_measure: bool,
    skip_layout: bool,
}

impl LayoutAlgorithmWrapper {
    pub fn new(algorithm: Box<dyn LayoutAlgorithm>) -> Self {
        Self::with_skip(Some(algorithm), false, false)
    }

    pub fn with_skip(
        algorithm: Option<Box<dyn LayoutAlgorithm>>,
        skip_measure: bool,
        skip_layout: bool,
    ) -> Self {
        Self {
            algorithm,
            skip_measure,
            skip_layout,
        }
    }

    pub fn placeholder() -> Self {
        Self::with_skip(None, true, true)
    }

    pub fn skip_measure(&self) -> bool {
        self.skip_measure
    }

    pub fn skip_layout(&self) -> bool {
        self.skip_layout
    }

    pub fn has_algorithm(&self) -> bool {
        self.algorithm.is_some()
    }

    pub fn can_run_on_which_thread(&self) -> TaskThread {
        match &self.algorithm {
            Some(algorithm) => algorithm.can_run_on_which_thread(),
            None => TaskThread::MAIN | TaskThread::BACKGROUND,
        }
    }

    pub(crate) fn take(&mut self) -> Option<Box<dyn LayoutAlgorithm>> {
        self.algorithm.take()
    }

    pub(crate) fn restore(&mut self, algorithm: Box<dyn LayoutAlgorithm>) {
        self.algorithm = Some(algorithm);
    }
}

impl Default for LayoutAlgorithmWrapper {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl std::fmt::Debug for LayoutAlgorithmWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutAlgorithmWrapper")
            .field("has_algorithm", &self.algorithm.is_some())
            .field("skip_measure", &self.skip_measure)
            .field("skip_layout", &self.skip_layout)
            .finish()
    }
}
