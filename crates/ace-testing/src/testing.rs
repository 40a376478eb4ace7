use std::rc::Rc;
use std::sync::Arc;

use ace_core::{ElementRegister, TaskExecutor};
use ace_ui::event::{MouseEvent, TouchEvent};
use ace_ui::pipeline::PipelineScopeGuard;
use ace_ui::{format_frame_tree, FrameNode, Pattern, PipelineConfig, PipelineContext, RenderContext};
use ace_ui_graphics::PointF;

use crate::{ManualTaskExecutor, MockRenderContext};

/// Headless harness for driving a pipeline in tests.
///
/// `TestPipeline` owns a pipeline backed by a [`ManualTaskExecutor`] and
/// keeps it current for its whole lifetime, so nodes created through it
/// (or directly through [`FrameNode`]) mark themselves dirty against it.
/// Every node gets a [`MockRenderContext`].
pub struct TestPipeline {
    // Dropped first so the pipeline leaves the stack before it is released.
    _scope: PipelineScopeGuard,
    pipeline: Rc<PipelineContext>,
    executor: Arc<ManualTaskExecutor>,
}

impl TestPipeline {
    /// Pipeline with a 400x800 root and default scale.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default().with_root_size(400.0, 800.0))
    }

    pub fn with_config(config: PipelineConfig) -> Self {
        let executor = Arc::new(ManualTaskExecutor::new());
        let shared: Arc<dyn TaskExecutor> = executor.clone();
        let pipeline = PipelineContext::new(config, shared);
        let runner = Arc::clone(&executor);
        pipeline.set_ui_task_runner(move || runner.run_ui_tasks());
        pipeline.set_render_context_factory(Rc::new(|| {
            Rc::new(MockRenderContext::new()) as Rc<dyn RenderContext>
        }));
        let scope = pipeline.enter();
        Self {
            _scope: scope,
            pipeline,
            executor,
        }
    }

    pub fn pipeline(&self) -> &Rc<PipelineContext> {
        &self.pipeline
    }

    pub fn executor(&self) -> &ManualTaskExecutor {
        &self.executor
    }

    /// Creates a registered node with a fresh id.
    pub fn create_node(&self, tag: &str, pattern: impl Pattern) -> Rc<FrameNode> {
        FrameNode::create_frame_node(tag, ElementRegister::make_unique_id(), Box::new(pattern), false)
    }

    /// Creates a tree root and installs it as the pipeline's root node.
    pub fn create_root(&self, pattern: impl Pattern) -> Rc<FrameNode> {
        let root = FrameNode::create_frame_node_with_tree(
            "root",
            ElementRegister::make_unique_id(),
            Box::new(pattern),
        );
        self.set_root(&root);
        root
    }

    pub fn set_root(&self, root: &Rc<FrameNode>) {
        self.pipeline.set_root_node(Rc::clone(root));
    }

    pub fn root(&self) -> Option<Rc<FrameNode>> {
        self.pipeline.root_node()
    }

    /// Runs one vsync.
    pub fn flush(&self) {
        self.pipeline.flush_vsync();
    }

    /// Runs queued background layout passes. Their mounts land on the UI
    /// queue and wait for [`TestPipeline::run_ui_tasks`] or the next flush.
    pub fn run_background_tasks(&self) -> usize {
        self.executor.run_background_tasks()
    }

    pub fn run_ui_tasks(&self) -> usize {
        self.pipeline.run_ui_tasks()
    }

    /// Flushes frames and drains both queues until no dirty node or queued
    /// task remains.
    pub fn pump_until_idle(&self) {
        let mut rounds = 0;
        loop {
            rounds += 1;
            if rounds > 100 {
                panic!("pump_until_idle looped too many times");
            }
            let mut progressed = false;

            if !self.pipeline.scheduler().is_empty() {
                self.flush();
                progressed = true;
            }
            if self.executor.pending_background_tasks() > 0 {
                self.run_background_tasks();
                progressed = true;
            }
            if self.executor.pending_ui_tasks() > 0 {
                self.run_ui_tasks();
                progressed = true;
            }

            if !progressed {
                break;
            }
        }
    }

    pub fn touch(&self, event: TouchEvent) -> bool {
        self.pipeline.on_touch_event(&event)
    }

    /// Down then up at `point`.
    pub fn tap(&self, point: PointF) -> bool {
        let down = self.touch(TouchEvent::down(point));
        let up = self.touch(TouchEvent::up(point));
        down || up
    }

    pub fn mouse(&self, event: MouseEvent) {
        self.pipeline.on_mouse_event(&event);
    }

    /// The mock render context of `node`.
    pub fn mock(node: &FrameNode) -> Option<&MockRenderContext> {
        MockRenderContext::of(node)
    }

    /// Dump the tree under the root node as text for debugging.
    pub fn dump_tree(&self) -> String {
        self.root()
            .map(|root| format_frame_tree(&root))
            .unwrap_or_default()
    }
}

impl Default for TestPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestPipeline")
            .field("pipeline", &self.pipeline)
            .field("executor", &self.executor)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
