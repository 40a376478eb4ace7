//! Test harness for the Ace frame engine: a headless pipeline rule, a task
//! executor driven by hand, and recording doubles for patterns and render
//! contexts.

mod manual_executor;
mod mock_render_context;
mod recording_pattern;
mod testing;

pub use manual_executor::ManualTaskExecutor;
pub use mock_render_context::MockRenderContext;
pub use recording_pattern::{PatternLog, RecordingPattern, SolidColorPaintMethod};
pub use testing::TestPipeline;
