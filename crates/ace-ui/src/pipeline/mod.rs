//! Frame driver: dirty-node scheduling, vsync flushing and input entry.

mod config;
mod hit_path_tracker;
mod pipeline_context;
mod ui_task_scheduler;

pub use config::PipelineConfig;
pub use hit_path_tracker::HitPathTracker;
pub use pipeline_context::{PipelineContext, PipelineScopeGuard, RenderContextFactory};
pub use ui_task_scheduler::{UiTask, UiTaskScheduler};

#[cfg(test)]
#[path = "tests/ui_task_scheduler_tests.rs"]
mod tests;
