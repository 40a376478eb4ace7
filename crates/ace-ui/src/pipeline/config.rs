use ace_ui_graphics::ScaleProperty;

/// Settings a pipeline is created with.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Root size; the fallback constraint and percent reference for nodes
    /// without a parent constraint.
    pub root_width: f32,
    pub root_height: f32,
    /// Pixels per vp.
    pub density: f32,
    pub font_scale: f32,
    /// Run every layout task on the UI thread.
    pub force_main_thread: bool,
    /// Background layout threads for the std runtime. Zero keeps all work
    /// on the UI queue.
    pub layout_workers: usize,
}

impl PipelineConfig {
    pub fn with_root_size(mut self, width: f32, height: f32) -> Self {
        self.root_width = width;
        self.root_height = height;
        self
    }

    pub fn scale_property(&self) -> ScaleProperty {
        ScaleProperty::from_density(self.density, self.font_scale)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root_width: 720.0,
            root_height: 1280.0,
            density: 1.0,
            font_scale: 1.0,
            force_main_thread: false,
            layout_workers: 2,
        }
    }
}
