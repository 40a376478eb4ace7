//! Dimensions with units and the scale factors that resolve them to pixels

/// Unit attached to a [`Dimension`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DimensionUnit {
    #[default]
    Px,
    /// Virtual pixels, scaled by display density.
    Vp,
    /// Font pixels, scaled by density and the user font scale.
    Fp,
    /// Logical pixels, scaled against the design width.
    Lpx,
    /// Fraction of the percent reference, `0.5` is half.
    Percent,
}

/// Scale factors used to turn a [`Dimension`] into pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleProperty {
    pub vp_scale: f32,
    pub fp_scale: f32,
    pub lpx_scale: f32,
}

impl ScaleProperty {
    pub const fn new(vp_scale: f32, fp_scale: f32, lpx_scale: f32) -> Self {
        Self {
            vp_scale,
            fp_scale,
            lpx_scale,
        }
    }

    /// Scale with density and font scale applied, lpx pinned to 1.
    pub fn from_density(density: f32, font_scale: f32) -> Self {
        Self::new(density, density * font_scale, 1.0)
    }
}

impl Default for ScaleProperty {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Dimension {
    pub value: f32,
    pub unit: DimensionUnit,
}

impl Dimension {
    pub const fn new(value: f32, unit: DimensionUnit) -> Self {
        Self { value, unit }
    }

    pub const fn px(value: f32) -> Self {
        Self::new(value, DimensionUnit::Px)
    }

    pub const fn vp(value: f32) -> Self {
        Self::new(value, DimensionUnit::Vp)
    }

    pub const fn fp(value: f32) -> Self {
        Self::new(value, DimensionUnit::Fp)
    }

    pub const fn percent(fraction: f32) -> Self {
        Self::new(fraction, DimensionUnit::Percent)
    }

    pub fn is_percent(&self) -> bool {
        self.unit == DimensionUnit::Percent
    }

    pub fn is_non_negative(&self) -> bool {
        self.value >= 0.0
    }

    /// Resolves to pixels. Percent dimensions need a finite reference and
    /// resolve to `None` without one.
    pub fn convert_to_px(&self, scale: &ScaleProperty, percent_reference: f32) -> Option<f32> {
        match self.unit {
            DimensionUnit::Px => Some(self.value),
            DimensionUnit::Vp => Some(self.value * scale.vp_scale),
            DimensionUnit::Fp => Some(self.value * scale.fp_scale),
            DimensionUnit::Lpx => Some(self.value * scale.lpx_scale),
            DimensionUnit::Percent => {
                if percent_reference.is_finite() {
                    Some(self.value * percent_reference)
                } else {
                    None
                }
            }
        }
    }
}
