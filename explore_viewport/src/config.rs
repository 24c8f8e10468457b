// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Smallest scale the controller will ever produce, whatever the limits say.
pub const MIN_SCALE_FLOOR: f64 = 1e-3;

/// Default growth factor for one zoom-in step, `e^0.3`.
pub const DEFAULT_ZOOM_FACTOR: f64 = 1.349_858_807_576_003_2;

/// Default growth factor for one wheel notch, `e^(0.3 / 3)`.
pub const DEFAULT_WHEEL_FACTOR: f64 = 1.105_170_918_075_647_7;

/// How the reset scale is chosen when the canvas is first measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitPolicy {
    /// Start and reset at scale `1` (clamped into the zoom limits). The
    /// configured limits stay in force across resizes.
    #[default]
    Actual,
    /// Start and reset at the largest scale that fits the whole canvas in the
    /// viewport; that scale also becomes the minimum zoom, and both are
    /// recomputed on every resize.
    Fit,
}

/// Tunables for a [`crate::ViewportController`].
///
/// Construct with [`ViewportConfig::default`] and adjust with the `with_*`
/// methods; [`ViewportConfig::validate`] runs when a controller is created.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewportConfig {
    /// Minimap length of the canvas' longer side.
    pub minimap_target: f64,
    /// Distance the indicator keeps from the minimap edges.
    pub edge_threshold: f64,
    /// Lower zoom limit.
    pub min_scale: f64,
    /// Upper zoom limit.
    pub max_scale: f64,
    /// Factor applied by one zoom-in step; zoom-out divides by it.
    pub zoom_factor: f64,
    /// Factor applied by one modified wheel notch.
    pub wheel_factor: f64,
    /// Reset scale policy.
    pub fit: FitPolicy,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            minimap_target: 200.0,
            edge_threshold: 8.0,
            min_scale: 0.125,
            max_scale: 4.0,
            zoom_factor: DEFAULT_ZOOM_FACTOR,
            wheel_factor: DEFAULT_WHEEL_FACTOR,
            fit: FitPolicy::Actual,
        }
    }
}

impl ViewportConfig {
    /// Sets the minimap target size.
    #[must_use]
    pub fn with_minimap_target(mut self, target: f64) -> Self {
        self.minimap_target = target;
        self
    }

    /// Sets the minimap edge threshold.
    #[must_use]
    pub fn with_edge_threshold(mut self, threshold: f64) -> Self {
        self.edge_threshold = threshold;
        self
    }

    /// Sets the zoom limits.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Sets the button/keyboard zoom factor.
    #[must_use]
    pub fn with_zoom_factor(mut self, factor: f64) -> Self {
        self.zoom_factor = factor;
        self
    }

    /// Sets the wheel zoom factor.
    #[must_use]
    pub fn with_wheel_factor(mut self, factor: f64) -> Self {
        self.wheel_factor = factor;
        self
    }

    /// Sets the reset scale policy.
    #[must_use]
    pub fn with_fit(mut self, fit: FitPolicy) -> Self {
        self.fit = fit;
        self
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("minimap_target", self.minimap_target),
            ("edge_threshold", self.edge_threshold),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("zoom_factor", self.zoom_factor),
            ("wheel_factor", self.wheel_factor),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NonFinite { field });
        }
        if self.minimap_target <= 0.0 {
            return Err(ConfigError::MinimapTarget(self.minimap_target));
        }
        if self.edge_threshold < 0.0 {
            return Err(ConfigError::EdgeThreshold(self.edge_threshold));
        }
        if self.min_scale < MIN_SCALE_FLOOR || self.min_scale > self.max_scale {
            return Err(ConfigError::ScaleLimits {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        if self.zoom_factor <= 1.0 {
            return Err(ConfigError::Factor {
                field: "zoom_factor",
                value: self.zoom_factor,
            });
        }
        if self.wheel_factor <= 1.0 {
            return Err(ConfigError::Factor {
                field: "wheel_factor",
                value: self.wheel_factor,
            });
        }
        Ok(())
    }
}

/// Error returned by [`ViewportConfig::validate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// A field is NaN or infinite.
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The minimap target size is not positive.
    MinimapTarget(f64),
    /// The edge threshold is negative.
    EdgeThreshold(f64),
    /// The zoom limits are inverted or below [`MIN_SCALE_FLOOR`].
    ScaleLimits {
        /// Configured lower limit.
        min: f64,
        /// Configured upper limit.
        max: f64,
    },
    /// A zoom growth factor is not greater than one.
    Factor {
        /// Name of the offending field.
        field: &'static str,
        /// Configured value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field } => write!(f, "`{field}` must be finite"),
            Self::MinimapTarget(v) => write!(f, "minimap target size must be positive, got {v}"),
            Self::EdgeThreshold(v) => write!(f, "edge threshold must not be negative, got {v}"),
            Self::ScaleLimits { min, max } => write!(
                f,
                "zoom limits [{min}, {max}] must be ordered and at least {MIN_SCALE_FLOOR}"
            ),
            Self::Factor { field, value } => {
                write!(f, "`{field}` must be greater than 1, got {value}")
            }
        }
    }
}

impl core::error::Error for ConfigError {}
