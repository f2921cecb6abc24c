// Copyright 2025 the Handlebox Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use handlebox_geometry::{DEFAULT_MIN_SCALE, HandleMetrics, HitParams, SizeLimits};

/// All tunables of the interaction engine in one place.
///
/// Every field has a default tuned for finger input, so a partially
/// specified configuration (for example from JSON with the `serde`
/// feature) fills in the rest.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Bounds on the untransformed size during a corner resize.
    pub limits: SizeLimits,
    /// Handle sizes and offsets.
    pub metrics: HandleMetrics,
    /// Hit-testing tolerances.
    pub hit: HitParams,
    /// Floor on the uniform scale factor reachable by pinching.
    pub min_scale: f64,
}

impl EngineConfig {
    /// Replaces the resize limits.
    #[must_use]
    pub fn with_limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Replaces the handle metrics.
    #[must_use]
    pub fn with_metrics(mut self, metrics: HandleMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Replaces the hit-testing parameters.
    #[must_use]
    pub fn with_hit_params(mut self, hit: HitParams) -> Self {
        self.hit = hit;
        self
    }

    /// Replaces the minimum scale.
    #[must_use]
    pub fn with_min_scale(mut self, min_scale: f64) -> Self {
        self.min_scale = min_scale;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limits: SizeLimits::default(),
            metrics: HandleMetrics::default(),
            hit: HitParams::default(),
            min_scale: DEFAULT_MIN_SCALE,
        }
    }
}
