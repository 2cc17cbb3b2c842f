use core::f64::consts::TAU;

use crate::vector3::Vector3;

/// Autoplay configuration.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AutoplayConfig {
    /// Phase advance per frame, in radians of the driving parameter.
    pub step: f64,
    /// Rest pose of the camera; its yaw is the autoplay yaw offset.
    pub jump_rotation: Vector3,
    /// Whether autoplay starts enabled.
    pub enabled: bool,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            step: TAU / 180.0,
            jump_rotation: Vector3::new(
                -10.0 / 360.0 * TAU,
                18.0 / 360.0 * TAU,
                -31.0 / 360.0 * TAU,
            ),
            enabled: true,
        }
    }
}

/// Cubic easing over `[0, 1]`: slow at both ends, fast through the middle.
pub fn ease_out_in(i: f64) -> f64 {
    let first_half = i < 0.5;
    let i1 = (if first_half { i } else { 1.0 - i }) / 0.5;
    let i2 = i1 * i1 * i1 / 2.0;
    if first_half { i2 } else { 1.0 - i2 }
}

/// Unattended camera spin: two eased turns per period.
#[derive(Debug, Clone)]
pub struct Autoplay {
    config: AutoplayConfig,
    t: f64,
    enabled: bool,
}

impl Autoplay {
    pub fn new(config: AutoplayConfig) -> Self {
        Self { enabled: config.enabled, config, t: 0.0 }
    }

    #[inline]
    pub fn config(&self) -> &AutoplayConfig {
        &self.config
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!("autoplay {}", if enabled { "resumed" } else { "paused" });
        }
        self.enabled = enabled;
    }

    /// Current phase parameter.
    #[inline]
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Advances one frame and returns the camera yaw, or `None` when paused.
    pub fn advance(&mut self) -> Option<f64> {
        if !self.enabled {
            return None;
        }
        self.t += self.config.step;
        Some(self.yaw_at(self.t))
    }

    /// Camera yaw for phase `t` (not normalized).
    pub fn yaw_at(&self, t: f64) -> f64 {
        ease_out_in((t / TAU) % 1.0) * TAU * -2.0 + self.config.jump_rotation.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector3::modulo;

    #[test]
    fn ease_hits_fixed_points() {
        assert_eq!(ease_out_in(0.0), 0.0);
        assert_eq!(ease_out_in(0.5), 0.5);
        assert_eq!(ease_out_in(1.0), 1.0);
        assert!((ease_out_in(0.25) - 0.0625).abs() < 1e-12);
        assert!((ease_out_in(0.75) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn ease_is_symmetric() {
        for i in [0.05, 0.1, 0.3, 0.45] {
            assert!((ease_out_in(i) + ease_out_in(1.0 - i) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn yaw_is_periodic_over_one_turn() {
        let autoplay = Autoplay::new(AutoplayConfig::default());
        for t in [0.1, 1.0, 2.5, 4.0] {
            let a = modulo(autoplay.yaw_at(t), TAU);
            let b = modulo(autoplay.yaw_at(t + TAU), TAU);
            assert!((a - b).abs() < 1e-9, "t={t}: {a} vs {b}");
        }
    }

    #[test]
    fn a_full_period_is_180_frames() {
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        let jump_y = autoplay.config().jump_rotation.y;
        let mut last = 0.0;
        for _ in 0..180 {
            last = autoplay.advance().unwrap_or(f64::NAN);
        }
        // after a whole period the camera is back at its rest yaw
        assert!((modulo(last, TAU) - modulo(jump_y, TAU)).abs() < 1e-9);
    }

    #[test]
    fn paused_autoplay_does_not_advance() {
        let mut autoplay = Autoplay::new(AutoplayConfig::default());
        autoplay.set_enabled(false);
        assert_eq!(autoplay.advance(), None);
        assert_eq!(autoplay.t(), 0.0);
    }
}
