//! Orbit rig and zoom state for the isometric camera.
use std::f32::consts::{PI, TAU};

use bevy::prelude::*;

use crate::core::config::CameraSettings;

const ZOOM_SETTLE_EPSILON: f32 = 0.01;

/// Wraps an angle into (-PI, PI].
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Horizontal orbit state around the room target.
///
/// The rest azimuth is captured once at construction and never changes.
#[derive(Resource, Debug, Clone)]
pub struct OrbitRig {
    azimuth: f32,
    rest_azimuth: f32,
    min_azimuth: f32,
    max_azimuth: f32,
    dragging: bool,
    returning: bool,
}

impl OrbitRig {
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            azimuth: settings.rest_azimuth,
            rest_azimuth: settings.rest_azimuth,
            min_azimuth: settings.min_azimuth,
            max_azimuth: settings.max_azimuth,
            dragging: false,
            returning: false,
        }
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn rest_azimuth(&self) -> f32 {
        self.rest_azimuth
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_returning(&self) -> bool {
        self.returning
    }

    /// A new drag cancels any auto-return in flight.
    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.returning = false;
    }

    pub fn drag_by(&mut self, delta_radians: f32) {
        if !self.dragging {
            return;
        }
        self.azimuth = (self.azimuth + delta_radians).clamp(self.min_azimuth, self.max_azimuth);
    }

    /// Releasing a drag starts the auto-return.
    pub fn end_drag(&mut self) {
        if self.dragging {
            self.dragging = false;
            self.returning = true;
        }
    }

    /// One frame of auto-return. Returns true while still returning.
    ///
    /// The remaining angle decays by `1 - base^dt` each frame and the return
    /// stops once it is below `epsilon`.
    pub fn step_return(&mut self, delta_seconds: f32, base: f32, epsilon: f32) -> bool {
        if !self.returning {
            return false;
        }

        let diff = wrap_angle(self.rest_azimuth - self.azimuth);
        if diff.abs() < epsilon {
            self.returning = false;
            return false;
        }

        let factor = 1.0 - base.powf(delta_seconds.max(0.0));
        self.azimuth += diff * factor;
        true
    }

    /// Camera position on the orbit sphere for the current azimuth.
    pub fn eye(&self, target: Vec3, distance: f32, polar_angle: f32) -> Vec3 {
        let horizontal = distance * polar_angle.sin();
        target
            + Vec3::new(
                horizontal * self.azimuth.sin(),
                distance * polar_angle.cos(),
                horizontal * self.azimuth.cos(),
            )
    }
}

/// Orthographic view size, scroll zoom, and the focus zoom animation.
#[derive(Resource, Debug, Clone)]
pub struct ZoomState {
    current: f32,
    target: f32,
    zooming: bool,
    zoomed_in: bool,
    default_size: f32,
    zoomed_size: f32,
    min_size: f32,
    max_size: f32,
    speed: f32,
}

impl ZoomState {
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            current: settings.view_size,
            target: settings.view_size,
            zooming: false,
            zoomed_in: false,
            default_size: settings.view_size,
            zoomed_size: settings.zoomed_view_size,
            min_size: settings.min_view_size,
            max_size: settings.max_view_size,
            speed: settings.zoom_speed,
        }
    }

    /// Half the vertical extent of the orthographic view.
    pub fn view_size(&self) -> f32 {
        self.current
    }

    pub fn is_zooming(&self) -> bool {
        self.zooming
    }

    /// Set once a focus zoom-in has settled.
    pub fn is_zoomed_in(&self) -> bool {
        self.zoomed_in
    }

    /// Starts a focus zoom towards the zoomed size, or back out if already focused.
    pub fn toggle_focus(&mut self) {
        let heading_in = self.zooming && self.target == self.zoomed_size;
        if self.zoomed_in || heading_in {
            self.target = self.default_size;
            self.zoomed_in = false;
        } else {
            self.target = self.zoomed_size;
        }
        self.zooming = true;
    }

    /// Scroll zoom. Ignored while a focus zoom runs or holds.
    pub fn scroll(&mut self, steps: f32, step_size: f32) {
        if self.zooming || self.zoomed_in {
            return;
        }
        self.current = (self.current - steps * step_size).clamp(self.min_size, self.max_size);
        self.target = self.current;
    }

    /// One frame of the focus zoom animation.
    pub fn step(&mut self, delta_seconds: f32) {
        if !self.zooming {
            return;
        }

        let diff = self.target - self.current;
        if diff.abs() < ZOOM_SETTLE_EPSILON {
            self.current = self.target;
            self.zooming = false;
            if self.target == self.zoomed_size {
                self.zoomed_in = true;
            }
        } else {
            self.current += diff * (self.speed * delta_seconds).min(1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PortfolioSettings;

    const FRAME: f32 = 1.0 / 60.0;

    fn settings() -> CameraSettings {
        PortfolioSettings::default().camera
    }

    #[test]
    fn wrap_angle_stays_in_half_open_range() {
        assert!((wrap_angle(3.0 * PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-5);
        assert!((wrap_angle(0.5) - 0.5).abs() < 1e-6);
        assert!((wrap_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        assert!((wrap_angle(-TAU - 0.25) + 0.25).abs() < 1e-5);
    }

    #[test]
    fn drag_is_clamped_to_arc() {
        let settings = settings();
        let mut rig = OrbitRig::new(&settings);
        rig.drag_by(1.0);
        assert_eq!(rig.azimuth(), settings.rest_azimuth);

        rig.begin_drag();
        rig.drag_by(10.0);
        assert_eq!(rig.azimuth(), settings.max_azimuth);
        rig.drag_by(-10.0);
        assert_eq!(rig.azimuth(), settings.min_azimuth);
    }

    #[test]
    fn auto_return_settles_monotonically_from_any_start() {
        let settings = settings();
        let starts = [settings.min_azimuth, settings.max_azimuth];

        for start in starts {
            let mut rig = OrbitRig::new(&settings);
            rig.begin_drag();
            rig.drag_by(start - rig.azimuth());
            rig.end_drag();
            assert!(rig.is_returning());

            let mut previous = (rig.rest_azimuth() - rig.azimuth()).abs();
            let mut frames = 0;
            while rig.step_return(FRAME, settings.return_base, settings.return_epsilon) {
                let remaining = (rig.rest_azimuth() - rig.azimuth()).abs();
                assert!(remaining <= previous);
                previous = remaining;
                frames += 1;
                assert!(frames < 10_000, "auto-return never settled");
            }

            assert!((rig.rest_azimuth() - rig.azimuth()).abs() < settings.return_epsilon);
            assert!(!rig.is_returning());
        }
    }

    #[test]
    fn new_drag_cancels_return() {
        let settings = settings();
        let mut rig = OrbitRig::new(&settings);
        rig.begin_drag();
        rig.drag_by(0.3);
        rig.end_drag();
        rig.step_return(FRAME, settings.return_base, settings.return_epsilon);

        rig.begin_drag();
        assert!(!rig.is_returning());
        let frozen = rig.azimuth();
        assert!(!rig.step_return(FRAME, settings.return_base, settings.return_epsilon));
        assert_eq!(rig.azimuth(), frozen);
    }

    #[test]
    fn eye_sits_on_orbit_sphere() {
        let settings = settings();
        let rig = OrbitRig::new(&settings);
        let eye = rig.eye(settings.target, settings.distance, settings.polar_angle);
        assert!((eye.distance(settings.target) - settings.distance).abs() < 1e-3);
        assert!(eye.y > settings.target.y);
    }

    #[test]
    fn focus_zoom_sets_flag_only_after_settling() {
        let settings = settings();
        let mut zoom = ZoomState::new(&settings);
        zoom.toggle_focus();
        assert!(zoom.is_zooming());
        assert!(!zoom.is_zoomed_in());

        for _ in 0..600 {
            zoom.step(FRAME);
        }
        assert!(!zoom.is_zooming());
        assert!(zoom.is_zoomed_in());
        assert_eq!(zoom.view_size(), settings.zoomed_view_size);

        zoom.toggle_focus();
        assert!(!zoom.is_zoomed_in());
        for _ in 0..600 {
            zoom.step(FRAME);
        }
        assert_eq!(zoom.view_size(), settings.view_size);
        assert!(!zoom.is_zoomed_in());
    }

    #[test]
    fn scroll_respects_limits_and_focus() {
        let settings = settings();
        let mut zoom = ZoomState::new(&settings);
        zoom.scroll(100.0, settings.scroll_step);
        assert_eq!(zoom.view_size(), settings.min_view_size);
        zoom.scroll(-100.0, settings.scroll_step);
        assert_eq!(zoom.view_size(), settings.max_view_size);

        zoom.toggle_focus();
        let during = zoom.view_size();
        zoom.scroll(1.0, settings.scroll_step);
        assert_eq!(zoom.view_size(), during);
    }
}
