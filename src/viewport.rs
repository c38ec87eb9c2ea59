//! Camera preset, build-plate grid, and window chrome
//!
//! Boilerplate delegation to kiss3d: everything here is viewport dressing
//! with no parsing or rendering policy in it.

use crate::render::PLATE_SIZE;
use kiss3d::camera::ArcBall;
use kiss3d::nalgebra::Point3;
use kiss3d::window::Window;

/// Grid line spacing on the build plate, in millimeters.
const GRID_STEP: f32 = 10.0;

/// Length of the origin axis markers, in millimeters.
const AXIS_LENGTH: f32 = 20.0;

/// Orbit camera framed for the fixed plate extent.
///
/// The framing is a preset for the known plate size; it deliberately does
/// not fit itself to the loaded document.
pub fn plate_camera() -> ArcBall {
    ArcBall::new(camera_eye(), camera_target())
}

/// Reset an orbit camera to the plate framing preset.
pub fn recenter(camera: &mut ArcBall) {
    camera.look_at(camera_eye(), camera_target());
}

fn camera_eye() -> Point3<f32> {
    Point3::new(0.0, 150.0, 150.0)
}

fn camera_target() -> Point3<f32> {
    Point3::new(0.0, 50.0, 0.0)
}

/// Draw the build-plate grid and origin axes.
///
/// kiss3d lines are immediate mode, so this is called once per frame by the
/// host render loop.
pub fn draw_plate(window: &mut Window) {
    let half = PLATE_SIZE / 2.0;
    let grid_color = Point3::new(0.25, 0.25, 0.25);

    let mut offset = -half;
    while offset <= half {
        window.draw_line(
            &Point3::new(offset, 0.0, -half),
            &Point3::new(offset, 0.0, half),
            &grid_color,
        );
        window.draw_line(
            &Point3::new(-half, 0.0, offset),
            &Point3::new(half, 0.0, offset),
            &grid_color,
        );
        offset += GRID_STEP;
    }

    let origin = Point3::new(0.0, 0.0, 0.0);
    window.draw_line(
        &origin,
        &Point3::new(AXIS_LENGTH, 0.0, 0.0),
        &Point3::new(1.0, 0.0, 0.0),
    );
    window.draw_line(
        &origin,
        &Point3::new(0.0, AXIS_LENGTH, 0.0),
        &Point3::new(0.0, 1.0, 0.0),
    );
    window.draw_line(
        &origin,
        &Point3::new(0.0, 0.0, AXIS_LENGTH),
        &Point3::new(0.0, 0.0, 1.0),
    );
}

/// Background presets cycled with the `T` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Near-black background
    Dark,
    /// Light gray background
    Light,
    /// Deep blue background
    Blue,
}

impl Theme {
    /// Background color for this theme
    pub fn background_color(&self) -> (f32, f32, f32) {
        match self {
            Theme::Dark => (0.1, 0.1, 0.1),
            Theme::Light => (0.88, 0.88, 0.88),
            Theme::Blue => (0.04, 0.09, 0.16),
        }
    }

    /// Next theme in the cycle
    pub fn next(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Blue,
            Theme::Blue => Theme::Dark,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
            Theme::Blue => "Blue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_closes() {
        let mut theme = Theme::Dark;
        for _ in 0..3 {
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Dark);
    }

    #[test]
    fn test_theme_names_unique() {
        assert_ne!(Theme::Dark.name(), Theme::Light.name());
        assert_ne!(Theme::Light.name(), Theme::Blue.name());
    }
}
