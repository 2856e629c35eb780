//! Immediate-mode debug line drawing.

use std::cell::RefCell;
use std::f32::consts::TAU;

use glam::{Quat, Vec3};

use crate::context::{Context, ObjectFactory};

/// A line segment with a packed color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub start: Vec3,
    pub end: Vec3,
    pub color: u32,
}

/// Collects debug lines until the next [`render`](DebugRenderer::render).
#[derive(Debug, Default)]
pub struct DebugRenderer {
    lines: RefCell<Vec<DebugLine>>,
    no_depth_lines: RefCell<Vec<DebugLine>>,
}

impl_object!(DebugRenderer, "DebugRenderer");

impl DebugRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&self, start: Vec3, end: Vec3, color: u32, depth_test: bool) {
        let line = DebugLine { start, end, color };
        if depth_test {
            self.lines.borrow_mut().push(line);
        } else {
            self.no_depth_lines.borrow_mut().push(line);
        }
    }

    /// Three axis-aligned lines of length `size` through `center`.
    pub fn add_cross(&self, center: Vec3, size: f32, color: u32, depth_test: bool) {
        let half = size * 0.5;
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            self.add_line(center - axis * half, center + axis * half, color, depth_test);
        }
    }

    pub fn add_quad(&self, center: Vec3, width: f32, height: f32, color: u32, depth_test: bool) {
        let half = Vec3::new(width * 0.5, 0.0, height * 0.5);
        let v0 = center + Vec3::new(-half.x, 0.0, -half.z);
        let v1 = center + Vec3::new(half.x, 0.0, -half.z);
        let v2 = center + Vec3::new(half.x, 0.0, half.z);
        let v3 = center + Vec3::new(-half.x, 0.0, half.z);
        self.add_line(v0, v1, color, depth_test);
        self.add_line(v1, v2, color, depth_test);
        self.add_line(v2, v3, color, depth_test);
        self.add_line(v3, v0, color, depth_test);
    }

    /// A circle of `steps` segments plus a radius line from the center.
    pub fn add_circle(
        &self,
        center: Vec3,
        normal: Vec3,
        radius: f32,
        color: u32,
        steps: u32,
        depth_test: bool,
    ) {
        let steps = steps.max(1);
        let orientation = Quat::from_rotation_arc(Vec3::Y, normal.normalize_or(Vec3::Y));
        let point = |i: u32| {
            let angle = i as f32 / steps as f32 * TAU;
            center + orientation * Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        };
        for i in 0..steps {
            self.add_line(point(i), point(i + 1), color, depth_test);
        }
        self.add_line(center, point(0), color, depth_test);
    }

    /// Number of queued lines, with or without depth test.
    pub fn num_lines(&self, depth_test: bool) -> usize {
        if depth_test {
            self.lines.borrow().len()
        } else {
            self.no_depth_lines.borrow().len()
        }
    }

    /// Submit and clear the queued lines.
    pub fn render(&self) -> usize {
        let count = self.lines.borrow().len() + self.no_depth_lines.borrow().len();
        self.lines.borrow_mut().clear();
        self.no_depth_lines.borrow_mut().clear();
        count
    }
}

impl ObjectFactory for DebugRenderer {
    fn create(_context: &Context) -> Self {
        Self::new()
    }
}
