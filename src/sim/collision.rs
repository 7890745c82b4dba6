//! Collision predicates for the ball and the axis-aligned bodies around it
//!
//! Every test is a pure function of the two shapes. Entities expose their
//! shape through [`Collider`], and [`overlaps`] dispatches to the circle or
//! box test depending on which one carries a radius.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Build a rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Closest point inside the rectangle to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min(), self.max())
    }
}

/// A circle given by center and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Collision shape of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collider {
    Circle(Circle),
    Rect(Rect),
}

/// Circle vs rectangle: the circle overlaps when the rectangle point nearest
/// its center is strictly closer than the radius.
pub fn circle_rect_overlap(circle: &Circle, rect: &Rect) -> bool {
    let closest = rect.closest_point(circle.center);
    circle.center.distance(closest) < circle.radius
}

/// Standard AABB test. Touching edges do not count as overlap.
pub fn rect_rect_overlap(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.pos.x + b.size.x
        && a.pos.x + a.size.x > b.pos.x
        && a.pos.y < b.pos.y + b.size.y
        && a.pos.y + a.size.y > b.pos.y
}

/// Test any collider against a rectangle, picking the circle test when the
/// collider has a radius.
pub fn overlaps(collider: &Collider, rect: &Rect) -> bool {
    match collider {
        Collider::Circle(circle) => circle_rect_overlap(circle, rect),
        Collider::Rect(own) => rect_rect_overlap(own, rect),
    }
}

/// Axis to reflect when the ball strikes a brick: whichever axis separates
/// the two centers the most.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    Horizontal,
    Vertical,
}

pub fn bounce_axis(ball_center: Vec2, rect: &Rect) -> BounceAxis {
    let delta = ball_center - rect.center();
    if delta.x.abs() > delta.y.abs() {
        BounceAxis::Horizontal
    } else {
        BounceAxis::Vertical
    }
}
