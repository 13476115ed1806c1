//! Planar helpers shared by every entity
//!
//! Locations and velocities are plain `Vec2`s; these functions add the
//! arena-specific operations on top of glam.

use glam::Vec2;

use crate::polar_to_cartesian;

/// A point in the arena
pub type Location = Vec2;

/// Velocity with the given heading (radians) and speed
#[inline]
pub fn velocity_from_polar(angle: f32, speed: f32) -> Vec2 {
    polar_to_cartesian(speed, angle)
}

/// Heading of a velocity in radians, 0 for the zero vector
#[inline]
pub fn heading(vel: Vec2) -> f32 {
    if vel == Vec2::ZERO {
        0.0
    } else {
        vel.y.atan2(vel.x)
    }
}

/// Unit vector from `from` toward `to`, or +x when the points coincide
#[inline]
pub fn direction_or_x(from: Location, to: Location) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::X)
}

/// Slow a velocity down by `amount` without reversing it
pub fn decelerate(vel: Vec2, amount: f32) -> Vec2 {
    let speed = vel.length();
    if speed <= amount || speed == 0.0 {
        Vec2::ZERO
    } else {
        vel * ((speed - amount) / speed)
    }
}

/// Clamp a location into `[0, width] x [0, height]`
#[inline]
pub fn clamp_to_arena(loc: Location, width: f32, height: f32) -> Location {
    Vec2::new(loc.x.clamp(0.0, width), loc.y.clamp(0.0, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_velocity_from_polar() {
        let v = velocity_from_polar(FRAC_PI_2, 10.0);
        assert!(v.x.abs() < 1e-4);
        assert!((v.y - 10.0).abs() < 1e-4);
        assert!((heading(v) - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_heading_of_zero_is_zero() {
        assert_eq!(heading(Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_direction_fallback() {
        let p = Vec2::new(3.0, 4.0);
        assert_eq!(direction_or_x(p, p), Vec2::X);
        let d = direction_or_x(Vec2::ZERO, p);
        assert!((d - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_decelerate_stops_at_zero() {
        let v = Vec2::new(3.0, 4.0);
        let slowed = decelerate(v, 1.0);
        assert!((slowed.length() - 4.0).abs() < 1e-5);
        assert!(slowed.dot(v) > 0.0);
        assert_eq!(decelerate(v, 10.0), Vec2::ZERO);
    }

    #[test]
    fn test_clamp_to_arena() {
        let clamped = clamp_to_arena(Vec2::new(-5.0, 700.0), 500.0, 500.0);
        assert_eq!(clamped, Vec2::new(0.0, 500.0));
    }
}
