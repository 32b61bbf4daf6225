//! Time-driven body transforms.
//!
//! Everything here is a pure function of the absolute elapsed time, so a
//! frame never depends on the frames before it.

use std::f64::consts::TAU;

use bevy::math::{Mat4, Vec3};

use crate::body::{CelestialBody, OrbitalSystem};

/// Per-frame transforms of a single body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    pub rotate: Mat4,
    pub translate: Mat4,
    /// `translate * rotate * scale`
    pub model: Mat4,
}

/// Angle in radians covered after `elapsed` seconds of a cycle lasting `period`.
///
/// The sign of the result follows the sign of `period`.
fn cycle_angle(period: f32, elapsed: f64) -> f32 {
    let period = f64::from(period);
    let fraction = (elapsed % period) / period;
    (TAU * fraction) as f32
}

/// Spin about the local vertical axis.
pub fn compute_spin(period: f32, elapsed: f64) -> Mat4 {
    Mat4::from_rotation_y(cycle_angle(period, elapsed))
}

/// Position on a circular orbit in the horizontal plane.
pub fn compute_orbit(period: f32, distance: f32, elapsed: f64) -> Mat4 {
    let angle = cycle_angle(period, elapsed);
    Mat4::from_translation(Vec3::new(
        distance * angle.cos(),
        0.0,
        distance * angle.sin(),
    ))
}

pub fn star_transform<T>(star: &CelestialBody<T>, elapsed: f64) -> BodyTransform {
    let rotate = compute_spin(star.rotation_period(), elapsed);
    BodyTransform {
        rotate,
        translate: Mat4::IDENTITY,
        model: rotate * star.scale(),
    }
}

/// Transform of a planet (`center` is identity) or a moon (`center` is the
/// parent planet's current translation). The center only offsets the
/// position; its rotation and scale are never inherited.
pub fn orbiting_transform<T>(body: &CelestialBody<T>, center: Mat4, elapsed: f64) -> BodyTransform {
    let rotate = compute_spin(body.rotation_period(), elapsed);
    let translate = match body.orbit() {
        Some(orbit) => compute_orbit(orbit.period(), orbit.distance(), elapsed) * center,
        None => center,
    };

    BodyTransform {
        rotate,
        translate,
        model: translate * rotate * body.scale(),
    }
}

/// Recomputes the transforms of every body for `elapsed` seconds since the
/// scene started. Each planet is finished before its moons read its translation.
pub fn update<T>(system: &mut OrbitalSystem<T>, elapsed: f64) {
    let (star, planets) = system.parts_mut();
    let transform = star_transform(star, elapsed);
    star.set_transform(transform);

    for planet_system in planets {
        let (planet, moons) = planet_system.bodies_mut();
        let planet_transform = orbiting_transform(planet, Mat4::IDENTITY, elapsed);
        planet.set_transform(planet_transform);

        for moon in moons {
            let transform = orbiting_transform(moon, planet_transform.translate, elapsed);
            moon.set_transform(transform);
        }
    }

    bevy::log::trace!(elapsed, "updated body transforms");
}
