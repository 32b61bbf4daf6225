use std::iter;

use bevy::math::{Mat4, Vec3};

use crate::error::BodyError;
use crate::transform::BodyTransform;

/// Position of a body in the star -> planet -> moon hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyId {
    Star,
    Planet(usize),
    Moon { planet: usize, moon: usize },
}

/// Circular orbit parameters shared by planets and moons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    distance: f32,
    period: f32,
    specular_shine: f32,
}

impl Orbit {
    /// `period` is the value as written in a scene description. It is stored
    /// negated so that a positive period travels counter-clockwise seen from +Y.
    pub fn new(distance: f32, period: f32, specular_shine: f32) -> Result<Self, BodyError> {
        finite("distance", distance)?;
        finite("orbital period", period)?;
        finite("specular shine", specular_shine)?;
        if distance < 0.0 {
            return Err(BodyError::NegativeDistance(distance));
        }
        if period == 0.0 {
            return Err(BodyError::ZeroOrbitalPeriod);
        }
        if specular_shine < 0.0 {
            return Err(BodyError::NegativeSpecularShine(specular_shine));
        }

        Ok(Self {
            distance,
            period: -period,
            specular_shine,
        })
    }

    /// Distance from the star for a planet, from the parent planet for a moon.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Sign-adjusted period fed to the orbit computation.
    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn specular_shine(&self) -> f32 {
        self.specular_shine
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Role {
    Star,
    Planet(Orbit),
    Moon { orbit: Orbit, planet: usize },
}

#[derive(Debug, Clone)]
pub struct CelestialBody<T> {
    texture: T,
    radius: f32,
    rotation_period: f32,
    role: Role,
    transform: BodyTransform,
}

impl<T> CelestialBody<T> {
    pub fn star(texture: T, radius: f32, rotation_period: f32) -> Result<Self, BodyError> {
        Self::new(texture, radius, rotation_period, Role::Star)
    }

    fn new(texture: T, radius: f32, rotation_period: f32, role: Role) -> Result<Self, BodyError> {
        finite("radius", radius)?;
        finite("rotation period", rotation_period)?;
        if radius <= 0.0 {
            return Err(BodyError::NonPositiveRadius(radius));
        }
        if rotation_period == 0.0 {
            return Err(BodyError::ZeroRotationPeriod);
        }

        let translate = match role {
            Role::Star => Mat4::IDENTITY,
            Role::Planet(orbit) | Role::Moon { orbit, .. } => {
                Mat4::from_translation(Vec3::new(orbit.distance, 0.0, 0.0))
            }
        };
        let scale = Mat4::from_scale(Vec3::splat(radius));

        Ok(Self {
            texture,
            radius,
            rotation_period,
            role,
            transform: BodyTransform {
                rotate: Mat4::IDENTITY,
                translate,
                model: translate * scale,
            },
        })
    }

    pub fn texture(&self) -> &T {
        &self.texture
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn rotation_period(&self) -> f32 {
        self.rotation_period
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// `None` for the star.
    pub fn orbit(&self) -> Option<&Orbit> {
        match &self.role {
            Role::Star => None,
            Role::Planet(orbit) | Role::Moon { orbit, .. } => Some(orbit),
        }
    }

    pub fn scale(&self) -> Mat4 {
        Mat4::from_scale(Vec3::splat(self.radius))
    }

    /// Transforms computed by the most recent update.
    pub fn transform(&self) -> &BodyTransform {
        &self.transform
    }

    pub(crate) fn set_transform(&mut self, transform: BodyTransform) {
        self.transform = transform;
    }

    pub fn try_map_texture<U, E>(
        self,
        f: impl FnOnce(T) -> Result<U, E>,
    ) -> Result<CelestialBody<U>, E> {
        Ok(CelestialBody {
            texture: f(self.texture)?,
            radius: self.radius,
            rotation_period: self.rotation_period,
            role: self.role,
            transform: self.transform,
        })
    }
}

/// A planet together with the moons declared after it.
#[derive(Debug, Clone)]
pub struct PlanetSystem<T> {
    index: usize,
    planet: CelestialBody<T>,
    moons: Vec<CelestialBody<T>>,
}

impl<T> PlanetSystem<T> {
    pub fn planet(&self) -> &CelestialBody<T> {
        &self.planet
    }

    pub fn moons(&self) -> &[CelestialBody<T>] {
        &self.moons
    }

    pub fn add_moon(
        &mut self,
        texture: T,
        radius: f32,
        rotation_period: f32,
        orbit: Orbit,
    ) -> Result<BodyId, BodyError> {
        let role = Role::Moon {
            orbit,
            planet: self.index,
        };
        self.moons
            .push(CelestialBody::new(texture, radius, rotation_period, role)?);

        Ok(BodyId::Moon {
            planet: self.index,
            moon: self.moons.len() - 1,
        })
    }

    pub(crate) fn bodies_mut(&mut self) -> (&mut CelestialBody<T>, &mut [CelestialBody<T>]) {
        (&mut self.planet, &mut self.moons)
    }
}

/// One star and the planets orbiting it, in declaration order.
#[derive(Debug, Clone)]
pub struct OrbitalSystem<T> {
    star: CelestialBody<T>,
    planets: Vec<PlanetSystem<T>>,
}

impl<T> OrbitalSystem<T> {
    pub fn new(star: CelestialBody<T>) -> Self {
        debug_assert_eq!(star.role, Role::Star);
        Self {
            star,
            planets: Vec::new(),
        }
    }

    pub fn star(&self) -> &CelestialBody<T> {
        &self.star
    }

    pub fn planets(&self) -> &[PlanetSystem<T>] {
        &self.planets
    }

    /// Appends a planet, which becomes the attachment point for later moons.
    pub fn add_planet(
        &mut self,
        texture: T,
        radius: f32,
        rotation_period: f32,
        orbit: Orbit,
    ) -> Result<usize, BodyError> {
        let index = self.planets.len();
        self.planets.push(PlanetSystem {
            index,
            planet: CelestialBody::new(texture, radius, rotation_period, Role::Planet(orbit))?,
            moons: Vec::new(),
        });
        Ok(index)
    }

    /// The most recently declared planet.
    pub fn current_planet(&mut self) -> Option<&mut PlanetSystem<T>> {
        self.planets.last_mut()
    }

    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    pub fn moon_count(&self) -> usize {
        self.planets.iter().map(|system| system.moons.len()).sum()
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody<T>> {
        match id {
            BodyId::Star => Some(&self.star),
            BodyId::Planet(planet) => self.planets.get(planet).map(|system| &system.planet),
            BodyId::Moon { planet, moon } => self
                .planets
                .get(planet)
                .and_then(|system| system.moons.get(moon)),
        }
    }

    /// Every body in drawing order: the star, then each planet followed by its moons.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyId, &CelestialBody<T>)> {
        iter::once((BodyId::Star, &self.star)).chain(self.planets.iter().enumerate().flat_map(
            |(planet, system)| {
                iter::once((BodyId::Planet(planet), &system.planet)).chain(
                    system
                        .moons
                        .iter()
                        .enumerate()
                        .map(move |(moon, body)| (BodyId::Moon { planet, moon }, body)),
                )
            },
        ))
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut CelestialBody<T>, &mut [PlanetSystem<T>]) {
        (&mut self.star, &mut self.planets)
    }

    pub fn try_map_textures<U, E>(
        self,
        mut f: impl FnMut(T) -> Result<U, E>,
    ) -> Result<OrbitalSystem<U>, E> {
        let star = self.star.try_map_texture(&mut f)?;
        let planets = self
            .planets
            .into_iter()
            .map(|system| {
                Ok(PlanetSystem {
                    index: system.index,
                    planet: system.planet.try_map_texture(&mut f)?,
                    moons: system
                        .moons
                        .into_iter()
                        .map(|moon| moon.try_map_texture(&mut f))
                        .collect::<Result<_, E>>()?,
                })
            })
            .collect::<Result<_, E>>()?;

        Ok(OrbitalSystem { star, planets })
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), BodyError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(BodyError::NonFinite(name))
    }
}
