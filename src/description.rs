//! Parser for the tab-separated scene description format.
//!
//! ```text
//! camX camY camZ
//! R G B ambient diffuse specular attenuation
//! starTexture starRadius starRotationPeriod
//! marker planetTexture radius rotationPeriod distance orbitalPeriod specularShine
//! marker marker moonTexture radius rotationPeriod distance orbitalPeriod specularShine
//! ```
//!
//! Body records end at the end of input or at the first blank line. Moon
//! records attach to the closest planet record above them.

use bevy::math::Vec3;
use itertools::Itertools;

use crate::body::{CelestialBody, OrbitalSystem, Orbit};
use crate::error::{BodyError, SceneError, SceneResult};
use crate::transform;

const CAMERA_FIELDS: usize = 3;
const LIGHT_FIELDS: usize = 7;
const STAR_FIELDS: usize = 3;
const PLANET_FIELDS: usize = 7;
const MOON_FIELDS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
}

/// Light emitted by the star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: [u8; 3],
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub attenuation: f32,
}

#[derive(Debug, Clone)]
pub struct SceneDescription<T> {
    pub camera: Camera,
    pub light: Light,
    pub system: OrbitalSystem<T>,
}

impl<T> SceneDescription<T> {
    pub fn try_map_textures<U, E>(
        self,
        f: impl FnMut(T) -> Result<U, E>,
    ) -> Result<SceneDescription<U>, E> {
        Ok(SceneDescription {
            camera: self.camera,
            light: self.light,
            system: self.system.try_map_textures(f)?,
        })
    }
}

/// One line split into its tab-separated fields.
struct Record<'a> {
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        let mut fields = text.split('\t').collect_vec();
        while fields.len() > 1 && fields.last().is_some_and(|field| field.is_empty()) {
            fields.pop();
        }
        Self { line, fields }
    }

    fn expect_fields(&self, expected: usize, label: &'static str) -> SceneResult<()> {
        if self.fields.len() == expected {
            Ok(())
        } else {
            Err(SceneError::MalformedRecord {
                line: self.line,
                expected: label,
                actual: self.fields.len(),
            })
        }
    }

    fn text(&self, index: usize) -> String {
        self.fields[index].trim().to_owned()
    }

    fn float(&self, index: usize) -> SceneResult<f32> {
        let field = self.fields[index].trim();
        field
            .parse::<f32>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| self.numeric_error(index, "a finite number"))
    }

    fn color(&self, index: usize) -> SceneResult<u8> {
        self.fields[index]
            .trim()
            .parse::<u8>()
            .map_err(|_| self.numeric_error(index, "a colour component (0-255)"))
    }

    fn numeric_error(&self, index: usize, kind: &'static str) -> SceneError {
        SceneError::NumericParse {
            line: self.line,
            field: index + 1,
            value: self.fields[index].to_owned(),
            kind,
        }
    }

    fn invalid(&self, source: BodyError) -> SceneError {
        SceneError::InvalidBody {
            line: self.line,
            source,
        }
    }

    /// Body columns start at `first`: radius, rotation period, distance,
    /// orbital period, specular shine. Every column is parsed before any of
    /// them is validated.
    fn orbiting_body(&self, first: usize) -> SceneResult<OrbitingFields> {
        let (radius, rotation_period, distance, period, shine) = (
            self.float(first)?,
            self.float(first + 1)?,
            self.float(first + 2)?,
            self.float(first + 3)?,
            self.float(first + 4)?,
        );
        Ok(OrbitingFields {
            radius,
            rotation_period,
            orbit: Orbit::new(distance, period, shine).map_err(|source| self.invalid(source))?,
        })
    }
}

struct OrbitingFields {
    radius: f32,
    rotation_period: f32,
    orbit: Orbit,
}

/// Parses a complete scene description. The first error aborts the parse.
pub fn parse(text: &str) -> SceneResult<SceneDescription<String>> {
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line));
    let mut header = |record: &'static str| {
        let line = lines.next();
        match line {
            Some((number, text)) => Ok(Record::new(number, text)),
            None => Err(SceneError::MissingRecord {
                line: text.lines().count() + 1,
                record,
            }),
        }
    };

    let camera = parse_camera(&header("camera")?)?;
    let light = parse_light(&header("light")?)?;
    let mut system = parse_star(&header("star")?)?;

    for (number, line) in lines {
        if line.trim().is_empty() {
            break;
        }
        let record = Record::new(number, line);
        match record.fields.len() {
            PLANET_FIELDS => {
                let fields = record.orbiting_body(2)?;
                system
                    .add_planet(
                        record.text(1),
                        fields.radius,
                        fields.rotation_period,
                        fields.orbit,
                    )
                    .map_err(|source| record.invalid(source))?;
            }
            MOON_FIELDS => {
                let Some(planet) = system.current_planet() else {
                    return Err(SceneError::OrphanMoon { line: number });
                };
                let fields = record.orbiting_body(3)?;
                planet
                    .add_moon(
                        record.text(2),
                        fields.radius,
                        fields.rotation_period,
                        fields.orbit,
                    )
                    .map_err(|source| record.invalid(source))?;
            }
            actual => {
                return Err(SceneError::MalformedRecord {
                    line: number,
                    expected: "7 (planet) or 8 (moon)",
                    actual,
                })
            }
        }
    }

    transform::update(&mut system, 0.0);

    Ok(SceneDescription {
        camera,
        light,
        system,
    })
}

fn parse_camera(record: &Record) -> SceneResult<Camera> {
    record.expect_fields(CAMERA_FIELDS, "3")?;
    Ok(Camera {
        position: Vec3::new(record.float(0)?, record.float(1)?, record.float(2)?),
    })
}

fn parse_light(record: &Record) -> SceneResult<Light> {
    record.expect_fields(LIGHT_FIELDS, "7")?;
    Ok(Light {
        color: [record.color(0)?, record.color(1)?, record.color(2)?],
        ambient: record.float(3)?,
        diffuse: record.float(4)?,
        specular: record.float(5)?,
        attenuation: record.float(6)?,
    })
}

fn parse_star(record: &Record) -> SceneResult<OrbitalSystem<String>> {
    record.expect_fields(STAR_FIELDS, "3")?;
    let star = CelestialBody::star(record.text(0), record.float(1)?, record.float(2)?)
        .map_err(|source| record.invalid(source))?;
    Ok(OrbitalSystem::new(star))
}
