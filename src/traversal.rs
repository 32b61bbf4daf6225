use bevy::math::Mat4;

use crate::body::{BodyId, OrbitalSystem, Role};
use crate::transform;

/// Everything a renderer needs to draw one body.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a, T, M> {
    pub id: BodyId,
    pub role: Role,
    pub texture: &'a T,
    pub model: Mat4,
    /// Geometry shared by every body.
    pub mesh: &'a M,
}

/// Draw calls for the transforms computed by the last [`transform::update`],
/// in the order star, then each planet followed by its moons.
pub fn traverse<'a, T, M>(system: &'a OrbitalSystem<T>, mesh: &'a M) -> Vec<DrawCall<'a, T, M>> {
    system
        .bodies()
        .map(|(id, body)| DrawCall {
            id,
            role: body.role(),
            texture: body.texture(),
            model: body.transform().model,
            mesh,
        })
        .collect()
}

/// Advances the system to `elapsed` and traverses it.
pub fn frame<'a, T, M>(
    system: &'a mut OrbitalSystem<T>,
    elapsed: f64,
    mesh: &'a M,
) -> Vec<DrawCall<'a, T, M>> {
    transform::update(system, elapsed);
    traverse(system, mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description;

    const SCENE: &str = "0\t40\t120
255\t255\t255\t0.2\t0.8\t0.5\t0
sun.jpg\t50\t20
P\tearth.jpg\t5\t10\t100\t365\t0.5
M\tM\tmoon.jpg\t1\t27\t8\t27\t0.1
M\tM\tother.jpg\t1\t13\t12\t-13\t0.1
P\tmars.jpg\t4\t11\t150\t687\t0.2
";

    #[test]
    fn visits_star_then_planets_with_their_moons() {
        let system = description::parse(SCENE).unwrap().system;
        let mesh = "sphere";
        let ids: Vec<BodyId> = traverse(&system, &mesh).iter().map(|draw| draw.id).collect();

        assert_eq!(
            ids,
            [
                BodyId::Star,
                BodyId::Planet(0),
                BodyId::Moon { planet: 0, moon: 0 },
                BodyId::Moon { planet: 0, moon: 1 },
                BodyId::Planet(1),
            ]
        );

        let draws = traverse(&system, &mesh);
        assert!(matches!(draws[0].role, Role::Star));
        assert!(matches!(draws[1].role, Role::Planet(_)));
        assert!(matches!(draws[3].role, Role::Moon { planet: 0, .. }));
    }

    #[test]
    fn every_body_shares_the_mesh() {
        let system = description::parse(SCENE).unwrap().system;
        let mesh = vec![0.0_f32; 9];
        for draw in traverse(&system, &mesh) {
            assert!(std::ptr::eq(draw.mesh, &mesh));
        }
    }

    #[test]
    fn frame_reports_current_models() {
        let mut system = description::parse(SCENE).unwrap().system;
        let mesh = ();
        let models: Vec<(BodyId, Mat4)> = frame(&mut system, 77.5, &mesh)
            .into_iter()
            .map(|draw| (draw.id, draw.model))
            .collect();

        for (id, model) in models {
            assert_eq!(model, system.body(id).unwrap().transform().model);
        }
        let textures: Vec<&str> = traverse(&system, &mesh)
            .iter()
            .map(|draw| draw.texture.as_str())
            .collect();
        assert_eq!(
            textures,
            ["sun.jpg", "earth.jpg", "moon.jpg", "other.jpg", "mars.jpg"]
        );
    }

    #[test]
    fn frame_is_repeatable() {
        let mut system = description::parse(SCENE).unwrap().system;
        let first: Vec<Mat4> = frame(&mut system, 12.0, &())
            .iter()
            .map(|draw| draw.model)
            .collect();
        frame(&mut system, 500.0, &());
        let again: Vec<Mat4> = frame(&mut system, 12.0, &())
            .iter()
            .map(|draw| draw.model)
            .collect();
        assert_eq!(first, again);
    }
}
