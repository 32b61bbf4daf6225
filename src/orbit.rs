use std::convert::Infallible;

use bevy::math::Mat4;
use bevy::prelude::*;

use crate::body::{BodyId, OrbitalSystem, Role};
use crate::clock::SceneClock;
use crate::description::{Light, SceneDescription};
use crate::loader::{self, TextureResolver};
use crate::traversal;

/// Marks the entity drawing a body.
#[derive(Component, Debug, Clone, Copy)]
pub struct Body(pub BodyId);

/// The running scene. `entities` is in traversal order.
#[derive(Resource)]
pub struct Scene {
    pub system: OrbitalSystem<Handle<Image>>,
    pub mesh: Handle<Mesh>,
    /// Uniform scale applied to the whole system before viewing.
    pub view: Mat4,
    entities: Vec<Entity>,
}

#[derive(Resource)]
struct PendingScene(SceneDescription<String>);

#[derive(Resource, Debug, Clone, Copy)]
struct SphereResolution {
    sectors: u32,
    stacks: u32,
}

/// Hands already validated asset paths to the asset server. Loading is
/// asynchronous, so resolving a handle never fails here.
struct AssetTextures<'a> {
    asset_server: &'a AssetServer,
}

impl TextureResolver for AssetTextures<'_> {
    type Handle = Handle<Image>;
    type Error = Infallible;

    fn load_texture(&mut self, name: &str) -> Result<Handle<Image>, Infallible> {
        Ok(self.asset_server.load(name.to_owned()))
    }
}

/// The star glows on its own; everything else is lit by it.
fn body_material(texture: Handle<Image>, role: Role, light: &Light) -> StandardMaterial {
    match role {
        Role::Star => StandardMaterial {
            base_color_texture: Some(texture),
            unlit: true,
            ..Default::default()
        },
        Role::Planet(orbit) | Role::Moon { orbit, .. } => {
            let shine = (light.specular * orbit.specular_shine()).clamp(0.0, 1.0);
            StandardMaterial {
                base_color_texture: Some(texture),
                reflectance: shine,
                perceptual_roughness: 1.0 - 0.9 * shine,
                ..Default::default()
            }
        }
    }
}

pub struct Plugin {
    pub scene: SceneDescription<String>,
    pub sphere_sectors: u32,
    pub sphere_stacks: u32,
}

impl Plugin {
    fn spawn_bodies(
        mut commands: Commands,
        asset_server: Res<AssetServer>,
        mut meshes: ResMut<Assets<Mesh>>,
        mut materials: ResMut<Assets<StandardMaterial>>,
        pending: Res<PendingScene>,
        sphere: Res<SphereResolution>,
    ) {
        let mut textures = AssetTextures {
            asset_server: &asset_server,
        };
        let description = match loader::resolve_textures(pending.0.clone(), &mut textures) {
            Ok(description) => description,
            Err(never) => match never {},
        };
        let light = description.light;
        let system = description.system;

        let mesh = meshes.add(Sphere::new(1.0).mesh().uv(sphere.sectors, sphere.stacks));
        let view = Mat4::from_scale(Vec3::splat(system.star().radius()));

        let mut entities = Vec::with_capacity(1 + system.planet_count() + system.moon_count());
        for draw in traversal::traverse(&system, &mesh) {
            let material = materials.add(body_material(draw.texture.clone(), draw.role, &light));
            let entity = commands
                .spawn((
                    Body(draw.id),
                    Mesh3d(draw.mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_matrix(view * draw.model),
                ))
                .id();
            entities.push(entity);
        }

        info!(
            planets = system.planet_count(),
            moons = system.moon_count(),
            "spawned planetary system"
        );

        commands.insert_resource(Scene {
            system,
            mesh,
            view,
            entities,
        });
        commands.remove_resource::<PendingScene>();
    }

    fn advance_bodies(
        clock: Res<SceneClock>,
        scene: ResMut<Scene>,
        mut query: Query<&mut Transform, With<Body>>,
    ) {
        let Scene {
            system,
            mesh,
            view,
            entities,
        } = scene.into_inner();

        for (draw, entity) in traversal::frame(system, clock.elapsed(), &*mesh)
            .iter()
            .zip(entities.iter())
        {
            if let Ok(mut transform) = query.get_mut(*entity) {
                *transform = Transform::from_matrix(*view * draw.model);
            }
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PendingScene(self.scene.clone()))
            .insert_resource(SphereResolution {
                sectors: self.sphere_sectors,
                stacks: self.sphere_stacks,
            })
            .add_systems(Startup, Self::spawn_bodies)
            .add_systems(Update, Self::advance_bodies.run_if(resource_exists::<Scene>));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Orbit;

    const LIGHT: Light = Light {
        color: [255, 255, 255],
        ambient: 0.1,
        diffuse: 1.0,
        specular: 0.5,
        attenuation: 0.0,
    };

    #[test]
    fn star_material_is_unlit() {
        let material = body_material(Handle::default(), Role::Star, &LIGHT);
        assert!(material.unlit);
        assert!(material.base_color_texture.is_some());
    }

    #[test]
    fn specular_shine_sets_reflectance() {
        let orbit = Orbit::new(10.0, 5.0, 0.8).unwrap();
        let material = body_material(Handle::default(), Role::Planet(orbit), &LIGHT);
        assert!(!material.unlit);
        assert_eq!(material.reflectance, 0.4);

        let dull = Orbit::new(10.0, 5.0, 0.0).unwrap();
        assert_eq!(
            body_material(Handle::default(), Role::Moon { orbit: dull, planet: 0 }, &LIGHT).reflectance,
            0.0
        );
    }
}
