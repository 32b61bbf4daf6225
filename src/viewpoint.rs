use bevy::math::Vec3;
use bevy::prelude::*;

/// Where the scene is watched from. The camera always looks at the star.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Viewpoint {
    pub translation: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Viewpoint {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation).looking_at(Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self) -> Projection {
        Projection::Perspective(PerspectiveProjection {
            fov: self.fov_degrees.to_radians(),
            near: self.near,
            far: self.far,
            ..Default::default()
        })
    }
}

pub struct Plugin {
    pub viewpoint: Viewpoint,
}

impl Plugin {
    fn spawn_camera(mut commands: Commands, viewpoint: Res<Viewpoint>) {
        info!(translation = ?viewpoint.translation, fov = viewpoint.fov_degrees, "spawning camera");
        commands.spawn((
            Camera3d::default(),
            viewpoint.projection(),
            viewpoint.transform(),
        ));
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.viewpoint)
            .insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, Self::spawn_camera);
    }
}
