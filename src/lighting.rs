use bevy::prelude::*;

use crate::description::Light;

/// Luminous power of the star at a diffuse coefficient of 1.
const STAR_LUMENS: f32 = 4.0e10;
/// Ambient brightness at an ambient coefficient of 1.
const AMBIENT_BRIGHTNESS: f32 = 1000.0;

#[derive(Resource, Debug, Clone, Copy)]
pub struct StarLight {
    pub light: Light,
    /// Upper bound on the light's reach, normally the far clip plane.
    pub max_range: f32,
}

impl StarLight {
    pub fn color(&self) -> Color {
        let [red, green, blue] = self.light.color;
        Color::srgb_u8(red, green, blue)
    }

    pub fn point_light(&self) -> PointLight {
        let range = if self.light.attenuation > 0.0 {
            (1.0 / self.light.attenuation).min(self.max_range)
        } else {
            self.max_range
        };

        PointLight {
            color: self.color(),
            intensity: self.light.diffuse * STAR_LUMENS,
            range,
            shadows_enabled: false,
            ..Default::default()
        }
    }

    pub fn ambient_light(&self) -> AmbientLight {
        AmbientLight {
            color: self.color(),
            brightness: self.light.ambient * AMBIENT_BRIGHTNESS,
            ..Default::default()
        }
    }
}

pub struct Plugin {
    pub star_light: StarLight,
}

impl Plugin {
    fn spawn_light(mut commands: Commands, star_light: Res<StarLight>) {
        info!(light = ?star_light.light, "lighting scene from the star");
        commands.spawn((star_light.point_light(), Transform::from_translation(Vec3::ZERO)));
        commands.insert_resource(star_light.ambient_light());
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.star_light)
            .add_systems(Startup, Self::spawn_light);
    }
}
