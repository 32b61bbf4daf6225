use anyhow::Context;
use bevy::prelude::*;
use clap::Parser;

mod body;
mod clock;
mod controls;
mod description;
mod error;
mod lighting;
mod loader;
mod orbit;
mod settings;
mod transform;
mod traversal;
mod viewpoint;

fn main() -> anyhow::Result<()> {
    let settings = settings::Settings::parse();
    settings.validate()?;

    // Bevy resolves relative asset roots against the executable, not the
    // working directory.
    let assets = settings.assets.canonicalize().with_context(|| {
        format!(
            "asset directory {} is not accessible",
            settings.assets.display()
        )
    })?;

    let scene = loader::load_scene(&settings.scene)
        .with_context(|| format!("failed to load scene {}", settings.scene.display()))?;
    let scene = loader::resolve_textures(scene, &mut loader::FileTextures::new(&assets))
        .with_context(|| format!("failed to load textures for {}", settings.scene.display()))?;

    let viewpoint = viewpoint::Viewpoint {
        translation: scene.camera.position,
        fov_degrees: settings.fov,
        near: settings.near,
        far: settings.far,
    };
    let star_light = lighting::StarLight {
        light: scene.light,
        max_range: settings.far,
    };

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: settings.title.clone(),
                    resolution: (settings.width, settings.height).into(),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .set(AssetPlugin {
                file_path: assets.to_string_lossy().into_owned(),
                ..Default::default()
            }),
    )
    .add_plugins(controls::Plugin)
    .add_plugins(clock::Plugin {
        time_scale: settings.time_scale,
    })
    .add_plugins(viewpoint::Plugin { viewpoint })
    .add_plugins(lighting::Plugin { star_light })
    .add_plugins(orbit::Plugin {
        scene,
        sphere_sectors: settings.sphere_sectors,
        sphere_stacks: settings.sphere_stacks,
    });

    app.run();

    Ok(())
}
