//! Reading scene descriptions from disk and resolving their textures.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::asset::RenderAssetUsages;
use bevy::image::{CompressedImageFormats, Image, ImageSampler, ImageType};

use crate::description::{self, SceneDescription};
use crate::error::{SceneError, SceneResult};

/// Turns a texture name from a scene description into a renderer handle.
pub trait TextureResolver {
    type Handle;
    type Error;

    fn load_texture(&mut self, name: &str) -> Result<Self::Handle, Self::Error>;
}

pub fn load_scene(path: impl AsRef<Path>) -> SceneResult<SceneDescription<String>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(SceneError::FileNotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let description = description::parse(&text)?;
    bevy::log::debug!(
        path = %path.display(),
        planets = description.system.planet_count(),
        moons = description.system.moon_count(),
        "parsed scene description"
    );
    Ok(description)
}

pub fn resolve_textures<R: TextureResolver>(
    description: SceneDescription<String>,
    resolver: &mut R,
) -> Result<SceneDescription<R::Handle>, R::Error> {
    description.try_map_textures(|name| resolver.load_texture(&name))
}

/// Checks that textures under an asset directory exist and decode, yielding
/// the asset-relative path to hand to the asset server.
#[derive(Debug, Clone)]
pub struct FileTextures {
    root: PathBuf,
}

impl FileTextures {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TextureResolver for FileTextures {
    type Handle = String;
    type Error = SceneError;

    fn load_texture(&mut self, name: &str) -> SceneResult<String> {
        let failed = |reason: String| SceneError::ResourceLoad {
            name: name.to_owned(),
            reason,
        };

        let path = self.root.join(name);
        if !path.is_file() {
            return Err(failed(format!("no texture file at {}", path.display())));
        }
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .ok_or_else(|| failed("texture name has no file extension".to_owned()))?;
        let bytes = fs::read(&path)
            .map_err(|error| failed(format!("cannot read {}: {error}", path.display())))?;

        let image = Image::from_buffer(
            &bytes,
            ImageType::Extension(extension),
            CompressedImageFormats::NONE,
            true,
            ImageSampler::Default,
            RenderAssetUsages::default(),
        )
        .map_err(|error| failed(error.to_string()))?;

        bevy::log::debug!(
            texture = name,
            width = image.width(),
            height = image.height(),
            "decoded texture"
        );
        Ok(name.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = "0\t40\t120
255\t255\t255\t0.2\t0.8\t0.5\t0
sun.png\t50\t20
P\tearth.png\t5\t10\t100\t365\t0.5
";

    /// A single transparent pixel.
    const PIXEL_PNG: &[u8] = &[
        0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
        0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x64,
        0x60, 0xf8, 0x5f, 0x0f, 0x00, 0x02, 0x87, 0x01, 0x80, 0xeb, 0x47, 0xba, 0x92, 0x00, 0x00,
        0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
    ];

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "solar-system-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = fixture_dir("missing");
        let path = dir.join("absent.sol");
        match load_scene(&path) {
            Err(SceneError::FileNotFound(reported)) => assert_eq!(reported, path),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn directory_is_not_a_scene() {
        let dir = fixture_dir("directory");
        assert!(matches!(load_scene(&dir), Err(SceneError::FileNotFound(_))));
    }

    #[test]
    fn loads_and_resolves_textures() {
        let dir = fixture_dir("resolve");
        let path = dir.join("scene.sol");
        fs::write(&path, SCENE).unwrap();
        fs::write(dir.join("sun.png"), PIXEL_PNG).unwrap();
        fs::write(dir.join("earth.png"), PIXEL_PNG).unwrap();

        let description = load_scene(&path).unwrap();
        let resolved = resolve_textures(description, &mut FileTextures::new(&dir)).unwrap();
        assert_eq!(resolved.system.planets()[0].planet().texture(), "earth.png");
    }

    #[test]
    fn missing_texture_fails_the_load() {
        let dir = fixture_dir("texture");
        let path = dir.join("scene.sol");
        fs::write(&path, SCENE).unwrap();
        fs::write(dir.join("sun.png"), PIXEL_PNG).unwrap();
        let _ = fs::remove_file(dir.join("earth.png"));

        let description = load_scene(&path).unwrap();
        match resolve_textures(description, &mut FileTextures::new(&dir)) {
            Err(SceneError::ResourceLoad { name, .. }) => assert_eq!(name, "earth.png"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn corrupt_texture_fails_the_load() {
        let dir = fixture_dir("corrupt");
        fs::write(dir.join("empty.jpg"), b"").unwrap();
        fs::write(dir.join("garbage.jpg"), b"not a jpeg at all").unwrap();
        fs::write(dir.join("truncated.png"), &PIXEL_PNG[..20]).unwrap();
        fs::write(dir.join("noextension"), PIXEL_PNG).unwrap();

        let mut textures = FileTextures::new(&dir);
        for name in ["empty.jpg", "garbage.jpg", "truncated.png", "noextension"] {
            match textures.load_texture(name) {
                Err(SceneError::ResourceLoad { name: reported, .. }) => assert_eq!(reported, name),
                other => panic!("unexpected result for {name}: {other:?}"),
            }
        }
    }

    #[test]
    fn resolver_sees_every_body_in_order() {
        struct Recording(Vec<String>);

        impl TextureResolver for Recording {
            type Handle = usize;
            type Error = SceneError;

            fn load_texture(&mut self, name: &str) -> SceneResult<usize> {
                self.0.push(name.to_owned());
                Ok(self.0.len() - 1)
            }
        }

        let text = format!("{SCENE}M\tM\tmoon.png\t1\t27\t8\t27\t0.1\n");
        let description = description::parse(&text).unwrap();
        let mut recording = Recording(Vec::new());
        let resolved = resolve_textures(description, &mut recording).unwrap();

        assert_eq!(recording.0, ["sun.png", "earth.png", "moon.png"]);
        assert_eq!(*resolved.system.planets()[0].moons()[0].texture(), 2);
    }
}
