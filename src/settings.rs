use std::path::PathBuf;

use anyhow::ensure;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "solar-system")]
#[command(about = "Renders a planetary system from a tab-separated scene description")]
pub struct Settings {
    /// Scene description file
    pub scene: PathBuf,

    /// Directory textures are resolved against
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,

    #[arg(long, default_value = "Solar System")]
    pub title: String,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60.0)]
    pub fov: f32,

    #[arg(long, default_value_t = 0.1)]
    pub near: f32,

    #[arg(long, default_value_t = 1000.0)]
    pub far: f32,

    /// Scene seconds per wall-clock second
    #[arg(long, default_value_t = 1.0)]
    pub time_scale: f64,

    #[arg(long, default_value_t = 64)]
    pub sphere_sectors: u32,

    #[arg(long, default_value_t = 32)]
    pub sphere_stacks: u32,
}

impl Settings {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "window size must be positive, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            self.fov > 0.0 && self.fov < 180.0,
            "field of view must be between 0 and 180 degrees, got {}",
            self.fov
        );
        ensure!(
            self.near > 0.0 && self.near < self.far,
            "clip planes must satisfy 0 < near < far, got near {} and far {}",
            self.near,
            self.far
        );
        ensure!(
            self.time_scale.is_finite() && self.time_scale > 0.0,
            "time scale must be positive, got {}",
            self.time_scale
        );
        ensure!(
            self.sphere_sectors >= 3 && self.sphere_stacks >= 2,
            "sphere needs at least 3 sectors and 2 stacks"
        );
        Ok(())
    }
}
