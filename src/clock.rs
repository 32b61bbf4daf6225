use bevy::input::keyboard::KeyCode;
use bevy::prelude::*;

use crate::controls;

/// Seconds since the scene started, the only input to body motion.
#[derive(Resource, Debug, Clone, Copy)]
pub struct SceneClock {
    elapsed: f64,
    time_scale: f64,
    paused: bool,
}

impl SceneClock {
    pub fn new(time_scale: f64) -> Self {
        Self {
            elapsed: 0.0,
            time_scale,
            paused: false,
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Never moves backwards; negative deltas are ignored.
    pub fn advance(&mut self, delta_secs: f64) {
        if !self.paused && delta_secs > 0.0 {
            self.elapsed += delta_secs * self.time_scale;
        }
    }
}

pub struct Plugin {
    pub time_scale: f64,
}

impl Plugin {
    fn tick_clock(time: Res<Time>, mut clock: ResMut<SceneClock>) {
        clock.advance(time.delta_secs_f64());
    }

    fn toggle_pause(
        controls: Res<controls::Controls>,
        keyboard_input: Res<ButtonInput<KeyCode>>,
        mut clock: ResMut<SceneClock>,
    ) {
        if controls.pause_toggled(&keyboard_input) {
            clock.toggle_pause();
            if clock.is_paused() {
                info!(elapsed = clock.elapsed(), "paused");
            } else {
                info!(elapsed = clock.elapsed(), "resumed");
            }
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SceneClock::new(self.time_scale))
            .add_systems(PreUpdate, Self::tick_clock)
            .add_systems(Update, Self::toggle_pause);
    }
}
