use bevy::input::keyboard::KeyCode;
use bevy::prelude::*;

/// Key bindings for the running scene.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Controls {
    pub toggle_pause: KeyCode,
}

impl Controls {
    pub fn new() -> Self {
        Controls {
            toggle_pause: KeyCode::Space,
        }
    }

    pub fn pause_toggled(&self, keyboard_input: &ButtonInput<KeyCode>) -> bool {
        keyboard_input.just_pressed(self.toggle_pause)
    }
}

pub struct Plugin;

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Controls::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_toggles_pause_once_per_press() {
        let controls = Controls::new();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        assert!(!controls.pause_toggled(&keyboard));

        keyboard.press(KeyCode::Space);
        assert!(controls.pause_toggled(&keyboard));

        keyboard.clear();
        assert!(!controls.pause_toggled(&keyboard));
    }
}
