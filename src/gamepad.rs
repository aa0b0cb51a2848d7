use gilrs::{Axis, Button, EventType, Gilrs};
use tracing::{info, warn};

use crate::StickAxes;

/// What the controller contributed to this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PadState {
    pub stick: Option<StickAxes>,
    pub confirm: bool,
    pub select_level: Option<usize>,
}

/// Maps a pressed button to its menu action.
fn button_action(button: Button, state: &mut PadState) {
    match button {
        Button::South => state.select_level = Some(1),
        Button::East => state.select_level = Some(2),
        Button::Start => state.confirm = true,
        _ => {}
    }
}

/// First connected controller, polled once per frame.
pub struct Gamepad {
    gilrs: Gilrs,
}

impl Gamepad {
    pub fn try_create() -> Option<Self> {
        match Gilrs::new() {
            Ok(gilrs) => {
                for (_id, pad) in gilrs.gamepads() {
                    info!("gamepad connected: {}", pad.name());
                }
                Some(Gamepad { gilrs })
            }
            Err(e) => {
                warn!("gamepad support disabled: {e}");
                None
            }
        }
    }

    pub fn poll(&mut self) -> PadState {
        let mut state = PadState::default();
        while let Some(event) = self.gilrs.next_event() {
            match event.event {
                EventType::ButtonPressed(button, _) => button_action(button, &mut state),
                EventType::Connected => info!("gamepad connected"),
                EventType::Disconnected => info!("gamepad disconnected"),
                _ => {}
            }
        }

        state.stick = self.gilrs.gamepads().next().map(|(_id, pad)| StickAxes {
            left_x: pad.value(Axis::LeftStickX),
            left_y: pad.value(Axis::LeftStickY),
            right_x: pad.value(Axis::RightStickX),
        });
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_buttons_pick_levels_and_start_confirms() {
        let mut state = PadState::default();
        button_action(Button::East, &mut state);
        assert_eq!(state.select_level, Some(2));
        button_action(Button::South, &mut state);
        assert_eq!(state.select_level, Some(1));
        assert!(!state.confirm);
        button_action(Button::Start, &mut state);
        assert!(state.confirm);
    }

    #[test]
    fn other_buttons_do_nothing() {
        let mut state = PadState::default();
        button_action(Button::North, &mut state);
        assert_eq!(state, PadState::default());
    }
}
