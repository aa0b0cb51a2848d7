pub mod audio;
pub mod collision;
pub mod config;
pub mod consts;
pub mod error;
pub mod flags;
pub mod framebuffer;
pub mod gamepad;
pub mod gamestate;
pub mod levels;
pub mod map;
pub mod maze_gen;
pub mod minimap;
pub mod player;
pub mod projector;
pub mod raycast;
pub mod renderer;
pub mod text;
pub mod textures;
pub mod torch;

pub use error::{FlagError, MapError};
pub use gamestate::{GameEvent, GameHooks, GameSession, GameState, GameStateMachine, StateKind};
pub use map::{GridMap, LevelSet};
pub use player::{Pose, Settings};

/// Analog stick readings, each in `[-1, 1]`. `left_y` is positive when the
/// stick is pushed forward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StickAxes {
    pub left_x: f32,
    pub left_y: f32,
    pub right_x: f32,
}

/// Everything the game reads from the host in one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Input {
    pub forth: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Horizontal mouse travel since the last frame, in pixels.
    pub mouse_dx: f32,
    /// Pressed this frame (Enter or gamepad Start).
    pub confirm: bool,
    /// 1-based level id picked this frame.
    pub select_level: Option<usize>,
    /// `None` when no controller is connected.
    pub stick: Option<StickAxes>,
}
