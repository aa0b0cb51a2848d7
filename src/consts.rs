use glam::{Vec2, const_vec2};

pub const WIDTH: usize = 1024;
pub const HEIGHT: usize = 640;
pub const WINDOW_TITLE: &str = "Maze Caster";
pub const FONT_PATH: &str = "assets/VT323-Regular.ttf";
pub const TORCH_TEXTURE_PATH: &str = "assets/torch.png";
pub const CONFIG_PATH: &str = "maze_config.toml";
pub const MAPS_DIR: &str = "maps";

pub const EXIT_CELL: i32 = 9;
pub const BOUNDARY_WALL_TYPE: i32 = 1;

pub const FOV: f32 = 0.66;
pub const MOVE_SPEED: f32 = 4.5;
pub const ROT_SPEED: f32 = 2.0;
pub const MOUSE_SENSITIVITY: f32 = 0.0028;
pub const MOUSE_SENSITIVITY_MIN: f32 = 0.0005;
pub const MOUSE_SENSITIVITY_MAX: f32 = 0.02;
pub const STICK_DEAD_ZONE: f32 = 0.2;
pub const STICK_TURN_MULTIPLIER: f32 = 3.0;

pub const SPAWN_POSITION: Vec2 = const_vec2!([1.5, 1.5]);
pub const SPAWN_DIRECTION: Vec2 = const_vec2!([1.0, 0.0]);

// Stand-in for an infinite per-cell delta when a ray component is zero
pub const DEGENERATE_RAY_DELTA: f32 = 1e30;
pub const MIN_PERP_DISTANCE: f32 = 0.0001;
pub const SHADE_FACTOR: f32 = 0.6;

pub const STEP_INTERVAL: f32 = 0.25;
pub const STEP_TIMER_IDLE: f32 = 0.2;
pub const MESSAGE_DURATION: f32 = 1.5;

pub const RANDOM_MAP_SIDE_MIN: usize = 5;
pub const RANDOM_MAP_SIDE_MAX: usize = 35;
pub const DEFAULT_RANDOM_MAP_SIDE: usize = 17;
pub const RANDOM_MAP_PATH_DEVIATION_CHANCE: u32 = 30;
pub const RANDOM_MAP_HOLE_CHANCE: u32 = 5;

pub const SKY_COLOR: (u8, u8, u8) = (60, 90, 150);
pub const FLOOR_COLOR: (u8, u8, u8) = (50, 40, 30);

pub const MINIMAP_CELL_SIZE: i32 = 10;
pub const MINIMAP_ORIGIN: (i32, i32) = (10, 10);
pub const MINIMAP_EMPTY_COLOR: (u8, u8, u8) = (25, 25, 30);
pub const MINIMAP_EXIT_COLOR: (u8, u8, u8) = (240, 240, 120);
pub const MINIMAP_WALL_COLOR: (u8, u8, u8) = (120, 120, 120);
pub const MINIMAP_PLAYER_COLOR: (u8, u8, u8) = (230, 41, 55);
pub const MINIMAP_PLAYER_DOT_RADIUS: i32 = 3;
pub const MINIMAP_DIRECTION_LENGTH: f32 = 0.8;

pub const TORCH_FRAMES: usize = 4;
pub const TORCH_FRAME_WIDTH: u32 = 32;
pub const TORCH_FRAME_HEIGHT: u32 = 48;
pub const TORCH_FPS: f32 = 8.0;

pub const MUSIC_VOLUME: f32 = 0.6;
pub const STEP_VOLUME: f32 = 0.85;
pub const WIN_VOLUME: f32 = 0.95;
pub const MUSIC_PATHS: [&str; 3] = ["assets/music.ogg", "assets/music.mp3", "assets/music.wav"];
pub const STEP_SOUND_PATH: &str = "assets/step.wav";
pub const WIN_SOUND_PATH: &str = "assets/win.wav";
