use glam::Vec2;

use crate::Input;
use crate::collision::{MoveResult, resolve_move};
use crate::consts::{
    FOV, MOUSE_SENSITIVITY, MOVE_SPEED, ROT_SPEED, SPAWN_DIRECTION, SPAWN_POSITION,
    STICK_DEAD_ZONE, STICK_TURN_MULTIPLIER,
};
use crate::map::GridMap;

/// Movement and turning rates. Built from `consts` and overridden by the
/// user's config file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub move_speed: f32,
    pub rot_speed: f32,
    pub mouse_sensitivity: f32,
    pub fov: f32,
    pub dead_zone: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            move_speed: MOVE_SPEED,
            rot_speed: ROT_SPEED,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            fov: FOV,
            dead_zone: STICK_DEAD_ZONE,
        }
    }
}

/// Player position plus the view direction and camera plane. The plane's
/// length sets the horizontal field of view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec2,
    pub direction: Vec2,
    pub plane: Vec2,
}

impl Pose {
    pub fn spawn(fov: f32) -> Self {
        Pose {
            position: SPAWN_POSITION,
            direction: SPAWN_DIRECTION,
            plane: Vec2::new(0.0, fov),
        }
    }

    /// Rotates direction and plane together by `angle` radians.
    pub fn rotated(self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Pose {
            position: self.position,
            direction: rotate(self.direction, sin, cos),
            plane: rotate(self.plane, sin, cos),
        }
    }

    pub fn cell(&self) -> (i32, i32) {
        (
            self.position.x.floor() as i32,
            self.position.y.floor() as i32,
        )
    }

    /// Ray through the screen column at `camera_x` in `[-1, 1)`.
    pub fn ray_direction(&self, camera_x: f32) -> Vec2 {
        self.direction + self.plane * camera_x
    }

    /// Applies every turning source in the snapshot: mouse, arrow keys and
    /// the right stick.
    pub fn steer(self, input: &Input, settings: &Settings, dt: f32) -> Self {
        let mut pose = self;
        if input.mouse_dx != 0.0 {
            pose = pose.rotated(-input.mouse_dx * settings.mouse_sensitivity);
        }
        if input.turn_right {
            pose = pose.rotated(-settings.rot_speed * dt);
        }
        if input.turn_left {
            pose = pose.rotated(settings.rot_speed * dt);
        }
        if let Some(stick) = &input.stick {
            let rx = dead_zone(stick.right_x, settings.dead_zone);
            if rx != 0.0 {
                pose = pose.rotated(-rx * settings.rot_speed * dt * STICK_TURN_MULTIPLIER);
            }
        }
        pose
    }

    /// Sums all translation sources into one displacement for this frame.
    pub fn displacement(&self, input: &Input, settings: &Settings, dt: f32) -> Vec2 {
        let step = settings.move_speed * dt;
        let dir = self.direction;
        // (dir.y, -dir.x) points to the right on screen, y grows downward
        let right = Vec2::new(dir.y, -dir.x);
        let mut d = Vec2::ZERO;

        if input.forth {
            d += dir * step;
        }
        if input.back {
            d -= dir * step;
        }
        if input.strafe_left {
            d -= right * step;
        }
        if input.strafe_right {
            d += right * step;
        }

        if let Some(stick) = &input.stick {
            let ly = dead_zone(stick.left_y, settings.dead_zone);
            let lx = dead_zone(stick.left_x, settings.dead_zone);
            d += dir * ly * step;
            d += right * lx * step;
        }

        d
    }

    /// One frame of player control: turn, then move with collision.
    pub fn take_input(
        &mut self,
        input: &Input,
        settings: &Settings,
        dt: f32,
        map: &GridMap,
    ) -> MoveResult {
        *self = self.steer(input, settings, dt);
        let d = self.displacement(input, settings, dt);
        let result = resolve_move(self.position, d, map);
        self.position = result.position;
        result
    }
}

fn rotate(v: Vec2, sin: f32, cos: f32) -> Vec2 {
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

fn dead_zone(value: f32, threshold: f32) -> f32 {
    if value.abs() > threshold { value } else { 0.0 }
}
