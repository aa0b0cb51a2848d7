use crate::consts::{FLOOR_COLOR, SKY_COLOR};
use crate::gamestate::{GameSession, GameState, GameStateMachine};
use crate::minimap::render_minimap;
use crate::projector::{Color, project_view};
use crate::raycast::cast_view;

/// Host-owned animated decorations, drawn by name at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualEffect {
    Torch,
}

/// Drawing target. The game emits intents; the host owns pixels,
/// buffering and presentation.
pub trait Surface {
    fn size(&self) -> (usize, usize);

    /// Vertical line at column `x` covering rows `y0..=y1`, clipped.
    fn draw_vline(&mut self, x: i32, y0: i32, y1: i32, color: Color);

    /// Rectangle blended over the current contents with `alpha` (255 = opaque).
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color, alpha: u8);

    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: f32, color: Color);

    fn text_width(&self, text: &str, size: f32) -> i32;

    fn draw_effect(&mut self, effect: VisualEffect, x: i32, y: i32, time: f32);

    /// Bresenham line made of 1x1 rectangles.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x1 > x0 { 1 } else { -1 };
        let sy = if y1 > y0 { 1 } else { -1 };
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.fill_rect(x, y, 1, 1, color, 255);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = err * 2;
            if e2 > -dy {
                err -= dy;
                x += sx;
            }
            if e2 < dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        for dy in -radius..=radius {
            let half = ((radius * radius - dy * dy) as f32).sqrt() as i32;
            self.fill_rect(cx - half, cy + dy, half * 2 + 1, 1, color, 255);
        }
    }
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::new(r, g, b)
}

/// Draws whatever the active state shows.
pub fn render(machine: &GameStateMachine, surface: &mut impl Surface, time: f32) {
    match machine.state() {
        GameState::Menu => render_menu(machine, surface, time),
        GameState::Playing(session) => render_playing(session, surface, time),
        GameState::Won => render_won(surface, time),
    }
}

fn render_menu(machine: &GameStateMachine, surface: &mut impl Surface, time: f32) {
    let (w, h) = surface.size();
    surface.fill_rect(0, 0, w as i32, h as i32, Color::new(0, 0, 0), 255);

    let white = Color::new(245, 245, 245);
    let gray = Color::new(130, 130, 130);
    let light_gray = Color::new(200, 200, 200);
    let yellow = Color::new(253, 249, 0);
    let orange = Color::new(255, 161, 0);

    surface.draw_text("MAZE CASTER", 60, 70, 50.0, white);
    surface.draw_text("W/S or arrows: move   Mouse or <- ->: turn", 60, 140, 24.0, gray);
    surface.draw_text("A/D: strafe   Reach the yellow tile", 60, 170, 24.0, gray);

    let count = machine.levels().len();
    let prompt = if count > 1 {
        format!("Select level (1-{count})")
    } else {
        "Single level".to_string()
    };
    surface.draw_text(&prompt, 60, 230, 26.0, light_gray);

    let selected = machine.selected_level();
    let name = machine
        .levels()
        .get(selected)
        .map(|map| map.name().to_string())
        .unwrap_or_default();
    let highlight = if selected == 0 { yellow } else { orange };
    surface.draw_text(
        &format!("Current: {} ({name})", selected + 1),
        60,
        260,
        26.0,
        highlight,
    );

    surface.draw_text("ENTER to play", 60, 310, 28.0, yellow);
    surface.draw_effect(VisualEffect::Torch, 60, 360, time);
}

fn render_playing(session: &GameSession, surface: &mut impl Surface, time: f32) {
    let (w, h) = surface.size();
    let (wi, hi) = (w as i32, h as i32);

    surface.fill_rect(0, 0, wi, hi / 2, rgb(SKY_COLOR), 255);
    surface.fill_rect(0, hi / 2, wi, hi - hi / 2, rgb(FLOOR_COLOR), 255);

    let hits = cast_view(session.map(), &session.pose, w);
    for strip in project_view(&hits, h) {
        surface.draw_vline(strip.x, strip.top, strip.bottom, strip.color);
    }

    render_minimap(session, surface);
    surface.draw_effect(VisualEffect::Torch, wi - 80, 20, time);

    if let Some(message) = session.message() {
        let size = 48.0;
        let text_w = surface.text_width(&message.text, size);
        surface.fill_rect(
            wi / 2 - text_w / 2 - 12,
            20,
            text_w + 24,
            60,
            Color::new(0, 0, 0),
            140,
        );
        surface.draw_text(
            &message.text,
            wi / 2 - text_w / 2,
            28,
            size,
            Color::new(253, 249, 0),
        );
    }
}

fn render_won(surface: &mut impl Surface, time: f32) {
    let (w, h) = surface.size();
    surface.fill_rect(0, 0, w as i32, h as i32, Color::new(0, 0, 0), 255);
    surface.draw_text("YOU WIN!", 60, 80, 60.0, Color::new(253, 249, 0));
    surface.draw_text("ENTER: menu", 60, 160, 28.0, Color::new(245, 245, 245));
    surface.draw_effect(VisualEffect::Torch, 60, 210, time);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::gamestate::StateKind;
    use crate::map::{GridMap, LevelSet};
    use crate::player::Settings;
    use crate::projector::{shade, base_color};
    use crate::Input;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Command {
        VLine { x: i32, y0: i32, y1: i32, color: Color },
        Rect { x: i32, y: i32, w: i32, h: i32, alpha: u8 },
        Text(String),
        Effect { x: i32, y: i32 },
    }

    /// Records intents instead of drawing them.
    pub struct Recorder {
        pub size: (usize, usize),
        pub commands: Vec<Command>,
    }

    impl Recorder {
        pub fn new(w: usize, h: usize) -> Self {
            Recorder {
                size: (w, h),
                commands: Vec::new(),
            }
        }

        pub fn texts(&self) -> Vec<&str> {
            self.commands
                .iter()
                .filter_map(|c| match c {
                    Command::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }

        pub fn vlines(&self) -> Vec<&Command> {
            self.commands
                .iter()
                .filter(|c| matches!(c, Command::VLine { .. }))
                .collect()
        }
    }

    impl Surface for Recorder {
        fn size(&self) -> (usize, usize) {
            self.size
        }
        fn draw_vline(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
            self.commands.push(Command::VLine { x, y0, y1, color });
        }
        fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, _color: Color, alpha: u8) {
            self.commands.push(Command::Rect { x, y, w, h, alpha });
        }
        fn draw_text(&mut self, text: &str, _x: i32, _y: i32, _size: f32, _color: Color) {
            self.commands.push(Command::Text(text.to_string()));
        }
        fn text_width(&self, text: &str, size: f32) -> i32 {
            (text.len() as f32 * size * 0.5) as i32
        }
        fn draw_effect(&mut self, _effect: VisualEffect, x: i32, y: i32, _time: f32) {
            self.commands.push(Command::Effect { x, y });
        }
    }

    fn machine() -> GameStateMachine {
        let map = GridMap::from_cells("box", 3, 3, vec![
            2, 2, 2, //
            2, 0, 2, //
            2, 2, 2,
        ])
        .unwrap();
        GameStateMachine::new(LevelSet::single(map), Settings::default())
    }

    #[test]
    fn menu_shows_prompt_and_torch() {
        let mut surface = Recorder::new(320, 200);
        render(&machine(), &mut surface, 0.0);
        assert!(surface.texts().contains(&"ENTER to play"));
        assert!(surface.commands.contains(&Command::Effect { x: 60, y: 360 }));
        assert!(surface.vlines().is_empty());
    }

    #[test]
    fn playing_emits_one_strip_per_column() {
        let mut m = machine();
        m.update(
            &Input {
                confirm: true,
                ..Default::default()
            },
            0.016,
            &mut (),
        );
        assert_eq!(m.kind(), StateKind::Playing);

        let mut surface = Recorder::new(64, 48);
        render(&m, &mut surface, 0.0);
        let strips = surface.vlines();
        assert_eq!(strips.len(), 64);
        // facing +x from the middle of the box: the center column sees an x-side wall
        match strips[32] {
            Command::VLine { x, y0, y1, color } => {
                assert_eq!(*x, 32);
                assert_eq!(*color, base_color(2));
                assert_eq!((*y0, *y1), (24 - 48, 24 + 48));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn y_side_strips_are_shaded() {
        let mut m = machine();
        m.update(
            &Input {
                confirm: true,
                turn_left: true,
                ..Default::default()
            },
            0.016,
            &mut (),
        );
        // quarter turn toward +y
        m.update(
            &Input {
                mouse_dx: -std::f32::consts::FRAC_PI_2 / m.settings().mouse_sensitivity,
                ..Default::default()
            },
            0.016,
            &mut (),
        );
        let mut surface = Recorder::new(16, 48);
        render(&m, &mut surface, 0.0);
        match surface.vlines()[8] {
            Command::VLine { color, .. } => assert_eq!(*color, shade(base_color(2))),
            _ => unreachable!(),
        }
    }

    #[test]
    fn won_screen_offers_menu() {
        let mut surface = Recorder::new(320, 200);
        render_won(&mut surface, 1.0);
        assert_eq!(surface.texts(), vec!["YOU WIN!", "ENTER: menu"]);
    }

    #[test]
    fn bresenham_line_hits_both_endpoints() {
        let mut surface = Recorder::new(10, 10);
        surface.draw_line(1, 1, 5, 3, Color::new(255, 0, 0));
        let first = surface.commands.first().cloned();
        let last = surface.commands.last().cloned();
        assert_eq!(first, Some(Command::Rect { x: 1, y: 1, w: 1, h: 1, alpha: 255 }));
        assert_eq!(last, Some(Command::Rect { x: 5, y: 3, w: 1, h: 1, alpha: 255 }));
        assert_eq!(surface.commands.len(), 5);
    }
}
