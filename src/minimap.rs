use crate::consts::{
    EXIT_CELL, MINIMAP_CELL_SIZE, MINIMAP_DIRECTION_LENGTH, MINIMAP_EMPTY_COLOR,
    MINIMAP_EXIT_COLOR, MINIMAP_ORIGIN, MINIMAP_PLAYER_COLOR, MINIMAP_PLAYER_DOT_RADIUS,
    MINIMAP_WALL_COLOR,
};
use crate::gamestate::GameSession;
use crate::projector::Color;
use crate::renderer::Surface;

fn tile_color(code: i32) -> Color {
    let (r, g, b) = match code {
        0 => MINIMAP_EMPTY_COLOR,
        EXIT_CELL => MINIMAP_EXIT_COLOR,
        _ => MINIMAP_WALL_COLOR,
    };
    Color::new(r, g, b)
}

/// Overhead map in the top-left corner: one square per cell, the player as
/// a dot with a short line showing where they face.
pub fn render_minimap(session: &GameSession, surface: &mut impl Surface) {
    let map = session.map();
    let tam = MINIMAP_CELL_SIZE;
    let (ox, oy) = MINIMAP_ORIGIN;

    for (i, &code) in map.cells().iter().enumerate() {
        let x = (i % map.width()) as i32;
        let y = (i / map.width()) as i32;
        surface.fill_rect(ox + x * tam, oy + y * tam, tam, tam, tile_color(code), 255);
    }

    let (r, g, b) = MINIMAP_PLAYER_COLOR;
    let red = Color::new(r, g, b);
    let pos = session.pose.position;
    let tip = pos + session.pose.direction * MINIMAP_DIRECTION_LENGTH;
    let px = ox + (pos.x * tam as f32) as i32;
    let py = oy + (pos.y * tam as f32) as i32;

    surface.fill_circle(px, py, MINIMAP_PLAYER_DOT_RADIUS, red);
    surface.draw_line(
        px,
        py,
        ox + (tip.x * tam as f32) as i32,
        oy + (tip.y * tam as f32) as i32,
        red,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::GridMap;
    use crate::player::Settings;
    use crate::renderer::tests::{Command, Recorder};
    use std::sync::Arc;

    #[test]
    fn one_square_per_cell_then_player_marker() {
        let map = GridMap::from_cells("tiny", 3, 2, vec![1, 0, 9, 1, 1, 1]).unwrap();
        let session = GameSession::start(0, Arc::new(map), &Settings::default());
        let mut surface = Recorder::new(200, 200);
        render_minimap(&session, &mut surface);

        assert_eq!(
            surface.commands[1],
            Command::Rect { x: 20, y: 10, w: 10, h: 10, alpha: 255 }
        );
        assert_eq!(
            surface.commands[5],
            Command::Rect { x: 30, y: 20, w: 10, h: 10, alpha: 255 }
        );
        // spawn (1.5, 1.5) lands at pixel (25, 25); the dot's middle row is widest
        assert!(surface.commands[6..].contains(&Command::Rect { x: 22, y: 25, w: 7, h: 1, alpha: 255 }));
    }

    #[test]
    fn tile_colors_follow_cell_codes() {
        assert_eq!(tile_color(0), Color::new(25, 25, 30));
        assert_eq!(tile_color(9), Color::new(240, 240, 120));
        assert_eq!(tile_color(3), Color::new(120, 120, 120));
    }
}
