use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{DeviceEvent, Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::KeyCode;
use winit::window::{CursorGrabMode, Window, WindowBuilder};
use winit_input_helper::WinitInputHelper;

use mazecaster::{
    GameEvent, GameHooks, GameStateMachine, Input, StateKind,
    audio::Audio,
    config::{Config, load_config, save_config},
    consts::{CONFIG_PATH, FONT_PATH, HEIGHT, TORCH_TEXTURE_PATH, WIDTH, WINDOW_TITLE},
    flags::{Flags, parse_flags},
    framebuffer::FrameBuffer,
    gamepad::{Gamepad, PadState},
    renderer::render,
    text::load_font,
    torch::Torch,
};

// Frame time cap; a stall must not carry the player through a wall
const MAX_FRAME_TIME: f32 = 0.1;

const LEVEL_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Fans game events out to whatever devices came up.
struct HostHooks {
    audio: Option<Audio>,
}

impl GameHooks for HostHooks {
    fn on_event(&mut self, event: &GameEvent) {
        if let Some(audio) = &mut self.audio {
            audio.on_event(event);
        }
    }
}

fn read_input(input: &WinitInputHelper, mouse_dx: f32, pad: PadState) -> Input {
    let keyboard_level = LEVEL_KEYS
        .iter()
        .position(|&key| input.key_pressed(key))
        .map(|i| i + 1);

    Input {
        forth: input.key_held(KeyCode::ArrowUp) || input.key_held(KeyCode::KeyW),
        back: input.key_held(KeyCode::ArrowDown) || input.key_held(KeyCode::KeyS),
        strafe_left: input.key_held(KeyCode::KeyA),
        strafe_right: input.key_held(KeyCode::KeyD),
        turn_left: input.key_held(KeyCode::ArrowLeft),
        turn_right: input.key_held(KeyCode::ArrowRight),
        mouse_dx,
        confirm: input.key_pressed(KeyCode::Enter) || pad.confirm,
        select_level: keyboard_level.or(pad.select_level),
        stick: pad.stick,
    }
}

fn persist(config: &mut Config, flags: &Flags, machine: &GameStateMachine) {
    if !flags.persists_selection() {
        return;
    }
    config.last_level = Some(machine.selected_level() + 1);
    if let Err(e) = save_config(config, CONFIG_PATH) {
        warn!("Error saving config: {e}");
    }
}

fn set_cursor_grabbed(window: &Window, grabbed: bool) {
    if grabbed {
        let size = window.inner_size();
        if let Err(e) =
            window.set_cursor_position(PhysicalPosition::new(size.width / 2, size.height / 2))
        {
            warn!("could not center cursor: {e}");
        }
        let grab = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_e| window.set_cursor_grab(CursorGrabMode::Locked));
        if let Err(e) = grab {
            warn!("could not grab cursor: {e}");
        }
    } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        warn!("could not release cursor: {e}");
    }
    window.set_cursor_visible(!grabbed);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let flags = parse_flags(std::env::args())?;
    let mut config = load_config(CONFIG_PATH);
    let levels = flags.load_levels()?;
    let mut machine = GameStateMachine::new(levels, config.settings());
    if let Some(id) = flags.initial_level(config.last_level) {
        machine.select_level(id);
    }

    let event_loop = EventLoop::new()?;
    let mut input = WinitInputHelper::new();
    let window = Arc::new({
        let size = LogicalSize::new(WIDTH as f64, HEIGHT as f64);
        WindowBuilder::new()
            .with_title(WINDOW_TITLE)
            .with_inner_size(size)
            .with_min_inner_size(size)
            .build(&event_loop)?
    });

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, Arc::clone(&window));
        Pixels::new(WIDTH as u32, HEIGHT as u32, surface_texture)?
    };

    let mut surface = FrameBuffer::new(
        WIDTH,
        HEIGHT,
        load_font(FONT_PATH),
        Torch::load(TORCH_TEXTURE_PATH),
    );
    let audio = match Audio::try_create(config.volumes()) {
        Ok(audio) => Some(audio),
        Err(e) => {
            warn!("audio disabled: {e}");
            None
        }
    };
    let mut hooks = HostHooks { audio };
    let mut gamepad = Gamepad::try_create();
    info!(levels = machine.levels().len(), "maze ready");

    let started = Instant::now();
    let mut last_frame_time = Instant::now();
    let mut frame_count = 0;
    let mut fps_timer = Instant::now();
    let mut mouse_dx = 0.0;
    let mut focused = false;
    let mut cursor_grabbed = false;
    let mut first_mouse_move = true; // auto-moving mouse to center is not input

    Ok(event_loop.run(move |event, elwt| {
        match &event {
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } => {
                if !first_mouse_move && cursor_grabbed && focused {
                    mouse_dx += delta.0 as f32;
                } else {
                    first_mouse_move = false;
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    persist(&mut config, &flags, &machine);
                    elwt.exit();
                    return;
                }
                WindowEvent::Focused(is_focused) => {
                    focused = *is_focused;
                    if focused && cursor_grabbed {
                        set_cursor_grabbed(&window, true);
                        first_mouse_move = true;
                    }
                }
                WindowEvent::Resized(size) => {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        error!("pixels.resize_surface() failed: {e}");
                        elwt.exit();
                        return;
                    }
                }
                WindowEvent::RedrawRequested => {
                    render(&machine, &mut surface, started.elapsed().as_secs_f32());
                    surface.draw_to_buffer(pixels.frame_mut());

                    frame_count += 1;
                    if fps_timer.elapsed() >= Duration::from_secs(1) {
                        window.set_title(&format!("{WINDOW_TITLE} - {frame_count} FPS"));
                        frame_count = 0;
                        fps_timer = Instant::now();
                    }

                    if let Err(e) = pixels.render() {
                        error!("pixels.render() failed: {e}");
                        elwt.exit();
                        return;
                    }
                }
                _ => (),
            },
            _ => (),
        }

        if input.update(&event) {
            if input.close_requested() || input.key_pressed(KeyCode::Escape) {
                persist(&mut config, &flags, &machine);
                elwt.exit();
                return;
            }

            let dt = last_frame_time.elapsed().as_secs_f32().min(MAX_FRAME_TIME);
            last_frame_time = Instant::now();

            let pad = gamepad.as_mut().map(Gamepad::poll).unwrap_or_default();
            let frame_input = read_input(&input, mouse_dx, pad);
            mouse_dx = 0.0;
            machine.update(&frame_input, dt, &mut hooks);

            let playing = machine.kind() == StateKind::Playing;
            if playing != cursor_grabbed {
                cursor_grabbed = playing;
                set_cursor_grabbed(&window, playing);
                first_mouse_move = true;
            }

            window.request_redraw();
        }
    })?)
}
