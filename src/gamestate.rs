use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::Input;
use crate::consts::{MESSAGE_DURATION, STEP_INTERVAL, STEP_TIMER_IDLE};
use crate::map::{GridMap, LevelSet};
use crate::player::{Pose, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Menu,
    Playing,
    Won,
}

/// Side effects the host reacts to (sounds, effects). Levels are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started { level: usize },
    Footstep,
    LevelAdvanced { level: usize },
    Won,
    ReturnedToMenu,
}

pub trait GameHooks {
    fn on_event(&mut self, event: &GameEvent);
}

impl GameHooks for Vec<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

impl GameHooks for () {
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Short on-screen notice with a countdown in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub remaining: f32,
}

/// State of one run through the levels. Dropped when leaving `Playing`.
#[derive(Debug, Clone)]
pub struct GameSession {
    level: usize,
    map: Arc<GridMap>,
    pub pose: Pose,
    step_timer: f32,
    message: Option<Message>,
}

impl GameSession {
    pub fn start(level: usize, map: Arc<GridMap>, settings: &Settings) -> Self {
        GameSession {
            level,
            map,
            pose: Pose::spawn(settings.fov),
            step_timer: STEP_TIMER_IDLE,
            message: None,
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    fn enter_level(&mut self, level: usize, map: Arc<GridMap>, settings: &Settings) {
        self.level = level;
        self.map = map;
        self.pose = Pose::spawn(settings.fov);
    }

    fn tick_message(&mut self, dt: f32) {
        if let Some(message) = &mut self.message {
            message.remaining -= dt;
            if message.remaining <= 0.0 {
                self.message = None;
            }
        }
    }

    fn tick_footsteps(&mut self, moved: bool, dt: f32, hooks: &mut dyn GameHooks) {
        if moved {
            self.step_timer += dt;
            if self.step_timer > STEP_INTERVAL {
                hooks.on_event(&GameEvent::Footstep);
                self.step_timer = 0.0;
            }
        } else {
            self.step_timer = STEP_TIMER_IDLE;
        }
    }
}

#[derive(Debug, Clone)]
pub enum GameState {
    Menu,
    Playing(GameSession),
    Won,
}

impl GameState {
    pub fn kind(&self) -> StateKind {
        match self {
            GameState::Menu => StateKind::Menu,
            GameState::Playing(_) => StateKind::Playing,
            GameState::Won => StateKind::Won,
        }
    }
}

/// What a state handler asks for at the end of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Stay,
    Start(usize),
    Win,
    ToMenu,
}

pub struct GameStateMachine {
    state: GameState,
    levels: LevelSet,
    selected: usize,
    settings: Settings,
}

impl GameStateMachine {
    pub fn new(levels: LevelSet, settings: Settings) -> Self {
        GameStateMachine {
            state: GameState::Menu,
            levels,
            selected: 0,
            settings,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    pub fn session(&self) -> Option<&GameSession> {
        match &self.state {
            GameState::Playing(session) => Some(session),
            _ => None,
        }
    }

    pub fn levels(&self) -> &LevelSet {
        &self.levels
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// 0-based index of the level the menu will start.
    pub fn selected_level(&self) -> usize {
        self.selected
    }

    /// Picks the menu level by 1-based id. Returns false for unknown ids.
    pub fn select_level(&mut self, id: usize) -> bool {
        match self.levels.index_of_id(id) {
            Ok(index) => {
                self.selected = index;
                true
            }
            Err(e) => {
                debug!("level selection ignored: {e}");
                false
            }
        }
    }

    /// Runs one frame of whichever state is active, then applies the
    /// transition it asked for.
    pub fn update(&mut self, input: &Input, dt: f32, hooks: &mut dyn GameHooks) {
        if matches!(self.state, GameState::Menu) {
            if let Some(id) = input.select_level {
                self.select_level(id);
            }
        }
        let transition = match &mut self.state {
            GameState::Menu => update_menu(self.selected, input),
            GameState::Playing(session) => {
                update_playing(session, &self.levels, &self.settings, input, dt, hooks)
            }
            GameState::Won => update_won(input),
        };
        self.apply(transition, hooks);
    }

    fn apply(&mut self, transition: Transition, hooks: &mut dyn GameHooks) {
        match (self.state.kind(), transition) {
            (_, Transition::Stay) => {}
            (StateKind::Menu, Transition::Start(level)) => {
                let Some(map) = self.levels.get(level) else {
                    warn!(level, "selected level does not exist");
                    return;
                };
                info!(level = level + 1, map = map.name(), "starting game");
                self.state =
                    GameState::Playing(GameSession::start(level, Arc::clone(map), &self.settings));
                hooks.on_event(&GameEvent::Started { level });
            }
            (StateKind::Playing, Transition::Win) => {
                info!("player reached the final exit");
                self.state = GameState::Won;
                hooks.on_event(&GameEvent::Won);
            }
            (StateKind::Won, Transition::ToMenu) => {
                debug!("returning to menu");
                self.state = GameState::Menu;
                hooks.on_event(&GameEvent::ReturnedToMenu);
            }
            (from, transition) => {
                warn!(?from, ?transition, "transition not allowed");
            }
        }
    }
}

fn update_menu(selected: usize, input: &Input) -> Transition {
    if input.confirm {
        Transition::Start(selected)
    } else {
        Transition::Stay
    }
}

fn update_playing(
    session: &mut GameSession,
    levels: &LevelSet,
    settings: &Settings,
    input: &Input,
    dt: f32,
    hooks: &mut dyn GameHooks,
) -> Transition {
    session.tick_message(dt);

    let map = Arc::clone(&session.map);
    let result = session.pose.take_input(input, settings, dt, &map);
    session.tick_footsteps(result.moved, dt, hooks);

    let (cx, cy) = session.pose.cell();
    if !session.map.is_exit(cx, cy) {
        return Transition::Stay;
    }

    match levels.next_after(session.level) {
        Some(next) => {
            let Some(next_map) = levels.get(next) else {
                return Transition::Win;
            };
            info!(
                level = next + 1,
                map = next_map.name(),
                "advancing to next level"
            );
            session.enter_level(next, Arc::clone(next_map), settings);
            session.message = Some(Message {
                text: format!("Level {}", next + 1),
                remaining: MESSAGE_DURATION,
            });
            hooks.on_event(&GameEvent::LevelAdvanced { level: next });
            Transition::Stay
        }
        None => Transition::Win,
    }
}

fn update_won(input: &Input) -> Transition {
    if input.confirm {
        Transition::ToMenu
    } else {
        Transition::Stay
    }
}
