//! Game state stack
//!
//! Only the top state ticks. Pausing pushes over the running session, so the
//! session keeps its state and still draws underneath the pause overlay.

use crate::assets::{sounds, sprites};
use crate::config::GameConfig;
use crate::constants;
use crate::session::{PlaySession, SessionStatus};
use starfire_engine::foundation::time::GameTime;
use starfire_engine::host::{DrawSink, InputSnapshot, SoundSink, SpriteDraw};

/// Screens the game moves between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Title screen waiting for confirm
    Menu,
    /// A session is running
    Playing,
    /// The session is frozen
    Paused,
    /// The player ran out of lives
    GameOver,
}

/// Stack of game states plus the session they share
pub struct StateStack {
    config: GameConfig,
    stack: Vec<GameState>,
    session: Option<PlaySession>,
    final_score: Option<u32>,
}

impl StateStack {
    /// Start at the menu
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            stack: vec![GameState::Menu],
            session: None,
            final_score: None,
        }
    }

    /// Start at the menu using the process-wide game constants
    ///
    /// # Panics
    /// Panics when the constants have not been loaded yet.
    pub fn from_constants() -> Self {
        Self::new(constants::constants().clone())
    }

    /// State on top of the stack
    pub fn current(&self) -> GameState {
        self.stack.last().copied().unwrap_or(GameState::Menu)
    }

    /// Number of stacked states
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The running or frozen session, if any
    pub fn session(&self) -> Option<&PlaySession> {
        self.session.as_ref()
    }

    /// Score of the last finished session
    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    /// Tick the top state and apply any transition it asks for
    pub fn tick(
        &mut self,
        input: &InputSnapshot,
        time: &GameTime,
        sound: &mut dyn SoundSink,
    ) -> GameState {
        match self.current() {
            GameState::Menu => {
                if input.confirm {
                    sound.play(sounds::CONFIRM);
                    self.final_score = None;
                    self.session = Some(PlaySession::new(&self.config));
                    self.push(GameState::Playing);
                }
            }
            GameState::Playing => {
                if input.pause {
                    self.push(GameState::Paused);
                } else if let Some(session) = self.session.as_mut() {
                    if session.tick(input, time, sound) == SessionStatus::PlayerDead {
                        self.final_score = Some(session.score());
                        log::info!("Game over with score {}", session.score());
                        self.replace(GameState::GameOver);
                    }
                } else {
                    log::warn!("Playing state without a session, returning to menu");
                    self.reset();
                }
            }
            GameState::Paused => {
                if input.pause {
                    self.pop();
                }
            }
            GameState::GameOver => {
                if input.confirm {
                    sound.play(sounds::CONFIRM);
                    self.reset();
                }
            }
        }
        self.current()
    }

    /// Draw the top state; paused and game-over screens show the session underneath
    pub fn draw(&self, sink: &mut dyn DrawSink) {
        let center = self.config.viewport().center();
        match self.current() {
            GameState::Menu => sink.draw_sprite(SpriteDraw::new(sprites::TITLE, center)),
            GameState::Playing => self.draw_session(sink),
            GameState::Paused => {
                self.draw_session(sink);
                sink.draw_sprite(SpriteDraw::new(sprites::PAUSED, center));
            }
            GameState::GameOver => {
                self.draw_session(sink);
                sink.draw_sprite(SpriteDraw::new(sprites::GAME_OVER, center));
            }
        }
    }

    fn draw_session(&self, sink: &mut dyn DrawSink) {
        if let Some(session) = &self.session {
            session.draw(sink);
        }
    }

    fn push(&mut self, state: GameState) {
        log::info!("State {:?} -> {:?}", self.current(), state);
        self.stack.push(state);
    }

    fn pop(&mut self) {
        if self.stack.len() > 1 {
            let left = self.stack.pop();
            log::info!("State {:?} -> {:?}", left, self.current());
        }
    }

    fn replace(&mut self, state: GameState) {
        log::info!("State {:?} -> {:?}", self.current(), state);
        self.stack.pop();
        self.stack.push(state);
    }

    fn reset(&mut self) {
        log::info!("State {:?} -> {:?}", self.current(), GameState::Menu);
        self.stack.clear();
        self.stack.push(GameState::Menu);
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfire_engine::foundation::math::Vec2;
    use starfire_engine::host::SilentSound;

    fn frame() -> GameTime {
        GameTime::from_delta(1.0 / 60.0)
    }

    fn press_confirm() -> InputSnapshot {
        InputSnapshot {
            confirm: true,
            ..Default::default()
        }
    }

    fn press_pause() -> InputSnapshot {
        InputSnapshot {
            pause: true,
            ..Default::default()
        }
    }

    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.enemies.first_wave_delay = 1000.0;
        config
    }

    #[test]
    fn test_menu_confirm_starts_play() {
        let mut states = StateStack::new(quiet_config());
        let idle = states.tick(&InputSnapshot::default(), &frame(), &mut SilentSound);
        assert_eq!(idle, GameState::Menu);
        let confirmed = states.tick(&press_confirm(), &frame(), &mut SilentSound);
        assert_eq!(confirmed, GameState::Playing);
        assert!(states.session().is_some());
        assert_eq!(states.depth(), 2);
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let mut states = StateStack::new(quiet_config());
        states.tick(&press_confirm(), &frame(), &mut SilentSound);

        let right = InputSnapshot {
            move_x: 1.0,
            ..Default::default()
        };
        states.tick(&right, &frame(), &mut SilentSound);
        let before = states.session().and_then(PlaySession::player_position);

        assert_eq!(states.tick(&press_pause(), &frame(), &mut SilentSound), GameState::Paused);
        states.tick(&right, &frame(), &mut SilentSound);
        assert_eq!(states.session().and_then(PlaySession::player_position), before);

        assert_eq!(states.tick(&press_pause(), &frame(), &mut SilentSound), GameState::Playing);
        assert_eq!(states.depth(), 2);
    }

    #[test]
    fn test_paused_draws_session_and_overlay() {
        let mut states = StateStack::new(quiet_config());
        states.tick(&press_confirm(), &frame(), &mut SilentSound);
        states.tick(&press_pause(), &frame(), &mut SilentSound);

        let mut draws: Vec<SpriteDraw> = Vec::new();
        states.draw(&mut draws);
        let names: Vec<_> = draws.iter().map(|draw| draw.sprite).collect();
        assert_eq!(names, vec![sprites::PLAYER, sprites::PAUSED]);
    }

    #[test]
    fn test_dead_player_leads_to_game_over_then_menu() {
        let mut config = quiet_config();
        config.gameplay.starting_lives = 1;
        config.gameplay.player_health = 1;
        let mut states = StateStack::new(config);
        states.tick(&press_confirm(), &frame(), &mut SilentSound);

        let mut session = states.session.take().unwrap();
        let beside = session.player_position().unwrap() + Vec2::new(5.0, 0.0);
        session.spawn_enemy(crate::actors::EnemyKind::Drone, beside);
        states.session = Some(session);

        let state = states.tick(&InputSnapshot::default(), &frame(), &mut SilentSound);
        assert_eq!(state, GameState::GameOver);
        assert_eq!(states.depth(), 2);
        assert_eq!(states.final_score(), Some(0));

        assert_eq!(states.tick(&press_confirm(), &frame(), &mut SilentSound), GameState::Menu);
        assert_eq!(states.depth(), 1);
        assert!(states.session().is_none());
    }

    #[test]
    fn test_menu_draws_title() {
        let states = StateStack::new(quiet_config());
        let mut draws: Vec<SpriteDraw> = Vec::new();
        states.draw(&mut draws);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].sprite, sprites::TITLE);
    }
}
