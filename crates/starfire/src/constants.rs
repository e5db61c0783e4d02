//! Process-wide game constants
//!
//! The binary loads the configuration once at startup and every later reader
//! goes through [`constants`]. Reading before loading is a startup-order bug
//! and panics instead of silently running on defaults.

use crate::config::GameConfig;
use crate::{GameError, GameResult};
use starfire_engine::config::Config;
use std::path::Path;
use std::sync::OnceLock;

/// Write-once holder for a [`GameConfig`]
#[derive(Debug, Default)]
pub struct ConstantTable {
    cell: OnceLock<GameConfig>,
}

impl ConstantTable {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Validate and store `config`
    pub fn install(&self, config: GameConfig) -> GameResult<&GameConfig> {
        config.validate()?;
        self.cell
            .set(config)
            .map_err(|_| GameError::ConstantsAlreadyLoaded)?;
        log::info!("Game constants loaded");
        Ok(self.get())
    }

    /// Load `path` (or defaults when it does not exist) and store it
    pub fn load(&self, path: impl AsRef<Path>) -> GameResult<&GameConfig> {
        let config = GameConfig::load_or_default(path)?;
        self.install(config)
    }

    /// Store the default configuration
    pub fn install_default(&self) -> GameResult<&GameConfig> {
        self.install(GameConfig::default())
    }

    /// Whether a configuration has been stored
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// The stored configuration
    ///
    /// # Panics
    /// Panics when nothing has been loaded yet.
    pub fn get(&self) -> &GameConfig {
        match self.cell.get() {
            Some(config) => config,
            None => panic!("game constants read before they were loaded"),
        }
    }
}

static CONSTANTS: ConstantTable = ConstantTable::new();

/// The process-wide constants table
pub fn table() -> &'static ConstantTable {
    &CONSTANTS
}

/// The process-wide game constants
///
/// # Panics
/// Panics when called before [`ConstantTable::load`] or
/// [`ConstantTable::install`] on [`table`].
pub fn constants() -> &'static GameConfig {
    CONSTANTS.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "read before they were loaded")]
    fn test_read_before_load_panics() {
        let table = ConstantTable::new();
        let _ = table.get();
    }

    #[test]
    fn test_install_once() {
        let table = ConstantTable::new();
        assert!(!table.is_loaded());
        let config = table.install_default().unwrap();
        assert_eq!(config.gameplay.starting_lives, 3);
        assert!(table.is_loaded());

        assert!(matches!(
            table.install_default(),
            Err(GameError::ConstantsAlreadyLoaded)
        ));
    }

    #[test]
    fn test_install_rejects_invalid_config() {
        let table = ConstantTable::new();
        let mut config = GameConfig::default();
        config.gameplay.starting_lives = 0;
        assert!(matches!(table.install(config), Err(GameError::Config(_))));
        assert!(!table.is_loaded());
    }

    #[test]
    fn test_state_stack_reads_process_wide_table() {
        // Only this test touches the global table.
        if !table().is_loaded() {
            table().install_default().unwrap();
        }
        assert_eq!(*constants(), GameConfig::default());

        let states = crate::StateStack::from_constants();
        assert_eq!(states.current(), crate::GameState::Menu);
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let table = ConstantTable::new();
        let config = table.load("does/not/exist/starfire.toml").unwrap();
        assert_eq!(*config, GameConfig::default());
    }
}
