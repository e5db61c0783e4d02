//! Sprite and sound names shared with the host
//!
//! The host maps these names to textures and audio clips; the game only ever
//! refers to them by name.

/// Sprite sheet names
pub mod sprites {
    /// Player ship
    pub const PLAYER: &str = "player_ship";
    /// Small chasing enemy
    pub const DRONE: &str = "enemy_drone";
    /// Slow armored enemy
    pub const BRUTE: &str = "enemy_brute";
    /// Enemy that shoots back
    pub const GUNNER: &str = "enemy_gunner";
    /// Player projectile
    pub const PLAYER_LASER: &str = "player_laser";
    /// Enemy projectile
    pub const ENEMY_LASER: &str = "enemy_laser";
    /// Explosion sheet
    pub const EXPLOSION: &str = "explosion";
    /// Debris spark
    pub const SPARK: &str = "spark";
    /// Title screen banner
    pub const TITLE: &str = "title_banner";
    /// Pause overlay
    pub const PAUSED: &str = "paused_banner";
    /// Game over banner
    pub const GAME_OVER: &str = "game_over_banner";
}

/// Sound cue names
pub mod sounds {
    /// Player shot
    pub const LASER: &str = "laser";
    /// Enemy shot
    pub const ENEMY_LASER: &str = "enemy_laser";
    /// Enemy destroyed
    pub const EXPLOSION: &str = "explosion";
    /// Enemy hit but not destroyed
    pub const IMPACT: &str = "impact";
    /// Player lost health
    pub const PLAYER_HIT: &str = "player_hit";
    /// Player lost a life
    pub const PLAYER_DOWN: &str = "player_down";
    /// New wave incoming
    pub const WAVE: &str = "wave_start";
    /// Menu confirm
    pub const CONFIRM: &str = "menu_confirm";
}
