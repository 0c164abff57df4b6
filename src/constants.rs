//! Default tuning values for the simulation.
//!
//! These seed [`crate::config::Tuning`]; any of them can be overridden from a
//! JSON tuning file at startup. Distances are pixels, times are seconds.

/// Largest frame delta the simulation will integrate.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Distance within which a body's bottom edge counts as resting on a
/// platform's top edge.
pub const CONTACT_EPSILON: f32 = 0.01;

/// Extra downward push applied when a rising body bumps a ceiling.
pub const BUMP_IMPULSE: f32 = 400_000.0;

/// Player walking speed.
pub const PLAYER_SPEED: f32 = 700.0;
/// Upward speed at jump take-off.
pub const PLAYER_JUMP_SPEED: f32 = 500.0;
/// Player gravity.
pub const PLAYER_GRAVITY: f32 = 5000.0;
/// Highest rise above the take-off point while jump is held.
pub const PLAYER_MAX_JUMP_HEIGHT: f32 = 120.0;
/// Player starting hit points.
pub const PLAYER_MAX_HP: u32 = 10;
/// Player body size `(width, height)`.
pub const PLAYER_SIZE: (f32, f32) = (50.0, 50.0);
/// How long one swing's hitbox stays live.
pub const ATTACK_DURATION: f32 = 0.2;
/// Time after a swing during which the next press advances the combo.
pub const COMBO_WINDOW: f32 = 0.6;
/// Lockout after the final combo stage.
pub const ATTACK_COOLDOWN: f32 = 0.8;
/// Damage dealt by one connecting swing.
pub const STRIKE_DAMAGE: u32 = 1;
/// Horizontal speed while the player is knocked back.
pub const PLAYER_KNOCKBACK_VELOCITY: f32 = 400.0;
/// How long player knockback lasts.
pub const PLAYER_KNOCKBACK_DURATION: f32 = 0.15;
/// Weapon hitbox width.
pub const WEAPON_REACH: f32 = 40.0;
/// Weapon hitbox height.
pub const WEAPON_HEIGHT: f32 = 20.0;
/// Time each walk animation frame is shown.
pub const WALK_FRAME_DURATION: f32 = 0.1;
/// Highest combo stage; a further press resets the combo.
pub const MAX_COMBO_STAGE: u8 = 3;
/// Number of frames in the walk cycle.
pub const WALK_FRAMES: u8 = 4;

/// Enemy starting hit points.
pub const ENEMY_MAX_HP: u32 = 5;
/// Patrol walking speed.
pub const ENEMY_IDLE_SPEED: f32 = 150.0;
/// Time spent walking one way before the patrol turns round.
pub const ENEMY_IDLE_DURATION: f32 = 3.0;
/// Half-width of the horizontal window in which the enemy spots the player.
pub const ENEMY_AGGRO_RANGE: f32 = 250.0;
/// Pause between stabs.
pub const ENEMY_STAB_COOLDOWN: f32 = 2.0;
/// Dash speed during a stab.
pub const ENEMY_STAB_SPEED: f32 = 500.0;
/// Length of one stab dash.
pub const ENEMY_STAB_DURATION: f32 = 0.2;
/// Damage dealt to the player on body contact.
pub const ENEMY_CONTACT_DAMAGE: u32 = 1;
/// Minimum time between two contact hits.
pub const ENEMY_CONTACT_COOLDOWN: f32 = 1.0;
/// Horizontal speed while the enemy is knocked back.
pub const ENEMY_KNOCKBACK_VELOCITY: f32 = 400.0;
/// How long enemy knockback lasts.
pub const ENEMY_KNOCKBACK_DURATION: f32 = 0.1;
/// Enemy gravity.
pub const ENEMY_GRAVITY: f32 = 5000.0;
/// Enemy body size `(width, height)`.
pub const ENEMY_SIZE: (f32, f32) = (50.0, 50.0);

/// Default window width.
pub const VIEWPORT_WIDTH: f32 = 1280.0;
/// Default window height.
pub const VIEWPORT_HEIGHT: f32 = 720.0;
