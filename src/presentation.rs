//! Presentation layer: keyboard input, camera follow, sprites and HUD.
//!
//! `PresentationPlugin` is a passive observer of the [`Simulation`]: it writes
//! the keyboard state into the simulation before the step and mirrors the
//! arena into sprites after it. Game logic never reads Bevy state.
//!
//! The core works in screen space with `y` pointing down and the origin at
//! the top-left of the view. Bevy's 2D camera is centred with `y` pointing up,
//! so every box goes through [`view_to_translation`] before it is drawn. The
//! Bevy camera itself never moves; scrolling is done by the core
//! [`crate::camera::Camera`].

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use log::warn;

use crate::camera::Camera as FollowCamera;
use crate::geometry::Aabb;
#[cfg(feature = "text")]
use crate::hud::HpLabel;
use crate::input::InputSnapshot;
use crate::plugin::{Simulation, SimulationSet};

/// Marker for the player's sprite.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSprite;

/// Marker for the player's weapon sprite.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponSprite;

/// Sprite of the enemy with the given spawn index.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemySprite(pub usize);

/// Sprite of the platform with the given index.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSprite(pub usize);

/// Marker for the HP label.
#[cfg(feature = "text")]
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpText;

/// The scrolling camera that follows the player.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewCamera(pub FollowCamera);

/// Cached HP label text.
#[cfg(feature = "text")]
#[derive(Resource, Debug, Clone, Default)]
pub struct HpLabelState(pub HpLabel);

const PLATFORM_COLOUR: Color = Color::srgb(0.85, 0.85, 0.85);
const PLAYER_COLOUR: Color = Color::srgb(0.3, 0.55, 0.95);
const GUARD_COLOUR: Color = Color::srgb(0.3, 0.85, 0.95);
const WEAPON_COLOUR: Color = Color::srgb(0.95, 0.85, 0.3);
const ENEMY_COLOUR: Color = Color::srgb(0.85, 0.2, 0.2);
const STAB_COLOUR: Color = Color::srgb(1.0, 0.45, 0.1);

/// Reads the action keys into an [`InputSnapshot`].
///
/// `A`/`←` move left, `D`/`→` move right, `Space` jumps, `J` attacks and
/// `K` guards.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use skirmish::presentation::snapshot_from_keys;
///
/// let mut keys = ButtonInput::<KeyCode>::default();
/// keys.press(KeyCode::ArrowRight);
/// keys.press(KeyCode::KeyJ);
/// let input = snapshot_from_keys(&keys);
/// assert!(input.move_right && input.attack);
/// assert!(!input.jump);
/// ```
#[must_use]
pub fn snapshot_from_keys(keys: &ButtonInput<KeyCode>) -> InputSnapshot {
    InputSnapshot {
        move_left: keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft),
        move_right: keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight),
        jump: keys.pressed(KeyCode::Space),
        attack: keys.pressed(KeyCode::KeyJ),
        guard: keys.pressed(KeyCode::KeyK),
    }
}

/// Converts a view-space box (top-left origin, `y` down) into the
/// translation of a centred Bevy sprite (`y` up).
#[must_use]
pub const fn view_to_translation(view: &Aabb, viewport: Vec2, z: f32) -> Vec3 {
    Vec3::new(
        view.x + view.w / 2.0 - viewport.x / 2.0,
        viewport.y / 2.0 - (view.y + view.h / 2.0),
        z,
    )
}

/// Writes the keyboard into the simulation and handles the pause key.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn keyboard_input_system(keys: Res<ButtonInput<KeyCode>>, mut simulation: ResMut<Simulation>) {
    if keys.just_pressed(KeyCode::KeyP) {
        simulation.clock_mut().toggle_pause();
    }
    simulation.set_input(snapshot_from_keys(&keys));
}

/// Pauses the simulation while the primary window is unfocused.
pub fn window_focus_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut simulation: ResMut<Simulation>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    simulation.clock_mut().set_focused(window.focused);
}

fn setup_scene(mut commands: Commands, simulation: Res<Simulation>, cameras: Query<&Camera2d>) {
    if cameras.is_empty() {
        commands.spawn((Camera2d, Name::new("PresentationCamera")));
    }

    let arena = simulation.arena();
    for (index, platform) in arena.platforms().iter().enumerate() {
        let bounds = platform.bounds();
        commands.spawn((
            Sprite::from_color(PLATFORM_COLOUR, Vec2::new(bounds.w, bounds.h)),
            Transform::default(),
            PlatformSprite(index),
        ));
    }

    let player = arena.player().bounds();
    commands.spawn((
        Sprite::from_color(PLAYER_COLOUR, Vec2::new(player.w, player.h)),
        Transform::default(),
        PlayerSprite,
        Name::new("Player"),
    ));
    commands.spawn((
        Sprite::from_color(WEAPON_COLOUR, Vec2::ONE),
        Transform::default(),
        Visibility::Hidden,
        WeaponSprite,
    ));

    for (index, enemy) in arena.enemies().iter().enumerate() {
        let bounds = enemy.bounds();
        commands.spawn((
            Sprite::from_color(ENEMY_COLOUR, Vec2::new(bounds.w, bounds.h)),
            Transform::default(),
            EnemySprite(index),
        ));
    }

    #[cfg(feature = "text")]
    commands.spawn((Text2d::new(String::new()), Transform::default(), HpText));
}

/// Follows the player with the view camera.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn camera_follow_system(simulation: Res<Simulation>, mut view: ResMut<ViewCamera>) {
    view.0.follow(&simulation.arena().player().bounds());
}

/// Mirrors platforms, combatants and the weapon into their sprites.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
#[expect(
    clippy::type_complexity,
    reason = "Disjoint sprite queries need their filters spelled out."
)]
pub fn sync_sprites_system(
    simulation: Res<Simulation>,
    view: Res<ViewCamera>,
    mut platforms: Query<(&PlatformSprite, &mut Transform), Without<PlayerSprite>>,
    mut player: Query<
        (&mut Sprite, &mut Transform),
        (With<PlayerSprite>, Without<PlatformSprite>, Without<WeaponSprite>),
    >,
    mut weapon: Query<
        (&mut Sprite, &mut Transform, &mut Visibility),
        (
            With<WeaponSprite>,
            Without<PlayerSprite>,
            Without<PlatformSprite>,
            Without<EnemySprite>,
        ),
    >,
    mut enemies: Query<
        (&EnemySprite, &mut Sprite, &mut Transform, &mut Visibility),
        (
            Without<PlayerSprite>,
            Without<PlatformSprite>,
            Without<WeaponSprite>,
        ),
    >,
) {
    let camera = view.0;
    let viewport = Vec2::new(camera.viewport_width(), camera.viewport_height());
    let place = |world: Aabb, z: f32| view_to_translation(&camera.apply(world), viewport, z);
    let snapshot = simulation.arena().snapshot();

    for (PlatformSprite(index), mut transform) in &mut platforms {
        if let Some(platform) = simulation.arena().platforms().get(*index) {
            transform.translation = place(*platform.bounds(), 0.0);
        }
    }

    if let Ok((mut sprite, mut transform)) = player.single_mut() {
        transform.translation = place(snapshot.player.bounds, 2.0);
        sprite.color = if snapshot.player.guarding {
            GUARD_COLOUR
        } else {
            PLAYER_COLOUR
        };
    }

    if let Ok((mut sprite, mut transform, mut visibility)) = weapon.single_mut() {
        match snapshot.player.weapon {
            Some(hitbox) => {
                sprite.custom_size = Some(Vec2::new(hitbox.w, hitbox.h));
                transform.translation = place(hitbox, 3.0);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    for (EnemySprite(index), mut sprite, mut transform, mut visibility) in &mut enemies {
        let Some((_, enemy)) = snapshot.enemies.iter().find(|(i, _)| i == index) else {
            *visibility = Visibility::Hidden;
            continue;
        };
        transform.translation = place(enemy.bounds, 1.0);
        sprite.color = if enemy.stabbing {
            STAB_COLOUR
        } else {
            ENEMY_COLOUR
        };
        *visibility = Visibility::Visible;
    }
}

/// Rewrites the HP label only when the player's HP changed.
#[cfg(feature = "text")]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn hp_label_system(
    simulation: Res<Simulation>,
    view: Res<ViewCamera>,
    mut label: ResMut<HpLabelState>,
    mut texts: Query<(&mut Text2d, &mut Transform), With<HpText>>,
) {
    let Ok((mut text, mut transform)) = texts.single_mut() else {
        return;
    };
    let camera = view.0;
    let viewport = Vec2::new(camera.viewport_width(), camera.viewport_height());
    transform.translation =
        view_to_translation(&Aabb::new(0.0, 0.0, 100.0, 50.0), viewport, 10.0);
    if let Some(updated) = label.0.refresh(simulation.arena().player().hp()) {
        updated.clone_into(&mut text.0);
    }
}

/// Plugin owning input mapping, the follow camera and every sprite.
///
/// Requires [`crate::plugin::SimulationPlugin`]; without a [`Simulation`]
/// resource the plugin installs nothing.
#[derive(Debug, Default)]
pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<Simulation>() {
            warn!("PresentationPlugin added without a Simulation; nothing to draw");
            return;
        }
        app.init_resource::<ViewCamera>();
        app.add_systems(Startup, setup_scene);
        app.add_systems(
            Update,
            (keyboard_input_system, window_focus_system).in_set(SimulationSet::Input),
        );
        app.add_systems(
            Update,
            (camera_follow_system, sync_sprites_system)
                .chain()
                .in_set(SimulationSet::Sync),
        );

        #[cfg(feature = "text")]
        {
            app.init_resource::<HpLabelState>();
            app.add_systems(
                Update,
                hp_label_system
                    .after(camera_follow_system)
                    .in_set(SimulationSet::Sync),
            );
        }
    }
}
