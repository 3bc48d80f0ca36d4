//! RUMBLE-2D: a small 2D action-game runtime
//!
//! One frame loop over macroquad: scene sequencing (menu, cutscene reels,
//! levels, credits), a world of actors with box collision, and a runtime
//! debug overlay toggled without recompiling.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod context;
mod game;
mod scene;

use macroquad::prelude::*;

use config::{default_config, load_game_config, GameConfig};
use context::DeviceContext;
use game::World;
use scene::{Scene, SceneEvent, SceneSequencer};

const CONFIG_PATH: &str = "assets/config/levels.ron";
const MENU_ENTRIES: [&str; 2] = ["Start", "Exit"];
const HERO_SPEED: f32 = 220.0;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("RUMBLE-2D v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Crash logging first, before anything else can panic
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let campaign = match load_game_config(CONFIG_PATH) {
        Ok(config) => {
            println!("Loaded campaign from {}", CONFIG_PATH);
            config
        }
        Err(e) => {
            println!("No campaign file ({}), using built-in levels", e);
            default_config()
        }
    };

    let mut ctx = DeviceContext::new();
    let mut sequencer = SceneSequencer::new(campaign.levels.len() as u32);
    let mut world = World::new();
    let mut menu_selection: usize = 0;
    let mut current_level: Option<u32> = None;

    loop {
        clear_background(BLACK);

        match sequencer.scene() {
            Scene::MainMenu => {
                if current_level.take().is_some() {
                    world.destroy();
                }
                update_menu(&mut sequencer, &mut menu_selection);
                draw_menu(menu_selection);
            }
            Scene::Cutscene { reel, index } => {
                if current_level.take().is_some() {
                    world.destroy();
                }
                draw_cutscene(&reel.frame_name(index));
                if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter) {
                    sequencer.advance(SceneEvent::CutsceneFinished);
                }
            }
            Scene::Playing { level } => {
                if current_level != Some(level) {
                    match enter_level(&mut world, &campaign, level) {
                        Ok(()) => {
                            ctx.paused = false;
                            current_level = Some(level);
                        }
                        Err(e) => {
                            eprintln!("Failed to start level {}: {}", level, e);
                            // Back to the menu rather than simulating a broken level
                            sequencer = SceneSequencer::new(campaign.levels.len() as u32);
                            continue;
                        }
                    }
                }
                handle_gameplay_input(&mut ctx, &mut world, &mut sequencer);
                world.update(&ctx, get_frame_time());
                world.draw(&ctx);
                draw_hud(&ctx, &world, &campaign, level);
            }
            Scene::Exited => break,
        }

        next_frame().await;
    }
}

/// Tear down whatever ran before and rebuild the world from config.
fn enter_level(world: &mut World, campaign: &GameConfig, level: u32) -> Result<(), String> {
    let level_config = campaign
        .level(level)
        .ok_or_else(|| format!("campaign has no level {}", level))?;
    world.initialize(level_config).map_err(|e| e.to_string())?;
    println!(
        "Level {} \"{}\": {} actors",
        level,
        level_config.name,
        world.actor_count()
    );
    Ok(())
}

fn update_menu(sequencer: &mut SceneSequencer, selection: &mut usize) {
    if is_key_pressed(KeyCode::Up) {
        *selection = selection.saturating_sub(1);
    }
    if is_key_pressed(KeyCode::Down) {
        *selection = (*selection + 1).min(MENU_ENTRIES.len() - 1);
    }
    if is_key_pressed(KeyCode::Enter) {
        let event = if *selection == 0 {
            SceneEvent::StartSelected
        } else {
            SceneEvent::ExitSelected
        };
        sequencer.advance(event);
    }
    if is_key_pressed(KeyCode::Escape) {
        sequencer.advance(SceneEvent::ExitSelected);
    }
}

fn handle_gameplay_input(ctx: &mut DeviceContext, world: &mut World, sequencer: &mut SceneSequencer) {
    if is_key_pressed(KeyCode::P) {
        ctx.toggle_paused();
    }
    if is_key_pressed(KeyCode::F3) {
        ctx.toggle_debug_overlay();
    }
    // Dev shortcut until win conditions exist: N finishes the level
    if is_key_pressed(KeyCode::N) {
        sequencer.advance(SceneEvent::LevelCompleted);
    }

    if let Some(hero) = world.hero() {
        let mut dir = Vec2::ZERO;
        if is_key_down(KeyCode::Left) {
            dir.x -= 1.0;
        }
        if is_key_down(KeyCode::Right) {
            dir.x += 1.0;
        }
        if is_key_down(KeyCode::Up) {
            dir.y -= 1.0;
        }
        if is_key_down(KeyCode::Down) {
            dir.y += 1.0;
        }
        let velocity = if dir == Vec2::ZERO {
            Vec2::ZERO
        } else {
            dir.normalize() * HERO_SPEED
        };
        world.set_velocity(hero, velocity);
    }
}

fn draw_menu(selection: usize) {
    draw_text(&format!("RUMBLE-2D v{}", VERSION), 80.0, 120.0, 48.0, WHITE);
    for (i, entry) in MENU_ENTRIES.iter().enumerate() {
        let color = if i == selection { YELLOW } else { GRAY };
        draw_text(entry, 100.0, 400.0 + i as f32 * 40.0, 32.0, color);
    }
    draw_text(
        "Up/Down to select, Enter to confirm",
        80.0,
        screen_height() - 24.0,
        20.0,
        DARKGRAY,
    );
}

fn draw_cutscene(frame: &str) {
    draw_text(
        frame,
        screen_width() * 0.5 - 100.0,
        screen_height() * 0.5,
        40.0,
        WHITE,
    );
    draw_text(
        "Space to continue",
        20.0,
        screen_height() - 24.0,
        20.0,
        DARKGRAY,
    );
}

fn draw_hud(ctx: &DeviceContext, world: &World, campaign: &GameConfig, level: u32) {
    let name = campaign
        .level(level)
        .map(|l| l.name.as_str())
        .unwrap_or("?");
    draw_text(&format!("Level {} - {}", level, name), 20.0, 28.0, 24.0, WHITE);
    draw_text(
        "Arrows move / P pause / F3 overlay / N next level",
        20.0,
        screen_height() - 16.0,
        18.0,
        DARKGRAY,
    );

    if ctx.paused {
        draw_text(
            "PAUSED",
            screen_width() * 0.5 - 80.0,
            screen_height() * 0.5,
            48.0,
            YELLOW,
        );
    }
    if ctx.debug_overlay {
        let line = format!(
            "actors: {}  contacts: {}",
            world.actor_count(),
            world.events.collision.len()
        );
        draw_text(&line, 20.0, 52.0, 20.0, YELLOW);
    }
}
