//! Switch State headless driver
//!
//! Loads the bundled sample level and plays a scripted touch session at a
//! fixed timestep, logging what the renderer would see.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Switch State (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `World` directly
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), switch_state::sim::LevelError> {
    use glam::Vec2;
    use switch_state::Tuning;
    use switch_state::consts::{MAX_SUBSTEPS, SIM_DT};
    use switch_state::sim::{LevelData, PrototypeTable, World};

    let data = LevelData::from_json(include_str!("../levels/sample.json"))?;
    let prototypes = PrototypeTable::from_json(include_str!("../levels/enemy_prototypes.json"))?;

    let mut world = World::new(Tuning::default());
    world.load_level(&data, &prototypes)?;
    world.resume();

    // Hold still for a second, drag for three, then release
    let press = Vec2::new(200.0, 200.0);
    let mut pressed = false;
    let mut released = false;
    let mut accumulator = 0.0_f32;
    let frame_dt = 1.0 / 30.0;
    let mut frames = 0;

    while world.state().game_time < 6.0 && frames < 10_000 {
        frames += 1;
        let t = world.state().game_time;
        if !pressed && t >= 1.0 {
            world.on_press_start(press);
            world.on_drag_from_press(press + Vec2::new(-30.0, 20.0));
            pressed = true;
        }
        if !released && t >= 4.0 {
            world.on_press_end();
            released = true;
        }

        accumulator += frame_dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            world.tick(SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    let p = world.player_position();
    log::info!(
        "After {:.2}s: player at ({:.2}, {:.2}) facing {:.1} deg",
        world.state().game_time,
        p.x,
        p.y,
        world.player_rotation()
    );
    for (i, enemy) in world.enemies().iter().enumerate() {
        let pos = enemy.position();
        log::info!(
            "Enemy {i}: ({:.2}, {:.2}) frozen={} finished={}",
            pos.x,
            pos.y,
            enemy.is_pattern_frozen(),
            enemy.is_pattern_finished()
        );
    }
    let camera = world.camera_focus(Vec2::new(60.0, 40.0));
    log::info!("Camera focus: ({:.2}, {:.2})", camera.x, camera.y);
    Ok(())
}
