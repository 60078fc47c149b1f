//! Two-room walkthrough.
//!
//! Builds a small apartment (two rooms joined by a doorway) with three
//! sounding sources, then walks the listener from one room into the other
//! while printing the parameters the engine pushes to the output.
//!
//! Run with audio (falls back to a silent world when no device exists):
//!
//! ```sh
//! cargo run --example walkthrough
//! ```

use anyhow::Result;
use roomtone::{
    AcousticsSettings, DirectivityPattern, Material, RoomtoneEngine, RoomtoneWorld,
    RoomtoneWorldDesc, SourceConfig, Vec2, Wall, Waveform,
};
use std::f32::consts::PI;
use std::time::Duration;

/// Two 6x6 rooms side by side; the shared wall has a 1.5 unit doorway.
fn apartment_walls() -> Vec<Wall> {
    let mut walls = vec![
        // Outer shell
        Wall::with_material(Vec2::new(0.0, 0.0), Vec2::new(12.0, 0.0), Material::BRICK),
        Wall::with_material(Vec2::new(12.0, 0.0), Vec2::new(12.0, 6.0), Material::BRICK),
        Wall::with_material(Vec2::new(12.0, 6.0), Vec2::new(0.0, 6.0), Material::BRICK),
        Wall::with_material(Vec2::new(0.0, 6.0), Vec2::new(0.0, 0.0), Material::BRICK),
    ];
    // Dividing wall at x = 6, doorway between y = 2.25 and y = 3.75.
    walls.push(Wall::with_material(
        Vec2::new(6.0, 0.0),
        Vec2::new(6.0, 2.25),
        Material::PLASTER,
    ));
    walls.push(Wall::with_material(
        Vec2::new(6.0, 3.75),
        Vec2::new(6.0, 6.0),
        Material::PLASTER,
    ));
    walls
}

fn build_scene(world: &mut RoomtoneWorld) -> Result<()> {
    world.set_walls(apartment_walls());

    // Fridge hum in the west room, aimed into the room.
    world.upsert_source(
        "fridge",
        SourceConfig::new(Vec2::new(1.0, 5.0))
            .facing(-PI / 4.0)
            .directivity(DirectivityPattern::Cardioid)
            .frequency(120.0)
            .volume(0.9)
            .playing(true),
    )?;

    // Radio in the east room.
    world.upsert_source(
        "radio",
        SourceConfig::new(Vec2::new(10.5, 3.0))
            .facing(PI)
            .directivity(DirectivityPattern::Hemisphere)
            .frequency(440.0)
            .waveform(Waveform::Triangle)
            .volume(0.7)
            .playing(true),
    )?;

    // Wall clock near the doorway, omnidirectional.
    world.upsert_source(
        "clock",
        SourceConfig::new(Vec2::new(6.5, 5.5))
            .frequency(880.0)
            .waveform(Waveform::Square)
            .volume(0.25)
            .playing(true),
    )?;

    Ok(())
}

fn print_scene(world: &RoomtoneWorld, step: usize, position: Vec2) {
    println!("step {step:2}  listener at ({:4.1}, {:4.1})", position.x, position.y);
    let mut ids = world.source_ids();
    ids.sort();
    for id in ids {
        let Some(p) = world.parameters(&id) else { continue };
        println!(
            "    {id:8} vol {:.3}  pan {:+.2}  dist {:4.1}  walls {} ({:.0}% through)",
            p.volume,
            p.pan,
            p.distance,
            p.wall_count,
            p.wall_attenuation * 100.0
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let settings = AcousticsSettings::new()
        .max_distance(20.0)
        .wall_transmission(0.3);

    let mut engine = RoomtoneEngine::new(RoomtoneWorldDesc::default())?;
    let mut world = RoomtoneWorld::with_output(settings, Box::new(engine.port()));

    // No output device is not fatal: the walkthrough still prints every
    // parameter, it just stays silent.
    let live = match engine.start() {
        Ok(()) => true,
        Err(e) => {
            log::warn!("running silent, audio unavailable: {e}");
            false
        }
    };

    build_scene(&mut world)?;

    // Walk from the west room through the doorway to the radio.
    let path = [
        Vec2::new(2.0, 3.0),
        Vec2::new(3.5, 3.0),
        Vec2::new(5.0, 3.0),
        Vec2::new(6.0, 3.0), // in the doorway
        Vec2::new(7.5, 3.0),
        Vec2::new(9.0, 3.0),
        Vec2::new(10.0, 3.0),
    ];

    for (step, &position) in path.iter().enumerate() {
        world.set_listener_position(position);
        print_scene(&world, step, position);

        if live {
            std::thread::sleep(Duration::from_millis(1200));
            for event in engine.poll_events() {
                log::info!("event: {event:?}");
            }
        }
    }

    // Turn around in place: the radio should swing across the stereo field
    // and the rear sources duck to the hearing floor.
    println!("turning in place:");
    for i in 0..4 {
        let facing = i as f32 * PI / 2.0;
        world.set_listener_facing(facing);
        if let Some(p) = world.parameters("radio") {
            println!("    facing {:4.0}°  radio vol {:.3} pan {:+.2}", facing.to_degrees(), p.volume, p.pan);
        }
        if live {
            std::thread::sleep(Duration::from_millis(800));
        }
    }

    world.remove_source("clock");
    log::info!("clock removed, {} sources left", world.source_ids().len());

    if live {
        std::thread::sleep(Duration::from_millis(500));
        engine.stop()?;
    }
    Ok(())
}
