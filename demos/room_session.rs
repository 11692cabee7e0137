//! Scripted room sketching session.
//!
//! Draws a rectangular room, splits it with inner walls, drags a wall and
//! prints the resulting geometry.
//!
//! Usage:
//! ```text
//! cargo run --example room_session
//! RUST_LOG=wallsketch=debug cargo run --example room_session
//! ```

use wallsketch::math::Point2;
use wallsketch::{Alignment, Result, WallConfig, Walls};

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for the session.
    // Override with RUST_LOG env var (e.g. RUST_LOG=wallsketch=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("room_session=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = WallConfig::new(15.0, 10.0)?;
    let mut walls = Walls::with_config(config);

    // Clicks; the last one lands near the first point and closes the room.
    for (x, y) in [(0.0, 0.0), (400.0, 2.0), (401.0, 300.0), (3.0, 298.0), (4.0, 5.0)] {
        let snapped = walls.find_magnet_point(x, y, true);
        if walls.add_point(snapped.x, snapped.y) {
            println!("room closed after clicking ({x}, {y})");
        }
    }

    for wall in walls.wall_lengths() {
        println!(
            "wall {}: {:.1} from ({:.1}, {:.1}) to ({:.1}, {:.1})",
            wall.wall_index, wall.length, wall.start.x, wall.start.y, wall.end.x, wall.end.y
        );
    }

    if !walls.update_thickness("bad") {
        println!("rejected thickness edit, keeping {}", walls.thickness());
    }

    let hallway = walls.add_inner_wall(
        Point2::new(0.0, 150.0),
        Point2::new(400.0, 150.0),
        Alignment::Center,
    );
    let divider = walls.add_inner_wall(
        Point2::new(200.0, 0.0),
        Point2::new(200.0, 300.0),
        "left".parse()?,
    );
    println!(
        "added {} hallway and {} divider segments; {} inner walls in total",
        hallway.len(),
        divider.len(),
        walls.inner_wall_count()
    );

    walls.select_wall(0)?;
    walls.start_dragging(Point2::new(200.0, 0.0));
    match walls.update_wall_position(200.0, -40.0) {
        Ok(moved) => println!("bottom wall moved: {moved}"),
        Err(err) => println!("bottom wall drag rejected: {err}"),
    }
    walls.stop_dragging();
    walls.deselect_wall();

    if let Some(&first) = divider.first() {
        walls.select_inner_wall(first)?;
        walls.start_dragging(Point2::new(200.0, 50.0));
        if walls.update_inner_wall_position(260.0, 50.0) {
            println!("divider slid to x = 260");
        }
        walls.stop_dragging();
        walls.deselect_inner_wall();
    }

    for (id, wall) in walls.inner_walls() {
        println!(
            "{id:?}: ({:.1}, {:.1}) -> ({:.1}, {:.1}) [{}], {} junctions",
            wall.start.x,
            wall.start.y,
            wall.end.x,
            wall.end.y,
            wall.alignment,
            wall.helpers.len()
        );
    }

    let regions = walls.thick_walls();
    println!("{} thick wall regions", regions.len());
    if let Some(hovered) = walls.update_hovered_wall(200.0, -50.0) {
        println!("cursor hovers wall {hovered}");
    }
    Ok(())
}
