//! Example: load an STL file and print its framing.
//!
//! Run with: `cargo run --example frame_stl -- path/to/model.stl`
//!
//! Set `RUST_LOG=mesh_view=debug` to see decoder logging.

use std::path::PathBuf;

use mesh_view::{LoadStatus, MeshViewer, ViewerConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or("usage: frame_stl <file.stl>")?;

    let mut viewer = MeshViewer::new(ViewerConfig::default());
    let mut last_pct = 0;
    let status = viewer.load_path(&path, |ratio| {
        let pct = (ratio * 100.0) as u32;
        if pct >= last_pct + 10 || (pct == 100 && last_pct != 100) {
            eprintln!("reading... {}%", pct);
            last_pct = pct;
        }
    })?;

    if let LoadStatus::Failed(message) = status {
        return Err(message.into());
    }

    let Some(mesh) = viewer.current() else {
        return Ok(());
    };

    println!("{}", mesh.buffers.report());

    match &mesh.camera {
        Some(plan) => {
            println!("Camera:");
            println!(
                "  Position: [{:.3}, {:.3}, {:.3}]",
                plan.position.x, plan.position.y, plan.position.z
            );
            println!(
                "  Look at: [{:.3}, {:.3}, {:.3}]",
                plan.look_at.x, plan.look_at.y, plan.look_at.z
            );
            println!("  Distance: {:.3}", plan.distance);
        }
        None => println!("Nothing to render."),
    }

    Ok(())
}
