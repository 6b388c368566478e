//! # Vignette
//!
//! Console mini-game about drinking water.
//!
//! Usage: `cargo run --features vignette --bin vignette`

use anyhow::Result;
use log::info;

use waterquest::features::vignette::{render, Vignette};

fn main() -> Result<()> {
    // Logs would draw over the scene, so only warnings by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut state = Vignette::new();
    render::run(&mut state)?;

    info!("Vignette finished with {}/{} HP", state.hp, state.max_hp);
    Ok(())
}
