//! # WaterQuest
//!
//! Background habit reminders with a terminal menu standing in for the tray.
//! Without a terminal it runs headless until interrupted.
//!
//! Usage: `cargo run --bin waterquest`

use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;
use std::thread;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use waterquest::core::Config;
use waterquest::features::reminders::{
    notifier_for, MessagePool, ReminderScheduler, ReminderService, ScheduleTable,
};
use waterquest::features::workouts::WorkoutStore;
use waterquest::features::{FrontEnd, Menu};
use waterquest::InstanceGuard;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    // First instance wins; the lock is held until main returns
    let Some(_instance) = InstanceGuard::acquire(config.instance_port)? else {
        println!("Already running!");
        return Ok(());
    };

    info!("Starting WaterQuest...");

    let schedule = match &config.schedule_path {
        Some(path) => {
            let schedule = ScheduleTable::load(path)?;
            info!("📄 Loaded schedule from {}", path.display());
            schedule
        }
        None => ScheduleTable::default(),
    };
    let pool = MessagePool::load(&config.messages_path);
    if pool.is_empty() {
        info!("No reminder messages loaded - notifications will be skipped");
    }

    let service = Arc::new(ReminderService::new(
        schedule,
        pool,
        notifier_for(config.notifier),
    ));
    let store = Arc::new(WorkoutStore::new(config.workouts_path.clone()));

    // Reminder polling runs on the runtime; the menu blocks on its own thread
    let cancel = CancellationToken::new();
    let scheduler = ReminderScheduler::new(service.clone(), config.poll_interval);
    let scheduler_handle = tokio::spawn(scheduler.run(cancel.clone()));

    let result = match FrontEnd::detect() {
        FrontEnd::Menu => run_menu(Menu::new(service, store)).await,
        FrontEnd::Headless => {
            info!("No terminal attached, running reminders only (Ctrl+C to stop)");
            wait_for_interrupt().await
        }
    };

    cancel.cancel();
    if let Err(e) = scheduler_handle.await {
        error!("Reminder scheduler task failed: {e}");
    }

    result?;
    info!("WaterQuest shutdown complete");
    Ok(())
}

/// Run the menu until Exit or Ctrl+C, whichever comes first.
///
/// The menu gets a plain thread rather than the blocking pool: a prompt left
/// waiting for input after Ctrl+C must not hold up runtime shutdown.
async fn run_menu(menu: Menu) -> Result<()> {
    let (done_tx, done_rx) = oneshot::channel();
    thread::Builder::new()
        .name("waterquest-menu".to_string())
        .spawn(move || {
            let _ = done_tx.send(menu.run());
        })?;

    tokio::select! {
        outcome = done_rx => outcome?,
        interrupted = tokio::signal::ctrl_c() => {
            interrupted?;
            info!("Interrupted, shutting down");
            Ok(())
        }
    }
}

async fn wait_for_interrupt() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    info!("Interrupted, shutting down");
    Ok(())
}
