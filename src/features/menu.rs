//! # Menu Feature
//!
//! The tray context menu rendered as a terminal menu: next reminder times,
//! workout logging and history, per-category test notifications, and exit.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Workout submenu entries
//! - 1.0.0: Initial menu with next-reminder check and test notifications

use crate::features::reminders::ReminderService;
use crate::features::workouts::{form, format_history, WorkoutStore};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use dialoguer::Select;
use log::{error, info};
use std::io::{self, IsTerminal};
use std::sync::Arc;

pub const NO_HISTORY: &str = "No workout history found!";
pub const SAVED: &str = "Workout saved successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    CheckNextReminder,
    LogWorkout,
    ViewHistory,
    /// Fire the given category's notification now
    Test(String),
    Exit,
}

impl MenuAction {
    pub fn label(&self) -> String {
        match self {
            MenuAction::CheckNextReminder => "Check Next Reminder".to_string(),
            MenuAction::LogWorkout => "Workout › Log Today's Workout".to_string(),
            MenuAction::ViewHistory => "Workout › View History".to_string(),
            MenuAction::Test(category) => format!("Tests › {category}"),
            MenuAction::Exit => "Exit".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Continue,
    Exit,
}

/// How the app is driven once reminders are running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontEnd {
    /// Interactive menu on the attached terminal
    Menu,
    /// No terminal (autostart, service unit, `nohup`): reminders only,
    /// until the process is interrupted
    Headless,
}

impl FrontEnd {
    pub fn detect() -> Self {
        Self::for_terminal(io::stdin().is_terminal(), io::stderr().is_terminal())
    }

    /// dialoguer reads keys from stdin and draws on stderr, so both must be
    /// terminals.
    pub fn for_terminal(stdin_is_tty: bool, stderr_is_tty: bool) -> Self {
        if stdin_is_tty && stderr_is_tty {
            FrontEnd::Menu
        } else {
            FrontEnd::Headless
        }
    }
}

pub struct Menu {
    service: Arc<ReminderService>,
    store: Arc<WorkoutStore>,
}

impl Menu {
    pub fn new(service: Arc<ReminderService>, store: Arc<WorkoutStore>) -> Self {
        Menu { service, store }
    }

    /// Entries in display order; one test entry per schedule category.
    pub fn actions(&self) -> Vec<MenuAction> {
        let mut actions = vec![
            MenuAction::CheckNextReminder,
            MenuAction::LogWorkout,
            MenuAction::ViewHistory,
        ];
        actions.extend(
            self.service
                .schedule()
                .category_names()
                .map(|name| MenuAction::Test(name.to_string())),
        );
        actions.push(MenuAction::Exit);
        actions
    }

    pub fn history_text(&self) -> String {
        format_history(&self.store.load()).unwrap_or_else(|| NO_HISTORY.to_string())
    }

    /// Run one action at `now`. Failures are reported to the user rather than
    /// ending the menu loop.
    pub fn handle(&self, action: &MenuAction, now: NaiveDateTime) -> MenuOutcome {
        match action {
            MenuAction::CheckNextReminder => {
                println!("\n{}\n", self.service.schedule().format_next_reminders(now.time()));
            }
            MenuAction::LogWorkout => match form::prompt_workout(now) {
                Ok(Some(record)) => match self.store.save(record) {
                    Ok(()) => println!("\n{SAVED}\n"),
                    Err(e) => {
                        error!("Failed to save workout: {e:#}");
                        println!("\n❌ Could not save workout: {e}\n");
                    }
                },
                Ok(None) => println!("\nNothing saved.\n"),
                Err(e) => error!("Workout form failed: {e}"),
            },
            MenuAction::ViewHistory => {
                println!("\nWorkout History\n===============\n{}\n", self.history_text());
            }
            MenuAction::Test(category) => {
                if !self.service.notify(category) {
                    println!("\nNo messages loaded for {category}.\n");
                }
            }
            MenuAction::Exit => return MenuOutcome::Exit,
        }
        MenuOutcome::Continue
    }

    /// Show the menu until Exit is chosen.
    pub fn run(&self) -> Result<()> {
        let actions = self.actions();
        let labels: Vec<String> = actions.iter().map(MenuAction::label).collect();

        loop {
            let index = Select::new()
                .with_prompt("WaterQuest")
                .items(&labels)
                .default(0)
                .interact()?;

            if self.handle(&actions[index], Local::now().naive_local()) == MenuOutcome::Exit {
                info!("Exit selected from menu");
                return Ok(());
            }
        }
    }
}
