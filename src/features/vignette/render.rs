//! Terminal rendering for the vignette.
//!
//! Left/Right switch between YES and NO, Enter confirms, Esc or Ctrl+C quits.

use crate::features::vignette::{pick_dialogue, Choice, Vignette};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

const HEART: &str = "♥";

const HP_BOX_X: u16 = 6;
const HP_BOX_Y: u16 = 2;

const DIALOG_X: u16 = 6;
const DIALOG_Y: u16 = 10;
const DIALOG_WIDTH: u16 = 90;
const DIALOG_HEIGHT: u16 = 10;

const TEXT_X: u16 = 14;
const TEXT_Y: u16 = 12;

const CHOICE_Y: u16 = 17;
const CHOICE_GAP: u16 = 20;
const DIALOG_CENTER_X: u16 = DIALOG_X + DIALOG_WIDTH / 2;
const YES_X: u16 = DIALOG_CENTER_X - CHOICE_GAP / 2 - 1;
const NO_X: u16 = DIALOG_CENTER_X + CHOICE_GAP / 2 - 1;
const HEART_OFFSET: u16 = 2;

const TEXT_DELAY: Duration = Duration::from_millis(25);
const RESPONSE_DELAY: Duration = Duration::from_millis(30);
const ROUND_PAUSE: Duration = Duration::from_millis(2000);

/// Restores the terminal when dropped, even on error paths
struct TerminalGuard;

impl TerminalGuard {
    fn enter(out: &mut Stdout) -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

enum Input {
    Toggle,
    Confirm,
    Quit,
}

/// Play rounds until the user quits.
pub fn run(state: &mut Vignette) -> io::Result<()> {
    let mut out = io::stdout();
    let _guard = TerminalGuard::enter(&mut out)?;
    execute!(out, terminal::SetTitle("UNDERTALE"))?;

    let mut rng = rand::rng();
    loop {
        draw_frame(&mut out, state)?;
        for (offset, line) in (0u16..).zip(pick_dialogue(&mut rng).lines()) {
            type_out(&mut out, TEXT_X, TEXT_Y + offset, line, TEXT_DELAY)?;
        }
        draw_choices(&mut out, state.selected)?;

        loop {
            match read_input()? {
                Input::Toggle => {
                    state.toggle();
                    draw_choices(&mut out, state.selected)?;
                }
                Input::Confirm => break,
                Input::Quit => return Ok(()),
            }
        }

        let response = state.confirm();
        let blank = " ".repeat(70);
        queue!(
            out,
            MoveTo(TEXT_X, CHOICE_Y),
            Print(&blank),
            MoveTo(TEXT_X, CHOICE_Y + 1),
            Print(&blank)
        )?;
        type_out(&mut out, TEXT_X, CHOICE_Y, response, RESPONSE_DELAY)?;
        thread::sleep(ROUND_PAUSE);
    }
}

fn read_input() -> io::Result<Input> {
    loop {
        if let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            match code {
                KeyCode::Left | KeyCode::Right => return Ok(Input::Toggle),
                KeyCode::Enter => return Ok(Input::Confirm),
                KeyCode::Esc => return Ok(Input::Quit),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(Input::Quit)
                }
                _ => {}
            }
        }
    }
}

fn draw_frame(out: &mut Stdout, state: &Vignette) -> io::Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        SetForegroundColor(Color::White),
        MoveTo(HP_BOX_X, HP_BOX_Y),
        Print("╔═══════════════╗"),
        MoveTo(HP_BOX_X, HP_BOX_Y + 1),
        Print(format!("║   HP: {}/{}   ║", state.hp, state.max_hp)),
        MoveTo(HP_BOX_X, HP_BOX_Y + 2),
        Print("╚═══════════════╝"),
    )?;

    let rule = "═".repeat(usize::from(DIALOG_WIDTH - 2));
    queue!(out, MoveTo(DIALOG_X, DIALOG_Y), Print(format!("╔{rule}╗")))?;
    for row in 1..DIALOG_HEIGHT - 1 {
        queue!(
            out,
            MoveTo(DIALOG_X, DIALOG_Y + row),
            Print("║"),
            MoveTo(DIALOG_X + DIALOG_WIDTH - 1, DIALOG_Y + row),
            Print("║"),
        )?;
    }
    queue!(
        out,
        MoveTo(DIALOG_X, DIALOG_Y + DIALOG_HEIGHT - 1),
        Print(format!("╚{rule}╝"))
    )?;
    out.flush()
}

fn type_out(out: &mut Stdout, x: u16, y: u16, text: &str, delay: Duration) -> io::Result<()> {
    queue!(out, SetForegroundColor(Color::White), MoveTo(x, y))?;
    for c in text.chars() {
        queue!(out, Print(c))?;
        out.flush()?;
        thread::sleep(delay);
    }
    Ok(())
}

fn heart_x(choice: Choice) -> u16 {
    match choice {
        Choice::Yes => YES_X - HEART_OFFSET,
        Choice::No => NO_X - HEART_OFFSET,
    }
}

fn draw_choices(out: &mut Stdout, selected: Choice) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(Color::White),
        MoveTo(YES_X, CHOICE_Y),
        Print("YES"),
        MoveTo(NO_X, CHOICE_Y),
        Print("NO"),
        MoveTo(heart_x(selected.toggled()), CHOICE_Y),
        Print(" "),
        SetForegroundColor(Color::Red),
        MoveTo(heart_x(selected), CHOICE_Y),
        Print(HEART),
        ResetColor,
    )?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_layout_fits_dialog_box() {
        assert_eq!(YES_X, 40);
        assert_eq!(NO_X, 60);
        assert!(heart_x(Choice::Yes) > DIALOG_X);
        assert!(NO_X + 2 < DIALOG_X + DIALOG_WIDTH - 1);
    }
}
