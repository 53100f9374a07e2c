//! Interactive terminal driver
//!
//! Steps the scenario once per frame, draws it with [`AsciiFrame`] and exits on
//! any key press. The terminal is put in raw mode on an alternate screen and
//! restored by [`TerminalGuard`] on every exit path.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;

use crate::error::Result;
use crate::simulation::scenario::Scenario;
use crate::visualization::ascii::AsciiFrame;

/// Raw mode + alternate screen for as long as it lives
struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide, terminal::Clear(ClearType::All))?;
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the simulation in the terminal until a key is pressed
pub fn run_terminal(mut scenario: Scenario) -> Result<()> {
    info!(
        "run_terminal: {} bodies, {:?}, frame every {:?}",
        scenario.world.len(),
        scenario.engine.integrator,
        scenario.engine.frame_interval
    );

    let mut frame = AsciiFrame::for_world(&scenario.world)?;
    let mut guard = TerminalGuard::enter()?;

    loop {
        scenario.step()?;
        frame.draw(&scenario.world);
        draw_frame(&mut guard.out, &frame, &scenario)?;

        // Waiting for input doubles as the frame delay
        if event::poll(scenario.engine.frame_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    break;
                }
            }
        }
    }

    drop(guard);
    info!("run_terminal: stopped after {} steps", scenario.world.steps);
    Ok(())
}

fn draw_frame(out: &mut Stdout, frame: &AsciiFrame, scenario: &Scenario) -> Result<()> {
    // Clip to the screen, keeping the last line for the status
    let (term_cols, term_rows) = terminal::size()?;
    let grid_rows = term_rows.saturating_sub(1);

    let mut status_row = 0u16;
    for (row, line) in (0u16..).zip(frame.clipped_lines(term_cols as usize, grid_rows as usize)) {
        queue!(out, cursor::MoveTo(0, row), Print(line))?;
        status_row = row + 1;
    }

    // Status line under the grid
    let status = format!(
        "step {:>7}  t = {:>9.2}  {:?}  (any key quits)",
        scenario.world.steps,
        scenario.world.t,
        scenario.engine.integrator
    );
    queue!(
        out,
        cursor::MoveTo(0, status_row),
        terminal::Clear(ClearType::CurrentLine),
        Print(status)
    )?;
    out.flush()?;
    Ok(())
}
