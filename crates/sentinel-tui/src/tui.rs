//! Raw-mode terminal lifecycle and viewport measurement.

use std::io::{Stdout, stdout};

use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand, cursor,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Backend = CrosstermBackend<Stdout>;

/// Pixels assumed per terminal column when the terminal does not report
/// its pixel size.
pub const PIXELS_PER_COLUMN: u32 = 8;

/// Owns the ratatui terminal; restores the shell on drop.
pub struct Tui {
    pub terminal: Terminal<Backend>,
}

impl Tui {
    /// Builds the backend. Raw mode is entered separately.
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Switches to the alternate screen with raw input.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        restore();
        Ok(())
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Best-effort restoration; partial failures are ignored.
fn restore() {
    let _ = stdout().execute(cursor::Show);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Width of the display surface in device-independent pixels.
///
/// Uses the pixel width when the terminal reports one, otherwise
/// `columns * 8`.
pub fn viewport_width() -> u32 {
    match terminal::window_size() {
        Ok(size) => width_from(size.width, size.columns),
        Err(_) => terminal::size().map_or(0, |(cols, _)| width_from(0, cols)),
    }
}

/// Viewport width for a resize to `columns`, preferring reported pixels.
pub fn viewport_width_for(columns: u16) -> u32 {
    let pixels = terminal::window_size().map_or(0, |size| size.width);
    width_from(pixels, columns)
}

fn width_from(pixels: u16, columns: u16) -> u32 {
    if pixels > 0 {
        u32::from(pixels)
    } else {
        u32::from(columns) * PIXELS_PER_COLUMN
    }
}

/// Hooks color-eyre reports so a panic leaves the shell usable.
///
/// Call before [`Tui::enter`].
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();

    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore();
        panic_hook(info);
    }));

    Ok(())
}
