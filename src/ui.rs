// UI layer: a `dialoguer` menu in front of the four portfolio views. Each
// view owns its controller and projects it onto stdout with crossterm.

use crate::api::ApiClient;
use crate::browser::{BrowserStatus, RepoBrowser};
use crate::config::Config;
use crate::console::{Console, Submitted, BANNER};
use crate::feed::{FeedPoller, LoadOutcome};
use crate::store::{FileStore, KeyValueStore};
use crate::theme::{Palette, ThemeManager};
use crate::view::{page_html, paint_lines, PROMPT_GLYPH};
use anyhow::{Context, Result};
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::{execute, queue};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::io::{self, Stdout, Write};
use std::path::Path;
use std::time::{Duration, Instant};

const EXPORT_FILE: &str = "portfolio.html";

/// Main interactive menu. Builds one controller per view and runs a select
/// loop until the user chooses "Exit".
pub fn main_menu(config: &Config, api: ApiClient) -> Result<()> {
    let mut themes = ThemeManager::new(FileStore::in_home_dir());
    themes.init_theme();
    let mut feed = FeedPoller::new(api.clone());
    let mut console = Console::new();
    let mut out = io::stdout();

    paint_lines(&mut out, themes.palette().accent, BANNER)?;
    feed.load();
    feed.container().paint(&mut out, themes.palette())?;

    loop {
        let items = vec![
            "Projects",
            "Console",
            "Browse GitHub",
            "Theme",
            "Export HTML",
            "Exit",
        ];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => show_projects(&mut out, &mut feed, config, themes.palette())?,
            1 => run_console(&mut out, &mut console, themes.palette())?,
            // The browser is rebuilt each time: one fetch per visit.
            2 => browse_github(&mut out, RepoBrowser::new(api.clone()), themes.palette())?,
            3 => choose_theme(&mut themes)?,
            4 => {
                let path = Path::new(EXPORT_FILE);
                export_html(path, themes.current(), &feed, &console)?;
                println!("Wrote {}", path.display());
            }
            5 => break,
            _ => {}
        }
    }
    Ok(())
}

/// Leaves raw mode when dropped, including on early `?` returns.
struct RawMode;

impl RawMode {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

fn repaint(out: &mut Stdout, feed: &FeedPoller<ApiClient>, palette: &Palette) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    feed.container().paint(out, palette)?;
    Ok(())
}

/// Fixed-rate tick for watch mode. Events arriving between ticks shorten
/// the next wait instead of restarting it.
struct PollSchedule {
    interval: Duration,
    next_tick: Instant,
}

impl PollSchedule {
    fn new(interval: Duration, now: Instant) -> Self {
        PollSchedule {
            interval,
            next_tick: now + interval,
        }
    }

    /// How long to wait for input before the next tick is due.
    fn timeout(&self, now: Instant) -> Duration {
        self.next_tick.saturating_duration_since(now)
    }

    /// True once per elapsed tick; schedules the following one.
    fn due(&mut self, now: Instant) -> bool {
        if now < self.next_tick {
            return false;
        }
        self.next_tick = now + self.interval;
        true
    }
}

/// Print the local feed. In watch mode keep polling on the configured
/// interval until `q` or Esc; keystrokes are handled between ticks and
/// never push the next poll back.
fn show_projects(
    out: &mut Stdout,
    feed: &mut FeedPoller<ApiClient>,
    config: &Config,
    palette: &Palette,
) -> Result<()> {
    feed.load();
    if !config.watch {
        feed.container().paint(out, palette)?;
        return Ok(());
    }

    info!(
        "event=watch_start feed={} interval_ms={}",
        config.feed,
        config.poll_interval.as_millis()
    );
    let _raw = RawMode::enable()?;
    repaint(out, feed, palette)?;
    paint_watch_hint(out, config, palette)?;
    let mut schedule = PollSchedule::new(config.poll_interval, Instant::now());
    loop {
        if event::poll(schedule.timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && (is_quit(&key) || key.code == KeyCode::Char('q'))
                {
                    break;
                }
            }
        }
        if !schedule.due(Instant::now()) {
            continue;
        }
        match feed.load() {
            LoadOutcome::Unchanged => {}
            LoadOutcome::Rendered | LoadOutcome::Failed => {
                repaint(out, feed, palette)?;
                paint_watch_hint(out, config, palette)?;
            }
        }
    }
    info!("event=watch_stop");
    Ok(())
}

fn paint_watch_hint(out: &mut Stdout, config: &Config, palette: &Palette) -> Result<()> {
    let hint = format!(
        "\nwatching {} every {} ms (q to stop)",
        config.feed,
        config.poll_interval.as_millis()
    );
    paint_lines(out, palette.muted, &hint)?;
    out.flush()?;
    Ok(())
}

fn paint_prompt(out: &mut Stdout, palette: &Palette, buffer: &str) -> Result<()> {
    queue!(
        out,
        SetForegroundColor(palette.accent),
        Print(format!("{PROMPT_GLYPH} ")),
        SetForegroundColor(palette.fg),
        Print(buffer),
        ResetColor
    )?;
    out.flush()?;
    Ok(())
}

/// Raw-mode line editor around `Console::submit`. The console is idle while
/// waiting for a key and executes synchronously on Enter. Esc leaves.
fn run_console(out: &mut Stdout, console: &mut Console, palette: &Palette) -> Result<()> {
    let _raw = RawMode::enable()?;
    paint_lines(
        out,
        palette.muted,
        "Type 'help' for commands. Esc returns to the menu.",
    )?;
    let mut buffer = String::new();
    paint_prompt(out, palette, &buffer)?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_quit(&key) {
            queue!(out, Print("\r\n"))?;
            break;
        }
        match key.code {
            KeyCode::Enter => {
                match console.submit(&buffer) {
                    Submitted::Nothing => {
                        queue!(out, Print("\r"), Clear(ClearType::CurrentLine))?;
                    }
                    Submitted::Cleared => {
                        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
                        paint_lines(out, palette.accent, BANNER)?;
                    }
                    Submitted::Appended { output } => {
                        queue!(out, Print("\r\n"))?;
                        if !output.is_empty() {
                            paint_lines(out, palette.fg, &output)?;
                        }
                    }
                }
                buffer.clear();
                paint_prompt(out, palette, &buffer)?;
            }
            KeyCode::Backspace => {
                if buffer.pop().is_some() {
                    queue!(out, Print("\u{8} \u{8}"))?;
                    out.flush()?;
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                buffer.push(c);
                queue!(out, Print(c))?;
                out.flush()?;
            }
            _ => {}
        }
    }
    out.flush()?;
    Ok(())
}

fn paint_browser(
    out: &mut Stdout,
    browser: &RepoBrowser<ApiClient>,
    palette: &Palette,
) -> Result<()> {
    execute!(out, Print("\r\n"))?;
    browser.container().paint(out, palette)?;
    if browser.status() == BrowserStatus::Ready {
        let summary = format!(
            "showing {} of {} (language: {}, search: {:?})",
            browser.visible().len(),
            browser.repos().len(),
            browser.language().label(),
            browser.query()
        );
        paint_lines(out, palette.muted, &summary)?;
        out.flush()?;
    }
    Ok(())
}

/// Fetch the account's repositories behind a spinner, then loop over the
/// language filter and the search box.
fn browse_github(
    out: &mut Stdout,
    mut browser: RepoBrowser<ApiClient>,
    palette: &Palette,
) -> Result<()> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message("Fetching repositories...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let status = browser.load();
    spinner.finish_and_clear();

    paint_browser(out, &browser, palette)?;
    if status != BrowserStatus::Ready {
        return Ok(());
    }

    loop {
        let items = vec!["Filter by language", "Search", "Back"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => {
                let controls = browser.filter_controls();
                let labels: Vec<String> = controls
                    .iter()
                    .map(|c| {
                        if c.active {
                            format!("{} *", c.filter.label())
                        } else {
                            c.filter.label().to_string()
                        }
                    })
                    .collect();
                let current = controls.iter().position(|c| c.active).unwrap_or(0);
                let picked = Select::new()
                    .with_prompt("Language")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                browser.select_language(controls[picked].filter.clone());
            }
            1 => {
                let query: String = Input::new()
                    .with_prompt("Search")
                    .allow_empty(true)
                    .interact_text()?;
                browser.set_query(&query);
            }
            _ => break,
        }
        paint_browser(out, &browser, palette)?;
    }
    Ok(())
}

fn choose_theme<S: KeyValueStore>(themes: &mut ThemeManager<S>) -> Result<()> {
    let controls = themes.controls();
    let labels: Vec<String> = controls
        .iter()
        .map(|c| {
            if c.active {
                format!("{} (active)", c.id)
            } else {
                c.id.to_string()
            }
        })
        .collect();
    let current = controls.iter().position(|c| c.active).unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Theme")
        .items(&labels)
        .default(current)
        .interact()?;
    themes.set_theme(controls[picked].id);
    Ok(())
}

/// Write the current projects and transcript as a static HTML page.
pub fn export_html<F: crate::feed::FeedSource>(
    path: &Path,
    theme: &str,
    feed: &FeedPoller<F>,
    console: &Console,
) -> Result<()> {
    let html = page_html(theme, feed.container(), console.transcript());
    std::fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("event=export status=ok path={}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::PollSchedule;
    use std::time::{Duration, Instant};

    #[test]
    fn input_between_ticks_does_not_delay_the_poll() {
        let start = Instant::now();
        let interval = Duration::from_millis(2000);
        let mut schedule = PollSchedule::new(interval, start);

        // A stream of events, one every 100 ms, each waking the loop.
        let mut polls = 0;
        for step in 1..=45 {
            let now = start + Duration::from_millis(100 * step);
            assert!(schedule.timeout(now) <= interval);
            if schedule.due(now) {
                polls += 1;
            }
        }
        assert_eq!(polls, 2);
    }

    #[test]
    fn timeout_shrinks_toward_the_next_tick() {
        let start = Instant::now();
        let mut schedule = PollSchedule::new(Duration::from_millis(2000), start);

        assert_eq!(
            schedule.timeout(start + Duration::from_millis(500)),
            Duration::from_millis(1500)
        );
        assert!(!schedule.due(start + Duration::from_millis(1999)));
        assert!(schedule.due(start + Duration::from_millis(2000)));
        assert_eq!(
            schedule.timeout(start + Duration::from_millis(2500)),
            Duration::from_millis(1500)
        );
        assert_eq!(schedule.timeout(start + Duration::from_millis(9000)), Duration::ZERO);
    }
}
