//! Dashboard application state and event loop.
//!
//! The portfolio is scored once on startup. Filtering only narrows the
//! table and chart; the KPI row always reflects the full portfolio.

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use revenue_core::{
    engine::{Portfolio, PortfolioView, RevenueEngine},
    export,
    scoring::{ChurnDrivers, ScoredAccount},
    summary::TierFilter,
};

use super::ui;

const PAGE_SIZE: usize = 10;

pub struct App {
    engine:      RevenueEngine,
    portfolio:   Portfolio,
    filter:      TierFilter,
    selected:    Option<usize>,
    status:      Option<String>,
    should_quit: bool,
}

impl App {
    pub fn new(engine: RevenueEngine, portfolio: Portfolio) -> Self {
        let mut app = Self {
            engine,
            portfolio,
            filter: TierFilter::All,
            selected: None,
            status: None,
            should_quit: false,
        };
        app.reset_selection();
        app
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub fn filter(&self) -> TierFilter {
        self.filter
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn view(&self) -> PortfolioView<'_> {
        self.portfolio.view(self.filter)
    }

    pub fn selected_account(&self) -> Option<&ScoredAccount> {
        let index = self.selected?;
        self.view().rows.get(index).copied()
    }

    pub fn drivers(&self, account: &ScoredAccount) -> ChurnDrivers {
        self.engine.scorer().drivers(&account.account)
    }

    pub fn set_filter(&mut self, filter: TierFilter) {
        if self.filter != filter {
            log::debug!("dashboard: filter {} -> {}", self.filter, filter);
            self.filter = filter;
            self.reset_selection();
        }
    }

    fn visible_rows(&self) -> usize {
        self.filter.apply(&self.portfolio.accounts).len()
    }

    fn reset_selection(&mut self) {
        self.selected = if self.visible_rows() == 0 { None } else { Some(0) };
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_rows();
        if len == 0 {
            self.selected = None;
            return;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1);
        self.selected = Some(next as usize);
    }

    fn export(&mut self) {
        let path = self.engine.config.report.csv_path.clone();
        self.status = Some(match export::export_csv(&path, &self.portfolio.accounts) {
            Ok(rows) => format!("Exported {rows} rows to {path}"),
            Err(e) => {
                log::warn!("dashboard: export failed: {e}");
                format!("Export failed: {e}")
            }
        });
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.set_filter(self.filter.next()),
            KeyCode::BackTab | KeyCode::Left => self.set_filter(self.filter.previous()),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                self.set_filter(TierFilter::OPTIONS[index]);
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(PAGE_SIZE as isize),
            KeyCode::PageUp => self.move_selection(-(PAGE_SIZE as isize)),
            KeyCode::Home => self.move_selection(isize::MIN / 2),
            KeyCode::End => self.move_selection(isize::MAX / 2),
            KeyCode::Char('e') => self.export(),
            _ => {}
        }
    }

    /// Take over the terminal until the user quits. Every setup step that
    /// succeeded is undone on the way out, whichever later step failed.
    pub fn run(&mut self) -> Result<()> {
        bracket(
            || Ok(enable_raw_mode()?),
            || {
                bracket(
                    || Ok(execute!(io::stdout(), EnterAlternateScreen)?),
                    || {
                        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
                        let result = self.main_loop(&mut terminal);
                        let shown = terminal.show_cursor();
                        result?;
                        Ok(shown?)
                    },
                    || Ok(execute!(io::stdout(), LeaveAlternateScreen)?),
                )
            },
            || Ok(disable_raw_mode()?),
        )
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        while !self.should_quit() {
            terminal.draw(|f| ui::render(f, self))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Run `body` between `enter` and `leave`. `leave` runs whenever `enter`
/// succeeded; the first error is the one returned.
fn bracket<T>(
    enter: impl FnOnce() -> Result<()>,
    body: impl FnOnce() -> Result<T>,
    leave: impl FnOnce() -> Result<()>,
) -> Result<T> {
    enter()?;
    let result = body();
    let left = leave();
    let value = result?;
    left?;
    Ok(value)
}
