//! App state and main loop: input handling, picking up new snapshots, and drawing.

use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::sync::Notify;
use tokio::time::sleep;
use tracing::debug;

use crate::presenter::Presenter;
use crate::ui::{
    chart::draw_chart,
    current::{draw_current_time, draw_current_value},
    header::draw_header,
    readings::draw_readings,
};

pub struct App {
    presenter: Presenter,
    wake: Arc<Notify>,
    interval: Duration,
    source_label: String,

    // When the last snapshot (or startup) happened, for the countdown
    last_change: Instant,
    should_quit: bool,
}

impl App {
    pub fn new(
        presenter: Presenter,
        wake: Arc<Notify>,
        interval: Duration,
        source_label: impl Into<String>,
    ) -> Self {
        Self {
            presenter,
            wake,
            interval,
            source_label: source_label.into(),
            last_change: Instant::now(),
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        // Main loop
        let res = self.event_loop(&mut terminal).await;

        // Teardown
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    self.handle_key(k);
                }
            }
            if self.should_quit {
                break;
            }

            if self.presenter.refresh() {
                self.last_change = Instant::now();
            }

            terminal.draw(|f| self.draw(f))?;

            // Tick rate
            sleep(Duration::from_millis(200)).await;
        }
        Ok(())
    }

    pub fn handle_key(&mut self, k: KeyEvent) {
        if k.kind != KeyEventKind::Press {
            return;
        }
        match k.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                debug!("refresh requested from keyboard");
                self.wake.notify_one();
            }
            _ => {}
        }
    }

    fn placeholder(&self) -> String {
        let left = self.interval.saturating_sub(self.last_change.elapsed());
        format!("waiting for first reading (next in {}s)", left.as_secs())
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, current value/time cards, table + chart
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(3), // cards
                Constraint::Min(8),    // readings + chart
            ])
            .split(area);

        draw_header(
            f,
            rows[0],
            &self.presenter.location,
            &self.source_label,
            self.interval.as_secs(),
        );

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        let value = self.presenter.display_value();
        let time = self.presenter.display_time();
        draw_current_value(f, cards[0], &self.presenter.location, value.as_deref());
        draw_current_time(f, cards[1], time.as_deref());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(40), Constraint::Min(30)])
            .split(rows[2]);

        let placeholder = self.placeholder();
        let unit = self.presenter.unit;
        draw_readings(f, body[0], &self.presenter.table_rows(), unit, &placeholder);
        let series = self.presenter.chart_series();
        draw_chart(
            f,
            body[1],
            self.presenter.snapshot(),
            series.as_ref(),
            unit,
            &placeholder,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Observation, Snapshot, Unit};
    use ratatui::backend::TestBackend;
    use tokio::sync::watch;

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn app_with(
        snap: Option<Snapshot>,
    ) -> (App, watch::Sender<Option<Arc<Snapshot>>>, Arc<Notify>) {
        let (tx, rx) = watch::channel(snap.map(Arc::new));
        let wake = Arc::new(Notify::new());
        let presenter = Presenter::new(rx, Unit::Fahrenheit, "Sydney");
        let app = App::new(presenter, Arc::clone(&wake), Duration::from_secs(30), "www.bom.gov.au");
        (app, tx, wake)
    }

    #[test]
    fn before_first_reading_shows_placeholders() {
        let (mut app, _tx, _wake) = app_with(None);
        let text = screen(&mut app);
        assert!(text.contains("Sydney"));
        assert!(text.contains("waiting for first reading"));
        assert!(text.contains("--"));
    }

    #[test]
    fn draws_value_time_and_rows() {
        let history = vec![
            Observation::new(70.0, "2024-03-01 09:00:00"),
            Observation::new(72.5, "2024-03-01 09:00:30"),
        ];
        let (mut app, _tx, _wake) = app_with(Some(Snapshot {
            latest: history[1].clone(),
            history,
        }));
        let text = screen(&mut app);
        assert!(text.contains("72.5 °F"));
        assert!(text.contains("2024-03-01 09:00:30"));
        assert!(text.contains("70.0"));
        assert!(text.contains("+2.50 °F/reading"));
    }

    #[test]
    fn single_reading_has_no_trend_series() {
        let only = Observation::new(72.5, "2024-03-01 09:00:00");
        let (mut app, _tx, _wake) = app_with(Some(Snapshot {
            history: vec![only.clone()],
            latest: only,
        }));
        let text = screen(&mut app);
        assert!(text.contains("needs 2 readings"));
        assert!(!text.contains("°F/reading"));
    }

    #[test]
    fn quit_keys() {
        let (mut app, _tx, _wake) = app_with(None);
        app.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!app.should_quit());
        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.should_quit());

        let (mut app, _tx, _wake) = app_with(None);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn r_wakes_the_sampler() {
        let (mut app, _tx, wake) = app_with(None);
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE));
        let woke = tokio::time::timeout(Duration::from_millis(100), wake.notified()).await;
        assert!(woke.is_ok());
    }
}
