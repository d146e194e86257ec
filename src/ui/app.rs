use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use rand::rngs::StdRng;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::config::{Config, KeyCombo};
use crate::input::{ArrayConfig, Field, InputMode};
use crate::player::{Player, PlayerState};
use crate::render::CellBoard;
use crate::trace::trace;
use crate::ui::action::Action;
use crate::ui::components::{Footer, SetupPanel, ShowPanel, ACCENT_PRIMARY, TEXT_MUTED};
use crate::ui::events::{AppEvent, Screen};
use crate::ui::terminal_guard::TerminalGuard;

/// Time between two frames of the event loop
const FRAME: Duration = Duration::from_millis(16);

/// Main application state
pub struct App {
    config: Config,
    should_quit: bool,
    screen: Screen,
    /// Setup form snapshot, edited on the setup screen
    array: ArrayConfig,
    /// Generation parameter that digits go to
    focus: Field,
    player: Player,
    board: CellBoard,
    input_values: Vec<i64>,
    sorted_values: Vec<i64>,
    total_steps: usize,
    /// Cleared once the player reports completion
    can_pause: bool,
    error: Option<String>,
    rng: StdRng,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl App {
    /// Build an app with a fixed random source, for reproducible arrays.
    pub fn with_rng(config: Config, array: ArrayConfig, rng: StdRng) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let player = Player::new(config.interval).with_on_finish(move || {
            if event_tx.send(AppEvent::PlaybackFinished).is_err() {
                tracing::debug!("App event channel closed before playback finished");
            }
        });

        Self {
            board: CellBoard::new(config.animation_duration()),
            config,
            should_quit: false,
            screen: Screen::Setup,
            array,
            focus: Field::default(),
            player,
            input_values: Vec::new(),
            sorted_values: Vec::new(),
            total_steps: 0,
            can_pause: false,
            error: None,
            rng,
            event_rx,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn board(&self) -> &CellBoard {
        &self.board
    }

    pub fn array_config(&self) -> &ArrayConfig {
        &self.array
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn input_values(&self) -> &[i64] {
        &self.input_values
    }

    pub fn sorted_values(&self) -> &[i64] {
        &self.sorted_values
    }

    pub fn can_pause(&self) -> bool {
        self.can_pause
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut guard = TerminalGuard::new();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal).await;

        guard.cleanup()?;
        terminal.show_cursor()?;
        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f, Instant::now()))?;

            tokio::select! {
                // Terminal input + playback tick
                _ = tokio::time::sleep(FRAME) => {
                    if event::poll(Duration::from_millis(0))? {
                        if let Event::Key(key) = event::read()? {
                            if key.kind == KeyEventKind::Press {
                                self.handle_key_event(key, Instant::now());
                            }
                        }
                    }
                    self.tick(Instant::now());
                }

                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Advance playback if its tick is due.
    pub fn tick(&mut self, now: Instant) {
        self.player.poll(now, &mut self.board);
    }

    /// Drain app events without blocking.
    pub fn process_pending_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_app_event(event);
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PlaybackFinished => {
                tracing::info!(steps = self.total_steps, "Show finished");
                self.can_pause = false;
            }
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) {
        let combo = KeyCombo::from_key_event(&key);
        if let Some(action) = self
            .config
            .keybindings
            .get_action(&combo, self.screen.key_context())
        {
            self.handle_action(action, now);
            return;
        }

        // Unbound printable keys type into the setup form.
        if self.screen != Screen::Setup
            || key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return;
        }
        let KeyCode::Char(c) = key.code else {
            return;
        };
        match self.array.input_mode {
            InputMode::Manual => self.array.raw_values.push(c),
            InputMode::Generate => match c {
                '-' => self.array.negate(self.focus),
                _ => match c.to_digit(10) {
                    Some(digit) => self.array.push_digit(self.focus, digit),
                    None => return,
                },
            },
        }
        self.error = None;
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::StartShow => self.start_show(now),
            Action::TogglePause => self.toggle_pause(now),
            Action::Reset => self.reset(),
            Action::ToggleInputMode => {
                self.array.input_mode = self.array.input_mode.toggle();
                self.error = None;
            }
            Action::Backspace
            | Action::ClearInput
            | Action::NextField
            | Action::PrevField
            | Action::ToggleParamMode => self.edit_setup(action),
        }
    }

    /// Form edits. Generation parameters are only editable while the
    /// generated input is selected.
    fn edit_setup(&mut self, action: Action) {
        if self.screen != Screen::Setup {
            return;
        }
        let generating = self.array.input_mode == InputMode::Generate;
        match action {
            Action::Backspace if generating => self.array.pop_digit(self.focus),
            Action::Backspace => {
                self.array.raw_values.pop();
            }
            Action::ClearInput if generating => self.array.clear_field(self.focus),
            Action::ClearInput => self.array.raw_values.clear(),
            Action::NextField if generating => self.focus = self.focus.next(),
            Action::PrevField if generating => self.focus = self.focus.prev(),
            Action::ToggleParamMode if generating => self.array.toggle_param_mode(self.focus),
            _ => return,
        }
        self.error = None;
    }

    /// Build the array from the setup form, trace it and start playback.
    pub fn start_show(&mut self, now: Instant) {
        if self.screen != Screen::Setup {
            return;
        }
        let values = match self.array.build(&self.config.array, &mut self.rng) {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot build input array");
                self.error = Some(e.to_string());
                return;
            }
        };

        let traced = trace(&values);
        self.total_steps = traced.trace.len();
        tracing::info!(
            elements = values.len(),
            steps = self.total_steps,
            swaps = traced.trace.swap_count(),
            "Starting show"
        );

        if let Err(e) = self
            .player
            .start(&values, traced.trace, &mut self.board, now)
        {
            tracing::warn!(error = %e, "Cannot start playback");
            self.error = Some(e.to_string());
            return;
        }

        self.input_values = values;
        self.sorted_values = traced.sorted;
        self.can_pause = true;
        self.error = None;
        self.screen = Screen::Show;
    }

    fn toggle_pause(&mut self, now: Instant) {
        if self.screen != Screen::Show || !self.can_pause {
            return;
        }
        if let Err(e) = self.player.toggle_pause(now) {
            tracing::warn!(error = %e, "Pause toggle rejected");
        }
    }

    /// Stop playback and go back to the setup screen.
    pub fn reset(&mut self) {
        self.player.reset(&mut self.board);
        self.input_values.clear();
        self.sorted_values.clear();
        self.total_steps = 0;
        self.can_pause = false;
        self.screen = Screen::Setup;
    }

    pub fn draw(&self, f: &mut Frame, now: Instant) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(f.area());

        let header = Line::from(vec![
            Span::styled(
                "bubbleshow",
                Style::default()
                    .fg(ACCENT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  bubble sort, one step at a time", Style::default().fg(TEXT_MUTED)),
        ]);
        f.render_widget(Paragraph::new(header), header_area);

        let keys = &self.config.keybindings;
        match self.screen {
            Screen::Setup => {
                f.render_widget(
                    SetupPanel::new(&self.array, &self.config.array)
                        .focus(self.focus)
                        .error(self.error()),
                    body_area,
                );
                f.render_widget(Footer::setup(keys, self.array.input_mode), footer_area);
            }
            Screen::Show => {
                f.render_widget(
                    ShowPanel::new(
                        &self.input_values,
                        &self.sorted_values,
                        &self.board,
                        &self.player,
                        self.total_steps,
                        now,
                    ),
                    body_area,
                );
                let can_pause = self.can_pause && self.player.state() != PlayerState::Finished;
                f.render_widget(Footer::show(keys, can_pause), footer_area);
            }
        }
    }
}
