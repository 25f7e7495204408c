use crate::app::{Action, AppState, View};
use crate::calendar::{CalendarDay, WEEKDAY_HEADERS};
use crate::date_key::DateKey;
use crate::overview::overview_stats;
use crate::todo::{IdSource, TodoId};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

/// Width of one day cell, e.g. ` 15• `.
const CELL_WIDTH: u16 = 5;
const CALENDAR_WIDTH: u16 = CELL_WIDTH * 7 + 2;
const CALENDAR_HEIGHT: u16 = 1 + 6 + 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Editing,
}

/// Terminal front-end around [`AppState`]: key bindings, list cursors and
/// the last drawn calendar area for mouse hits.
#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub mode: Mode,
    pub todo_cursor: usize,
    pub overview_cursor: usize,
    pub should_quit: bool,
    ids: IdSource,
    calendar_area: Option<Rect>,
}

impl App {
    pub fn new(today: DateKey) -> Self {
        Self {
            state: AppState::new(today),
            mode: Mode::Normal,
            todo_cursor: 0,
            overview_cursor: 0,
            should_quit: false,
            ids: IdSource::new(),
            calendar_area: None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        let today = self.state.today;
        let state = std::mem::replace(&mut self.state, AppState::new(today));
        self.state = state.apply(action);
        self.clamp_cursors();
    }

    fn clamp_cursors(&mut self) {
        let todos = self.state.current_todos().len();
        self.todo_cursor = self.todo_cursor.min(todos.saturating_sub(1));
        let upcoming = self.state.upcoming_todos().len();
        self.overview_cursor = self.overview_cursor.min(upcoming.saturating_sub(1));
    }

    fn select(&mut self, date: DateKey) {
        self.dispatch(Action::SelectDate(date));
        self.todo_cursor = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match self.mode {
            Mode::Editing => self.handle_editing_key(key),
            Mode::Normal => match self.state.view.current_view {
                View::Calendar => self.handle_calendar_key(key),
                View::Overview => self.handle_overview_key(key),
            },
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let before = self.state.current_todos().len();
                let id = self.ids.next_id();
                self.dispatch(Action::AddTodo { id });
                let after = self.state.current_todos().len();
                if after > before {
                    self.todo_cursor = after - 1;
                }
            }
            KeyCode::Backspace => self.dispatch(Action::InputBackspace),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.dispatch(Action::InputChar(c))
            }
            _ => {}
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.dispatch(Action::ToggleView),
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Enter => self.mode = Mode::Editing,
            KeyCode::Char('J') => self.move_todo_cursor(1),
            KeyCode::Char('K') => self.move_todo_cursor(-1),
            KeyCode::Down if shift => self.move_todo_cursor(1),
            KeyCode::Up if shift => self.move_todo_cursor(-1),
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-7),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(7),
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_todo_id() {
                    self.dispatch(Action::ToggleTodo { id, date: None });
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_todo_id() {
                    self.dispatch(Action::DeleteTodo { id, date: None });
                }
            }
            _ => {}
        }
    }

    fn handle_overview_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.dispatch(Action::ToggleView),
            KeyCode::Down | KeyCode::Char('j') => self.move_overview_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_overview_cursor(-1),
            KeyCode::Enter => {
                if let Some((id, date)) = self.selected_upcoming() {
                    self.dispatch(Action::ShowInCalendar(date));
                    self.todo_cursor = self
                        .state
                        .current_todos()
                        .iter()
                        .position(|t| t.id == id)
                        .unwrap_or(0);
                }
            }
            // Overview rows span many dates, so the todo's own date is passed.
            KeyCode::Char(' ') => {
                if let Some((id, date)) = self.selected_upcoming() {
                    self.dispatch(Action::ToggleTodo { id, date: Some(date) });
                    // The list re-sorts on completion; follow the toggled todo.
                    if let Some(pos) = self
                        .state
                        .upcoming_todos()
                        .iter()
                        .position(|u| u.todo.id == id)
                    {
                        self.overview_cursor = pos;
                    }
                }
            }
            KeyCode::Char('d') => {
                if let Some((id, date)) = self.selected_upcoming() {
                    self.dispatch(Action::DeleteTodo { id, date: Some(date) });
                }
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left)
            || self.state.view.current_view != View::Calendar
        {
            return;
        }
        if let Some(date) = self.day_at(mouse.column, mouse.row) {
            self.select(date);
        }
    }

    /// The grid day drawn at a terminal position, if any.
    fn day_at(&self, column: u16, row: u16) -> Option<DateKey> {
        let area = self.calendar_area?;
        // First inner line holds the weekday headers.
        if column < area.x || row <= area.y || row >= area.y + area.height {
            return None;
        }
        let col = usize::from((column - area.x) / CELL_WIDTH);
        if col >= 7 {
            return None;
        }
        let week = usize::from(row - area.y - 1);
        self.state.calendar().day_at(week, col).map(|d| d.key)
    }

    /// Moves the selection, but only onto days the grid shows.
    fn move_selection(&mut self, days: i64) {
        let Some(target) = self.state.view.selected_date.offset_days(days) else {
            return;
        };
        if self.state.calendar().contains(target) {
            self.select(target);
        }
    }

    fn move_todo_cursor(&mut self, delta: isize) {
        let len = self.state.current_todos().len();
        self.todo_cursor = step(self.todo_cursor, delta, len);
    }

    fn move_overview_cursor(&mut self, delta: isize) {
        let len = self.state.upcoming_todos().len();
        self.overview_cursor = step(self.overview_cursor, delta, len);
    }

    fn selected_todo_id(&self) -> Option<TodoId> {
        self.state.current_todos().get(self.todo_cursor).map(|t| t.id)
    }

    fn selected_upcoming(&self) -> Option<(TodoId, DateKey)> {
        self.state
            .upcoming_todos()
            .get(self.overview_cursor)
            .map(|u| (u.todo.id, u.todo.date))
    }
}

fn step(cursor: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (cursor as isize + delta).clamp(0, len as isize - 1) as usize
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn render(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tabs(f, app, chunks[0]);
    match app.state.view.current_view {
        View::Calendar => render_calendar_view(f, app, chunks[1]),
        View::Overview => {
            app.calendar_area = None;
            render_overview(f, app, chunks[1]);
        }
    }
    render_help(f, app, chunks[2]);
}

fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " Calendar Todo ",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    for view in [View::Calendar, View::Overview] {
        let style = if view == app.state.view.current_view {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(format!(" {} ", view.title()), style));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_calendar_view(f: &mut Frame, app: &mut App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(CALENDAR_WIDTH), Constraint::Min(20)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CALENDAR_HEIGHT), Constraint::Min(0)])
        .split(columns[0]);

    let grid = app.state.calendar();
    let block = Block::default()
        .title(grid.month_label())
        .borders(Borders::ALL);
    app.calendar_area = Some(block.inner(left[0]));

    let header: String = WEEKDAY_HEADERS.iter().map(|d| format!("{:^5}", d)).collect();
    let mut lines = vec![Line::from(Span::styled(
        header,
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    ))];
    for week in &grid.weeks {
        lines.push(Line::from(week.iter().flat_map(day_spans).collect::<Vec<_>>()));
    }
    f.render_widget(Paragraph::new(lines).block(block), left[0]);

    render_todo_pane(f, app, columns[1]);
}

fn day_spans(day: &CalendarDay) -> Vec<Span<'static>> {
    let mut style = Style::default();
    if !day.is_current_month {
        style = style.fg(Color::DarkGray);
    }
    if day.is_today {
        style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }
    if day.is_selected {
        style = style.fg(Color::White).bg(Color::Blue);
    }
    let marker = if day.has_todos {
        Span::styled("•", style.fg(Color::Green))
    } else {
        Span::styled(" ", style)
    };
    vec![
        Span::styled(format!(" {:>2}", day.day), style),
        marker,
        Span::styled(" ", style),
    ]
}

fn render_todo_pane(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!("Todos for {}", app.state.format_selected_date()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let editing = app.mode == Mode::Editing;
    let draft = &app.state.view.input_value;
    let input = if draft.is_empty() && !editing {
        Line::from(Span::styled(
            "Add a new todo...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(draft.clone())];
        if editing {
            spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
        }
        Line::from(spans)
    };
    let input_block = Block::default()
        .title("New todo")
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });
    f.render_widget(Paragraph::new(input).block(input_block), rows[0]);

    let todos = app.state.current_todos();
    if todos.is_empty() {
        let empty = Paragraph::new("No todos for this day yet. Add one above!")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(empty, rows[1]);
        return;
    }

    let items: Vec<ListItem> = todos
        .iter()
        .map(|t| ListItem::new(Line::from(todo_spans(t.completed, &t.text))))
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(app.todo_cursor));
    f.render_stateful_widget(list, rows[1], &mut list_state);
}

fn todo_spans(completed: bool, text: &str) -> Vec<Span<'static>> {
    if completed {
        vec![
            Span::raw("[x] "),
            Span::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT),
            ),
        ]
    } else {
        vec![
            Span::raw("[ ] "),
            Span::styled(text.to_string(), Style::default().fg(Color::White)),
        ]
    }
}

fn render_overview(f: &mut Frame, app: &App, area: Rect) {
    let upcoming = app.state.upcoming_todos();
    let stats = overview_stats(&upcoming);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let summary = Line::from(vec![
        Span::raw("Total "),
        Span::styled(stats.total.to_string(), bold),
        Span::raw("  Completed "),
        Span::styled(stats.completed.to_string(), bold.fg(Color::Green)),
        Span::raw("  Pending "),
        Span::styled(stats.pending.to_string(), bold.fg(Color::Yellow)),
        Span::raw("  Dates "),
        Span::styled(stats.dates_with_todos.to_string(), bold),
    ]);
    f.render_widget(
        Paragraph::new(summary).block(Block::default().title("Overview").borders(Borders::ALL)),
        rows[0],
    );

    let list_block = Block::default().title("Upcoming todos").borders(Borders::ALL);
    if upcoming.is_empty() {
        let empty = Paragraph::new("No upcoming todos.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(list_block);
        f.render_widget(empty, rows[1]);
        return;
    }

    let items: Vec<ListItem> = upcoming
        .iter()
        .map(|u| {
            let mut spans = vec![Span::styled(
                format!("{:<18}", u.label),
                Style::default().fg(Color::Cyan),
            )];
            spans.extend(todo_spans(u.todo.completed, &u.todo.text));
            ListItem::new(Line::from(spans))
        })
        .collect();
    let list = List::new(items)
        .block(list_block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(app.overview_cursor));
    f.render_stateful_widget(list, rows[1], &mut list_state);
}

fn render_help(f: &mut Frame, app: &App, area: Rect) {
    let text = match (app.mode, app.state.view.current_view) {
        (Mode::Editing, _) => "Enter add · Backspace erase · Esc done",
        (Mode::Normal, View::Calendar) => {
            "←↑↓→ day · a add · J/K pick · Space toggle · d delete · Tab overview · q quit"
        }
        (Mode::Normal, View::Overview) => {
            "j/k move · Enter show in calendar · Space toggle · d delete · Tab calendar · q quit"
        }
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
