use std::io;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use regex::Regex;

use crate::config::Resolved;
use crate::model::{CalendarScale, Priority, TaskStore, ViewKind};
use crate::ops::{self, FilterSet};
use crate::sync::{Bridge, SessionLock, SyncEvent};
use crate::view::{self, Carry, KanbanBoard};

use super::input;
use super::render;
use super::theme::Theme;

/// How long a toast stays on screen
const TOAST_TTL: Duration = Duration::from_secs(4);

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search,
    Filter,
    Move,
    Form,
    Detail,
    Confirm,
    Settings,
}

/// Header sync indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// No remote configured
    Offline,
    /// Last push confirmed by the server
    Synced,
    /// Cache written, push pending or in flight
    Pending,
    /// Cache written, last push failed
    LocalOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// Transient message in the status row
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub expires: Instant,
}

/// Fields of the detail editor, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Title,
    Project,
    Assignee,
    Status,
    Priority,
    Deadline,
    Progress,
    Effort,
    NextAction,
    Notes,
}

impl DetailField {
    pub const ALL: [DetailField; 10] = [
        DetailField::Title,
        DetailField::Project,
        DetailField::Assignee,
        DetailField::Status,
        DetailField::Priority,
        DetailField::Deadline,
        DetailField::Progress,
        DetailField::Effort,
        DetailField::NextAction,
        DetailField::Notes,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DetailField::Title => "title",
            DetailField::Project => "project",
            DetailField::Assignee => "assignee",
            DetailField::Status => "status",
            DetailField::Priority => "priority",
            DetailField::Deadline => "deadline",
            DetailField::Progress => "progress",
            DetailField::Effort => "effort",
            DetailField::NextAction => "next action",
            DetailField::Notes => "notes",
        }
    }

    /// Current value of this field, as the edit buffer / display string
    pub fn value(self, task: &crate::model::Task) -> String {
        match self {
            DetailField::Title => task.title.clone(),
            DetailField::Project => task.project.clone(),
            DetailField::Assignee => task.assignee.clone(),
            DetailField::Status => task.status.label().to_string(),
            DetailField::Priority => task.priority.label().to_string(),
            DetailField::Deadline => task
                .deadline
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            DetailField::Progress => format!("{}%", task.progress),
            DetailField::Effort => task.effort.label().to_string(),
            DetailField::NextAction => task.next_action.clone(),
            DetailField::Notes => task.notes.clone(),
        }
    }

    /// Text fields open an edit buffer on Enter; the rest cycle with h/l
    pub fn is_text(self) -> bool {
        matches!(
            self,
            DetailField::Title
                | DetailField::Project
                | DetailField::Assignee
                | DetailField::Deadline
                | DetailField::NextAction
                | DetailField::Notes
        )
    }
}

/// Open detail editor
#[derive(Debug, Clone)]
pub struct DetailState {
    pub task_id: String,
    pub field: usize,
    /// Some while a text field is being edited
    pub edit: Option<String>,
}

/// Fields of the new-task form, in tab order
pub const FORM_FIELDS: [&str; 6] = ["title", "project", "assignee", "priority", "deadline", "notes"];

/// New-task form (full form on `n`, quick add on Ctrl+K)
#[derive(Debug, Clone)]
pub struct FormState {
    /// Quick add: title only, everything else defaulted
    pub quick: bool,
    pub field: usize,
    pub title: String,
    pub project: String,
    pub assignee: String,
    pub priority: Priority,
    pub deadline: String,
    pub notes: String,
    pub error: Option<String>,
}

impl FormState {
    pub fn new(quick: bool) -> Self {
        FormState {
            quick,
            field: 0,
            title: String::new(),
            project: String::new(),
            assignee: String::new(),
            priority: Priority::P2,
            deadline: String::new(),
            notes: String::new(),
            error: None,
        }
    }
}

/// Pending destructive action awaiting confirmation
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteTask { task_id: String },
}

#[derive(Debug, Clone)]
pub struct ConfirmState {
    pub action: ConfirmAction,
    pub message: String,
}

/// Which reference list a settings "add" prompt targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefList {
    Projects,
    Assignees,
}

/// One selectable row of the settings overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsRow {
    Theme,
    DefaultView,
    DefaultCalendarView,
    Project(usize),
    AddProject,
    Assignee(usize),
    AddAssignee,
}

#[derive(Debug, Clone)]
pub struct SettingsState {
    pub cursor: usize,
    /// Some while typing a new reference name
    pub adding: Option<(RefList, String)>,
}

/// Main application state. The store is the single source of truth; every
/// piece of derived state (visible set, board, cursors) is recomputed from
/// it after each mutation.
pub struct App {
    pub store: TaskStore,
    pub bridge: Bridge,
    pub view: ViewKind,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    /// Refreshed every tick so badges roll over at midnight
    pub today: NaiveDate,
    /// Indices into `store.tasks` — the current visible set
    pub visible: Vec<usize>,
    /// Last-known filter selection; reapplied when search clears
    pub filters: FilterSet,
    pub search_input: String,
    /// Committed search query; overrides filters while set
    pub active_query: Option<String>,

    // Kanban cursor + move mode
    pub kanban_col: usize,
    pub kanban_row: usize,
    pub carry: Option<Carry>,

    // List cursor
    pub list_cursor: usize,
    /// Flat table variant instead of project groups
    pub list_table: bool,

    // Calendar
    pub cal_cursor: NaiveDate,
    pub cal_scale: CalendarScale,

    // Overlays
    pub show_help: bool,
    pub detail: Option<DetailState>,
    pub form: Option<FormState>,
    pub confirm: Option<ConfirmState>,
    pub settings: Option<SettingsState>,
    /// Filter bar field cursor (0 assignee, 1 project, 2 priority)
    pub filter_field: usize,

    pub toast: Option<Toast>,
    pub sync_status: SyncStatus,
}

impl App {
    pub fn new(store: TaskStore, bridge: Bridge, warning: Option<String>) -> Self {
        let theme = Theme::for_kind(store.settings.theme);
        let view = store.settings.default_view;
        let cal_scale = store.settings.default_calendar_view;
        let today = Local::now().date_naive();
        let sync_status = if bridge.offline() {
            SyncStatus::Offline
        } else {
            SyncStatus::Pending
        };

        let mut app = App {
            store,
            bridge,
            view,
            mode: Mode::Normal,
            should_quit: false,
            theme,
            today,
            visible: Vec::new(),
            filters: FilterSet::default(),
            search_input: String::new(),
            active_query: None,
            kanban_col: 1, // todo column
            kanban_row: 0,
            carry: None,
            list_cursor: 0,
            list_table: false,
            cal_cursor: today,
            cal_scale,
            show_help: false,
            detail: None,
            form: None,
            confirm: None,
            settings: None,
            filter_field: 0,
            toast: None,
            sync_status,
        };
        app.refresh_visible();
        if let Some(warning) = warning {
            app.show_toast(warning, ToastKind::Error);
        }
        app
    }

    /// Recompute the visible set. Search overrides filters while active;
    /// clearing it reapplies the last-known filter selection.
    pub fn refresh_visible(&mut self) {
        self.visible = match &self.active_query {
            Some(query) => ops::search(&self.store, query),
            None => ops::apply_filters(&self.store, &self.filters),
        };
        self.clamp_cursors();
    }

    /// Persist through the bridge (cache now, remote debounced)
    pub fn save(&mut self, immediate: bool) {
        self.bridge.save(&self.store, immediate);
        if !self.bridge.offline() {
            self.sync_status = SyncStatus::Pending;
        }
    }

    pub fn show_toast(&mut self, text: impl Into<String>, kind: ToastKind) {
        self.toast = Some(Toast {
            text: text.into(),
            kind,
            expires: Instant::now() + TOAST_TTL,
        });
    }

    /// The matcher used for highlight spans: the query being typed in
    /// Search mode, otherwise the committed query.
    pub fn active_search_re(&self) -> Option<Regex> {
        let query = match self.mode {
            Mode::Search if !self.search_input.is_empty() => &self.search_input,
            _ => self.active_query.as_deref()?,
        };
        ops::search_regex(query)
    }

    /// Project the current board, including any move-mode preview
    pub fn board(&self) -> KanbanBoard {
        view::project_kanban(&self.store, &self.visible, self.carry.as_ref())
    }

    /// Visible task indices in list display order (grouped or flat)
    pub fn list_rows(&self) -> Vec<usize> {
        if self.list_table {
            view::project_table(&self.store, &self.visible)
        } else {
            view::project_grouped(&self.store, &self.visible)
                .into_iter()
                .flat_map(|g| g.rows)
                .collect()
        }
    }

    /// Store index of the task under the cursor in the active view
    pub fn selected_task_idx(&self) -> Option<usize> {
        match self.view {
            ViewKind::Kanban => {
                let board = self.board();
                board.columns[self.kanban_col].cards.get(self.kanban_row).copied()
            }
            ViewKind::List => self.list_rows().get(self.list_cursor).copied(),
            ViewKind::Calendar => {
                view::project_day(&self.store, &self.visible, self.cal_cursor, self.today)
                    .tasks
                    .first()
                    .copied()
            }
        }
    }

    pub fn selected_task_id(&self) -> Option<String> {
        self.selected_task_idx()
            .and_then(|idx| self.store.tasks.get(idx))
            .map(|t| t.id.clone())
    }

    /// Keep cursors inside the current projections
    pub fn clamp_cursors(&mut self) {
        let board = self.board();
        self.kanban_col = self.kanban_col.min(4);
        let col_len = board.columns[self.kanban_col].cards.len();
        self.kanban_row = self.kanban_row.min(col_len.saturating_sub(1));

        let rows = self.list_rows().len();
        self.list_cursor = self.list_cursor.min(rows.saturating_sub(1));
    }

    /// Move the kanban cursor to a specific task, if it is on the board
    pub fn focus_task(&mut self, task_idx: usize) {
        if let Some((col, row)) = self.board().position_of(task_idx) {
            self.kanban_col = col;
            self.kanban_row = row;
        }
        if let Some(row) = self.list_rows().iter().position(|&i| i == task_idx) {
            self.list_cursor = row;
        }
    }

    /// Rows of the settings overlay, recomputed against the store
    pub fn settings_rows(&self) -> Vec<SettingsRow> {
        let mut rows = vec![
            SettingsRow::Theme,
            SettingsRow::DefaultView,
            SettingsRow::DefaultCalendarView,
        ];
        for i in 0..self.store.projects.len() {
            rows.push(SettingsRow::Project(i));
        }
        rows.push(SettingsRow::AddProject);
        for i in 0..self.store.assignees.len() {
            rows.push(SettingsRow::Assignee(i));
        }
        rows.push(SettingsRow::AddAssignee);
        rows
    }
}

/// Run the TUI application
pub fn run(resolved: &Resolved) -> Result<(), Box<dyn std::error::Error>> {
    let _lock = SessionLock::acquire_default(&resolved.data_dir)?;
    let bridge = Bridge::new(resolved.data_dir.clone(), resolved.api_url.as_deref())?;

    // Startup gate: the only blocking network call besides the final flush
    let outcome = bridge.load();
    let mut app = App::new(outcome.store, bridge, outcome.warning);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore the terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Final flush bounds data loss to nothing on a clean quit
    app.bridge.flush_blocking(&mut app.store);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        tick(app);

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Non-key work per loop iteration: debounce deadlines, push completions,
/// toast expiry, and the date rollover.
fn tick(app: &mut App) {
    app.today = Local::now().date_naive();
    app.bridge.tick(&app.store);

    for event in app.bridge.poll_events() {
        match event {
            SyncEvent::Pushed { last_sync } => {
                app.store.mark_synced(last_sync);
                app.sync_status = SyncStatus::Synced;
            }
            SyncEvent::PushFailed { .. } => {
                app.sync_status = SyncStatus::LocalOnly;
                app.show_toast(
                    "remote unreachable — changes saved locally",
                    ToastKind::Error,
                );
            }
        }
    }

    if let Some(toast) = &app.toast
        && Instant::now() >= toast.expires
    {
        app.toast = None;
    }
}
