use ratatui::widgets::TableState;

use crate::analytics::{summary_at, Summary};
use crate::dates;
use crate::models::{
    generate_id, AppData, Frequency, Priority, RoutineHabit, Task, TaskStatus,
};
use crate::storage::{load_data, save_data};
use crate::store;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(PartialEq, Clone, Copy)]
pub enum ViewMode {
    Today,
    Habits,
    Stats,
}

/// What the input buffer commits to when the user presses Enter.
pub enum PendingInput {
    None,
    NewTask,
    NewHabit(Frequency),
    /// Retitling the task with this id.
    EditTitle(String),
}

pub struct App {
    pub data: AppData,
    pub today: String,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub pending: PendingInput,
    pub task_state: TableState,
    pub habit_state: TableState,
    // Analytics cache, invalidated whenever the snapshot is replaced.
    summary: Option<Summary>,
}

impl App {
    /// Creates the app state and loads the stored snapshot.
    pub fn new() -> App {
        let data = load_data();
        let today = dates::today_string();

        let mut task_state = TableState::default();
        if !store::get_record(&data, &today).tasks.is_empty() {
            task_state.select(Some(0));
        }
        let mut habit_state = TableState::default();
        if !data.routine_habits.is_empty() {
            habit_state.select(Some(0));
        }

        App {
            data,
            today,
            view_mode: ViewMode::Today,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            pending: PendingInput::None,
            task_state,
            habit_state,
            summary: None,
        }
    }

    /// Replaces the snapshot, persists it and invalidates the analytics
    /// cache. No-op when nothing changed.
    fn apply(&mut self, next: AppData) {
        if next == self.data {
            return;
        }
        self.data = next;
        if let Err(e) = save_data(&self.data) {
            eprintln!("Failed to save data: {}", e);
        }
        self.summary = None;
        self.clamp_selection();
    }

    /// The analytics summary for the current snapshot, computed at most
    /// once per snapshot.
    pub fn summary(&mut self) -> &Summary {
        if self.summary.is_none() {
            self.summary = Some(summary_at(dates::today(), &self.data));
        }
        self.summary.as_ref().unwrap()
    }

    pub fn record(&self) -> crate::models::DailyRecord {
        store::get_record(&self.data, &self.today)
    }

    fn list_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Today => self.record().tasks.len(),
            ViewMode::Habits => self.data.routine_habits.len(),
            ViewMode::Stats => 0,
        }
    }

    fn state(&mut self) -> &mut TableState {
        match self.view_mode {
            ViewMode::Habits => &mut self.habit_state,
            _ => &mut self.task_state,
        }
    }

    fn clamp_selection(&mut self) {
        for view in [ViewMode::Today, ViewMode::Habits] {
            let len = match view {
                ViewMode::Today => self.record().tasks.len(),
                _ => self.data.routine_habits.len(),
            };
            let state = match view {
                ViewMode::Habits => &mut self.habit_state,
                _ => &mut self.task_state,
            };
            match state.selected() {
                _ if len == 0 => state.select(None),
                Some(i) if i >= len => state.select(Some(len - 1)),
                None => state.select(Some(0)),
                _ => {}
            }
        }
    }

    /// Selects the next item in the current list, wrapping around.
    pub fn next(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let state = self.state();
        let i = match state.selected() {
            Some(i) if i + 1 >= len => 0,
            Some(i) => i + 1,
            None => 0,
        };
        state.select(Some(i));
    }

    /// Selects the previous item in the current list, wrapping around.
    pub fn previous(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let state = self.state();
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }

    /// Cycles between the three views.
    pub fn next_view(&mut self) {
        self.view_mode = match self.view_mode {
            ViewMode::Today => ViewMode::Habits,
            ViewMode::Habits => ViewMode::Stats,
            ViewMode::Stats => ViewMode::Today,
        };
    }

    fn selected_task_id(&self) -> Option<String> {
        let idx = self.task_state.selected()?;
        self.record().tasks.get(idx).map(|t| t.id.clone())
    }

    fn selected_habit_id(&self) -> Option<String> {
        let idx = self.habit_state.selected()?;
        self.data.routine_habits.get(idx).map(|h| h.id.clone())
    }

    /// Cycles the selected task pending -> in-progress -> completed ->
    /// pending.
    pub fn cycle_selected_status(&mut self) {
        let Some(id) = self.selected_task_id() else { return };
        let next = store::update_task(&self.data, &self.today, &id, |t| {
            t.status = match t.status {
                TaskStatus::Pending => TaskStatus::InProgress,
                TaskStatus::InProgress => TaskStatus::Completed,
                TaskStatus::Completed => TaskStatus::Pending,
            };
        });
        self.apply(next);
    }

    pub fn toggle_selected_timer(&mut self) {
        let Some(id) = self.selected_task_id() else { return };
        let next = store::toggle_timer(&self.data, &self.today, &id);
        self.apply(next);
    }

    pub fn delete_selected_task(&mut self) {
        let Some(id) = self.selected_task_id() else { return };
        let next = store::delete_task(&self.data, &self.today, &id);
        self.apply(next);
    }

    /// Moves the selected task one position down (or up), keeping it
    /// selected.
    pub fn move_selected(&mut self, down: bool) {
        let Some(idx) = self.task_state.selected() else { return };
        let Some(id) = self.selected_task_id() else { return };
        let len = self.record().tasks.len();
        let target = if down {
            if idx + 1 >= len { return; }
            idx + 1
        } else {
            if idx == 0 { return; }
            idx - 1
        };
        let next = store::move_task(&self.data, &self.today, &id, target);
        self.apply(next);
        self.task_state.select(Some(target));
    }

    /// Toggles today's completion for the selected habit.
    pub fn toggle_selected_habit(&mut self) {
        let Some(id) = self.selected_habit_id() else { return };
        let next = store::toggle_completion(&self.data, &id, &self.today);
        self.apply(next);
    }

    pub fn delete_selected_habit(&mut self) {
        let Some(id) = self.selected_habit_id() else { return };
        let next = store::remove_habit(&self.data, &id);
        self.apply(next);
    }

    pub fn start_add_task(&mut self) {
        self.input_mode = InputMode::Editing;
        self.pending = PendingInput::NewTask;
        self.input_buffer.clear();
    }

    pub fn start_add_habit(&mut self, frequency: Frequency) {
        self.input_mode = InputMode::Editing;
        self.pending = PendingInput::NewHabit(frequency);
        self.input_buffer.clear();
    }

    pub fn start_edit_title(&mut self) {
        let Some(id) = self.selected_task_id() else { return };
        let idx = self.task_state.selected().unwrap_or(0);
        self.input_buffer = self
            .record()
            .tasks
            .get(idx)
            .map(|t| t.title.clone())
            .unwrap_or_default();
        self.input_mode = InputMode::Editing;
        self.pending = PendingInput::EditTitle(id);
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.pending = PendingInput::None;
        self.input_buffer.clear();
    }

    /// Commits the input buffer according to the pending action.
    pub fn handle_input(&mut self) {
        let title = self.input_buffer.trim().to_string();
        if title.is_empty() {
            self.cancel_input();
            return;
        }
        let default_category = self
            .data
            .categories
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_default();

        match std::mem::replace(&mut self.pending, PendingInput::None) {
            PendingInput::NewTask => {
                let task = Task {
                    id: generate_id(),
                    title,
                    status: TaskStatus::Pending,
                    category: default_category,
                    priority: Priority::Medium,
                    created_at: chrono::Local::now().to_rfc3339(),
                    timer_seconds: 0,
                    timer_running: false,
                };
                let next = store::add_task(&self.data, &self.today, task);
                self.apply(next);
            }
            PendingInput::NewHabit(frequency) => {
                let habit = RoutineHabit {
                    id: generate_id(),
                    title,
                    frequency,
                    category: default_category,
                    created_at: self.today.clone(),
                };
                let next = store::add_habit(&self.data, habit);
                self.apply(next);
            }
            PendingInput::EditTitle(id) => {
                let next = store::update_task(&self.data, &self.today, &id, |t| t.title = title);
                self.apply(next);
            }
            PendingInput::None => {}
        }
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }

    /// True when the 1-second tick has work to do.
    pub fn has_running_timer(&self) -> bool {
        store::has_running_timer(&self.data, &self.today)
    }

    /// Rolls the session over to the current calendar date. A session left
    /// open past midnight must tick and render the new day's record, not
    /// yesterday's.
    pub fn refresh_today(&mut self) {
        let now = dates::today_string();
        if now != self.today {
            self.today = now;
            self.summary = None;
            self.clamp_selection();
        }
    }

    /// One timer tick: advances running timers by a second and persists.
    /// Does nothing (and writes nothing) when no timer is running.
    pub fn on_tick(&mut self) {
        self.refresh_today();
        if !self.has_running_timer() {
            return;
        }
        let next = store::advance_timers(&self.data, &self.today, 1);
        self.apply(next);
    }
}
