//! # Dayflow
//!
//! A terminal personal productivity tracker. Dayflow logs daily tasks, tracks
//! recurring habits with streaks, and derives analytics (productivity scores,
//! weekly trends, a 90-day heatmap) from a single JSON snapshot.
//!
//! ## Features
//!
//! *   **Daily records**: tasks are grouped by calendar day; each day gets a
//!     0–100 productivity score from its completion ratio.
//! *   **Habits & streaks**: daily or weekday-only habits with current
//!     streak, longest streak and consistency percentage. A weekday habit
//!     never breaks its streak over a weekend.
//! *   **Analytics**: last-30-days score series, 4-week averages, monthly
//!     average, best day of week, weekly completion rate, 90-day heatmap.
//! *   **Task timers**: per-task stopwatches, ticked once a second while the
//!     TUI is open.
//! *   **Dual interface**: a scriptable CLI and an interactive TUI dashboard.
//! *   **Data persistence**: one JSON snapshot in the XDG data directory;
//!     import/export of the full snapshot.
//!
//! ## Usage
//!
//! ### Interactive mode (TUI)
//!
//! ```bash
//! dayflow
//! # or explicitly
//! dayflow ui
//! ```
//!
//! #### TUI key bindings
//!
//! **Global**
//! *   `q`: Quit
//! *   `Tab`: Switch view (Today / Habits / Stats)
//!
//! **Today view**
//! *   `a`: Add task
//! *   `Space`: Cycle task status
//! *   `e`: Edit title
//! *   `t`: Start/stop timer
//! *   `J`/`K`: Move task down/up
//! *   `d`: Delete task
//!
//! **Habits view**
//! *   `a`: Add habit (daily), `w`: Add habit (weekdays)
//! *   `Space`: Toggle today's completion
//! *   `d`: Delete habit
//!
//! ### Command line
//!
//! ```bash
//! # Tasks (today by default, --date YYYY-MM-DD for another day)
//! dayflow add "Write report" --category Work --priority high
//! dayflow list
//! dayflow done <ID>
//! dayflow start <ID>
//! dayflow move <ID> 0
//! dayflow timer <ID>
//!
//! # Habits
//! dayflow habit add "Morning run" --frequency weekdays
//! dayflow habit list
//! dayflow habit done <ID>
//!
//! # Analytics
//! dayflow stats
//! dayflow heatmap
//!
//! # Data
//! dayflow export --output backup.json
//! dayflow import backup.json
//! ```
//!
//! ## Data storage
//!
//! The snapshot lives in your local data directory:
//! *   Linux: `~/.local/share/dayflow/data.json`
//! *   macOS: `~/Library/Application Support/dayflow/data.json`
//! *   Windows: `%APPDATA%\dayflow\data.json`
//!
//! Override the location with the `DAYFLOW_DB` environment variable. A
//! missing or corrupt file silently starts from an empty snapshot.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use dayflow::commands::*;
use dayflow::tui::run_tui;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dayflow")]
#[command(about = "Terminal personal productivity tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task to a day (today by default)
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Category tag name
        #[arg(short, long)]
        category: Option<String>,
        /// Priority (high, medium, low)
        #[arg(short, long)]
        priority: Option<String>,
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List a day's tasks and its productivity score
    List {
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Mark a task as completed
    Done {
        id: String,
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Mark a task as in progress
    Start {
        id: String,
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Set a task's status explicitly
    Status {
        id: String,
        /// New status (pending, in-progress, completed)
        status: String,
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Edit a task
    Edit {
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New priority
        #[arg(short, long)]
        priority: Option<String>,
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove a task
    Remove {
        id: String,
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Move a task to a new position within its day
    Move {
        id: String,
        /// Zero-based target position
        position: usize,
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Start or stop a task's timer
    Timer {
        id: String,
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Manage habits
    Habit {
        #[command(subcommand)]
        command: HabitCommands,
    },
    /// Manage category tags
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Show the analytics summary
    Stats {
        /// Emit the full summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the 90-day activity heatmap
    Heatmap,
    /// Set the color theme (dark, light)
    Theme { theme: String },
    /// Export the full snapshot as pretty-printed JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a snapshot from a JSON file
    Import { file: PathBuf },
    /// Reset the database (delete all data)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
    /// Open interactive TUI
    Ui,
}

#[derive(Subcommand)]
enum HabitCommands {
    /// Add a new habit
    Add {
        /// Habit title
        title: String,
        /// Frequency (daily, weekdays)
        #[arg(short, long, default_value = "daily")]
        frequency: String,
        /// Category tag name
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List habits with streak statistics
    List,
    /// Toggle a habit completion for a date (today by default)
    Done {
        id: String,
        /// Date in YYYY-MM-DD
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Remove a habit and its completions
    Remove { id: String },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// Add a category tag
    Add {
        /// Category name (unique)
        name: String,
        /// Hex color, e.g. #6366f1
        #[arg(short, long, default_value = "#6366f1")]
        color: String,
    },
    /// List category tags
    List,
    /// Remove a category tag (references on tasks/habits are kept)
    Remove { name: String },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Add { title, category, priority, date }) => {
            cmd_add(title, category, priority, date, false)
        }
        Some(Commands::List { date }) => cmd_list(date),
        Some(Commands::Done { id, date }) => cmd_status(id, "completed".into(), date, false),
        Some(Commands::Start { id, date }) => cmd_status(id, "in-progress".into(), date, false),
        Some(Commands::Status { id, status, date }) => cmd_status(id, status, date, false),
        Some(Commands::Edit { id, title, category, priority, date }) => {
            cmd_edit(id, title, category, priority, date, false)
        }
        Some(Commands::Remove { id, date }) => cmd_remove(id, date, false),
        Some(Commands::Move { id, position, date }) => cmd_move(id, position, date, false),
        Some(Commands::Timer { id, date }) => cmd_timer(id, date, false),
        Some(Commands::Habit { command }) => match command {
            HabitCommands::Add { title, frequency, category } => {
                cmd_habit_add(title, frequency, category, false)
            }
            HabitCommands::List => cmd_habit_list(),
            HabitCommands::Done { id, date } => cmd_habit_done(id, date, false),
            HabitCommands::Remove { id } => cmd_habit_remove(id, false),
        },
        Some(Commands::Category { command }) => match command {
            CategoryCommands::Add { name, color } => cmd_category_add(name, color, false),
            CategoryCommands::List => cmd_category_list(),
            CategoryCommands::Remove { name } => cmd_category_remove(name, false),
        },
        Some(Commands::Stats { json }) => cmd_stats(json),
        Some(Commands::Heatmap) => cmd_heatmap(),
        Some(Commands::Theme { theme }) => cmd_theme(theme, false),
        Some(Commands::Export { output }) => cmd_export(output, false),
        Some(Commands::Import { file }) => cmd_import(file, false),
        Some(Commands::Reset { force }) => cmd_reset(force),
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "dayflow", &mut io::stdout());
        }
        Some(Commands::Ui) | None => {
            if let Err(e) = run_tui() {
                eprintln!("Error running TUI: {}", e);
            }
        }
    }
}
