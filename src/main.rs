//! life-log — chat-based life organizer CLI
//!
//! # Subcommands
//! - `chat <message...>`  — talk to the assistant, updating today's record
//! - `log [fields]`       — set day fields directly, no chat involved
//! - `show [--date]`      — print one day's record
//! - `goals [targets]`    — adjust a day's target times
//! - `dashboard`          — habit metrics across all recorded days

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use life_log::assistant::Assistant;
use life_log::clock;
use life_log::config::AppConfig;
use life_log::metrics::DashboardSummary;
use life_log::models::{DayGoals, DayPatch, DayRecord, MealEntry, Mood, WorkoutEntry, WorkoutStatus};
use life_log::store::DayStore;

/// ---------------------------------------------------------------------------
/// CLI Definition
/// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "life-log", version, about = "Chat-based life organizer")]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
  /// Send a chat message to the assistant
  Chat {
    /// Message text; multiple words are joined with spaces
    #[arg(required = true)]
    message: Vec<String>,
  },

  /// Set fields on a day record directly
  Log(LogArgs),

  /// Print one day's record
  Show {
    /// Day to show, defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
  },

  /// Adjust a day's target times
  Goals(GoalsArgs),

  /// Habit metrics across all recorded days
  Dashboard,
}

#[derive(Debug, Args)]
struct LogArgs {
  /// Day to update, defaults to today
  #[arg(long)]
  date: Option<NaiveDate>,

  /// Wake time, e.g. "7:30 am" or "07:30"
  #[arg(long, value_parser = parse_clock_time)]
  wake: Option<String>,

  /// Workout time
  #[arg(long, value_parser = parse_clock_time)]
  workout_time: Option<String>,

  /// Workout status
  #[arg(long)]
  workout_status: Option<WorkoutStatusArg>,

  /// Lunch time
  #[arg(long, value_parser = parse_clock_time)]
  lunch_time: Option<String>,

  /// Lunch description
  #[arg(long)]
  lunch_details: Option<String>,

  /// Dinner time
  #[arg(long, value_parser = parse_clock_time)]
  dinner_time: Option<String>,

  /// Dinner description
  #[arg(long)]
  dinner_details: Option<String>,

  /// Mood for the day
  #[arg(long)]
  mood: Option<MoodArg>,

  /// Append a note line
  #[arg(long)]
  note: Option<String>,
}

#[derive(Debug, Args)]
struct GoalsArgs {
  /// Day to update, defaults to today
  #[arg(long)]
  date: Option<NaiveDate>,

  #[arg(long, value_parser = parse_clock_time)]
  wake: Option<String>,

  #[arg(long, value_parser = parse_clock_time)]
  workout: Option<String>,

  #[arg(long, value_parser = parse_clock_time)]
  lunch: Option<String>,

  #[arg(long, value_parser = parse_clock_time)]
  dinner: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MoodArg {
  Low,
  Neutral,
  High,
}

impl From<MoodArg> for Mood {
  fn from(arg: MoodArg) -> Self {
    match arg {
      MoodArg::Low => Mood::Low,
      MoodArg::Neutral => Mood::Neutral,
      MoodArg::High => Mood::High,
    }
  }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WorkoutStatusArg {
  Pending,
  Done,
  Skipped,
  Intended,
}

impl From<WorkoutStatusArg> for WorkoutStatus {
  fn from(arg: WorkoutStatusArg) -> Self {
    match arg {
      WorkoutStatusArg::Pending => WorkoutStatus::Pending,
      WorkoutStatusArg::Done => WorkoutStatus::Done,
      WorkoutStatusArg::Skipped => WorkoutStatus::Skipped,
      WorkoutStatusArg::Intended => WorkoutStatus::Intended,
    }
  }
}

/// Accepts anything the clock parser understands, stores canonical `HH:MM`.
fn parse_clock_time(raw: &str) -> Result<String, String> {
  clock::normalize(raw).ok_or_else(|| format!("not a clock time: {:?} (try \"7:30 am\" or \"19:30\")", raw))
}

/// ---------------------------------------------------------------------------
/// Command Handlers
/// ---------------------------------------------------------------------------

async fn run_chat(store: &DayStore, today: NaiveDate, words: Vec<String>) {
  let message = words.join(" ");
  let turn = Assistant::new(store).handle_message(today, &message).await;
  println!("{}", turn.reply);
}

async fn run_log(store: &DayStore, today: NaiveDate, args: LogArgs) {
  let date = args.date.unwrap_or(today);
  let current = store.load_day(date).await.unwrap_or_default();

  let workout = match (args.workout_time, args.workout_status) {
    (None, None) => None,
    (time, status) => {
      // A lone time keeps the stored status; a lone status keeps the
      // stored time, falling back to the day's goal
      let stored = current.workout.as_ref();
      let time = time
        .or_else(|| stored.map(|w| w.time.clone()))
        .unwrap_or_else(|| current.effective_goals().workout_goal);
      let status = status
        .map(WorkoutStatus::from)
        .or_else(|| stored.map(|w| w.status))
        .unwrap_or(WorkoutStatus::Pending);
      Some(WorkoutEntry { time, status })
    }
  };

  let lunch = merge_meal(current.lunch.as_ref(), args.lunch_time, args.lunch_details);
  let dinner = merge_meal(current.dinner.as_ref(), args.dinner_time, args.dinner_details);

  let notes = args.note.map(|line| match current.notes.as_deref() {
    Some(prior) if !prior.trim().is_empty() => format!("{}\n{}", prior, line),
    _ => line,
  });

  let patch = DayPatch {
    wake_time: args.wake,
    workout,
    lunch,
    dinner,
    notes,
    mood: args.mood.map(Mood::from),
    goals: None,
  };

  if patch.is_empty() {
    eprintln!("life-log: nothing to log, pass at least one field (see life-log log --help)");
    std::process::exit(1);
  }

  let record = store.upsert(date, patch).await;
  println!("{}", render_record(date, &record));
}

fn merge_meal(
  stored: Option<&MealEntry>,
  time: Option<String>,
  details: Option<String>,
) -> Option<MealEntry> {
  if time.is_none() && details.is_none() {
    return None;
  }
  let base = stored.cloned().unwrap_or_default();
  Some(MealEntry {
    time: time.unwrap_or(base.time),
    details: details.unwrap_or(base.details),
  })
}

async fn run_show(store: &DayStore, date: NaiveDate) {
  match store.load_day(date).await {
    Some(record) => println!("{}", render_record(date, &record)),
    None => println!("No entry for {}.", date),
  }
}

async fn run_goals(store: &DayStore, today: NaiveDate, args: GoalsArgs) {
  let date = args.date.unwrap_or(today);

  if args.wake.is_none() && args.workout.is_none() && args.lunch.is_none() && args.dinner.is_none() {
    let record = store.load_day(date).await.unwrap_or_default();
    println!("{}", render_goals(date, &record.effective_goals()));
    return;
  }

  let current = store.load_day(date).await.unwrap_or_default();
  let mut goals = current.effective_goals();
  if let Some(wake) = args.wake {
    goals.wake_goal = wake;
  }
  if let Some(workout) = args.workout {
    goals.workout_goal = workout;
  }
  if let Some(lunch) = args.lunch {
    goals.lunch_time = lunch;
  }
  if let Some(dinner) = args.dinner {
    goals.dinner_time = dinner;
  }

  let record = store
    .upsert(
      date,
      DayPatch {
        goals: Some(goals),
        ..Default::default()
      },
    )
    .await;
  println!("{}", render_goals(date, &record.effective_goals()));
}

async fn run_dashboard(store: &DayStore, today: NaiveDate) {
  let days = store.load_all().await;
  let summary = DashboardSummary::compute(&days, today);
  println!("{}", render_dashboard(&summary, store));
}

/// ---------------------------------------------------------------------------
/// Rendering
/// ---------------------------------------------------------------------------

fn render_record(date: NaiveDate, record: &DayRecord) -> String {
  let goals = record.effective_goals();
  let mut out = format!("{}\n", date);

  out.push_str(&format!(
    "  Wake:     {} (goal {})\n",
    record.wake_time.as_deref().unwrap_or("-"),
    goals.wake_goal
  ));

  match &record.workout {
    Some(workout) => {
      out.push_str(&format!("  Workout:  {} {}\n", workout.time, workout.status.as_str()))
    }
    None => out.push_str(&format!("  Workout:  - (goal {})\n", goals.workout_goal)),
  }

  out.push_str(&format!("  Lunch:    {}\n", render_meal(record.lunch.as_ref())));
  out.push_str(&format!("  Dinner:   {}\n", render_meal(record.dinner.as_ref())));

  out.push_str(&format!(
    "  Mood:     {}\n",
    record.mood.map(|m| m.as_str()).unwrap_or("-")
  ));

  match &record.notes {
    Some(notes) if !notes.is_empty() => {
      out.push_str("  Notes:\n");
      for line in notes.lines() {
        out.push_str(&format!("    {}\n", line));
      }
    }
    _ => out.push_str("  Notes:    -\n"),
  }

  out.trim_end().to_string()
}

fn render_meal(meal: Option<&MealEntry>) -> String {
  match meal {
    Some(meal) if meal.details.is_empty() => meal.time.clone(),
    Some(meal) if meal.time.is_empty() => meal.details.clone(),
    Some(meal) => format!("{} {}", meal.time, meal.details),
    None => "-".to_string(),
  }
}

fn render_goals(date: NaiveDate, goals: &DayGoals) -> String {
  format!(
    "Goals for {}\n  Wake:     {}\n  Workout:  {}\n  Lunch:    {}\n  Dinner:   {}",
    date, goals.wake_goal, goals.workout_goal, goals.lunch_time, goals.dinner_time
  )
}

fn render_dashboard(summary: &DashboardSummary, store: &DayStore) -> String {
  let completion = summary
    .workout_completion_pct
    .map(|pct| format!("{:.0}%", pct))
    .unwrap_or_else(|| "-".to_string());
  let average_wake = summary.average_wake_time.as_deref().unwrap_or("-");
  let planned = summary.workouts.pending + summary.workouts.intended;

  format!(
    "Life log dashboard ({} backend)\n\
     Data file:       {}\n\
     Days logged:     {}\n\
     Current streak:  {} day(s)\n\
     Workouts:        {} done / {} skipped / {} planned\n\
     Completion:      {}\n\
     Mood:            {} high / {} neutral / {} low\n\
     Average wake:    {}",
    store.backend(),
    store.local_path().display(),
    summary.days_logged,
    summary.streak_days,
    summary.workouts.done,
    summary.workouts.skipped,
    planned,
    completion,
    summary.moods.high,
    summary.moods.neutral,
    summary.moods.low,
    average_wake
  )
}

/// ---------------------------------------------------------------------------
/// Main
/// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  env_logger::init();

  let cli = Cli::parse();
  let config = AppConfig::from_env();
  let store = DayStore::from_config(&config);
  let today = chrono::Local::now().date_naive();

  // First run gets a starter record so every view has something to show
  store.seed_if_empty(today).await;

  match cli.command {
    Commands::Chat { message } => run_chat(&store, today, message).await,
    Commands::Log(args) => run_log(&store, today, args).await,
    Commands::Show { date } => run_show(&store, date.unwrap_or(today)).await,
    Commands::Goals(args) => run_goals(&store, today, args).await,
    Commands::Dashboard => run_dashboard(&store, today).await,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
