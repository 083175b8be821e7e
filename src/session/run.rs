use anyhow::Result;
use chrono_english::Dialect;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::{
    board::Dashboard,
    cli::{
        command::{Command, FocusAction, SketchAction},
        render,
    },
    session::ticker::Pulse,
    utils::{clock::Clock, time::parse_date_expr},
};

enum Applied {
    Continue,
    Quit,
}

/// The session loop: sole owner and sole mutator of the [Dashboard].
/// Pulses and commands arrive over channels and each is applied to
/// completion before the next, which keeps every state transition atomic
/// on a single timeline.
pub struct SessionModule {
    ticks: mpsc::Receiver<Pulse>,
    commands: mpsc::Receiver<Command>,
    dashboard: Dashboard,
    clock: Box<dyn Clock>,
    shutdown: CancellationToken,
    dialect: Dialect,
}

impl SessionModule {
    pub fn new(
        ticks: mpsc::Receiver<Pulse>,
        commands: mpsc::Receiver<Command>,
        dashboard: Dashboard,
        clock: Box<dyn Clock>,
        shutdown: CancellationToken,
        dialect: Dialect,
    ) -> Self {
        Self {
            ticks,
            commands,
            dashboard,
            clock,
            shutdown,
            dialect,
        }
    }

    /// Runs until cancellation, quit, or both channels closing. Returns
    /// the final dashboard so tests can assert on it.
    pub async fn run(mut self) -> Result<Dashboard> {
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => return Ok(self.dashboard),
                pulse = self.ticks.recv() => match pulse {
                    Some(Pulse) => self.on_tick(),
                    None => return Ok(self.dashboard),
                },
                command = self.commands.recv() => match command {
                    Some(command) => {
                        debug!("Applying command {:?}", command);
                        if let Applied::Quit = self.apply(command) {
                            self.shutdown.cancel();
                            return Ok(self.dashboard);
                        }
                    }
                    None => return Ok(self.dashboard),
                }
            }
        }
    }

    fn on_tick(&mut self) {
        let now = self.clock.now();
        if let Some(end) = self.dashboard.advance_second(now) {
            info!("Focus phase ended: {:?}", end);
            println!("{}", render::phase_end(end, &self.dashboard.countdown));
        }
    }

    fn apply(&mut self, command: Command) -> Applied {
        let now = self.clock.now();
        match command {
            Command::AddActivity { text } => {
                match self.dashboard.tasks.add_activity(&text, now) {
                    Some(id) => println!("added activity #{id}"),
                    None => println!("nothing to add"),
                }
            }
            Command::AddTodo { text, priority } => {
                match self.dashboard.tasks.add_todo(&text, priority, now) {
                    Some(id) => println!("added to-do #{id}"),
                    None => println!("nothing to add"),
                }
            }
            Command::StartTimer { task } => {
                if self.dashboard.start_stopwatch(task) {
                    println!("timer running for activity #{task}");
                } else {
                    println!("no activity #{task}");
                }
            }
            Command::StopTimer { task } => {
                let elapsed = self.dashboard.stopwatches.elapsed_for(task);
                if self.dashboard.stopwatches.is_active(task) {
                    self.dashboard.stop_stopwatch(task);
                    println!(
                        "stopped timer for activity #{task} (+{})",
                        crate::utils::time::format_stopwatch(elapsed)
                    );
                } else {
                    println!("no running timer for activity #{task}");
                }
            }
            Command::ToggleActivity { task } => {
                match self.dashboard.toggle_activity(task, now) {
                    Some(true) => println!("activity #{task} completed"),
                    Some(false) => println!("activity #{task} reopened"),
                    None => println!("no activity #{task}"),
                }
            }
            Command::RemoveActivity { task } => {
                if self.dashboard.delete_activity(task) {
                    println!("deleted activity #{task}");
                } else {
                    println!("no activity #{task}");
                }
            }
            Command::ToggleTodo { task } => {
                match self.dashboard.tasks.toggle_todo(task, now) {
                    Some(true) => println!("to-do #{task} completed"),
                    Some(false) => println!("to-do #{task} reopened"),
                    None => println!("no to-do #{task}"),
                }
            }
            Command::RemoveTodo { task } => {
                if self.dashboard.tasks.delete_todo(task) {
                    println!("deleted to-do #{task}");
                } else {
                    println!("no to-do #{task}");
                }
            }
            Command::Focus(action) => {
                match action {
                    FocusAction::Start => self.dashboard.countdown.start(),
                    FocusAction::Pause => self.dashboard.countdown.pause(),
                    FocusAction::Reset => self.dashboard.countdown.reset(),
                    FocusAction::Status => (),
                }
                println!("{}", render::focus_line(&self.dashboard.countdown));
            }
            Command::SaveJournal { title, body } => {
                let date = self.dashboard.selected_date;
                match self.dashboard.journal.save(&title, &body, date, now) {
                    Some(id) => println!("saved journal entry #{id} for {date}"),
                    None => println!("nothing to save"),
                }
            }
            Command::ListJournal => print!("{}", render::journal_list(&self.dashboard)),
            Command::RemoveJournal { entry } => {
                if self.dashboard.journal.delete(entry) {
                    println!("deleted journal entry #{entry}");
                } else {
                    println!("no journal entry #{entry}");
                }
            }
            Command::AddThought { text } => match self.dashboard.thoughts.add(&text, now) {
                Some(id) => println!("captured thought #{id}"),
                None => println!("nothing to capture"),
            },
            Command::ListThoughts => print!("{}", render::thought_list(&self.dashboard)),
            Command::RemoveThought { note } => {
                if self.dashboard.thoughts.delete(note) {
                    println!("dropped thought #{note}");
                } else {
                    println!("no thought #{note}");
                }
            }
            Command::Sketch(action) => self.apply_sketch(action, now),
            Command::SelectDate { expr } => match parse_date_expr(&expr, now, self.dialect) {
                Ok(date) => {
                    self.dashboard.selected_date = date;
                    println!("viewing {}", date.format("%A, %d %B %Y"));
                }
                Err(e) => println!("{e:#}"),
            },
            Command::Calendar => print!("{}", render::calendar(&self.dashboard)),
            Command::Status { json: false } => print!("{}", render::status(&self.dashboard)),
            Command::Status { json: true } => match render::status_json(&self.dashboard) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => println!("{e:#}"),
            },
            Command::Help => println!("{}", render::help()),
            Command::Quit => return Applied::Quit,
        }
        Applied::Continue
    }

    fn apply_sketch(&mut self, action: SketchAction, now: chrono::DateTime<chrono::Local>) {
        let pad = &mut self.dashboard.sketches;
        match action {
            SketchAction::Pen { width, color } => {
                pad.set_brush(width, &color);
                println!("brush set to {width}px {color}");
            }
            SketchAction::Stroke { points } => {
                let mut points = points.into_iter();
                if let Some((x, y)) = points.next() {
                    pad.begin_stroke(x, y);
                    for (x, y) in points {
                        pad.line_to(x, y);
                    }
                    pad.end_stroke();
                }
                println!("{} strokes on canvas", pad.canvas_stroke_count());
            }
            SketchAction::Clear => {
                pad.clear();
                println!("canvas cleared");
            }
            SketchAction::Save => {
                let id = pad.save(now);
                println!("saved sketch #{id}");
            }
            SketchAction::List => print!("{}", render::sketch_list(&self.dashboard)),
            SketchAction::Remove { sketch } => {
                if pad.delete(sketch) {
                    println!("deleted sketch #{sketch}");
                } else {
                    println!("no sketch #{sketch}");
                }
            }
        }
    }
}
