use std::fmt::Write as _;

use ansi_term::{Colour, Style};
use anyhow::Result;
use chrono::Datelike;

use crate::{
    board::{
        countdown::{CountdownSession, Phase, PhaseEnd},
        tasks::Priority,
        thoughts::NoteColor,
        Dashboard,
    },
    utils::time::{format_countdown, format_stopwatch, month_grid},
};

pub fn help() -> &'static str {
    "\
commands:
  add <text>                      new activity
  todo [!low|!med|!high] <text>   new to-do
  start <id> / stop <id>          activity stopwatch
  done <id> / rm <id>             toggle / delete activity
  tdone <id> / trm <id>           toggle / delete to-do
  focus [start|pause|reset]       work/break timer
  journal <title> :: <body>       save a journal entry (jlist, jrm <id>)
  think <text>                    capture a thought (tlist, forget <id>)
  sketch pen <w> <color> | stroke x,y ... | clear | save | list | rm <id>
  date <expr>                     select a day (\"yesterday\", \"15/03/2025\")
  cal                             month view        status [json]   summary
  help / quit"
}

fn phase_label(phase: Phase) -> ansi_term::ANSIString<'static> {
    match phase {
        Phase::Working => Colour::Green.paint("focus"),
        Phase::ShortBreak => Colour::Cyan.paint("short break"),
        Phase::LongBreak => Colour::Blue.paint("long break"),
    }
}

pub fn focus_line(countdown: &CountdownSession) -> String {
    let state = if countdown.is_active() {
        "running"
    } else {
        "paused"
    };
    format!(
        "{} {} [{state}] session {} | {} completed",
        phase_label(countdown.phase()),
        Style::new()
            .bold()
            .paint(format_countdown(countdown.seconds_remaining())),
        countdown.work_session(),
        countdown.completed_work_sessions(),
    )
}

pub fn phase_end(end: PhaseEnd, countdown: &CountdownSession) -> String {
    let remaining = format_countdown(countdown.seconds_remaining());
    match end {
        PhaseEnd::WorkFinished { long_break: true } => format!(
            "{} Work session done. Long break is up next ({remaining}); \"focus start\" to begin.",
            Colour::Green.paint("●")
        ),
        PhaseEnd::WorkFinished { long_break: false } => format!(
            "{} Work session done. Short break is up next ({remaining}); \"focus start\" to begin.",
            Colour::Green.paint("●")
        ),
        PhaseEnd::BreakFinished => format!(
            "{} Break over. Next work session is ready ({remaining}); \"focus start\" to begin.",
            Colour::Cyan.paint("●")
        ),
    }
}

fn priority_tag(priority: Priority) -> ansi_term::ANSIString<'static> {
    match priority {
        Priority::Low => Colour::Blue.paint("low "),
        Priority::Medium => Colour::Yellow.paint("med "),
        Priority::High => Colour::Red.paint("high"),
    }
}

fn note_tint(color: NoteColor) -> Colour {
    match color {
        NoteColor::Yellow => Colour::Yellow,
        NoteColor::Blue => Colour::Blue,
        NoteColor::Green => Colour::Green,
        NoteColor::Pink => Colour::Red,
        NoteColor::Purple => Colour::Purple,
    }
}

fn checkbox(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

pub fn status(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let date = dashboard.selected_date;
    let _ = writeln!(
        out,
        "{} {}",
        Style::new().bold().paint("Productivity Dashboard"),
        dashboard.clock.format("%a %d %b %Y %H:%M:%S"),
    );
    let _ = writeln!(out, "viewing {}", date.format("%A, %d %B %Y"));

    let activities: Vec<_> = dashboard.tasks.activities_on(date).collect();
    let done = activities.iter().filter(|a| a.completed).count();
    let _ = writeln!(
        out,
        "\nactivities ({done}/{} completed)",
        activities.len()
    );
    for activity in &activities {
        let timer = if dashboard.stopwatches.is_active(activity.id) {
            format!(
                " {} {}",
                Colour::Green.paint("▶"),
                format_stopwatch(dashboard.stopwatches.elapsed_for(activity.id))
            )
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "  {} #{:<3} {:<30} total {}{timer}",
            checkbox(activity.completed),
            activity.id,
            activity.text,
            format_stopwatch(activity.total_seconds),
        );
    }

    let todos: Vec<_> = dashboard.tasks.todos_on(date).collect();
    let done = todos.iter().filter(|t| t.completed).count();
    let _ = writeln!(out, "\nto-dos ({done}/{} completed)", todos.len());
    for todo in &todos {
        let _ = writeln!(
            out,
            "  {} #{:<3} {} {}",
            checkbox(todo.completed),
            todo.id,
            priority_tag(todo.priority),
            todo.text,
        );
    }

    let _ = writeln!(out, "\n{}", focus_line(&dashboard.countdown));
    let _ = writeln!(
        out,
        "journal: {} entries ({} today, ~{} words) | thoughts: {} (~{} words) | sketches: {}",
        dashboard.journal.len(),
        dashboard.journal.entries_on(date).count(),
        dashboard.journal.total_content_chars().div_ceil(100),
        dashboard.thoughts.len(),
        dashboard.thoughts.total_content_chars().div_ceil(50),
        dashboard.sketches.saved_count(),
    );
    out
}

pub fn status_json(dashboard: &Dashboard) -> Result<String> {
    Ok(serde_json::to_string_pretty(dashboard)?)
}

pub fn calendar(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let selected = dashboard.selected_date;
    let today = dashboard.clock.date_naive();
    let _ = writeln!(out, "{:^27}", selected.format("%B %Y").to_string());
    let _ = writeln!(out, " Su  Mo  Tu  We  Th  Fr  Sa");

    for (i, cell) in month_grid(selected).iter().enumerate() {
        match cell {
            None => out.push_str("    "),
            Some(day) => {
                let busy = dashboard.tasks.activities_on(*day).next().is_some()
                    || dashboard.tasks.todos_on(*day).next().is_some();
                let marker = if busy { "*" } else { " " };
                let number = format!("{:>2}{marker}", day.day());
                let styled = if *day == selected {
                    Style::new().reverse().paint(number).to_string()
                } else if *day == today {
                    Style::new().bold().paint(number).to_string()
                } else {
                    number
                };
                let _ = write!(out, " {styled}");
            }
        }
        if i % 7 == 6 {
            out.push('\n');
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn journal_list(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let entries: Vec<_> = dashboard.journal.entries_on(dashboard.selected_date).collect();
    if entries.is_empty() {
        return format!("no journal entries for {}", dashboard.selected_date);
    }
    for entry in entries {
        let _ = writeln!(
            out,
            "#{:<3} {} ({})",
            entry.id,
            Style::new().bold().paint(&entry.title),
            entry.created_at.format("%H:%M"),
        );
        if !entry.content.is_empty() {
            let _ = writeln!(out, "     {}", entry.content);
        }
    }
    out
}

pub fn thought_list(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    if dashboard.thoughts.is_empty() {
        return "no thoughts captured yet".to_string();
    }
    for thought in dashboard.thoughts.iter() {
        let _ = writeln!(
            out,
            "#{:<3} {} {}",
            thought.id,
            note_tint(thought.color).paint("■"),
            thought.content,
        );
    }
    out
}

pub fn sketch_list(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    if dashboard.sketches.saved_count() == 0 {
        return "no saved sketches".to_string();
    }
    for sketch in dashboard.sketches.saved() {
        let points: usize = sketch.strokes.iter().map(|s| s.points.len()).sum();
        let _ = writeln!(
            out,
            "#{:<3} {} ({} strokes, {points} points, {})",
            sketch.id,
            sketch.title,
            sketch.strokes.len(),
            sketch.created_at.format("%H:%M"),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn sample() -> Dashboard {
        let now = Local.with_ymd_and_hms(2025, 6, 2, 9, 30, 0).unwrap();
        let mut dashboard = Dashboard::new(now);
        let id = dashboard.tasks.add_activity("deep work", now).unwrap();
        let _ = dashboard.tasks.add_todo("buy milk", Priority::High, now);
        dashboard.start_stopwatch(id);
        for _ in 0..65 {
            dashboard.advance_second(now);
        }
        let _ = dashboard
            .journal
            .save("Morning", "pages", now.date_naive(), now);
        let _ = dashboard.thoughts.add("an idea", now);
        dashboard
    }

    #[test]
    fn status_shows_tasks_and_running_timer() {
        let rendered = status(&sample());
        assert!(rendered.contains("deep work"));
        assert!(rendered.contains("1:05"));
        assert!(rendered.contains("buy milk"));
        assert!(rendered.contains("activities (0/1 completed)"));
    }

    #[test]
    fn focus_line_uses_padded_countdown_format() {
        let rendered = focus_line(&CountdownSession::new());
        assert!(rendered.contains("25:00"));
        assert!(rendered.contains("paused"));
        assert!(rendered.contains("session 1"));
    }

    #[test]
    fn status_json_round_trips_through_serde() {
        let rendered = status_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["countdown"]["seconds_remaining"], 1500);
        assert_eq!(value["selected_date"], "2025-06-02");
    }

    #[test]
    fn calendar_marks_busy_days() {
        let rendered = calendar(&sample());
        assert!(rendered.contains("June 2025"));
        // June 2nd carries records, so its cell is starred.
        assert!(rendered.contains("2*"));
    }
}
