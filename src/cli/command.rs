use anyhow::{anyhow, bail, Context, Result};

use crate::board::{stopwatch::TaskId, tasks::Priority};

/// One parsed line of session input. The grammar is the stand-in for the
/// original dashboard's buttons and forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddActivity { text: String },
    AddTodo { text: String, priority: Priority },
    StartTimer { task: TaskId },
    StopTimer { task: TaskId },
    ToggleActivity { task: TaskId },
    RemoveActivity { task: TaskId },
    ToggleTodo { task: TaskId },
    RemoveTodo { task: TaskId },
    Focus(FocusAction),
    SaveJournal { title: String, body: String },
    ListJournal,
    RemoveJournal { entry: u64 },
    AddThought { text: String },
    ListThoughts,
    RemoveThought { note: u64 },
    Sketch(SketchAction),
    SelectDate { expr: String },
    Calendar,
    Status { json: bool },
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
    Start,
    Pause,
    Reset,
    Status,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SketchAction {
    Pen { width: u8, color: String },
    Stroke { points: Vec<(f32, f32)> },
    Clear,
    Save,
    List,
    Remove { sketch: u64 },
}

fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    }
}

fn parse_id(input: &str, what: &str) -> Result<u64> {
    let (word, rest) = split_word(input);
    if word.is_empty() || !rest.is_empty() {
        bail!("expected a single {what} id, got {input:?}");
    }
    word.parse()
        .with_context(|| format!("{word:?} is not a {what} id"))
}

fn require_text(rest: &str, usage: &str) -> Result<String> {
    if rest.is_empty() {
        bail!("usage: {usage}");
    }
    Ok(rest.to_string())
}

impl Command {
    pub fn parse(line: &str) -> Result<Command> {
        let (word, rest) = split_word(line.trim());
        match word {
            "add" => Ok(Command::AddActivity {
                text: require_text(rest, "add <text>")?,
            }),
            "todo" => {
                let (priority, text) = match rest.strip_prefix('!') {
                    Some(tagged) => {
                        let (tag, text) = split_word(tagged);
                        (tag.parse()?, text.to_string())
                    }
                    None => (Priority::Medium, rest.to_string()),
                };
                if text.is_empty() {
                    bail!("usage: todo [!low|!med|!high] <text>");
                }
                Ok(Command::AddTodo { text, priority })
            }
            "start" => Ok(Command::StartTimer {
                task: parse_id(rest, "activity")?,
            }),
            "stop" => Ok(Command::StopTimer {
                task: parse_id(rest, "activity")?,
            }),
            "done" => Ok(Command::ToggleActivity {
                task: parse_id(rest, "activity")?,
            }),
            "rm" => Ok(Command::RemoveActivity {
                task: parse_id(rest, "activity")?,
            }),
            "tdone" => Ok(Command::ToggleTodo {
                task: parse_id(rest, "to-do")?,
            }),
            "trm" => Ok(Command::RemoveTodo {
                task: parse_id(rest, "to-do")?,
            }),
            "focus" => {
                let action = match rest {
                    "start" => FocusAction::Start,
                    "pause" => FocusAction::Pause,
                    "reset" => FocusAction::Reset,
                    "" | "status" => FocusAction::Status,
                    other => bail!("unknown focus action {other:?}, expected start/pause/reset"),
                };
                Ok(Command::Focus(action))
            }
            "journal" => {
                if rest.is_empty() {
                    bail!("usage: journal <title> :: <body>");
                }
                let (title, body) = match rest.split_once("::") {
                    Some((title, body)) => (title.trim().to_string(), body.trim().to_string()),
                    None => (String::new(), rest.to_string()),
                };
                Ok(Command::SaveJournal { title, body })
            }
            "jlist" => Ok(Command::ListJournal),
            "jrm" => Ok(Command::RemoveJournal {
                entry: parse_id(rest, "journal entry")?,
            }),
            "think" => Ok(Command::AddThought {
                text: require_text(rest, "think <text>")?,
            }),
            "tlist" => Ok(Command::ListThoughts),
            "forget" => Ok(Command::RemoveThought {
                note: parse_id(rest, "thought")?,
            }),
            "sketch" => Ok(Command::Sketch(parse_sketch(rest)?)),
            "date" => Ok(Command::SelectDate {
                expr: require_text(rest, "date <expression>")?,
            }),
            "cal" => Ok(Command::Calendar),
            "status" => match rest {
                "" => Ok(Command::Status { json: false }),
                "json" => Ok(Command::Status { json: true }),
                other => bail!("unknown status option {other:?}"),
            },
            "help" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(anyhow!(
                "unknown command {other:?}, type \"help\" for the command list"
            )),
        }
    }
}

fn parse_sketch(rest: &str) -> Result<SketchAction> {
    let (word, rest) = split_word(rest);
    match word {
        "pen" => {
            let (width, color) = split_word(rest);
            if color.is_empty() {
                bail!("usage: sketch pen <width> <color>");
            }
            Ok(SketchAction::Pen {
                width: width
                    .parse()
                    .with_context(|| format!("{width:?} is not a brush width"))?,
                color: color.to_string(),
            })
        }
        "stroke" => {
            let points = rest
                .split_whitespace()
                .map(parse_point)
                .collect::<Result<Vec<_>>>()?;
            if points.is_empty() {
                bail!("usage: sketch stroke x,y x,y ...");
            }
            Ok(SketchAction::Stroke { points })
        }
        "clear" => Ok(SketchAction::Clear),
        "save" => Ok(SketchAction::Save),
        "list" => Ok(SketchAction::List),
        "rm" => Ok(SketchAction::Remove {
            sketch: parse_id(rest, "sketch")?,
        }),
        other => bail!("unknown sketch action {other:?}"),
    }
}

fn parse_point(token: &str) -> Result<(f32, f32)> {
    let (x, y) = token
        .split_once(',')
        .ok_or_else(|| anyhow!("expected x,y but got {token:?}"))?;
    Ok((
        x.parse().with_context(|| format!("bad coordinate {x:?}"))?,
        y.parse().with_context(|| format!("bad coordinate {y:?}"))?,
    ))
}
