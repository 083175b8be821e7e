use serde::Serialize;

pub const WORK_SECONDS: u32 = 25 * 60;
pub const SHORT_BREAK_SECONDS: u32 = 5 * 60;
pub const LONG_BREAK_SECONDS: u32 = 15 * 60;
/// Every 4th completed work session earns the long break.
pub const SESSIONS_PER_CYCLE: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Working,
    ShortBreak,
    LongBreak,
}

/// Reported by [CountdownSession::tick] when a phase runs out, so the
/// session loop can announce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEnd {
    WorkFinished { long_break: bool },
    BreakFinished,
}

/// The work/break focus timer. One instance lives for the whole session.
///
/// The phase is fully determined by `break_phase` together with
/// `completed_work_sessions mod 4`; the run/pause flag is orthogonal to it.
/// Every transition is a total function of this state, and the timer always
/// pauses itself at a phase boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountdownSession {
    active: bool,
    seconds_remaining: u32,
    break_phase: bool,
    work_session: u32,
    completed_work_sessions: u32,
}

impl Default for CountdownSession {
    fn default() -> Self {
        Self {
            active: false,
            seconds_remaining: WORK_SECONDS,
            break_phase: false,
            work_session: 1,
            completed_work_sessions: 0,
        }
    }
}

impl CountdownSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn pause(&mut self) {
        self.active = false;
    }

    /// Returns to the canonical starting state regardless of the current
    /// phase or activity.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances the countdown by one second. Called once per tick-source
    /// pulse; does nothing while paused.
    pub fn tick(&mut self) -> Option<PhaseEnd> {
        if !self.active {
            return None;
        }
        if self.seconds_remaining > 1 {
            self.seconds_remaining -= 1;
            return None;
        }

        // Expiring this tick. A phase boundary always pauses the timer and
        // waits for an explicit resume.
        self.active = false;
        if !self.break_phase {
            self.completed_work_sessions += 1;
            let long_break = self.completed_work_sessions % SESSIONS_PER_CYCLE == 0;
            self.seconds_remaining = if long_break {
                LONG_BREAK_SECONDS
            } else {
                SHORT_BREAK_SECONDS
            };
            self.break_phase = true;
            Some(PhaseEnd::WorkFinished { long_break })
        } else {
            self.seconds_remaining = WORK_SECONDS;
            self.break_phase = false;
            self.work_session += 1;
            Some(PhaseEnd::BreakFinished)
        }
    }

    pub fn phase(&self) -> Phase {
        if !self.break_phase {
            Phase::Working
        } else if self.completed_work_sessions % SESSIONS_PER_CYCLE == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn is_break(&self) -> bool {
        self.break_phase
    }

    pub fn work_session(&self) -> u32 {
        self.work_session
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }
}
