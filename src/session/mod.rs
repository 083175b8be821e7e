use std::time::Duration;

use anyhow::Result;
use chrono_english::Dialect;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{
    board::Dashboard,
    cli::command::Command,
    utils::clock::{Clock, SystemClock},
};

use self::{input::InputModule, run::SessionModule, ticker::Ticker};

pub mod input;
pub mod run;
pub mod shutdown;
pub mod ticker;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const COMMAND_BUFFER: usize = 16;

/// Wires up and runs one dashboard session on stdin until quit, EOF or
/// ctrl-c.
pub async fn start_session(dialect: Dialect) -> Result<()> {
    let shutdown_token = CancellationToken::new();

    let (command_sender, command_receiver) = mpsc::channel::<Command>(COMMAND_BUFFER);

    let mut ticker = create_ticker(&shutdown_token, SystemClock);
    let ticks = ticker.subscribe();

    let session = create_session(
        ticks,
        command_receiver,
        &shutdown_token,
        SystemClock,
        dialect,
    );
    let input = InputModule::new(tokio::io::stdin(), command_sender, shutdown_token.clone());

    println!("{}", crate::cli::render::help());

    let (_, ticker_result, input_result, session_result) = tokio::join!(
        shutdown::detect_shutdown(shutdown_token.clone()),
        ticker.run(),
        input.run(),
        session.run(),
    );

    if let Err(e) = ticker_result {
        error!("Ticker got an error {:?}", e);
    }
    if let Err(e) = input_result {
        error!("Input module got an error {:?}", e);
    }
    if let Err(e) = session_result {
        error!("Session got an error {:?}", e);
    }

    Ok(())
}

fn create_ticker(shutdown_token: &CancellationToken, clock: impl Clock) -> Ticker {
    Ticker::new(TICK_PERIOD, shutdown_token.clone(), Box::new(clock))
}

fn create_session(
    ticks: mpsc::Receiver<ticker::Pulse>,
    commands: mpsc::Receiver<Command>,
    shutdown_token: &CancellationToken,
    clock: impl Clock,
    dialect: Dialect,
) -> SessionModule {
    let dashboard = Dashboard::new(clock.now());
    SessionModule::new(
        ticks,
        commands,
        dashboard,
        Box::new(clock),
        shutdown_token.clone(),
        dialect,
    )
}

#[cfg(test)]
mod session_tests {
    use std::time::Duration;

    use anyhow::Result;
    use tokio::sync::mpsc;
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::{
        board::countdown::WORK_SECONDS,
        utils::logging::TEST_LOGGING,
    };

    /// Drives a full session end to end under warped time: two tasks, a
    /// running stopwatch, the focus timer, and a quit.
    #[tokio::test(start_paused = true)]
    async fn smoke_test_session() -> Result<()> {
        *TEST_LOGGING;
        let shutdown_token = CancellationToken::new();

        let mut ticker = create_ticker(&shutdown_token, SystemClock);
        let ticks = ticker.subscribe();
        let (commands, command_receiver) = mpsc::channel(COMMAND_BUFFER);
        let session = create_session(
            ticks,
            command_receiver,
            &shutdown_token,
            SystemClock,
            Dialect::Uk,
        );

        let driver = async {
            commands.send(Command::parse("add write report")?).await?;
            commands.send(Command::parse("todo !high file taxes")?).await?;
            commands.send(Command::parse("start 1")?).await?;
            commands.send(Command::parse("focus start")?).await?;
            // Sleep lands between ticks so exactly 125 pulses are seen.
            tokio::time::sleep(Duration::from_millis(125_300)).await;
            commands.send(Command::parse("stop 1")?).await?;
            commands.send(Command::parse("tdone 2")?).await?;
            commands.send(Command::parse("quit")?).await?;
            anyhow::Ok(())
        };

        let (ticker_result, session_result, driver_result) =
            tokio::join!(ticker.run(), session.run(), driver);

        driver_result?;
        ticker_result?;
        let dashboard = session_result?;

        let activity = dashboard.tasks.activity(1).expect("activity exists");
        assert_eq!(activity.total_seconds, 125);
        assert_eq!(dashboard.stopwatches.elapsed_for(1), 0);
        assert!(!dashboard.stopwatches.is_active(1));

        assert_eq!(dashboard.countdown.seconds_remaining(), WORK_SECONDS - 125);
        assert!(dashboard.countdown.is_active());

        let todo = dashboard
            .tasks
            .todos_on(dashboard.selected_date)
            .next()
            .expect("to-do exists");
        assert!(todo.completed);

        Ok(())
    }

    /// Completing a timed activity over the wire stops its stopwatch.
    #[tokio::test(start_paused = true)]
    async fn completing_an_activity_stops_its_timer() -> Result<()> {
        *TEST_LOGGING;
        let shutdown_token = CancellationToken::new();

        let mut ticker = create_ticker(&shutdown_token, SystemClock);
        let ticks = ticker.subscribe();
        let (commands, command_receiver) = mpsc::channel(COMMAND_BUFFER);
        let session = create_session(
            ticks,
            command_receiver,
            &shutdown_token,
            SystemClock,
            Dialect::Uk,
        );

        let driver = async {
            commands.send(Command::parse("add deep work")?).await?;
            commands.send(Command::parse("start 1")?).await?;
            tokio::time::sleep(Duration::from_millis(30_300)).await;
            commands.send(Command::parse("done 1")?).await?;
            tokio::time::sleep(Duration::from_millis(5_000)).await;
            commands.send(Command::parse("quit")?).await?;
            anyhow::Ok(())
        };

        let (ticker_result, session_result, driver_result) =
            tokio::join!(ticker.run(), session.run(), driver);

        driver_result?;
        ticker_result?;
        let dashboard = session_result?;

        let activity = dashboard.tasks.activity(1).expect("activity exists");
        assert!(activity.completed);
        // Flushed at completion; the later ticks added nothing.
        assert_eq!(activity.total_seconds, 30);
        assert!(!dashboard.stopwatches.is_active(1));

        Ok(())
    }
}
