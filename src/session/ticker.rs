use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::utils::clock::Clock;

/// One tick-source pulse. Carries no payload; consumers read the clock
/// themselves when they need the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse;

/// The shared one-second pulse. Drives every time-dependent state
/// transition in the session.
pub struct Ticker {
    subscribers: Vec<mpsc::Sender<Pulse>>,
    shutdown: CancellationToken,
    period: Duration,
    clock: Box<dyn Clock>,
}

impl Ticker {
    pub fn new(period: Duration, shutdown: CancellationToken, clock: Box<dyn Clock>) -> Self {
        Self {
            subscribers: Vec::new(),
            shutdown,
            period,
            clock,
        }
    }

    /// Registers a consumer. Dropping the receiver unsubscribes it. The
    /// channel holds a single pulse, so a consumer that falls behind
    /// misses pulses instead of receiving a backlog.
    pub fn subscribe(&mut self) -> mpsc::Receiver<Pulse> {
        let (sender, receiver) = mpsc::channel(1);
        self.subscribers.push(sender);
        receiver
    }

    /// Executes the pulse loop until cancellation or until every
    /// subscriber has gone away.
    pub async fn run(mut self) -> Result<()> {
        let mut deadline = self.clock.instant();
        loop {
            deadline += self.period;
            tokio::select! {
                _ = self.shutdown.cancelled() => return Ok(()),
                _ = self.clock.sleep_until(deadline) => (),
            }

            self.subscribers.retain(|sender| match sender.try_send(Pulse) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!("Subscriber busy, dropping pulse");
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            });
            if self.subscribers.is_empty() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::clock::SystemClock;

    fn ticker(shutdown: &CancellationToken) -> Ticker {
        Ticker::new(
            Duration::from_secs(1),
            shutdown.clone(),
            Box::new(SystemClock),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn pulses_fan_out_once_per_period() {
        let shutdown = CancellationToken::new();
        let mut ticker = ticker(&shutdown);
        let mut first = ticker.subscribe();
        let mut second = ticker.subscribe();
        let handle = tokio::spawn(ticker.run());

        for _ in 0..3 {
            assert_eq!(first.recv().await, Some(Pulse));
            assert_eq!(second.recv().await, Some(Pulse));
        }

        shutdown.cancel();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn busy_subscriber_misses_pulses_without_backlog() {
        let shutdown = CancellationToken::new();
        let mut ticker = ticker(&shutdown);
        let mut receiver = ticker.subscribe();
        let handle = tokio::spawn(ticker.run());

        // Five periods pass without the subscriber draining its channel.
        tokio::time::sleep(Duration::from_millis(5500)).await;
        shutdown.cancel();
        handle.await.unwrap().unwrap();

        let mut delivered = 0;
        while receiver.try_recv().is_ok() {
            delivered += 1;
        }
        assert_eq!(delivered, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn loop_ends_when_the_last_subscriber_unsubscribes() {
        let shutdown = CancellationToken::new();
        let mut ticker = ticker(&shutdown);
        let receiver = ticker.subscribe();
        let handle = tokio::spawn(ticker.run());

        drop(receiver);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(handle.is_finished());
        handle.await.unwrap().unwrap();
    }
}
