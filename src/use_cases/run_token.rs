// Run lifecycle shared by every worker of one run.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    Terminated,
}

/// Cancellation token for one run. Cloned into every worker at creation.
///
/// The transition Running -> Terminated happens once; every waiter is woken by it.
#[derive(Debug, Clone)]
pub struct RunToken {
    phase: Arc<watch::Sender<RunPhase>>,
}

impl RunToken {
    pub fn new() -> Self {
        let (phase, _rx) = watch::channel(RunPhase::Running);
        Self {
            phase: Arc::new(phase),
        }
    }

    pub fn is_terminated(&self) -> bool {
        *self.phase.borrow() == RunPhase::Terminated
    }

    /// Flips the run to terminated. Returns true only for the call that made the transition.
    pub fn terminate(&self) -> bool {
        self.phase.send_if_modified(|phase| {
            if *phase == RunPhase::Terminated {
                return false;
            }
            *phase = RunPhase::Terminated;
            true
        })
    }

    /// Resolves once the run is terminated.
    pub async fn terminated(&self) {
        let mut rx = self.phase.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|phase| *phase == RunPhase::Terminated).await;
    }

    /// Sleeps for `duration` unless the run terminates first.
    /// Returns true if the run is still going after the pause.
    pub async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(duration) => !self.is_terminated(),
            _ = self.terminated() => false,
        }
    }
}

impl Default for RunToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_first_terminate_reports_the_transition() {
        let token = RunToken::new();
        assert!(!token.is_terminated());
        assert!(token.terminate());
        assert!(!token.terminate());
        assert!(token.clone().is_terminated());
    }

    #[tokio::test(start_paused = true)]
    async fn pause_wakes_early_on_termination() {
        let token = RunToken::new();
        let sleeper = tokio::spawn({
            let token = token.clone();
            async move { token.pause(Duration::from_secs(3600)).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        token.terminate();
        let still_running = sleeper.await.expect("sleeper should not panic");
        assert!(!still_running);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_completes_while_running() {
        let token = RunToken::new();
        assert!(token.pause(Duration::from_millis(50)).await);
    }

    #[tokio::test]
    async fn terminated_resolves_for_late_waiters() {
        let token = RunToken::new();
        token.terminate();
        tokio::time::timeout(Duration::from_secs(1), token.terminated())
            .await
            .expect("already-terminated token should resolve immediately");
    }
}
