use crate::refresh::RefreshController;
use crate::session::Session;
use chrono::{DateTime, Utc};
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::info;

/// Runs a refresh pass every `tick` until the returned handle is aborted.
///
/// The first pass runs immediately. A pass that overruns the tick pushes
/// the next one back instead of bunching them up. The session is not locked
/// while the provider is being asked.
pub fn spawn_refresh_loop<C>(
    controller: Arc<RefreshController>,
    session: Arc<Mutex<Session>>,
    tick: Duration,
    clock: C,
) -> JoinHandle<()>
where
    C: Fn() -> DateTime<Utc> + Send + 'static,
{
    tokio::spawn(async move {
        info!(
            tick_ms = tick.as_millis() as u64,
            interval_secs = controller.interval().as_secs(),
            "refresh loop started"
        );
        let mut ticker = time::interval(tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            controller.run_pass(&session, clock()).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::scripted::ScriptedProvider;
    use chrono::{TimeDelta, TimeZone};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn loop_initializes_then_refreshes_on_interval() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok("https://x/a.gif".to_string()),
            Ok("https://x/b.gif".to_string()),
        ]));
        let controller = Arc::new(RefreshController::new(
            provider.clone(),
            Duration::from_secs(10),
        ));
        let session = Arc::new(Mutex::new(Session::default()));

        let origin = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).unwrap();
        let started = Instant::now();
        let clock = move || origin + TimeDelta::from_std(started.elapsed()).unwrap();

        let handle = spawn_refresh_loop(
            controller,
            session.clone(),
            Duration::from_secs(1),
            clock,
        );

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(provider.calls(), 1);
        assert_eq!(session.lock().await.current_url(), Some("https://x/a.gif"));

        time::sleep(Duration::from_secs(9)).await;
        assert_eq!(provider.calls(), 1);

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(provider.calls(), 2);
        let guard = session.lock().await;
        assert_eq!(guard.current_url(), Some("https://x/b.gif"));
        assert_eq!(
            guard.backdrop.as_ref().unwrap().last_refresh_at,
            origin + TimeDelta::seconds(10)
        );
        drop(guard);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn loop_retries_failed_init_every_tick() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Err(crate::errors::FetchFailure::Status(502)),
            Err(crate::errors::FetchFailure::Status(502)),
            Ok("https://x/a.gif".to_string()),
        ]));
        let controller = Arc::new(RefreshController::new(
            provider.clone(),
            Duration::from_secs(10),
        ));
        let session = Arc::new(Mutex::new(Session::default()));

        let handle = spawn_refresh_loop(controller, session.clone(), Duration::from_secs(1), Utc::now);

        time::sleep(Duration::from_millis(1500)).await;
        {
            let guard = session.lock().await;
            assert!(guard.backdrop.is_none());
            assert!(guard.warning.is_some());
        }

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(provider.calls(), 3);
        let guard = session.lock().await;
        assert_eq!(guard.current_url(), Some("https://x/a.gif"));
        assert!(guard.warning.is_none());
        drop(guard);

        handle.abort();
    }

    struct SlowProvider {
        delay: Duration,
    }

    #[async_trait::async_trait]
    impl crate::provider::ResourceProvider for SlowProvider {
        async fn fetch(&self) -> Result<String, crate::errors::FetchFailure> {
            time::sleep(self.delay).await;
            Ok("https://x/slow.gif".to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_does_not_block_session_readers() {
        let controller = Arc::new(RefreshController::new(
            Arc::new(SlowProvider {
                delay: Duration::from_secs(5),
            }),
            Duration::from_secs(10),
        ));
        let session = Arc::new(Mutex::new(Session::default()));

        let handle = spawn_refresh_loop(controller, session.clone(), Duration::from_secs(1), Utc::now);

        time::sleep(Duration::from_millis(100)).await;
        let snapshot = time::timeout(Duration::from_millis(10), session.lock())
            .await
            .expect("session locked during fetch")
            .snapshot();
        assert!(snapshot.url.is_none());

        time::sleep(Duration::from_secs(5)).await;
        assert_eq!(
            session.lock().await.current_url(),
            Some("https://x/slow.gif")
        );

        handle.abort();
    }
}
