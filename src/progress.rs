//! Single-line "working" animation shown while the model is thinking.
//!
//! The animation runs on its own OS thread so it keeps ticking while the
//! caller is blocked on the network. It is tied to a [`ProgressGuard`]: the
//! thread is stopped and joined when the guard drops, whichever way the
//! wrapped call ends.

use std::future::Future;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const GLYPHS: [char; 4] = ['|', '/', '-', '\\'];

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_LABEL: &str = "Thinking";

/// Shortest frame interval; anything lower would spin a core.
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    pub label: String,
    pub interval: Duration,
    pub enabled: bool,
}

impl Default for ProgressIndicator {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            interval: DEFAULT_INTERVAL,
            enabled: true,
        }
    }
}

impl ProgressIndicator {
    pub fn new(label: impl Into<String>, interval: Duration) -> Self {
        Self {
            label: label.into(),
            interval: interval.max(MIN_INTERVAL),
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Start animating on stdout. Returns `None` when disabled.
    pub fn start(&self) -> Option<ProgressGuard> {
        self.start_with_writer(io::stdout())
    }

    pub fn start_with_writer<W>(&self, writer: W) -> Option<ProgressGuard>
    where
        W: Write + Send + 'static,
    {
        self.enabled
            .then(|| ProgressGuard::start_with_writer(&self.label, self.interval, writer))
    }
}

/// Keeps the animation alive; dropping it stops the thread and prints the
/// completion marker.
pub struct ProgressGuard {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressGuard {
    pub fn start_with_writer<W>(label: &str, interval: Duration, mut writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let label = label.to_string();
        let interval = interval.max(MIN_INTERVAL);

        let spawned = thread::Builder::new()
            .name("progress".to_string())
            .spawn(move || {
                let mut frame = 0usize;
                while flag.load(Ordering::Acquire) {
                    let glyph = GLYPHS[frame % GLYPHS.len()];
                    let _ = write!(writer, "\r{label} {glyph}");
                    let _ = writer.flush();
                    frame = frame.wrapping_add(1);
                    thread::park_timeout(interval);
                }
                let _ = write!(writer, "\r{label} done\n");
                let _ = writer.flush();
            });

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::debug!("progress indicator unavailable: {e}");
                None
            }
        };
        Self { running, handle }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire) && self.handle.is_some()
    }
}

impl Drop for ProgressGuard {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }
}

/// Await `future` with the indicator animating until it resolves or is
/// cancelled.
pub async fn with_progress<F: Future>(indicator: &ProgressIndicator, future: F) -> F::Output {
    with_progress_to(indicator, io::stdout(), future).await
}

/// [`with_progress`] drawing to `writer` instead of stdout.
pub async fn with_progress_to<F, W>(indicator: &ProgressIndicator, writer: W, future: F) -> F::Output
where
    F: Future,
    W: Write + Send + 'static,
{
    let _guard = indicator.start_with_writer(writer);
    future.await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Instant;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn animates_then_marks_done_on_drop() {
        let out = Capture::default();
        let guard = ProgressGuard::start_with_writer("Working", Duration::from_millis(5), out.clone());
        thread::sleep(Duration::from_millis(60));
        drop(guard);

        let text = out.text();
        assert!(text.starts_with("\rWorking |"));
        assert!(text.contains("\rWorking /"));
        assert!(text.ends_with("\rWorking done\n"));
        assert_eq!(text.matches("done").count(), 1);
    }

    #[test]
    fn release_wakes_a_sleeping_thread() {
        let out = Capture::default();
        let guard = ProgressGuard::start_with_writer("Slow", Duration::from_secs(30), out.clone());
        let start = Instant::now();
        drop(guard);

        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(out.text().ends_with("\rSlow done\n"));
    }

    #[test]
    fn done_marker_written_when_wrapped_call_fails() {
        let out = Capture::default();

        fn failing(out: Capture) -> Result<(), String> {
            let _guard = ProgressGuard::start_with_writer("Call", Duration::from_millis(5), out);
            Err("backend unreachable".to_string())
        }

        assert!(failing(out.clone()).is_err());
        assert!(out.text().ends_with("\rCall done\n"));
    }

    #[test]
    fn write_errors_are_swallowed() {
        let guard = ProgressGuard::start_with_writer("Quiet", Duration::from_millis(5), Broken);
        thread::sleep(Duration::from_millis(20));
        drop(guard);
    }

    #[test]
    fn disabled_indicator_starts_nothing() {
        assert!(ProgressIndicator::disabled().start().is_none());
    }

    #[test]
    fn zero_interval_is_clamped() {
        assert_eq!(ProgressIndicator::new("Busy", Duration::ZERO).interval, MIN_INTERVAL);

        let out = Capture::default();
        let guard = ProgressGuard::start_with_writer("Busy", Duration::ZERO, out.clone());
        thread::sleep(Duration::from_millis(50));
        drop(guard);

        // At 10ms per frame, 50ms draws a handful of frames, not thousands.
        assert!(out.text().matches('\r').count() < 30);
    }

    #[tokio::test]
    async fn failed_call_still_marks_done() {
        let out = Capture::default();
        let indicator = ProgressIndicator::new("Calling", Duration::from_millis(5));

        let result: Result<(), String> = with_progress_to(&indicator, out.clone(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err("connection refused".to_string())
        })
        .await;

        assert!(result.is_err());
        assert!(out.text().ends_with("\rCalling done\n"));
    }

    #[tokio::test]
    async fn cancelled_call_still_marks_done() {
        let out = Capture::default();
        let indicator = ProgressIndicator::new("Waiting", Duration::from_millis(5));

        let outcome = tokio::time::timeout(
            Duration::from_millis(30),
            with_progress_to(&indicator, out.clone(), std::future::pending::<()>()),
        )
        .await;

        assert!(outcome.is_err());
        let text = out.text();
        assert!(text.starts_with("\rWaiting |"));
        assert!(text.ends_with("\rWaiting done\n"));
    }

    #[tokio::test]
    async fn with_progress_returns_future_output() {
        let value = with_progress(&ProgressIndicator::disabled(), async { 42 }).await;
        assert_eq!(value, 42);
    }
}
