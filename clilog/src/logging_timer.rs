//! Scoped timers, gated by [`crate::enable_timer`] /
//! [`crate::is_timer_enabled`], for measuring named phases of a run.

use std::time::Instant;

/// A running timer created by [`stimer!`]. Pass it to [`finish!`] to
/// log the elapsed duration; logging is suppressed unless timing was
/// enabled for the creating module's path.
pub struct ScopedTimer {
    pub name: &'static str,
    start: Instant,
    enabled: bool,
}

impl ScopedTimer {
    #[doc(hidden)]
    pub fn new(name: &'static str, module_path: &str) -> ScopedTimer {
        ScopedTimer {
            name,
            start: Instant::now(),
            enabled: crate::is_timer_enabled(module_path),
        }
    }

    #[doc(hidden)]
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    #[doc(hidden)]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Starts a named scoped timer, active only if timing was enabled for
/// the calling module's path via [`crate::enable_timer`].
#[macro_export]
macro_rules! stimer {
    ($name:expr) => {
        $crate::ScopedTimer::new($name, module_path!())
    }
}

/// Logs the elapsed time on `$timer` at info level, if its timer is
/// enabled; otherwise a no-op.
#[macro_export]
macro_rules! finish {
    ($timer:expr, $fmt:expr $(,$param:expr)*) => {{
        if $timer.is_enabled() {
            $crate::log::info!(
                concat!("timer '{}' finished in {:.3}s: ", $fmt),
                $timer.name, $timer.elapsed_secs() $(,$param)*
            );
        }
    }}
}
