//! Crash boundary for view rendering.
//!
//! Rendering runs inside [`CrashBoundary::guard`]. A panic anywhere below it
//! is caught, recorded as a [`CrashReport`], and from then on the caller
//! shows the recovery screen instead of the normal view until
//! [`CrashBoundary::recover`] is called.
//!
//! Panics inside a guard are kept out of stderr by [`install_panic_hook`],
//! which would otherwise scribble over a full-screen UI.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe, PanicHookInfo};

/// Title of the recovery screen.
pub const CRASH_TITLE: &str = "오류가 발생했습니다";

/// Body text of the recovery screen.
pub const CRASH_MESSAGE: &str = "프로그램을 실행하는 도중 문제가 발생했습니다.";

/// Label of the single recovery action.
pub const RECOVERY_ACTION: &str = "데이터 초기화 및 새로고침";

thread_local! {
    static GUARD_DEPTH: Cell<u32> = const { Cell::new(0) };
    static LAST_LOCATION: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// True while the current thread is inside [`CrashBoundary::guard`].
pub fn is_guarding() -> bool {
    GUARD_DEPTH.with(|d| d.get() > 0)
}

/// Remember where a guarded panic happened, for the diagnostic panel.
pub fn record_panic(info: &PanicHookInfo<'_>) {
    let location = info
        .location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
    LAST_LOCATION.with(|slot| *slot.borrow_mut() = location);
}

/// Chain a hook that silences guarded panics and forwards the rest.
///
/// `on_unguarded` runs before the previous hook for panics outside any
/// guard, e.g. to restore the terminal.
pub fn install_panic_hook<F>(on_unguarded: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if is_guarding() {
            record_panic(info);
        } else {
            on_unguarded();
            previous(info);
        }
    }));
}

/// A caught rendering fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashReport {
    pub message: String,
    pub location: Option<String>,
}

impl CrashReport {
    fn from_payload(payload: &(dyn Any + Send), location: Option<String>) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "알 수 없는 오류".to_string());
        Self { message, location }
    }

    /// Technical detail for the diagnostic panel.
    pub fn diagnostic(&self) -> String {
        match &self.location {
            Some(location) => format!("{}\n  at {}", self.message, location),
            None => self.message.clone(),
        }
    }
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        GUARD_DEPTH.with(|d| d.set(d.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        GUARD_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// Supervisor that renders either the normal view or the fallback.
#[derive(Debug, Default)]
pub struct CrashBoundary {
    fault: Option<CrashReport>,
}

impl CrashBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `render`, catching any panic.
    ///
    /// Returns `None` when it panicked or when a fault is already recorded,
    /// in which case the caller should draw the fallback.
    pub fn guard<R>(&mut self, render: impl FnOnce() -> R) -> Option<R> {
        if self.fault.is_some() {
            return None;
        }

        let outcome = {
            let _depth = DepthGuard::enter();
            LAST_LOCATION.with(|slot| slot.borrow_mut().take());
            panic::catch_unwind(AssertUnwindSafe(render))
        };

        match outcome {
            Ok(value) => Some(value),
            Err(payload) => {
                let location = LAST_LOCATION.with(|slot| slot.borrow_mut().take());
                let report = CrashReport::from_payload(payload.as_ref(), location);
                tracing::error!(
                    message = %report.message,
                    location = report.location.as_deref().unwrap_or("unknown"),
                    "rendering fault caught by crash boundary"
                );
                self.fault = Some(report);
                None
            }
        }
    }

    pub fn fault(&self) -> Option<&CrashReport> {
        self.fault.as_ref()
    }

    pub fn is_tripped(&self) -> bool {
        self.fault.is_some()
    }

    /// Clear the fault. The caller wipes local state alongside.
    pub fn recover(&mut self) {
        if let Some(report) = self.fault.take() {
            tracing::info!(message = %report.message, "recovered from rendering fault");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passes_through_value() {
        let mut boundary = CrashBoundary::new();
        assert_eq!(boundary.guard(|| 7), Some(7));
        assert!(!boundary.is_tripped());
        assert!(!is_guarding());
    }

    #[test]
    fn test_catches_panic_and_latches() {
        let mut boundary = CrashBoundary::new();
        let result: Option<()> = boundary.guard(|| panic!("bad row {}", 3));
        assert!(result.is_none());
        assert_eq!(boundary.fault().unwrap().message, "bad row 3");
        assert!(!is_guarding());

        // stays on the fallback until recovered
        assert_eq!(boundary.guard(|| 1), None);
        boundary.recover();
        assert_eq!(boundary.guard(|| 1), Some(1));
    }

    #[test]
    fn test_static_str_payload() {
        let mut boundary = CrashBoundary::new();
        let _: Option<()> = boundary.guard(|| std::panic::panic_any("plain"));
        assert_eq!(boundary.fault().unwrap().message, "plain");
        assert!(boundary.fault().unwrap().diagnostic().starts_with("plain"));
    }
}
