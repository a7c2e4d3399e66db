use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[derive(Debug, Clone)]
pub struct RunStats {
    pub memory_usage_mb: Option<u64>,
    pub peak_memory_mb: Option<u64>,
    pub elapsed_time: Duration,
}

/// Logs elapsed time (and process memory with the `cli` feature) at the
/// phases of a run.
pub struct RunMonitor {
    #[cfg(feature = "cli")]
    system: Option<(Mutex<System>, Pid)>,
    #[cfg(feature = "cli")]
    peak_memory: Mutex<u64>,
    start_time: Instant,
    enabled: bool,
}

impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            #[cfg(feature = "cli")]
            system: if enabled {
                sysinfo::get_current_pid().ok().map(|pid| {
                    let mut system = System::new_with_specifics(RefreshKind::everything());
                    system.refresh_all();
                    (Mutex::new(system), pid)
                })
            } else {
                None
            },
            #[cfg(feature = "cli")]
            peak_memory: Mutex::new(0),
            start_time: Instant::now(),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn get_stats(&self) -> Option<RunStats> {
        if !self.enabled {
            return None;
        }

        let memory_usage_mb = self.memory_mb();
        let peak_memory_mb = memory_usage_mb.and_then(|mb| self.update_peak(mb));

        Some(RunStats {
            memory_usage_mb,
            peak_memory_mb,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    #[cfg(feature = "cli")]
    fn memory_mb(&self) -> Option<u64> {
        let (system, pid) = self.system.as_ref()?;
        let mut system = system.lock().ok()?;
        system.refresh_all();
        system.process(*pid).map(|p| p.memory() / 1024 / 1024)
    }

    #[cfg(not(feature = "cli"))]
    fn memory_mb(&self) -> Option<u64> {
        None
    }

    #[cfg(feature = "cli")]
    fn update_peak(&self, memory_mb: u64) -> Option<u64> {
        let mut peak = self.peak_memory.lock().ok()?;
        *peak = (*peak).max(memory_mb);
        Some(*peak)
    }

    #[cfg(not(feature = "cli"))]
    fn update_peak(&self, _memory_mb: u64) -> Option<u64> {
        None
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            match stats.memory_usage_mb {
                Some(memory) => tracing::info!(
                    "📊 {} - Memory: {}MB, Peak: {}MB, Time: {:?}",
                    phase,
                    memory,
                    stats.peak_memory_mb.unwrap_or(memory),
                    stats.elapsed_time
                ),
                None => tracing::info!("📊 {} - Time: {:?}", phase, stats.elapsed_time),
            }
        }
    }
}

impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
