//! Pre-flight network availability check consulted by repositories.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

/// Answers "is any network reachable right now?" without blocking.
pub trait ConnectivityProbe: Send + Sync {
    fn is_network_available(&self) -> bool;
}

/// Probe that always reports a network. Default for clients built without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

impl ConnectivityProbe for AlwaysOnline {
    fn is_network_available(&self) -> bool {
        true
    }
}

/// Probe driven by the host application, which forwards platform connectivity events
/// through [`set_online`](Self::set_online).
#[derive(Debug)]
pub struct NetworkMonitor {
    online: AtomicBool,
}

impl NetworkMonitor {
    pub fn new(online: bool) -> Self {
        Self {
            online: AtomicBool::new(online),
        }
    }

    pub fn set_online(&self, online: bool) {
        let previous = self.online.swap(online, Ordering::SeqCst);
        if previous != online {
            info!(online, "network availability changed");
        }
    }
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConnectivityProbe for NetworkMonitor {
    fn is_network_available(&self) -> bool {
        self.online.load(Ordering::SeqCst)
    }
}
