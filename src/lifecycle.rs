//! Start/stop orchestration for long-running units
//!
//! A [`Bootstrapper`] owns an ordered list of [`Startable`] units, such as a
//! feed that fills a keyed collection and the view that renders it.
//!
//! - **Sequential start** runs each unit's `on_start` in list order on the
//!   calling thread and stops at the first failure.
//! - **Concurrent start** spawns one named thread per unit and hands the
//!   join handles back as [`StartHandles`]. The caller decides whether to
//!   wait.
//! - **Stop** always runs in reverse list order on the calling thread. Every
//!   unit is asked to stop even if an earlier one fails; the first failure
//!   is returned.
//!
//! Observers registered with [`Bootstrapper::subscribe`] receive a
//! [`LifecycleEvent`] per unit and one for the whole set. In concurrent mode
//! [`LifecycleEvent::Started`] means every unit has been launched, not that
//! every unit has finished starting.

use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use log::{error, info};

use crate::error::{Error, Result};

/// A unit that can be started and stopped.
pub trait Startable: Send + Sync {
    fn name(&self) -> &str;

    fn on_start(&self) -> Result<()>;

    fn on_stop(&self) -> Result<()>;
}

/// How [`Bootstrapper::start`] launches its units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartMode {
    #[default]
    Sequential,
    Concurrent,
}

/// Notification emitted while starting or stopping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    UnitStarted { name: String },
    UnitStopped { name: String },
    Started,
    Stopped,
}

type Listener = Arc<dyn Fn(&LifecycleEvent) + Send + Sync>;

#[derive(Clone, Default)]
struct Listeners {
    inner: Arc<Mutex<Vec<Listener>>>,
}

impl Listeners {
    fn add(&self, listener: Listener) -> Result<()> {
        self.inner
            .lock()
            .map_err(|_| Error::LockPoisoned {
                context: "lifecycle listeners".to_string(),
            })?
            .push(listener);
        Ok(())
    }

    fn emit(&self, event: &LifecycleEvent) {
        // Snapshot first so a listener can't deadlock by subscribing.
        let listeners = match self.inner.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        for listener in listeners {
            listener(event);
        }
    }
}

/// Join handles for units started concurrently.
#[derive(Default)]
pub struct StartHandles {
    handles: Vec<(String, JoinHandle<Result<()>>)>,
}

impl StartHandles {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Names of the units still owned by these handles.
    pub fn names(&self) -> Vec<&str> {
        self.handles.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Wait for every unit to finish starting.
    ///
    /// # Errors
    ///
    /// Returns the first failure in list order. A unit whose start panicked
    /// is reported as `Error::Lifecycle`.
    pub fn wait(self) -> Result<()> {
        let mut first_error = None;
        for (name, handle) in self.handles {
            let outcome = handle.join().unwrap_or_else(|_| {
                Err(Error::Lifecycle {
                    unit: name.clone(),
                    message: "start panicked".to_string(),
                })
            });
            if let Err(e) = outcome {
                error!("unit '{}' failed to start: {}", name, e);
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Starts and stops a fixed, ordered set of units.
#[derive(Default)]
pub struct Bootstrapper {
    mode: StartMode,
    units: Vec<Arc<dyn Startable>>,
    listeners: Listeners,
}

impl Bootstrapper {
    pub fn new(mode: StartMode) -> Self {
        Self {
            mode,
            units: Vec::new(),
            listeners: Listeners::default(),
        }
    }

    pub fn mode(&self) -> StartMode {
        self.mode
    }

    pub fn add_startable(&mut self, unit: Arc<dyn Startable>) {
        self.units.push(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Register a lifecycle observer.
    ///
    /// In concurrent mode the observer is called from the unit threads.
    pub fn subscribe<F>(&self, listener: F) -> Result<()>
    where
        F: Fn(&LifecycleEvent) + Send + Sync + 'static,
    {
        self.listeners.add(Arc::new(listener))
    }

    /// Start every unit according to the configured mode.
    ///
    /// # Errors
    ///
    /// Sequential mode returns the first unit failure; later units are not
    /// started. Concurrent mode only fails if a thread cannot be spawned;
    /// unit failures surface through [`StartHandles::wait`].
    pub fn start(&self) -> Result<StartHandles> {
        info!(
            "starting {} unit(s) ({:?})",
            self.units.len(),
            self.mode
        );

        let handles = match self.mode {
            StartMode::Sequential => {
                for unit in &self.units {
                    start_unit(unit.as_ref(), &self.listeners)?;
                }
                StartHandles::default()
            }
            StartMode::Concurrent => {
                let mut handles = StartHandles::default();
                for unit in &self.units {
                    let name = unit.name().to_string();
                    let unit = Arc::clone(unit);
                    let listeners = self.listeners.clone();
                    let handle = thread::Builder::new()
                        .name(format!("start-{}", name))
                        .spawn(move || start_unit(unit.as_ref(), &listeners))
                        .map_err(|e| Error::Lifecycle {
                            unit: name.clone(),
                            message: format!("failed to spawn start thread: {}", e),
                        })?;
                    handles.handles.push((name, handle));
                }
                handles
            }
        };

        self.listeners.emit(&LifecycleEvent::Started);
        Ok(handles)
    }

    /// Stop every unit in reverse order.
    ///
    /// # Errors
    ///
    /// Returns the first failure after all units have been asked to stop.
    pub fn stop(&self) -> Result<()> {
        info!("stopping {} unit(s)", self.units.len());

        let mut first_error = None;
        for unit in self.units.iter().rev() {
            match unit.on_stop() {
                Ok(()) => {
                    info!("stopped unit '{}'", unit.name());
                    self.listeners.emit(&LifecycleEvent::UnitStopped {
                        name: unit.name().to_string(),
                    });
                }
                Err(e) => {
                    error!("unit '{}' failed to stop: {}", unit.name(), e);
                    first_error.get_or_insert(e);
                }
            }
        }

        self.listeners.emit(&LifecycleEvent::Stopped);
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn start_unit(unit: &dyn Startable, listeners: &Listeners) -> Result<()> {
    unit.on_start()?;
    info!("started unit '{}'", unit.name());
    listeners.emit(&LifecycleEvent::UnitStarted {
        name: unit.name().to_string(),
    });
    Ok(())
}
