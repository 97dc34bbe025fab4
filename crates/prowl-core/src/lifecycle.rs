//! Lifecycle observation for host scopes (screens, fragments, sheets).
//!
//! The walk does not depend on these events; they are diagnostic context an
//! exploration run wants in its logs, so a misbehaving click can be lined up
//! with the scope transitions it triggered.

/// Lifecycle transitions a host scope can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Attached,
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
    ViewDestroyed,
    Detached,
}

impl LifecycleEvent {
    /// Diagnostic name, matching the host callback it mirrors.
    pub fn name(self) -> &'static str {
        match self {
            LifecycleEvent::Attached => "Attached",
            LifecycleEvent::Created => "Created",
            LifecycleEvent::Started => "Started",
            LifecycleEvent::Resumed => "Resumed",
            LifecycleEvent::Paused => "Paused",
            LifecycleEvent::Stopped => "Stopped",
            LifecycleEvent::Destroyed => "Destroyed",
            LifecycleEvent::ViewDestroyed => "ViewDestroyed",
            LifecycleEvent::Detached => "Detached",
        }
    }
}

/// Receives scope lifecycle transitions.
///
/// `nested` is true for scopes hosted inside another observed scope rather
/// than directly by the screen.
pub trait LifecycleObserver {
    fn on_lifecycle_event(&self, type_name: &str, event: LifecycleEvent, nested: bool);
}

/// Observer registration surface a host exposes.
pub trait ScopeRegistry {
    /// Registers `observer` for all scopes, including nested ones.
    fn register_lifecycle_observer(&self, observer: Box<dyn LifecycleObserver>);
}

/// The default diagnostic sink: one log line per event, textual only.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl LifecycleObserver for LogObserver {
    fn on_lifecycle_event(&self, type_name: &str, event: LifecycleEvent, nested: bool) {
        log::info!(
            "scope event: name:{type_name} callback:{} nested:{nested}",
            event.name()
        );
    }
}

/// Wires the logging sink into a host's scope registry.
pub fn monitor_scopes(registry: &dyn ScopeRegistry) {
    registry.register_lifecycle_observer(Box::new(LogObserver));
}
