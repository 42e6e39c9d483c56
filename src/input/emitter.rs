//! Minimal publish/subscribe keyed by event-type string.
//!
//! Listeners run synchronously in registration order. There is no error
//! isolation: the first listener returning `Err` stops the remaining
//! listeners of that emit and the error propagates to the caller. Callers that
//! need isolation must wrap their own listeners.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Shared listener handle.
///
/// `C` is the context handed to the listener (the canvas, so listeners may
/// mutate the scene), `E` the event payload. The same handle can be
/// registered more than once; [`EventEmitter::off`] matches by identity.
pub type Listener<C, E> = Rc<dyn Fn(&mut C, &E) -> anyhow::Result<()>>;

/// Wraps a closure into a [`Listener`] handle.
pub fn listener<C, E, F>(f: F) -> Listener<C, E>
where
    F: Fn(&mut C, &E) -> anyhow::Result<()> + 'static,
{
    Rc::new(f)
}

pub struct EventEmitter<C, E> {
    events: HashMap<String, Vec<Listener<C, E>>>,
}

impl<C, E> Default for EventEmitter<C, E> {
    fn default() -> Self {
        Self {
            events: HashMap::new(),
        }
    }
}

impl<C, E> fmt::Debug for EventEmitter<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<_> = self
            .events
            .iter()
            .map(|(event_type, list)| (event_type.as_str(), list.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventEmitter")
            .field("listeners", &counts)
            .finish()
    }
}

impl<C, E> EventEmitter<C, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `listener` for `event_type`. Duplicates fire once per registration.
    pub fn on(&mut self, event_type: impl Into<String>, listener: Listener<C, E>) {
        self.events
            .entry(event_type.into())
            .or_default()
            .push(listener);
    }

    /// Removes the first registration of `listener` for `event_type`.
    ///
    /// Returns `false` when it was not registered.
    pub fn off(&mut self, event_type: &str, listener: &Listener<C, E>) -> bool {
        let Some(list) = self.events.get_mut(event_type) else {
            return false;
        };
        match list.iter().position(|l| Rc::ptr_eq(l, listener)) {
            Some(index) => {
                list.remove(index);
                if list.is_empty() {
                    self.events.remove(event_type);
                }
                true
            }
            None => false,
        }
    }

    /// Snapshot of the listeners currently registered for `event_type`.
    ///
    /// Dispatch iterates the snapshot, so listeners added or removed while an
    /// event is being delivered take effect from the next emit.
    pub fn listeners(&self, event_type: &str) -> Vec<Listener<C, E>> {
        self.events.get(event_type).cloned().unwrap_or_default()
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.events.get(event_type).map_or(0, Vec::len)
    }

    pub fn has_listeners(&self, event_type: &str) -> bool {
        self.listener_count(event_type) > 0
    }

    /// Drops every listener for every event type.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Invokes every listener registered for `event_type`, in order.
    pub fn emit(&self, event_type: &str, ctx: &mut C, event: &E) -> anyhow::Result<()> {
        for listener in self.listeners(event_type) {
            listener(ctx, event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Log = Vec<&'static str>;

    #[test]
    fn emit_runs_listeners_in_registration_order() {
        let mut emitter: EventEmitter<Log, ()> = EventEmitter::new();
        emitter.on("ping", listener(|log: &mut Log, _| {
            log.push("first");
            Ok(())
        }));
        emitter.on("ping", listener(|log: &mut Log, _| {
            log.push("second");
            Ok(())
        }));
        emitter.on("other", listener(|log: &mut Log, _| {
            log.push("other");
            Ok(())
        }));

        let mut log = Log::new();
        emitter.emit("ping", &mut log, &()).unwrap();
        assert_eq!(log, vec!["first", "second"]);
    }

    #[test]
    fn duplicate_registration_fires_twice_and_off_removes_one() {
        let mut emitter: EventEmitter<Log, ()> = EventEmitter::new();
        let handle = listener(|log: &mut Log, _: &()| {
            log.push("hit");
            Ok(())
        });
        emitter.on("ping", handle.clone());
        emitter.on("ping", handle.clone());

        let mut log = Log::new();
        emitter.emit("ping", &mut log, &()).unwrap();
        assert_eq!(log.len(), 2);

        assert!(emitter.off("ping", &handle));
        assert_eq!(emitter.listener_count("ping"), 1);
        assert!(emitter.off("ping", &handle));
        assert!(!emitter.off("ping", &handle));
        assert!(!emitter.has_listeners("ping"));
    }

    #[test]
    fn failing_listener_aborts_remaining_listeners() {
        let mut emitter: EventEmitter<Log, ()> = EventEmitter::new();
        emitter.on("ping", listener(|_: &mut Log, _| anyhow::bail!("boom")));
        emitter.on("ping", listener(|log: &mut Log, _| {
            log.push("unreachable");
            Ok(())
        }));

        let mut log = Log::new();
        let err = emitter.emit("ping", &mut log, &()).unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert!(log.is_empty());
    }

    #[test]
    fn emit_without_listeners_is_a_no_op() {
        let emitter: EventEmitter<Log, ()> = EventEmitter::new();
        let mut log = Log::new();
        emitter.emit("missing", &mut log, &()).unwrap();
        assert!(log.is_empty());
    }
}
