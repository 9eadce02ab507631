//! Events the engine reports to its host, and the observer list that
//! delivers them.

use std::fmt;

/// Discrete outcomes of pet interactions. Payloads are plain values so hosts
/// can forward them anywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PetEvent {
    Patted,
    Splashed,
    Fed { food_label: String },
    Played { toy_id: String },
}

impl PetEvent {
    pub fn name(&self) -> &'static str {
        match self {
            PetEvent::Patted => "pet patted",
            PetEvent::Splashed => "pet splashed",
            PetEvent::Fed { .. } => "pet fed",
            PetEvent::Played { .. } => "pet played",
        }
    }
}

impl fmt::Display for PetEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PetEvent::Patted | PetEvent::Splashed => f.write_str(self.name()),
            PetEvent::Fed { food_label } => write!(f, "{}({})", self.name(), food_label),
            PetEvent::Played { toy_id } => write!(f, "{}({})", self.name(), toy_id),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&PetEvent)>;

/// Registered observers, called in subscription order.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&PetEvent) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.handlers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(i, _)| *i != id);
        self.handlers.len() != before
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn emit(&mut self, event: &PetEvent) {
        log::info!("event: {event}");
        for (_, h) in &mut self.handlers {
            h(event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn subscribers_see_events_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let sink = seen.clone();
        let id = bus.subscribe(move |e| sink.borrow_mut().push(e.to_string()));
        bus.emit(&PetEvent::Fed {
            food_label: "Tuna".into(),
        });
        assert!(bus.unsubscribe(id));
        bus.emit(&PetEvent::Patted);
        assert_eq!(*seen.borrow(), vec!["pet fed(Tuna)".to_string()]);
    }
}
