use std::fmt;

/// The broad kind of an event, independent of its rendered message —
/// sinks that care about structure (rather than just the text) can match
/// on this instead of parsing the message back apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    SimulatorStart,
    SimulatorEnd,
    AppStart,
    AppFinish,
    OperationStart,
    OperationEnd,
    Interrupted,
}

/// One line of the event trace: a simulated timestamp, the process it
/// concerns, its category, and the exact message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub timestamp: String,
    pub pid: u32,
    pub category: EventCategory,
    pub message: String,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.timestamp, self.message)
    }
}

/// Where emitted events go. Implementors decide how `Event`s are
/// rendered and stored (console line, file line, or both); `ossim-core`
/// only ever calls `record`.
pub trait EventSink {
    fn record(&mut self, event: &Event);
}

/// Lets `ossim-cli` pick a sink at runtime (`Box<dyn EventSink>`) and
/// still hand it to `Simulation<S: EventSink>` directly.
impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&mut self, event: &Event) {
        (**self).record(event);
    }
}

/// Fan an event out to every sink in the list, in order. Used to
/// implement `LogTarget::Both` without the executor knowing how many
/// sinks are actually attached.
pub struct MultiSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl MultiSink {
    pub fn new(sinks: Vec<Box<dyn EventSink>>) -> Self {
        Self { sinks }
    }
}

impl EventSink for MultiSink {
    fn record(&mut self, event: &Event) {
        for sink in &mut self.sinks {
            sink.record(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recording(Rc<RefCell<Vec<String>>>);
    impl EventSink for Recording {
        fn record(&mut self, event: &Event) {
            self.0.borrow_mut().push(event.to_string());
        }
    }

    fn sample() -> Event {
        Event {
            timestamp: "0.000000".into(),
            pid: 1,
            category: EventCategory::AppStart,
            message: "OS: Process 1 started".into(),
        }
    }

    #[test]
    fn display_joins_timestamp_and_message_with_dash() {
        assert_eq!(sample().to_string(), "0.000000 - OS: Process 1 started");
    }

    #[test]
    fn multi_sink_fans_out_to_every_sink() {
        let log_a = Rc::new(RefCell::new(Vec::new()));
        let log_b = Rc::new(RefCell::new(Vec::new()));
        let mut multi = MultiSink::new(vec![
            Box::new(Recording(log_a.clone())),
            Box::new(Recording(log_b.clone())),
        ]);
        multi.record(&sample());
        assert_eq!(log_a.borrow().len(), 1);
        assert_eq!(log_b.borrow().len(), 1);
        assert_eq!(log_a.borrow()[0], log_b.borrow()[0]);
    }
}
