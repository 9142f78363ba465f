use super::{Page, Submission, Task};
use crate::{error::PageError, form::Field, message::Message};
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    time::Duration,
};

struct Timer {
    due: Duration,
    seq: u64,
    task: Task,
}

/// In-memory page driven by a virtual clock.
#[derive(Default)]
pub struct MockPage {
    fields: RefCell<HashMap<Field, String>>,
    alerts: RefCell<Vec<String>>,
    message: RefCell<Option<Message>>,
    has_message_region: Cell<bool>,

    now: Cell<Duration>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
}

impl MockPage {
    /// A page with both inputs and the message region present.
    pub fn new(username: &str, password: &str) -> Self {
        let page = MockPage::default();
        page.has_message_region.set(true);
        page.fill(username, password);
        page
    }

    /// A page without the `#message` element.
    pub fn without_message_region(username: &str, password: &str) -> Self {
        let page = MockPage::new(username, password);
        page.has_message_region.set(false);
        page
    }

    pub fn fill(&self, username: &str, password: &str) {
        let mut fields = self.fields.borrow_mut();
        fields.insert(Field::Username, username.to_owned());
        fields.insert(Field::Password, password.to_owned());
    }

    pub fn remove_field(&self, field: Field) {
        self.fields.borrow_mut().remove(&field);
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn message(&self) -> Option<Message> {
        self.message.borrow().clone()
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Moves the clock forward by `by`, firing every timer that falls due on the way,
    /// including ones scheduled by timers fired during this call.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let index = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                index.map(|i| timers.remove(i))
            };
            match next {
                Some(timer) => {
                    self.now.set(timer.due);
                    (timer.task)();
                }
                None => break,
            }
        }
        self.now.set(target);
    }
}

impl Page for MockPage {
    fn field_value(&self, field: Field) -> Result<String, PageError> {
        self.fields
            .borrow()
            .get(&field)
            .cloned()
            .ok_or(PageError::MissingElement(field.id()))
    }

    fn alert(&self, text: &str) -> Result<(), PageError> {
        self.alerts.borrow_mut().push(text.to_owned());
        Ok(())
    }

    fn render_message(&self, message: Option<&Message>) -> Result<(), PageError> {
        if !self.has_message_region.get() {
            return Err(PageError::MissingElement(super::MESSAGE_ID));
        }
        *self.message.borrow_mut() = message.cloned();
        Ok(())
    }

    fn set_timeout(&self, delay: Duration, task: Task) -> Result<(), PageError> {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.timers.borrow_mut().push(Timer {
            due: self.now.get() + delay,
            seq,
            task,
        });
        Ok(())
    }
}

/// Submit event that remembers whether its default action was suppressed.
#[derive(Debug, Default)]
pub struct MockEvent {
    prevented: Cell<bool>,
}

impl MockEvent {
    pub fn new() -> Self {
        MockEvent::default()
    }

    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

impl Submission for MockEvent {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

#[test]
fn test_timers_fire_in_order() {
    use std::rc::Rc;

    let page = Rc::new(MockPage::new("", ""));
    let fired = Rc::new(RefCell::new(Vec::new()));

    for (name, ms) in [("b", 20), ("a", 10), ("c", 20)] {
        let fired = Rc::clone(&fired);
        page.set_timeout(
            Duration::from_millis(ms),
            Box::new(move || fired.borrow_mut().push(name)),
        )
        .unwrap();
    }

    page.advance(Duration::from_millis(15));
    assert_eq!(*fired.borrow(), vec!["a"]);
    page.advance(Duration::from_millis(5));
    assert_eq!(*fired.borrow(), vec!["a", "b", "c"]);
    assert_eq!(page.pending_timers(), 0);
    assert_eq!(page.now(), Duration::from_millis(20));
}

#[test]
fn test_chained_timers_fire_within_one_advance() {
    use std::rc::Rc;

    let page = Rc::new(MockPage::new("", ""));
    let fired = Rc::new(Cell::new(0));

    let inner_page = Rc::clone(&page);
    let inner_fired = Rc::clone(&fired);
    page.set_timeout(
        Duration::from_millis(100),
        Box::new(move || {
            inner_fired.set(1);
            let inner_fired = Rc::clone(&inner_fired);
            inner_page
                .set_timeout(
                    Duration::from_millis(100),
                    Box::new(move || inner_fired.set(2)),
                )
                .unwrap();
        }),
    )
    .unwrap();

    page.advance(Duration::from_millis(199));
    assert_eq!(fired.get(), 1);
    page.advance(Duration::from_millis(1));
    assert_eq!(fired.get(), 2);
}

#[test]
fn test_missing_elements() {
    let page = MockPage::without_message_region("a", "b");
    page.remove_field(Field::Password);
    assert_eq!(page.field_value(Field::Username), Ok("a".to_owned()));
    assert_eq!(
        page.field_value(Field::Password),
        Err(PageError::MissingElement("password"))
    );
    assert_eq!(
        page.render_message(None),
        Err(PageError::MissingElement("message"))
    );
}
