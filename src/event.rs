use std::cell::RefCell;

/// Payload-free "state changed" callback
pub type ChangeHandler = Box<dyn FnMut()>;

/// Broadcasts a single change signal to every subscriber.
///
/// Subscribers re-read whatever state they care about; the signal carries
/// nothing. A handler must not subscribe to the same bus from inside its
/// own callback.
pub struct ChangeBus {
    handlers: RefCell<Vec<ChangeHandler>>,
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive change signals
    pub fn subscribe(&self, handler: impl FnMut() + 'static) {
        self.handlers.borrow_mut().push(Box::new(handler));
    }

    /// Notify all registered handlers
    pub fn emit(&self) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler();
        }
    }
}
