use gloo::timers::callback::Timeout;
use std::rc::Rc;
use yew::prelude::*;

/// A message that clears itself after `duration_ms`
#[derive(Clone)]
pub struct UseTransientHandle {
    message: UseStateHandle<Option<String>>,
    timer: Rc<std::cell::RefCell<Option<Timeout>>>,
    duration_ms: u32,
}

impl UseTransientHandle {
    pub fn get(&self) -> Option<String> {
        (*self.message).clone()
    }

    pub fn show(&self, text: impl Into<String>) {
        self.message.set(Some(text.into()));
        let message = self.message.clone();
        // replacing the timer cancels the previous one
        *self.timer.borrow_mut() = Some(Timeout::new(self.duration_ms, move || {
            message.set(None);
        }));
    }

    pub fn clear(&self) {
        self.timer.borrow_mut().take();
        self.message.set(None);
    }
}

#[hook]
pub fn use_transient(duration_ms: u32) -> UseTransientHandle {
    let message = use_state(|| Option::<String>::None);
    let timer = use_mut_ref(|| Option::<Timeout>::None);
    UseTransientHandle {
        message,
        timer: Rc::clone(&timer),
        duration_ms,
    }
}
