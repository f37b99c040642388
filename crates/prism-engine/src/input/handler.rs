use crate::gui::GuiContext;
use crate::window::WindowMessage;

use super::types::{InputEvent, Modifiers};

/// Input-translation capability sitting between raw window messages and a GUI context.
pub trait InputHandler<C: GuiContext + ?Sized> {
    /// Inspects a raw message. Returns `true` when the GUI claimed it, in which
    /// case the window skips its own handling of that message.
    fn process_message(&mut self, gui: &mut C, message: &WindowMessage) -> bool;

    /// Forwards pending input into `gui`. Called once per frame, before `new_frame`.
    fn update(&mut self, gui: &mut C);
}

/// Default handler: queues translated events and flushes them each frame.
///
/// Pointer events are claimed while the GUI wants the mouse; key and text
/// events while it wants the keyboard.
#[derive(Debug, Default)]
pub struct InputQueue {
    pending: Vec<InputEvent>,
    modifiers: Modifiers,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[InputEvent] {
        &self.pending
    }

    /// Last modifier state seen on the message stream.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

impl<C: GuiContext + ?Sized> InputHandler<C> for InputQueue {
    fn process_message(&mut self, gui: &mut C, message: &WindowMessage) -> bool {
        let WindowMessage::Input(event) = message else {
            return false;
        };

        match event {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,
            InputEvent::Key { modifiers, .. } => self.modifiers = *modifiers,
            InputEvent::Focused(false) => self.modifiers = Modifiers::default(),
            _ => {}
        }

        let claimed = (event.is_pointer() && gui.wants_capture_mouse())
            || (event.is_keyboard() && gui.wants_capture_keyboard());

        self.pending.push(event.clone());
        claimed
    }

    fn update(&mut self, gui: &mut C) {
        for event in self.pending.drain(..) {
            gui.push_input(event);
        }
    }
}
