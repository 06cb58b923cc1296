//! Backend-neutral input events and the sources that deliver them.

use std::collections::VecDeque;

/// Window an event originated from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowId {
    #[default]
    Main,
    Toolbar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// The application was asked to quit.
    Quit,
    /// The main window now has this size in pixels.
    Resized { width: f32, height: f32 },
    MouseDown {
        window: WindowId,
        x: f32,
        y: f32,
        button: MouseButton,
    },
    /// Cursor motion; `dx`/`dy` are relative to the previous position.
    MouseMotion {
        window: WindowId,
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        left_held: bool,
    },
    MouseUp {
        window: WindowId,
        x: f32,
        y: f32,
        button: MouseButton,
    },
    CloseRequested { window: WindowId },
}

impl InputEvent {
    /// The window the event belongs to. Quit and resize belong to the main window.
    pub fn window(&self) -> WindowId {
        match *self {
            InputEvent::Quit | InputEvent::Resized { .. } => WindowId::Main,
            InputEvent::MouseDown { window, .. }
            | InputEvent::MouseMotion { window, .. }
            | InputEvent::MouseUp { window, .. }
            | InputEvent::CloseRequested { window } => window,
        }
    }
}

/// Whether the display loop keeps running after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Source of input events for the display loop.
pub trait EventSource {
    /// Next pending event of the current frame, `None` once the frame's
    /// events are drained.
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Replays prepared frames of events, then asks to quit.
///
/// Each call to [`poll_event`](EventSource::poll_event) drains the current
/// frame; the `None` that ends a frame advances to the next one.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEvents {
    frames: VecDeque<VecDeque<InputEvent>>,
    current: Option<VecDeque<InputEvent>>,
}

impl ScriptedEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a frame holding `events`.
    pub fn frame(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.frames.push_back(events.into_iter().collect());
        self
    }

    /// Appends `count` frames without any events.
    pub fn idle(mut self, count: usize) -> Self {
        self.frames
            .extend(std::iter::repeat_with(VecDeque::new).take(count));
        self
    }
}

impl EventSource for ScriptedEvents {
    fn poll_event(&mut self) -> Option<InputEvent> {
        if self.current.is_none() {
            match self.frames.pop_front() {
                Some(frame) => self.current = Some(frame),
                None => return Some(InputEvent::Quit),
            }
        }

        let next = self.current.as_mut().and_then(VecDeque::pop_front);
        if next.is_none() {
            self.current = None;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(source: &mut impl EventSource) -> Vec<InputEvent> {
        std::iter::from_fn(|| source.poll_event()).collect()
    }

    #[test]
    fn frames_are_separated_by_none() {
        let mut events = ScriptedEvents::new()
            .frame([InputEvent::Resized {
                width: 640.0,
                height: 480.0,
            }])
            .idle(1);

        assert_eq!(drain(&mut events).len(), 1);
        assert!(drain(&mut events).is_empty());
        assert_eq!(events.poll_event(), Some(InputEvent::Quit));
    }

    #[test]
    fn window_of_event() {
        let close = InputEvent::CloseRequested {
            window: WindowId::Toolbar,
        };
        assert_eq!(close.window(), WindowId::Toolbar);
        assert_eq!(InputEvent::Quit.window(), WindowId::Main);
    }
}
