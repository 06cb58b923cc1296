use crate::event::{InputEvent, MouseButton, WindowId};
use crate::figure::Figure;
use crate::frame::FrameSurface;
use iced::widget::canvas;
use iced::{Point, Rectangle, Renderer, Size, Theme, mouse};

/// Per-canvas pointer tracking.
#[derive(Default)]
pub struct PointerState {
    pub last_position: Option<Point>,
    pub left_held: bool,
    /// Size reported with the last resize event.
    pub reported_size: Option<Size>,
}

/// Canvas program drawing one pane of a figure: the plots or the toolbar.
pub struct FigureCanvas<'a> {
    figure: &'a Figure,
    pane: WindowId,
}

impl<'a> FigureCanvas<'a> {
    pub fn plots(figure: &'a Figure) -> Self {
        Self {
            figure,
            pane: WindowId::Main,
        }
    }

    pub fn toolbar(figure: &'a Figure) -> Self {
        Self {
            figure,
            pane: WindowId::Toolbar,
        }
    }
}

fn map_button(button: mouse::Button) -> Option<MouseButton> {
    match button {
        mouse::Button::Left => Some(MouseButton::Left),
        mouse::Button::Right => Some(MouseButton::Right),
        mouse::Button::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

impl<Message> canvas::Program<Message> for FigureCanvas<'_>
where
    Message: From<InputEvent>,
{
    type State = PointerState;

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        {
            let mut surface = FrameSurface::new(&mut frame);
            match self.pane {
                WindowId::Main => self.figure.render_frame(&mut surface),
                WindowId::Toolbar => self.figure.render_toolbar(&mut surface),
            }
        }
        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let window = self.pane;

        if window == WindowId::Main
            && bounds.size() != self.figure.size()
            && state.reported_size != Some(bounds.size())
        {
            state.reported_size = Some(bounds.size());
            return Some(canvas::Action::publish(Message::from(InputEvent::Resized {
                width: bounds.width,
                height: bounds.height,
            })));
        }

        let iced::Event::Mouse(mouse_event) = event else {
            return None;
        };

        let input = match mouse_event {
            mouse::Event::ButtonPressed(button) => {
                let position = cursor.position_in(bounds)?;
                let button = map_button(*button)?;
                if button == MouseButton::Left {
                    state.left_held = true;
                }
                state.last_position = Some(position);
                InputEvent::MouseDown {
                    window,
                    x: position.x,
                    y: position.y,
                    button,
                }
            }
            mouse::Event::ButtonReleased(button) => {
                let button = map_button(*button)?;
                if button == MouseButton::Left {
                    state.left_held = false;
                }
                let position = cursor.position_from(bounds.position())?;
                InputEvent::MouseUp {
                    window,
                    x: position.x,
                    y: position.y,
                    button,
                }
            }
            mouse::Event::CursorMoved { .. } => {
                let position = cursor.position_from(bounds.position())?;
                let previous = state.last_position.replace(position);
                if !state.left_held && cursor.position_in(bounds).is_none() {
                    return None;
                }
                let (dx, dy) = previous.map_or((0.0, 0.0), |p| (position.x - p.x, position.y - p.y));
                InputEvent::MouseMotion {
                    window,
                    x: position.x,
                    y: position.y,
                    dx,
                    dy,
                    left_held: state.left_held,
                }
            }
            _ => return None,
        };

        let action = canvas::Action::publish(Message::from(input));
        Some(match input {
            InputEvent::MouseDown { .. } => action.and_capture(),
            _ => action,
        })
    }
}
