//! Windowed display of a figure on top of `iced::application`.

use crate::canvas::FigureCanvas;
use crate::event::{Flow, InputEvent};
use crate::export::save_png;
use crate::figure::Figure;
use crate::surface::PixelBuffer;
use crate::toolbar::{PANEL_HEIGHT, PANEL_WIDTH};
use iced::widget::{canvas, row, text};
use iced::{Element, Length, Size, Subscription, Task, Theme, event, window};
use std::cell::Cell;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    Input(InputEvent),
    WindowSeen(window::Id),
    Screenshot(PathBuf, window::Screenshot),
}

impl From<InputEvent> for Message {
    fn from(event: InputEvent) -> Self {
        Message::Input(event)
    }
}

struct Viewer {
    /// Moved in once at boot; `None` only if the runtime boots twice.
    figure: Option<Figure>,
    window: Option<window::Id>,
}

impl Viewer {
    fn boot(figure: &Cell<Option<Figure>>) -> Self {
        let figure = figure.take();
        if figure.is_none() {
            log::error!("figure was already handed to an earlier window");
        }
        Self {
            figure,
            window: None,
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Input(event) => {
                let Some(figure) = self.figure.as_mut() else {
                    return iced::exit();
                };
                if figure.handle_event(&event) == Flow::Exit {
                    // Released here, before the runtime tears down.
                    self.figure = None;
                    return iced::exit();
                }

                let saves = figure.apply_pending();
                let Some(id) = self.window else {
                    if !saves.is_empty() {
                        log::warn!("window not known yet, dropping {} save request(s)", saves.len());
                    }
                    return Task::none();
                };
                Task::batch(saves.into_iter().map(move |path| {
                    window::screenshot(id).map(move |shot| Message::Screenshot(path.clone(), shot))
                }))
            }
            Message::WindowSeen(id) => {
                self.window = Some(id);
                Task::none()
            }
            Message::Screenshot(path, shot) => {
                let pixels = PixelBuffer {
                    width: shot.size.width,
                    height: shot.size.height,
                    rgba: shot.rgba.to_vec(),
                };
                // Errors are logged by save_png; a failed save keeps the window open.
                let _ = save_png(&pixels, &path);
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let Some(figure) = &self.figure else {
            return text("figure released").into();
        };
        let plots = canvas(FigureCanvas::plots(figure))
            .width(Length::Fill)
            .height(Length::Fill);

        if figure.toolbar().is_some() {
            let panel = canvas(FigureCanvas::toolbar(figure))
                .width(PANEL_WIDTH)
                .height(PANEL_HEIGHT);
            row![plots, panel].into()
        } else {
            plots.into()
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status, id| match event {
            iced::Event::Window(
                window::Event::Opened { .. } | window::Event::Focused | window::Event::Resized(_),
            ) => Some(Message::WindowSeen(id)),
            _ => None,
        })
    }
}

/// Opens a window showing `figure` and blocks until it is closed.
///
/// With a toolbar attached, the control panel is docked to the right of the
/// plots. The figure is released when the window closes.
pub fn show(figure: Figure) -> iced::Result {
    let title = figure.title().to_string();
    let size = figure.size();
    let window_size = if figure.toolbar().is_some() {
        Size::new(size.width + PANEL_WIDTH, size.height.max(PANEL_HEIGHT))
    } else {
        size
    };
    let font = figure.font_data().map(<[u8]>::to_vec);

    log::debug!("opening window \"{title}\" at {}x{}", window_size.width, window_size.height);

    let figure = Cell::new(Some(figure));
    let mut application = iced::application(
        move || Viewer::boot(&figure),
        Viewer::update,
        Viewer::view,
    )
    .title(move |_: &Viewer| title.clone())
    .window_size(window_size)
    .theme(Theme::Light)
    .subscription(Viewer::subscription);

    if let Some(font) = font {
        application = application.font(font);
    }

    application.run()
}

impl Figure {
    /// Shows the figure in a window; see [`show`].
    pub fn display(self) -> iced::Result {
        show(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_moves_into_first_viewer_only() {
        let figure = Cell::new(Some(Figure::subplots("Boot", 200, 100, 1).unwrap()));
        let viewer = Viewer::boot(&figure);
        assert_eq!(viewer.figure.as_ref().map(Figure::title), Some("Boot"));
        assert!(Viewer::boot(&figure).figure.is_none());
    }

    #[test]
    fn quit_releases_figure() {
        let mut viewer = Viewer {
            figure: Some(Figure::subplots("Quit", 200, 100, 1).unwrap()),
            window: None,
        };
        let _ = viewer.update(Message::Input(InputEvent::Quit));
        assert!(viewer.figure.is_none());
    }
}
