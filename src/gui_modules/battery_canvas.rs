use crate::gui_modules::{create_scene_style, Message, MUTED_TEXT};
use crate::render::{render, OrbitCamera};
use crate::scene::Scene;
use iced::mouse;
use iced::widget::canvas::{self, event, Cache, Canvas, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Theme};

const SCENE_HEIGHT: f32 = 420.0;
const PIXELS_PER_LINE: f32 = 50.0;

#[derive(Debug, Default)]
pub struct OrbitState {
    // Starts from the scene's camera on first interaction.
    camera: Option<OrbitCamera>,
    drag_origin: Option<Point>,
}

/// Canvas program drawing the projected battery scene.
pub struct BatteryCanvas<'a> {
    scene: Scene,
    cache: &'a Cache,
}

impl<'a> BatteryCanvas<'a> {
    pub fn new(scene: Scene, cache: &'a Cache) -> Self {
        Self { scene, cache }
    }

    fn camera_mut<'s>(&self, state: &'s mut OrbitState) -> &'s mut OrbitCamera {
        state
            .camera
            .get_or_insert_with(|| OrbitCamera::from_setup(&self.scene.camera))
    }

    fn draw_tag(&self, frame: &mut canvas::Frame, anchor: Point) {
        let size = Size::new(84.0, 46.0);
        let top_left = Point::new(anchor.x - size.width / 2.0, anchor.y - size.height / 2.0);
        let card = Path::rectangle(top_left, size);
        frame.fill(&card, Color::from_rgba(0.02, 0.03, 0.04, 0.75));
        frame.stroke(
            &card,
            Stroke::default()
                .with_color(Color::from_rgba(1.0, 1.0, 1.0, 0.25))
                .with_width(1.0),
        );

        frame.fill_text(canvas::Text {
            content: self.scene.tag.title.to_owned(),
            position: Point::new(anchor.x, top_left.y + 6.0),
            color: MUTED_TEXT,
            size: 12.0.into(),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Top,
            ..canvas::Text::default()
        });
        frame.fill_text(canvas::Text {
            content: self.scene.tag.value.clone(),
            position: Point::new(anchor.x, top_left.y + 22.0),
            color: Color::WHITE,
            size: 18.0.into(),
            horizontal_alignment: alignment::Horizontal::Center,
            vertical_alignment: alignment::Vertical::Top,
            ..canvas::Text::default()
        });
    }
}

impl<'a> canvas::Program<Message> for BatteryCanvas<'a> {
    type State = OrbitState;

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        let canvas::Event::Mouse(mouse_event) = event else {
            return (event::Status::Ignored, None);
        };

        match mouse_event {
            mouse::Event::ButtonPressed(mouse::Button::Left) if cursor.is_over(bounds) => {
                state.drag_origin = cursor.position();
                (event::Status::Captured, None)
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) if state.drag_origin.is_some() => {
                state.drag_origin = None;
                (event::Status::Captured, None)
            }
            mouse::Event::CursorMoved { position } => match state.drag_origin {
                Some(origin) => {
                    let delta = position - origin;
                    self.camera_mut(state).rotate(delta.x, delta.y);
                    state.drag_origin = Some(position);
                    self.cache.clear();
                    (event::Status::Captured, None)
                }
                None => (event::Status::Ignored, None),
            },
            mouse::Event::WheelScrolled { delta } if cursor.is_over(bounds) => {
                let lines = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => y,
                    mouse::ScrollDelta::Pixels { y, .. } => y / PIXELS_PER_LINE,
                };
                self.camera_mut(state).zoom(lines);
                self.cache.clear();
                (event::Status::Captured, None)
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let camera = state
                .camera
                .unwrap_or_else(|| OrbitCamera::from_setup(&self.scene.camera));
            let rendered = render(&self.scene, &camera, frame.size());

            frame.fill_rectangle(Point::ORIGIN, frame.size(), self.scene.background.to_iced());

            for polygon in &rendered.polygons {
                let Some((first, rest)) = polygon.points.split_first() else {
                    continue;
                };
                let path = Path::new(|builder| {
                    builder.move_to(*first);
                    for point in rest {
                        builder.line_to(*point);
                    }
                    builder.close();
                });
                frame.fill(&path, polygon.color);
                // Hairline in the same color hides anti-aliasing seams between faces.
                if polygon.color.a >= 1.0 {
                    frame.stroke(
                        &path,
                        Stroke::default().with_color(polygon.color).with_width(0.6),
                    );
                }
            }

            if let Some(anchor) = rendered.tag_position {
                self.draw_tag(frame, anchor);
            }
        });

        vec![geometry]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.drag_origin.is_some() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::Idle
        }
    }
}

pub fn battery_canvas<'a>(scene: Scene, cache: &'a Cache) -> Element<'a, Message> {
    let background = scene.background.to_iced();
    container(
        Canvas::new(BatteryCanvas::new(scene, cache))
            .width(Length::Fill)
            .height(Length::Fixed(SCENE_HEIGHT)),
    )
    .padding(4)
    .width(Length::Fill)
    .style(create_scene_style(background))
    .into()
}
