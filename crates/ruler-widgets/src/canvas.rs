//! Canvas program for the ruler
//!
//! Translates iced mouse and keyboard events into [`RulerInput`] messages
//! and paints the ruler from a [`RulerScene`] snapshot. The canvas holds no
//! ruler state of its own beyond what is needed to build pointer events.

use std::time::{Duration, Instant};

use iced::keyboard;
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke};
use iced::{mouse, Point, Rectangle, Size, Theme};

use crate::gesture::{MouseButton, PointerEvent};
use crate::overlay::{IndicatorShape, IndicatorSnapshot};
use crate::ruler::RulerCursor;
use crate::theme;

/// Maximum delay between two presses for a double-click
const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(400);
/// Maximum distance in pixels between two presses for a double-click
const DOUBLE_CLICK_DISTANCE: f32 = 4.0;

/// Pointer input produced by the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RulerInput {
    Pressed(PointerEvent),
    Moved(PointerEvent),
    Released(PointerEvent),
    /// The pointer left the ruler
    Left,
    /// Escape: abandon the gesture in progress
    Cancel,
}

/// Play region bounds in ruler pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneRegion {
    pub left: f32,
    pub right: f32,
    pub active: bool,
}

/// Everything the canvas paints
#[derive(Debug, Clone, PartialEq)]
pub struct RulerScene {
    pub width: f32,
    pub height: f32,
    /// Quick-play zone
    pub inner: Rectangle,
    pub scrub_zone: Option<Rectangle>,
    pub region: Option<SceneRegion>,
    pub indicator: IndicatorSnapshot,
    /// Pinned play head column while transporting pinned
    pub pinned_head: Option<f32>,
    pub cursor: RulerCursor,
}

/// Canvas state: what is needed to turn raw events into pointer events
#[derive(Debug, Clone, Copy, Default)]
pub struct RulerInteraction {
    pressed: Option<MouseButton>,
    last_press: Option<(Instant, Point)>,
    /// Last pointer position seen relative to the canvas
    last_position: Option<Point>,
    modifiers: keyboard::Modifiers,
    inside: bool,
}

impl RulerInteraction {
    fn pointer(&self, position: Point) -> PointerEvent {
        PointerEvent::new(position.x as i32, position.y as i32)
            .with_shift(self.modifiers.shift())
            .with_control(self.modifiers.control())
    }

    /// Whether a press at `position` completes a double-click
    fn register_press(&mut self, position: Point) -> bool {
        let now = Instant::now();
        let double = self.last_press.is_some_and(|(at, last)| {
            now.duration_since(at) <= DOUBLE_CLICK_INTERVAL
                && last.distance(position) <= DOUBLE_CLICK_DISTANCE
        });
        // A double-click does not start a triple
        self.last_press = if double { None } else { Some((now, position)) };
        double
    }
}

fn ruler_button(button: mouse::Button) -> Option<MouseButton> {
    match button {
        mouse::Button::Left => Some(MouseButton::Left),
        mouse::Button::Right => Some(MouseButton::Right),
        mouse::Button::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Canvas program for the ruler strip
pub struct RulerCanvas<'a, Message, F>
where
    F: Fn(RulerInput) -> Message,
{
    pub scene: &'a RulerScene,
    pub on_input: F,
}

impl<'a, Message, F> Program<Message> for RulerCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(RulerInput) -> Message,
{
    type State = RulerInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let publish = |input| Some(canvas::Action::publish((self.on_input)(input)));

        // Relative to the canvas even outside it, so drags keep tracking
        let position = cursor
            .position()
            .map(|p| Point::new(p.x - bounds.x, p.y - bounds.y));

        match event {
            Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
                interaction.modifiers = *modifiers;
                None
            }
            Event::Keyboard(keyboard::Event::KeyPressed {
                key: keyboard::Key::Named(keyboard::key::Named::Escape),
                ..
            }) if interaction.pressed.is_some() => {
                interaction.pressed = None;
                publish(RulerInput::Cancel)
            }
            Event::Mouse(mouse::Event::ButtonPressed(button)) => {
                let button = ruler_button(*button)?;
                let position = cursor.position_in(bounds)?;
                if interaction.pressed.is_some() {
                    return None;
                }
                interaction.pressed = Some(button);
                interaction.last_position = Some(position);
                let double_click =
                    button == MouseButton::Left && interaction.register_press(position);
                let event = interaction
                    .pointer(position)
                    .with_button(button)
                    .with_double_click(double_click);
                publish(RulerInput::Pressed(event)).map(canvas::Action::and_capture)
            }
            Event::Mouse(mouse::Event::ButtonReleased(button)) => {
                let button = ruler_button(*button)?;
                if interaction.pressed != Some(button) {
                    return None;
                }
                interaction.pressed = None;
                // Every press must end in a release or a cancel
                match position.or(interaction.last_position) {
                    Some(position) => publish(RulerInput::Released(
                        interaction.pointer(position).with_button(button),
                    )),
                    None => publish(RulerInput::Cancel),
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let inside = cursor.is_over(bounds);
                let was_inside = std::mem::replace(&mut interaction.inside, inside);
                if !inside && interaction.pressed.is_none() {
                    return was_inside.then(|| publish(RulerInput::Left)).flatten();
                }
                let position = position?;
                interaction.last_position = Some(position);
                publish(RulerInput::Moved(interaction.pointer(position)))
            }
            Event::Mouse(mouse::Event::CursorLeft) => {
                let was_inside = std::mem::replace(&mut interaction.inside, false);
                if was_inside && interaction.pressed.is_none() {
                    publish(RulerInput::Left)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if !cursor.is_over(bounds) && interaction.pressed.is_none() {
            return mouse::Interaction::default();
        }
        match self.scene.cursor {
            RulerCursor::Default => mouse::Interaction::default(),
            RulerCursor::Hand => mouse::Interaction::Pointer,
            RulerCursor::ResizeHorizontal => mouse::Interaction::ResizingHorizontally,
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let scene = self.scene;

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), theme::RULER_BACKGROUND);

        if let Some(zone) = scene.scrub_zone {
            frame.fill_rectangle(
                zone.position(),
                Size::new(zone.width, bounds.height - zone.y),
                theme::SCRUB_ZONE_BACKGROUND,
            );
        }

        if let Some(region) = scene.region {
            draw_play_region(&mut frame, &region, scene.inner);
        }

        // Bottom edge
        frame.stroke(
            &Path::line(
                Point::new(0.0, bounds.height - 0.5),
                Point::new(bounds.width, bounds.height - 0.5),
            ),
            Stroke::default()
                .with_color(theme::RULER_EDGE)
                .with_width(1.0),
        );

        if let Some(x) = scene.pinned_head {
            frame.stroke(
                &Path::line(Point::new(x, 0.0), Point::new(x, bounds.height)),
                Stroke::default()
                    .with_color(theme::QUICK_PLAY_INDICATOR)
                    .with_width(2.0),
            );
        }

        if scene.indicator.is_visible() {
            let zone = scene.scrub_zone.unwrap_or(scene.inner);
            draw_indicator(&mut frame, &scene.indicator, zone);
        }

        vec![frame.into_geometry()]
    }
}

/// Region band with a triangle at each edge
fn draw_play_region(frame: &mut Frame, region: &SceneRegion, inner: Rectangle) {
    let (color, height) = if region.active {
        (theme::PLAY_REGION_ACTIVE, inner.height)
    } else {
        (theme::PLAY_REGION_INACTIVE, inner.height / 2.0)
    };
    let top = inner.y + inner.height - height;
    let width = (region.right - region.left).max(1.0);
    frame.fill_rectangle(Point::new(region.left, top), Size::new(width, height), color);

    let size = theme::INDICATOR_SMALL_WIDTH as f32 / 2.0;
    let y = inner.y;
    let start = Path::new(|b| {
        b.move_to(Point::new(region.left, y));
        b.line_to(Point::new(region.left + size, y));
        b.line_to(Point::new(region.left, y + size));
        b.close();
    });
    let end = Path::new(|b| {
        b.move_to(Point::new(region.right, y));
        b.line_to(Point::new(region.right - size, y));
        b.line_to(Point::new(region.right, y + size));
        b.close();
    });
    frame.fill(&start, theme::PLAY_REGION_EDGE);
    frame.fill(&end, theme::PLAY_REGION_EDGE);
}

/// Quick-play marker, scrub double arrow or seek double double arrow
fn draw_indicator(frame: &mut Frame, indicator: &IndicatorSnapshot, zone: Rectangle) {
    let x = indicator.x as f32;
    let offset = theme::INDICATOR_OFFSET as f32;
    let top = zone.y + offset;

    match indicator.shape() {
        IndicatorShape::QuickPlay => {
            let width = theme::INDICATOR_MEDIUM_WIDTH as f32;
            let height = theme::indicator_height_for_width(theme::INDICATOR_MEDIUM_WIDTH) as f32;
            let triangle = Path::new(|b| {
                b.move_to(Point::new(x - width / 2.0, top));
                b.line_to(Point::new(x + width / 2.0, top));
                b.line_to(Point::new(x, top + height));
                b.close();
            });
            frame.fill(&triangle, theme::QUICK_PLAY_INDICATOR);
        }
        IndicatorShape::Scrub | IndicatorShape::Seek => {
            let height = theme::indicator_big_height() as f32;
            let width = theme::indicator_big_width() as f32 / 2.0;
            let mid = top + height / 2.0;
            let arrows = if indicator.shape() == IndicatorShape::Seek { 2 } else { 1 };
            for i in 0..arrows {
                let shift = i as f32 * (width / 2.0);
                let left = Path::new(|b| {
                    b.move_to(Point::new(x - 1.0 - shift, top));
                    b.line_to(Point::new(x - 1.0 - shift - width, mid));
                    b.line_to(Point::new(x - 1.0 - shift, top + height));
                    b.close();
                });
                let right = Path::new(|b| {
                    b.move_to(Point::new(x + 1.0 + shift, top));
                    b.line_to(Point::new(x + 1.0 + shift + width, mid));
                    b.line_to(Point::new(x + 1.0 + shift, top + height));
                    b.close();
                });
                frame.fill(&left, theme::SCRUB_INDICATOR);
                frame.fill(&right, theme::SCRUB_INDICATOR);
            }
        }
    }
}
