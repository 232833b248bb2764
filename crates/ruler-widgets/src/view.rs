//! Ruler view function
//!
//! ```ignore
//! fn view(&self) -> Element<Message> {
//!     let scene = self.ruler.scene(&self.ruler_context());
//!     column![ruler_canvas(&scene, Message::Ruler), tracks].into()
//! }
//! ```

use iced::widget::Canvas;
use iced::{Element, Length};

use crate::canvas::{RulerCanvas, RulerInput, RulerScene};

/// Create the ruler strip
///
/// `on_input` wraps pointer input for the host to feed back into
/// [`crate::RulerPanel::handle_input`].
pub fn ruler_canvas<'a, Message>(
    scene: &'a RulerScene,
    on_input: impl Fn(RulerInput) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let height = scene.height;
    Canvas::new(RulerCanvas { scene, on_input })
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .into()
}
