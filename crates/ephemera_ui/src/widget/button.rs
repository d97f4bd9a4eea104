//! Push buttons.
//!
//! A click needs press and release over the same button, across as many
//! frames as the user holds it:
//!
//! ```text
//! pointer over ──► hot ──press──► active ──release, still hot──► clicked
//!                                    │
//!                                    └──release elsewhere──► idle
//! ```

use crate::element::{ElementId, ElementKind, ElementRef};
use crate::frame::Frame;
use crate::handler::{Handler, HandlerContext};
use crate::input::MouseButton;
use crate::style::{ButtonStyle, TextStyle};

impl Frame<'_> {
    /// Button with the default style.
    ///
    /// Returns true in the frame after the click completed.
    pub fn button(&mut self, id: ElementId, label: &str, text_style: TextStyle) -> bool {
        self.button_styled(id, label, text_style, &ButtonStyle::default())
    }

    /// Button with a custom style.
    ///
    /// # Arguments
    ///
    /// * `id` - stable id, must differ from every other interactive widget
    /// * `label` - text inside the button
    /// * `style` - box colors per interaction state
    pub fn button_styled(
        &mut self,
        id: ElementId,
        label: &str,
        text_style: TextStyle,
        style: &ButtonStyle,
    ) -> bool {
        let interaction = self.interaction();
        let mut box_style = style.idle;
        if interaction.is_active(id) {
            box_style.background = style.active_background;
        } else if interaction.is_hot(id) {
            box_style.background = style.hot_background;
        }
        let clicked = !id.is_none() && interaction.clicked == id;

        let element = self.leaf(ElementKind::Box(box_style));
        self.tree_mut()[element].id = id;
        self.push_handler(Handler::Button, element);

        let tree = self.tree_mut();
        tree.start_adding_children();
        self.text(label, text_style);
        self.tree_mut().stop_adding_children();

        clicked
    }
}

/// Updates hot, active and clicked for one button.
pub(crate) fn handle(ctx: &mut HandlerContext<'_>, element: ElementRef) {
    let id = ctx.tree[element].id;
    let hit = ctx.hit(element);
    let input = ctx.input;
    let state = &mut *ctx.state;

    if hit {
        state.hot = id;
        if input.mouse_pressed(MouseButton::Left) {
            state.active = id;
        }
    } else if state.hot == id {
        state.hot = ElementId::NONE;
    }

    if state.active == id && input.mouse_released(MouseButton::Left) {
        if state.hot == id {
            state.next_clicked = id;
        }
        state.active = ElementId::NONE;
    }
}
