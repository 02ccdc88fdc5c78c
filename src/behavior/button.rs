//! Push-button behavior.

use crate::css::style::SelectorFlags;

/// Reports activation for exactly the frame in which a primary click
/// completes over the box. Focus plays no part.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonBehavior {
    activated: bool,
}

impl ButtonBehavior {
    /// Recompute the activation flag for this frame.
    pub fn update(&mut self, clicked: bool, selectors: SelectorFlags) -> bool {
        self.activated = clicked && selectors.contains(SelectorFlags::HOVER);
        self.activated
    }

    pub fn activated(&self) -> bool {
        self.activated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activates_on_click_while_hovered() {
        let mut button = ButtonBehavior::default();
        assert!(button.update(true, SelectorFlags::HOVER));
        assert!(button.activated());
        assert!(!button.update(false, SelectorFlags::HOVER));
    }

    #[test]
    fn click_elsewhere_does_not_activate() {
        let mut button = ButtonBehavior::default();
        assert!(!button.update(true, SelectorFlags::FOCUS));
    }
}
