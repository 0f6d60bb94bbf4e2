//! Action dispatch.
//!
//! Buttons carry an action name but no reference to whoever handles it.
//! The host passes its handler in at dispatch time instead.

use crate::primitives::Rect;

/// Receiver for button actions.
pub trait ActionContext {
    /// Handle `action`, triggered from a leaf laid out at `frame`.
    fn perform(&mut self, action: &str, frame: Rect);
}

impl<F> ActionContext for F
where
    F: FnMut(&str, Rect),
{
    fn perform(&mut self, action: &str, frame: Rect) {
        self(action, frame)
    }
}

/// Collects performed actions in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RecordedActions {
    pub performed: Vec<(String, Rect)>,
}

impl ActionContext for RecordedActions {
    fn perform(&mut self, action: &str, frame: Rect) {
        tracing::debug!(action, "recorded action");
        self.performed.push((action.to_string(), frame));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_context() {
        let mut seen = Vec::new();
        let mut ctx = |action: &str, _frame: Rect| seen.push(action.to_string());
        ctx.perform("open", Rect::ZERO);
        assert_eq!(seen, vec!["open"]);
    }

    #[test]
    fn test_recorded_actions() {
        let mut ctx = RecordedActions::default();
        ctx.perform("like", Rect::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(ctx.performed, vec![("like".to_string(), Rect::new(1.0, 2.0, 3.0, 4.0))]);
    }
}
