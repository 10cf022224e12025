// src/ui/systems.rs
use bevy::prelude::*;

use crate::ledger::events::LedgerOperationFeedback;
use crate::ui::UiFeedbackState;

/// Keeps the latest message of the frame.
pub fn handle_ui_feedback(
    mut feedback_events: EventReader<LedgerOperationFeedback>,
    mut ui_feedback_state: ResMut<UiFeedbackState>,
) {
    if let Some(event) = feedback_events.read().last() {
        debug!(
            "UI feedback ({}): {}",
            if event.is_error { "error" } else { "info" },
            event.message
        );
        ui_feedback_state.last_message = event.message.clone();
        ui_feedback_state.is_error = event.is_error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut app = App::new();
        app.add_event::<LedgerOperationFeedback>()
            .init_resource::<UiFeedbackState>()
            .add_systems(Update, handle_ui_feedback);
        app
    }

    #[test]
    fn latest_message_wins() {
        let mut app = app();
        app.world_mut().send_event(LedgerOperationFeedback::info("Created page 'Rent'."));
        app.world_mut().send_event(LedgerOperationFeedback::error("Page name cannot be empty"));
        app.update();

        let state = app.world().resource::<UiFeedbackState>();
        assert_eq!(state.last_message, "Page name cannot be empty");
        assert!(state.is_error);
    }

    #[test]
    fn earlier_error_is_replaced_by_a_later_success() {
        let mut app = app();
        app.world_mut().send_event(LedgerOperationFeedback::error("Column width must be at least 60"));
        app.world_mut().send_event(LedgerOperationFeedback::info("Ledger saved."));
        app.update();

        let state = app.world().resource::<UiFeedbackState>();
        assert_eq!(state.last_message, "Ledger saved.");
        assert!(!state.is_error);
    }

    #[test]
    fn quiet_frames_keep_the_previous_message() {
        let mut app = app();
        app.world_mut().send_event(LedgerOperationFeedback::info("Saved."));
        app.update();
        app.update();
        assert_eq!(app.world().resource::<UiFeedbackState>().last_message, "Saved.");
    }
}
