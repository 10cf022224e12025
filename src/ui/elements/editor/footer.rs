// src/ui/elements/editor/footer.rs
use bevy_egui::egui::{self, RichText};

use crate::ledger::footer::{format_total, ColumnTotal};

/// Row count and the sums of the visible rows. Nothing is drawn for the
/// sums when the page has no number columns.
pub fn ledger_footer(ui: &mut egui::Ui, totals: &[ColumnTotal], shown: usize, total_rows: usize) {
    ui.horizontal_wrapped(|ui| {
        if shown == total_rows {
            ui.weak(format!("{} rows", total_rows));
        } else {
            ui.weak(format!("Showing {} of {} rows", shown, total_rows));
        }
        for total in totals {
            ui.separator();
            ui.label(format!("{}:", total.name));
            ui.label(RichText::new(format_total(total.total)).strong().monospace());
        }
    });
}
