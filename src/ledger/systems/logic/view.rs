// src/ledger/systems/logic/view.rs
use bevy::prelude::*;

use crate::ledger::{
    entry::EntryId,
    filter::{reconcile_filters, visible_entries},
    footer::column_totals,
    grid_edit::GridEditor,
    page::LedgerPage,
    resources::{PageRegistry, ViewCriteria, VisibleEntries},
    table::LedgerTable,
};
use crate::settings::AppSettings;

/// Visible entries followed by placeholder ids so the grid shows at least
/// `min_rows` rows.
pub fn display_rows(visible: &[EntryId], min_rows: usize) -> Vec<EntryId> {
    let padding = min_rows.saturating_sub(visible.len());
    visible
        .iter()
        .copied()
        .chain((1..=padding as EntryId).map(|n| -n))
        .collect()
}

pub fn visible_entry_ids(table: &LedgerTable, criteria: &ViewCriteria) -> Vec<EntryId> {
    visible_entries(table.entries(), table.columns(), &criteria.search, &criteria.filters)
        .into_iter()
        .map(|e| e.id)
        .collect()
}

pub fn build_view(page: &LedgerPage, criteria: &ViewCriteria, min_rows: usize) -> VisibleEntries {
    let table = &page.table;
    let visible = visible_entries(table.entries(), table.columns(), &criteria.search, &criteria.filters);
    let totals = column_totals(table.columns(), visible.iter().copied());
    let entry_ids: Vec<EntryId> = visible.iter().map(|e| e.id).collect();
    VisibleEntries {
        page_id: page.id.clone(),
        rows: display_rows(&entry_ids, min_rows),
        entry_ids,
        totals,
    }
}

/// Rebuilds the derived view of the active page whenever the registry,
/// the criteria or the settings change. Also drops filters and edit
/// targets that no longer match the columns.
pub fn refresh_visible_entries(
    registry: Res<PageRegistry>,
    mut criteria: ResMut<ViewCriteria>,
    settings: Res<AppSettings>,
    mut visible: ResMut<VisibleEntries>,
    mut editor: ResMut<GridEditor>,
) {
    let Some(page) = registry.active_page() else {
        return;
    };
    let stale_page = visible.page_id != page.id;
    if !(registry.is_changed() || criteria.is_changed() || settings.is_changed() || stale_page) {
        return;
    }

    let mut filters = criteria.filters.clone();
    if reconcile_filters(&mut filters, page.table.columns()) {
        debug!("Adjusted filters on page '{}' after a column change.", page.id);
        criteria.filters = filters;
    }
    if editor.reconcile(&page.table) {
        debug!("Edit target vanished on page '{}'; grid is idle again.", page.id);
    }

    *visible = build_view(page, &criteria, settings.placeholder_rows);
    trace!(
        "View refreshed for '{}': {} of {} entries visible.",
        page.id,
        visible.entry_ids.len(),
        page.table.entries().len()
    );
}
