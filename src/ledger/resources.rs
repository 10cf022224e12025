// src/ledger/resources.rs
use bevy::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

use super::entry::EntryId;
use super::error::LedgerError;
use super::filter::FilterCondition;
use super::footer::ColumnTotal;
use super::page::{LedgerBook, LedgerPage};
use super::table::LedgerTable;

/// Canonical store of every page.
///
/// Pages are shared as `Arc` snapshots; the logic systems mutate them
/// copy-on-write through `table_mut`.
#[derive(Resource, Debug, Clone)]
pub struct PageRegistry {
    pages: Vec<Arc<LedgerPage>>,
    active_page_id: String,
}

impl Default for PageRegistry {
    fn default() -> Self {
        PageRegistry::from_book(LedgerBook::default())
    }
}

impl PageRegistry {
    pub fn from_book(book: LedgerBook) -> Self {
        PageRegistry {
            pages: book.pages.into_iter().map(Arc::new).collect(),
            active_page_id: book.active_page_id,
        }
    }

    pub fn to_book(&self) -> LedgerBook {
        LedgerBook {
            pages: self.pages.iter().map(|p| LedgerPage::clone(p)).collect(),
            active_page_id: self.active_page_id.clone(),
        }
    }

    pub fn pages(&self) -> &[Arc<LedgerPage>] {
        &self.pages
    }

    pub fn page(&self, page_id: &str) -> Option<&LedgerPage> {
        self.pages.iter().find(|p| p.id == page_id).map(|p| p.as_ref())
    }

    pub fn active_page_id(&self) -> &str {
        &self.active_page_id
    }

    pub fn active_page(&self) -> Option<&LedgerPage> {
        self.page(&self.active_page_id)
    }

    /// Pages whose name contains `term`, ignoring case.
    pub fn search_pages(&self, term: &str) -> Vec<&LedgerPage> {
        let needle = term.trim().to_lowercase();
        self.pages
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Mutable access to a page's table. Only the logic systems call this.
    pub(crate) fn table_mut(&mut self, page_id: &str) -> Option<&mut LedgerTable> {
        self.pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .map(|p| &mut Arc::make_mut(p).table)
    }

    /// Creates a page with the starter layout and makes it active.
    pub fn create_page(&mut self, name: &str) -> Result<String, LedgerError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        let mut page = LedgerPage::new(trimmed);
        while self.page(&page.id).is_some() {
            page = LedgerPage::new(trimmed);
        }
        let id = page.id.clone();
        self.pages.push(Arc::new(page));
        self.active_page_id = id.clone();
        Ok(id)
    }

    /// Returns the previous name.
    pub fn rename_page(&mut self, page_id: &str, new_name: &str) -> Result<String, LedgerError> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        let page = self
            .pages
            .iter_mut()
            .find(|p| p.id == page_id)
            .ok_or_else(|| LedgerError::UnknownPage(page_id.to_string()))?;
        Ok(std::mem::replace(&mut Arc::make_mut(page).name, trimmed.to_string()))
    }

    /// Removes a page. The first remaining page becomes active if the
    /// removed one was.
    pub fn delete_page(&mut self, page_id: &str) -> Result<Arc<LedgerPage>, LedgerError> {
        let idx = self
            .pages
            .iter()
            .position(|p| p.id == page_id)
            .ok_or_else(|| LedgerError::UnknownPage(page_id.to_string()))?;
        if self.pages.len() == 1 {
            return Err(LedgerError::LastPage);
        }
        let removed = self.pages.remove(idx);
        if self.active_page_id == page_id {
            self.active_page_id = self.pages[0].id.clone();
        }
        Ok(removed)
    }

    /// Returns true if the active page changed.
    pub fn set_active_page(&mut self, page_id: &str) -> Result<bool, LedgerError> {
        if self.page(page_id).is_none() {
            return Err(LedgerError::UnknownPage(page_id.to_string()));
        }
        if self.active_page_id == page_id {
            return Ok(false);
        }
        self.active_page_id = page_id.to_string();
        Ok(true)
    }
}

/// Free-text search plus the applied structured filters of the active page.
#[derive(Resource, Debug, Clone, Default)]
pub struct ViewCriteria {
    pub search: String,
    pub filters: Vec<FilterCondition>,
}

impl ViewCriteria {
    pub fn clear(&mut self) {
        self.search.clear();
        self.filters.clear();
    }

    pub fn is_filtering(&self) -> bool {
        !self.search.is_empty() || !self.filters.is_empty()
    }
}

/// Derived view of the active page, rebuilt whenever the page or the
/// criteria change.
#[derive(Resource, Debug, Clone, Default)]
pub struct VisibleEntries {
    pub page_id: String,
    /// Entries passing search and filters, in table order.
    pub entry_ids: Vec<EntryId>,
    /// Display rows: `entry_ids` padded with placeholder ids (-1, -2, ...).
    pub rows: Vec<EntryId>,
    pub totals: Vec<ColumnTotal>,
}

/// Location of the JSON snapshot on disk.
#[derive(Resource, Debug, Clone)]
pub struct LedgerStoragePath(pub PathBuf);
