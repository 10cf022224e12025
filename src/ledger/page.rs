// src/ledger/page.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::table::LedgerTable;

/// Number of blank rows a freshly created page starts with.
pub const STARTER_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerPage {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub table: LedgerTable,
}

impl LedgerPage {
    pub fn new(name: &str) -> Self {
        LedgerPage {
            id: page_id_for(name),
            name: name.to_string(),
            table: LedgerTable::starter(STARTER_ROWS),
        }
    }
}

/// Serializable snapshot of every page plus the active page id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerBook {
    pub pages: Vec<LedgerPage>,
    pub active_page_id: String,
}

impl Default for LedgerBook {
    fn default() -> Self {
        let first = LedgerPage::new("Page 1");
        LedgerBook {
            active_page_id: first.id.clone(),
            pages: vec![first],
        }
    }
}

impl LedgerBook {
    /// Repairs loaded data: drops duplicate page ids, repairs each table,
    /// guarantees at least one page and a valid active page id.
    /// Returns the number of fixes applied.
    pub fn sanitize(&mut self) -> usize {
        let mut fixes = 0;
        let mut seen = std::collections::HashSet::new();
        let before = self.pages.len();
        self.pages.retain(|p| seen.insert(p.id.clone()));
        fixes += before - self.pages.len();

        for page in self.pages.iter_mut() {
            fixes += page.table.repair();
        }

        if self.pages.is_empty() {
            *self = LedgerBook::default();
            return fixes + 1;
        }
        if !self.pages.iter().any(|p| p.id == self.active_page_id) {
            self.active_page_id = self.pages[0].id.clone();
            fixes += 1;
        }
        fixes
    }
}

/// Lowercase, dash-joined slug of the name plus a short random suffix.
pub fn page_id_for(name: &str) -> String {
    let slug = name
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    let suffix = Uuid::new_v4().simple().to_string();
    if slug.is_empty() {
        format!("page-{}", &suffix[..8])
    } else {
        format!("{}-{}", slug, &suffix[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_ids_are_slugged_and_unique() {
        let a = page_id_for("March Expenses");
        let b = page_id_for("March Expenses");
        assert!(a.starts_with("march-expenses-"));
        assert_ne!(a, b);
    }

    #[test]
    fn page_json_is_flat() {
        let page = LedgerPage::new("Groceries");
        let value = serde_json::to_value(&page).unwrap();
        assert!(value.get("columns").is_some());
        assert!(value.get("entries").is_some());
        assert_eq!(value["name"], "Groceries");
    }

    #[test]
    fn sanitize_repairs_dangling_active_page() {
        let mut book = LedgerBook::default();
        book.active_page_id = "missing".into();
        assert!(book.sanitize() >= 1);
        assert_eq!(book.active_page_id, book.pages[0].id);
    }

    #[test]
    fn sanitize_refills_empty_book() {
        let mut book = LedgerBook {
            pages: Vec::new(),
            active_page_id: String::new(),
        };
        book.sanitize();
        assert_eq!(book.pages.len(), 1);
        assert_eq!(book.pages[0].name, "Page 1");
    }
}
