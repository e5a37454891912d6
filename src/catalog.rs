//! In-memory furniture catalog
//!
//! The catalog is an insertion-ordered collection with the newest item
//! first. It lives for the duration of the session only; nothing is
//! persisted.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A committed catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique identifier generated at creation time
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-text grouping label
    pub category: String,
    /// Typed or AI-generated description, possibly empty
    pub description: String,
    /// Local date of insertion
    pub created_at: NaiveDate,
}

impl CatalogItem {
    /// Creation date formatted the way the dashboard shows it (`dd/mm/yyyy`)
    pub fn created_at_display(&self) -> String {
        self.created_at.format("%d/%m/%Y").to_string()
    }
}

/// Fields needed to create a catalog entry
///
/// Produced from the add-item draft when the user submits the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    /// Display name
    pub name: String,
    /// Grouping label
    pub category: String,
    /// Description text, kept verbatim
    pub description: String,
}

impl NewItem {
    /// Convenience constructor
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            description: description.into(),
        }
    }
}

/// Ordered, session-scoped item store
///
/// # Examples
///
/// ```
/// use ssmoveis::catalog::{Catalog, NewItem};
///
/// let mut catalog = Catalog::with_samples();
/// let id = catalog
///     .add(NewItem::new("Mesa de Jantar", "Sala de Jantar", ""))
///     .id
///     .clone();
/// assert_eq!(catalog.list()[0].id, id);
/// assert_eq!(catalog.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog seeded with the two showroom samples
    pub fn with_samples() -> Self {
        let today = Local::now().date_naive();
        let items = vec![
            CatalogItem {
                id: "1".to_string(),
                name: "Guarda-Roupa Casal".to_string(),
                category: "Quarto".to_string(),
                description: "Guarda-roupa espaçoso com 6 portas e espelho central, ideal para organizar roupas e acessórios com elegância.".to_string(),
                created_at: today,
            },
            CatalogItem {
                id: "2".to_string(),
                name: "Sofá Retrátil 3 Lugares".to_string(),
                category: "Sala de Estar".to_string(),
                description: "Sofá extremamente confortável com tecido suede aveludado, assentos retráteis e encosto reclinável para máximo relaxamento.".to_string(),
                created_at: today,
            },
        ];
        Self { items }
    }

    /// Insert a new item at the front of the catalog
    ///
    /// The id is a fresh UUID and the creation date is today's local date.
    /// Always succeeds; field validation belongs to the form.
    pub fn add(&mut self, item: NewItem) -> &CatalogItem {
        let entry = CatalogItem {
            id: self.fresh_id(),
            name: item.name,
            category: item.category,
            description: item.description,
            created_at: Local::now().date_naive(),
        };
        tracing::info!(id = %entry.id, name = %entry.name, "Item added to catalog");
        self.items.insert(0, entry);
        &self.items[0]
    }

    /// Remove the item with `id`
    ///
    /// Returns `true` if an item was removed. A missing id leaves the
    /// catalog unchanged.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if removed {
            tracing::info!(id = %id, "Item removed from catalog");
        } else {
            tracing::debug!(id = %id, "Remove ignored, no such item");
        }
        removed
    }

    /// Current items, newest first
    pub fn list(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Look up an item by id
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items whose name or category contains `query`, ignoring case
    ///
    /// An empty (or blank) query matches everything. Order is preserved.
    pub fn search(&self, query: &str) -> Vec<&CatalogItem> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| {
                needle.is_empty()
                    || item.name.to_lowercase().contains(&needle)
                    || item.category.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct categories
    pub fn category_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.category.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    // Ids must be unique within the session.
    fn fresh_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}
