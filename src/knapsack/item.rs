//! Knapsack items and the read-only catalogue that holds them.

use crate::error::KnapsackError;
use std::ops::Deref;
use std::sync::Arc;

/// A single knapsack item. Identity is by `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// 1-based item number; equals the item's position in the catalogue plus one.
    pub id: usize,
    /// Item weight.
    pub weight: u64,
    /// Item value.
    pub value: u64,
}

impl Item {
    pub fn new(id: usize, weight: u64, value: u64) -> Self {
        Self { id, weight, value }
    }
}

/// Immutable, cheaply clonable list of items.
///
/// Loaded once and shared by every candidate and engine; clones share the
/// same backing slice.
///
/// # Examples
///
/// ```
/// use knapsack_metaheur::knapsack::ItemCatalogue;
///
/// let catalogue = ItemCatalogue::parse("#;weight;value\n1;10;60\n2;20;100\n").unwrap();
/// assert_eq!(catalogue.len(), 2);
/// assert_eq!(catalogue[1].value, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCatalogue {
    items: Arc<[Item]>,
}

impl ItemCatalogue {
    /// Builds a catalogue, checking that ids are contiguous and 1-based.
    pub fn from_items(items: Vec<Item>) -> Result<Self, KnapsackError> {
        for (pos, item) in items.iter().enumerate() {
            if item.id != pos + 1 {
                return Err(KnapsackError::Catalogue {
                    line: pos + 1,
                    reason: format!("expected item id {}, found {}", pos + 1, item.id),
                });
            }
        }
        Ok(Self {
            items: items.into(),
        })
    }

    /// Parses the `#;weight;value` semicolon format.
    ///
    /// The first line is a header and is skipped. Blank lines are ignored.
    pub fn parse(text: &str) -> Result<Self, KnapsackError> {
        let mut items = Vec::new();

        for (idx, raw) in text.lines().enumerate().skip(1) {
            let line = idx + 1;
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }

            let fields: Vec<&str> = raw.split(';').map(str::trim).collect();
            if fields.len() != 3 {
                return Err(KnapsackError::Catalogue {
                    line,
                    reason: format!("expected 3 fields, found {}", fields.len()),
                });
            }

            let field = |i: usize, name: &str| -> Result<u64, KnapsackError> {
                fields[i].parse::<u64>().map_err(|_| KnapsackError::Catalogue {
                    line,
                    reason: format!("{name} is not a non-negative integer: {:?}", fields[i]),
                })
            };

            let id = field(0, "id")?;
            let weight = field(1, "weight")?;
            let value = field(2, "value")?;
            items.push(Item::new(id as usize, weight, value));
        }

        Self::from_items(items)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Sum of all item weights.
    pub fn total_weight(&self) -> u64 {
        self.items.iter().map(|i| i.weight).sum()
    }
}

impl Deref for ItemCatalogue {
    type Target = [Item];

    fn deref(&self) -> &[Item] {
        &self.items
    }
}
