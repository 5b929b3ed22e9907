use crate::item::Item;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;

/// Relative difference under which two weighted supports count as the
/// same value.
pub const SUPPORT_TOLERANCE: f64 = 1e-9;

pub fn same_support(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= SUPPORT_TOLERANCE * a.abs().max(b.abs())
}

pub fn below_threshold(ws: f64, threshold: f64) -> bool {
    ws < threshold && !same_support(ws, threshold)
}

/// A frequent weighted itemset. `items` is in join order: the last item is
/// the one most recently appended. `occurrences` depends on the encoder.
#[derive(Clone, Debug)]
pub struct Itemset<O> {
    pub items: Vec<Item>,
    pub ws: f64,
    pub occurrences: O,
}

impl<O> Itemset<O> {
    pub fn new(items: Vec<Item>, ws: f64, occurrences: O) -> Itemset<O> {
        Itemset {
            items,
            ws,
            occurrences,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn last_item(&self) -> Item {
        match self.items.last() {
            Some(&item) => item,
            None => Item::null(),
        }
    }

    pub fn prefix(&self) -> &[Item] {
        match self.items.split_last() {
            Some((_, prefix)) => prefix,
            None => &[],
        }
    }

    // Equivalence class: same length, same items bar the last.
    pub fn same_class_as(&self, other: &Itemset<O>) -> bool {
        self.len() == other.len() && self.prefix() == other.prefix()
    }
}

/// Descending by ws, then ascending by the last item. The full item
/// sequence breaks whatever tie remains so sorting is deterministic.
pub fn ranking_order<O>(a: &Itemset<O>, b: &Itemset<O>) -> Ordering {
    OrderedFloat(b.ws)
        .cmp(&OrderedFloat(a.ws))
        .then_with(|| a.last_item().cmp(&b.last_item()))
        .then_with(|| a.items.cmp(&b.items))
}
