use crate::error::MineError;
use crate::item::Item;
use crate::transaction_reader::Transaction;
use crate::weight_reader::WeightTable;
use fnv::{FnvHashMap, FnvHashSet};
use ordered_float::OrderedFloat;
use tracing::warn;

#[derive(Debug)]
pub struct WeightedTransaction {
    pub id: usize,
    // Only the items that have a weight; those are the ones we mine.
    pub items: Vec<Item>,
    pub tw: f64,
}

#[derive(Debug)]
pub struct WeightedDatabase {
    pub transactions: Vec<WeightedTransaction>,
    /// Sum of all transaction weights; the normalizer of every ws.
    pub ttw: f64,
    /// Sum of the raw transaction lengths, missing-weight items included.
    pub total_items: usize,
    pub missing_weights: usize,
    /// Distinct items among those occurrences.
    pub missing_items: usize,
}

impl WeightedDatabase {
    pub fn num_transactions(&self) -> usize {
        self.transactions.len()
    }

    pub fn average_transaction_length(&self) -> f64 {
        if self.transactions.is_empty() {
            return 0.0;
        }
        self.total_items as f64 / self.transactions.len() as f64
    }

    pub fn support_of(&self, weight: f64) -> f64 {
        if self.ttw > 0.0 {
            weight / self.ttw
        } else {
            0.0
        }
    }
}

/// The single items in ranking order: ws descending, id ascending. The
/// position of an item in this order is its rank; rank 0 sits nearest the
/// root of the prefix tree.
pub struct ItemRanking {
    items: Vec<(Item, f64)>,
    rank_of: FnvHashMap<Item, usize>,
}

impl ItemRanking {
    pub fn new(mut items: Vec<(Item, f64)>) -> ItemRanking {
        items.sort_by(|&(a, a_ws), &(b, b_ws)| {
            OrderedFloat(b_ws).cmp(&OrderedFloat(a_ws)).then(a.cmp(&b))
        });
        let rank_of = items
            .iter()
            .enumerate()
            .map(|(rank, &(item, _))| (item, rank))
            .collect();
        ItemRanking { items, rank_of }
    }

    pub fn items(&self) -> &[(Item, f64)] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn rank_of(&self, item: &Item) -> Option<usize> {
        self.rank_of.get(item).cloned()
    }

    // Orders `items` root-first, as they're laid down in the prefix tree.
    pub fn sort_by_rank(&self, items: &mut Vec<Item>) {
        items.sort_by_key(|item| self.rank_of(item).unwrap_or(usize::MAX));
    }
}

/// Computes each transaction's weight (mean item weight) and the total
/// weight, in one pass over the transactions.
pub fn weigh_transactions(
    transactions: Vec<Transaction>,
    weights: &WeightTable,
) -> WeightedDatabase {
    let mut weighted = Vec::with_capacity(transactions.len());
    let mut ttw = 0.0;
    let mut total_items = 0;
    let mut missing_weights = 0;
    let mut warned: FnvHashSet<Item> = FnvHashSet::default();

    for transaction in transactions {
        let mut sum = 0.0;
        let mut items = Vec::with_capacity(transaction.items.len());
        for &item in &transaction.items {
            match weights.get(&item) {
                Some(weight) => {
                    sum += weight;
                    items.push(item);
                }
                None => {
                    missing_weights += 1;
                    if warned.insert(item) {
                        warn!(
                            "{}",
                            MineError::MissingWeight {
                                item,
                                transaction: transaction.id,
                            }
                        );
                    }
                }
            }
        }
        total_items += transaction.items.len();
        let tw = if transaction.items.is_empty() {
            0.0
        } else {
            sum / transaction.items.len() as f64
        };
        ttw += tw;
        weighted.push(WeightedTransaction {
            id: transaction.id,
            items,
            tw,
        });
    }

    if missing_weights > 0 {
        warn!(
            "{} item occurrences across {} distinct items had no weight; counted as zero",
            missing_weights,
            warned.len()
        );
    }

    WeightedDatabase {
        transactions: weighted,
        ttw,
        total_items,
        missing_weights,
        missing_items: warned.len(),
    }
}

/// ws of every weighted item: the tw of the transactions containing it,
/// accumulated in transaction order, over `ttw`.
pub fn rank_items(db: &WeightedDatabase) -> ItemRanking {
    let mut item_weight: FnvHashMap<Item, f64> = FnvHashMap::default();
    for transaction in &db.transactions {
        for &item in &transaction.items {
            *item_weight.entry(item).or_insert(0.0) += transaction.tw;
        }
    }
    ItemRanking::new(
        item_weight
            .into_iter()
            .map(|(item, weight)| (item, db.support_of(weight)))
            .collect(),
    )
}
