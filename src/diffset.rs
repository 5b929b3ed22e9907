use crate::encoder::Encoder;
use crate::itemset::Itemset;
use crate::vec_sets::intersection_with;
use crate::weighting::{ItemRanking, WeightedDatabase};
use fnv::FnvHashMap;
use tracing::debug;

/// Encodes itemsets as the sorted ids of the transactions containing them.
pub struct DiffsetEncoder {
    // Transaction weight, indexed by transaction id.
    tw: Vec<f64>,
    ttw: f64,
}

impl DiffsetEncoder {
    fn tw_of(&self, tid: usize) -> f64 {
        match self.tw.get(tid) {
            Some(&tw) => tw,
            None => 0.0,
        }
    }
}

impl Encoder for DiffsetEncoder {
    type Occurrences = Vec<usize>;

    const PRUNES_BY_THRESHOLD: bool = false;

    fn name(&self) -> &'static str {
        "diffset"
    }

    fn encode(
        db: &WeightedDatabase,
        ranking: &ItemRanking,
    ) -> (DiffsetEncoder, Vec<Itemset<Vec<usize>>>) {
        let max_tid = db.transactions.iter().map(|t| t.id).max().unwrap_or(0);
        let mut tw = vec![0.0; max_tid + 1];
        let mut index: FnvHashMap<_, Vec<usize>> = FnvHashMap::default();
        for transaction in &db.transactions {
            tw[transaction.id] = transaction.tw;
            for &item in &transaction.items {
                index.entry(item).or_insert_with(Vec::new).push(transaction.id);
            }
        }
        debug!(
            "Diffsets hold {} transaction ids",
            index.values().map(|tids| tids.len()).sum::<usize>()
        );

        let seeds = ranking
            .items()
            .iter()
            .map(|&(item, ws)| {
                Itemset::new(vec![item], ws, index.remove(&item).unwrap_or_default())
            })
            .collect();
        (DiffsetEncoder { tw, ttw: db.ttw }, seeds)
    }

    fn combine(&self, extended: &Vec<usize>, donor: &Vec<usize>) -> Option<(Vec<usize>, f64)> {
        let mut sum = 0.0;
        let tids = intersection_with(extended, donor, |tid| sum += self.tw_of(tid));
        if tids.is_empty() {
            None
        } else {
            Some((tids, sum))
        }
    }

    fn ttw(&self) -> f64 {
        self.ttw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::weighting::rank_items;
    use crate::weighting::tests::database;

    #[test]
    fn test_encode_seeds() {
        let db = database(&[&[1, 2], &[2, 3], &[1, 2, 3]], &[(1, 1.0), (2, 2.0), (3, 1.0)]);
        let ranking = rank_items(&db);
        let (encoder, seeds) = DiffsetEncoder::encode(&db, &ranking);
        let tids: Vec<(Item, Vec<usize>)> = seeds
            .iter()
            .map(|s| (s.last_item(), s.occurrences.clone()))
            .collect();
        assert_eq!(
            tids,
            vec![
                (Item::with_id(2), vec![1, 2, 3]),
                (Item::with_id(1), vec![1, 3]),
                (Item::with_id(3), vec![2, 3]),
            ]
        );
        assert_eq!(encoder.ttw(), db.ttw);
    }

    #[test]
    fn test_combine() {
        let db = database(&[&[1, 2], &[2, 3], &[1, 2, 3]], &[(1, 1.0), (2, 2.0), (3, 1.0)]);
        let ranking = rank_items(&db);
        let (encoder, seeds) = DiffsetEncoder::encode(&db, &ranking);
        let (tids, sum) = encoder
            .combine(&seeds[2].occurrences, &seeds[1].occurrences)
            .unwrap();
        assert_eq!(tids, vec![3]);
        assert_eq!(sum, 4.0 / 3.0);

        let (tids, sum) = encoder
            .combine(&seeds[1].occurrences, &seeds[0].occurrences)
            .unwrap();
        assert_eq!(tids, vec![1, 3]);
        assert_eq!(sum / encoder.ttw(), seeds[1].ws);
    }

    #[test]
    fn test_disjoint_diffsets_dont_combine() {
        let db = database(&[&[1], &[2]], &[(1, 1.0), (2, 1.0)]);
        let ranking = rank_items(&db);
        let (encoder, seeds) = DiffsetEncoder::encode(&db, &ranking);
        assert!(encoder
            .combine(&seeds[0].occurrences, &seeds[1].occurrences)
            .is_none());
    }

    #[test]
    fn test_ids_follow_line_numbers() {
        use crate::transaction_reader::Transaction;
        use crate::weight_reader::WeightTable;
        use crate::weighting::weigh_transactions;

        // Line 2 was blank, so there's no transaction 2.
        let transactions = vec![
            Transaction {
                id: 1,
                items: vec![Item::with_id(1)],
            },
            Transaction {
                id: 3,
                items: vec![Item::with_id(1), Item::with_id(2)],
            },
        ];
        let mut weights = WeightTable::new();
        weights.set(Item::with_id(1), 1.0);
        weights.set(Item::with_id(2), 3.0);
        let db = weigh_transactions(transactions, &weights);
        let ranking = rank_items(&db);
        let (encoder, seeds) = DiffsetEncoder::encode(&db, &ranking);
        assert_eq!(seeds[0].occurrences, vec![1, 3]);
        assert_eq!(seeds[1].occurrences, vec![3]);
        let (tids, sum) = encoder
            .combine(&seeds[1].occurrences, &seeds[0].occurrences)
            .unwrap();
        assert_eq!(tids, vec![3]);
        assert_eq!(sum, 2.0);
    }
}
