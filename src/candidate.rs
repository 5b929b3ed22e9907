use crate::encoder::Encoder;
use crate::item::Item;
use crate::itemset::{below_threshold, Itemset};
use crate::vec_sets::extend_with_last;
use crate::weighting::ItemRanking;
use fnv::FnvHashMap;

/// Groups the pool by equivalence class, keeping the order in which each
/// class was first seen.
fn equivalence_classes<O>(pool: &[Itemset<O>]) -> Vec<Vec<usize>> {
    let mut class_of: FnvHashMap<&[Item], usize> = FnvHashMap::default();
    let mut classes: Vec<Vec<usize>> = vec![];
    for (index, itemset) in pool.iter().enumerate() {
        let class = *class_of.entry(itemset.prefix()).or_insert_with(|| {
            classes.push(vec![]);
            classes.len() - 1
        });
        classes[class].push(index);
    }
    classes
}

// Puts the pair in join order: the second itemset's last item sits nearer
// the root of the prefix tree, so it's the one appended.
fn orient<'a, O>(
    a: &'a Itemset<O>,
    b: &'a Itemset<O>,
    ranking: &ItemRanking,
) -> (&'a Itemset<O>, &'a Itemset<O>) {
    let rank = |itemset: &Itemset<O>| ranking.rank_of(&itemset.last_item()).unwrap_or(usize::MAX);
    if rank(b) < rank(a) {
        (a, b)
    } else {
        (b, a)
    }
}

/// Joins `extended` with the last item of `donor`, two members of the same
/// equivalence class. None if the result never occurs, or if the encoder
/// prunes and the join can't reach `threshold`.
pub fn join<E: Encoder>(
    encoder: &E,
    extended: &Itemset<E::Occurrences>,
    donor: &Itemset<E::Occurrences>,
    threshold: f64,
) -> Option<Itemset<E::Occurrences>> {
    debug_assert!(extended.same_class_as(donor));
    if E::PRUNES_BY_THRESHOLD
        && (below_threshold(extended.ws, threshold) || below_threshold(donor.ws, threshold))
    {
        return None;
    }
    let (occurrences, sum) = encoder.combine(&extended.occurrences, &donor.occurrences)?;
    let ws = sum / encoder.ttw();
    if E::PRUNES_BY_THRESHOLD && below_threshold(ws, threshold) {
        return None;
    }
    Some(Itemset::new(
        extend_with_last(&extended.items, &donor.items),
        ws,
        occurrences,
    ))
}

/// Every join of two pool members from the same equivalence class that
/// survives. Unsorted.
pub fn generate_candidates<E: Encoder>(
    encoder: &E,
    ranking: &ItemRanking,
    pool: &[Itemset<E::Occurrences>],
    threshold: f64,
) -> Vec<Itemset<E::Occurrences>> {
    let mut candidates = vec![];
    for class in equivalence_classes(pool) {
        for (position, &i) in class.iter().enumerate() {
            for &j in &class[position + 1..] {
                let (extended, donor) = orient(&pool[i], &pool[j], ranking);
                if let Some(candidate) = join(encoder, extended, donor, threshold) {
                    candidates.push(candidate);
                }
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diffset::DiffsetEncoder;
    use crate::encoder::PrefixTreeEncoder;
    use crate::weighting::rank_items;
    use crate::weighting::tests::database;
    use proptest::prelude::*;

    fn ids<O>(itemset: &Itemset<O>) -> Vec<u32> {
        itemset.items.iter().map(|item| item.id()).collect()
    }

    fn sorted_ids<O>(candidates: &[Itemset<O>]) -> Vec<Vec<u32>> {
        let mut all: Vec<Vec<u32>> = candidates.iter().map(ids).collect();
        all.sort();
        all
    }

    #[test]
    fn test_equivalence_classes() {
        let pool: Vec<Itemset<()>> = vec![vec![1, 2], vec![3, 2], vec![1, 4], vec![3, 1]]
            .into_iter()
            .map(|ids: Vec<u32>| {
                Itemset::new(ids.into_iter().map(Item::with_id).collect(), 0.5, ())
            })
            .collect();
        assert_eq!(equivalence_classes(&pool), vec![vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn test_first_round_joins() {
        let db = database(&[&[1, 2], &[2, 3], &[1, 2, 3]], &[(1, 1.0), (2, 2.0), (3, 1.0)]);
        let ranking = rank_items(&db);

        let (tree, seeds) = PrefixTreeEncoder::encode(&db, &ranking);
        let candidates = generate_candidates(&tree, &ranking, &seeds, 0.0);
        // The higher ranked item is always appended.
        assert_eq!(sorted_ids(&candidates), vec![vec![1, 2], vec![3, 1], vec![3, 2]]);

        let (diffset, seeds) = DiffsetEncoder::encode(&db, &ranking);
        let candidates = generate_candidates(&diffset, &ranking, &seeds, 0.0);
        assert_eq!(sorted_ids(&candidates), vec![vec![1, 2], vec![3, 1], vec![3, 2]]);
    }

    #[test]
    fn test_tree_prunes_below_threshold() {
        let db = database(&[&[1, 2], &[2, 3], &[1, 2, 3]], &[(1, 1.0), (2, 2.0), (3, 1.0)]);
        let ranking = rank_items(&db);
        let threshold = seeds_ws(&db, 1);

        // {3, 1} only occurs in the last transaction, below item 1's ws.
        let (tree, seeds) = PrefixTreeEncoder::encode(&db, &ranking);
        let candidates = generate_candidates(&tree, &ranking, &seeds, threshold);
        assert_eq!(sorted_ids(&candidates), vec![vec![1, 2], vec![3, 2]]);

        // The diffset encoder keeps it; the search drops it when merging.
        let (diffset, seeds) = DiffsetEncoder::encode(&db, &ranking);
        let candidates = generate_candidates(&diffset, &ranking, &seeds, threshold);
        assert_eq!(sorted_ids(&candidates), vec![vec![1, 2], vec![3, 1], vec![3, 2]]);
    }

    fn seeds_ws(db: &crate::weighting::WeightedDatabase, rank: usize) -> f64 {
        rank_items(db).items()[rank].1
    }

    #[test]
    fn test_parent_below_threshold_is_skipped() {
        let db = database(&[&[1, 2], &[2, 3], &[1, 2, 3]], &[(1, 1.0), (2, 2.0), (3, 1.0)]);
        let ranking = rank_items(&db);
        let (tree, seeds) = PrefixTreeEncoder::encode(&db, &ranking);
        // Only item 2 clears a threshold of 1.0.
        assert!(join(&tree, &seeds[1], &seeds[0], 1.0).is_none());
        assert!(join(&tree, &seeds[1], &seeds[0], 0.0).is_some());
    }

    #[test]
    fn test_only_same_class_joins() {
        let db = database(
            &[&[1, 2, 3], &[1, 2, 3], &[1, 3], &[2, 3]],
            &[(1, 1.0), (2, 1.0), (3, 1.0)],
        );
        let ranking = rank_items(&db);
        let (diffset, seeds) = DiffsetEncoder::encode(&db, &ranking);
        let pairs = generate_candidates(&diffset, &ranking, &seeds, 0.0);
        let triples = generate_candidates(&diffset, &ranking, &pairs, 0.0);
        // Ranking is 3, 1, 2; only {2, 1} and {2, 3} share a prefix.
        assert_eq!(sorted_ids(&pairs), vec![vec![1, 3], vec![2, 1], vec![2, 3]]);
        assert_eq!(sorted_ids(&triples), vec![vec![2, 1, 3]]);
    }

    proptest! {
        #[test]
        fn candidates_grow_by_exactly_one_item(
            transactions in prop::collection::vec(prop::collection::vec(1u32..7, 1..5), 1..12),
        ) {
            let transactions: Vec<&[u32]> = transactions.iter().map(|t| t.as_slice()).collect();
            let weights: Vec<(u32, f64)> = (1..7).map(|id| (id, id as f64 * 0.5)).collect();
            let db = database(&transactions, &weights);
            let ranking = rank_items(&db);
            let (tree, mut pool) = PrefixTreeEncoder::encode(&db, &ranking);
            let mut length = 1;
            while !pool.is_empty() {
                let next = generate_candidates(&tree, &ranking, &pool, 0.0);
                for candidate in &next {
                    prop_assert_eq!(candidate.len(), length + 1);
                }
                pool = next;
                length += 1;
            }
        }
    }
}
