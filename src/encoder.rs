use crate::itemset::Itemset;
use crate::pp_tree::{NodeCode, PpTree};
use crate::weighting::{ItemRanking, WeightedDatabase};
use tracing::debug;

/// An occurrence representation the top-rank-k search can run over.
pub trait Encoder: Sized {
    type Occurrences;

    /// Whether joins are skipped when a parent, or the result, falls below
    /// the threshold.
    const PRUNES_BY_THRESHOLD: bool;

    fn name(&self) -> &'static str;

    /// Builds the encoder and the 1-itemsets in ranking order.
    fn encode(
        db: &WeightedDatabase,
        ranking: &ItemRanking,
    ) -> (Self, Vec<Itemset<Self::Occurrences>>);

    /// Occurrences of `extended` plus the last item of `donor`, and the
    /// transaction weight they account for. None if they never co-occur.
    fn combine(
        &self,
        extended: &Self::Occurrences,
        donor: &Self::Occurrences,
    ) -> Option<(Self::Occurrences, f64)>;

    /// Total transaction weight; divides every accumulated weight.
    fn ttw(&self) -> f64;
}

/// Encodes itemsets as node codes of a pre/post-order prefix tree.
pub struct PrefixTreeEncoder {
    ttw: f64,
}

impl Encoder for PrefixTreeEncoder {
    type Occurrences = Vec<NodeCode>;

    const PRUNES_BY_THRESHOLD: bool = true;

    fn name(&self) -> &'static str {
        "tree"
    }

    fn encode(
        db: &WeightedDatabase,
        ranking: &ItemRanking,
    ) -> (PrefixTreeEncoder, Vec<Itemset<Vec<NodeCode>>>) {
        let mut tree = PpTree::new();
        for transaction in &db.transactions {
            let mut items = transaction.items.clone();
            ranking.sort_by_rank(&mut items);
            tree.insert(&items, transaction.tw);
        }
        tree.assign_order();
        debug!("Prefix tree has {} nodes", tree.len());

        let mut codes = tree.node_codes();
        let seeds = ranking
            .items()
            .iter()
            .map(|&(item, ws)| {
                Itemset::new(vec![item], ws, codes.remove(&item).unwrap_or_default())
            })
            .collect();
        (PrefixTreeEncoder { ttw: db.ttw }, seeds)
    }

    fn combine(
        &self,
        extended: &Vec<NodeCode>,
        donor: &Vec<NodeCode>,
    ) -> Option<(Vec<NodeCode>, f64)> {
        let (codes, sum) = combine_node_codes(extended, donor);
        if codes.is_empty() {
            None
        } else {
            Some((codes, sum))
        }
    }

    fn ttw(&self) -> f64 {
        self.ttw
    }
}

/// For every code in `descendants` under some code in `ancestors`, credits
/// its weight to that ancestor. Both lists are in pre-order and neither
/// nests within itself, so one merge pass finds every pair.
pub fn combine_node_codes(
    descendants: &[NodeCode],
    ancestors: &[NodeCode],
) -> (Vec<NodeCode>, f64) {
    let mut result: Vec<NodeCode> = Vec::new();
    let mut sum = 0.0;
    let mut d = 0;
    let mut a = 0;
    while d < descendants.len() && a < ancestors.len() {
        let descendant = &descendants[d];
        let ancestor = &ancestors[a];
        if ancestor.pre_order < descendant.pre_order {
            if ancestor.is_ancestor_of(descendant) {
                match result.last_mut() {
                    Some(last) if last.same_node(ancestor) => last.tw += descendant.tw,
                    _ => result.push(NodeCode::new(
                        ancestor.pre_order,
                        ancestor.post_order,
                        descendant.tw,
                    )),
                }
                sum += descendant.tw;
                d += 1;
            } else {
                // The ancestor's subtree closes before this descendant.
                a += 1;
            }
        } else {
            d += 1;
        }
    }
    (result, sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Item;
    use crate::weighting::rank_items;
    use crate::weighting::tests::database;

    // Reference pairwise combination: every (descendant, ancestor) pair.
    fn combine_quadratic(descendants: &[NodeCode], ancestors: &[NodeCode]) -> (Vec<NodeCode>, f64) {
        let mut result: Vec<NodeCode> = Vec::new();
        let mut sum = 0.0;
        for ancestor in ancestors {
            for descendant in descendants {
                if ancestor.is_ancestor_of(descendant) {
                    match result.last_mut() {
                        Some(last) if last.same_node(ancestor) => last.tw += descendant.tw,
                        _ => result.push(NodeCode::new(
                            ancestor.pre_order,
                            ancestor.post_order,
                            descendant.tw,
                        )),
                    }
                    sum += descendant.tw;
                }
            }
        }
        (result, sum)
    }

    #[test]
    fn test_combine_node_codes() {
        // root(0,8) -> a(1,3) -> {x(2,1) -> y(3,0), y(4,2)}
        //           -> z(5,4)
        //           -> a(6,6) -> y(7,5)
        //           -> y(8,7)
        let ancestors = vec![NodeCode::new(1, 3, 5.0), NodeCode::new(6, 6, 2.0)];
        let descendants = vec![
            NodeCode::new(3, 0, 1.0),
            NodeCode::new(4, 2, 2.0),
            NodeCode::new(7, 5, 0.5),
            NodeCode::new(8, 7, 4.0),
        ];
        let (codes, sum) = combine_node_codes(&descendants, &ancestors);
        assert_eq!(codes, vec![NodeCode::new(1, 3, 3.0), NodeCode::new(6, 6, 0.5)]);
        assert_eq!(sum, 3.5);
        assert_eq!(combine_quadratic(&descendants, &ancestors), (codes, sum));
    }

    #[test]
    fn test_combine_without_ancestors_is_empty() {
        let ancestors = vec![NodeCode::new(3, 0, 1.0)];
        let descendants = vec![NodeCode::new(1, 3, 4.0)];
        assert_eq!(combine_node_codes(&descendants, &ancestors), (vec![], 0.0));
    }

    #[test]
    fn test_encode_seeds() {
        let db = database(&[&[1, 2], &[2, 3], &[1, 2, 3]], &[(1, 1.0), (2, 2.0), (3, 1.0)]);
        let ranking = rank_items(&db);
        let (encoder, seeds) = PrefixTreeEncoder::encode(&db, &ranking);
        assert_eq!(encoder.ttw(), db.ttw);
        let items: Vec<Item> = seeds.iter().map(|s| s.last_item()).collect();
        assert_eq!(items, vec![Item::with_id(2), Item::with_id(1), Item::with_id(3)]);
        assert_eq!(seeds[0].occurrences.len(), 1);
        assert_eq!(seeds[2].occurrences.len(), 2);

        // {1, 2}: item 2 is nearer the root, so item 1's codes are the
        // descendants.
        let (codes, sum) = encoder
            .combine(&seeds[1].occurrences, &seeds[0].occurrences)
            .unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(sum / encoder.ttw(), seeds[1].ws);
        // {3, 1} occurs only in the third transaction.
        let (_, sum) = encoder
            .combine(&seeds[2].occurrences, &seeds[1].occurrences)
            .unwrap();
        assert_eq!(sum, 4.0 / 3.0);
    }
}
