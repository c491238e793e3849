//! Rank ordering for the bar sort animation.

use crate::models::BrandAverage;
use serde::{Deserialize, Serialize};

/// A brand with its position in the score ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedBrand {
    pub brand: String,
    pub mean_score: f64,
    /// 0-based rank, highest score first.
    pub rank: usize,
    /// Index in the unsorted input.
    pub original_index: usize,
}

/// Move of one bar from its unsorted slot to its sorted slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortMove {
    pub from: usize,
    pub to: usize,
}

/// Rank brands by mean score, highest first.
///
/// The sort is stable: brands with equal scores keep their input order.
pub fn assign_rank(averages: &[BrandAverage]) -> Vec<RankedBrand> {
    let mut order: Vec<usize> = (0..averages.len()).collect();
    order.sort_by(|&a, &b| {
        averages[b]
            .mean_score
            .total_cmp(&averages[a].mean_score)
    });

    order
        .into_iter()
        .enumerate()
        .map(|(rank, i)| RankedBrand {
            brand: averages[i].brand.clone(),
            mean_score: averages[i].mean_score,
            rank,
            original_index: i,
        })
        .collect()
}

/// Slot moves from the unsorted bar order to the ranked order.
///
/// Listed by unsorted index; every slot appears exactly once as `from` and
/// once as `to`.
pub fn sort_moves(ranking: &[RankedBrand]) -> Vec<SortMove> {
    let mut moves: Vec<SortMove> = ranking
        .iter()
        .map(|r| SortMove {
            from: r.original_index,
            to: r.rank,
        })
        .collect();
    moves.sort_by_key(|m| m.from);
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn averages(pairs: &[(&str, f64)]) -> Vec<BrandAverage> {
        pairs
            .iter()
            .map(|(brand, score)| BrandAverage {
                brand: brand.to_string(),
                mean_score: *score,
            })
            .collect()
    }

    #[test]
    fn test_rank_descending() {
        let ranking = assign_rank(&averages(&[("A", 3.1), ("B", 4.5), ("C", 3.9)]));
        let order: Vec<&str> = ranking.iter().map(|r| r.brand.as_str()).collect();

        assert_eq!(order, vec!["B", "C", "A"]);
        assert_eq!(ranking[0].rank, 0);
        assert_eq!(ranking[0].original_index, 1);
        assert_eq!(ranking[2].original_index, 0);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranking = assign_rank(&averages(&[("X", 4.0), ("Y", 4.2), ("Z", 4.0), ("W", 4.0)]));
        let order: Vec<&str> = ranking.iter().map(|r| r.brand.as_str()).collect();
        assert_eq!(order, vec!["Y", "X", "Z", "W"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let first = assign_rank(&averages(&[("A", 2.0), ("B", 5.0), ("C", 2.0), ("D", 3.3)]));
        let sorted: Vec<BrandAverage> = first
            .iter()
            .map(|r| BrandAverage {
                brand: r.brand.clone(),
                mean_score: r.mean_score,
            })
            .collect();
        let second = assign_rank(&sorted);

        let a: Vec<&str> = first.iter().map(|r| r.brand.as_str()).collect();
        let b: Vec<&str> = second.iter().map(|r| r.brand.as_str()).collect();
        assert_eq!(a, b);
        assert!(second.iter().all(|r| r.rank == r.original_index));
    }

    #[test]
    fn test_sort_moves_are_bijective() {
        let ranking = assign_rank(&averages(&[
            ("A", 3.0),
            ("B", 4.0),
            ("C", 3.0),
            ("D", 1.0),
            ("E", 4.9),
        ]));
        let moves = sort_moves(&ranking);

        assert_eq!(moves.len(), 5);
        let froms: HashSet<usize> = moves.iter().map(|m| m.from).collect();
        let tos: HashSet<usize> = moves.iter().map(|m| m.to).collect();
        assert_eq!(froms, (0..5).collect());
        assert_eq!(tos, (0..5).collect());
        assert_eq!(moves[4], SortMove { from: 4, to: 0 });
        assert_eq!(moves[0], SortMove { from: 0, to: 2 });
    }

    #[test]
    fn test_empty_ranking() {
        assert!(assign_rank(&[]).is_empty());
        assert!(sort_moves(&[]).is_empty());
    }
}
