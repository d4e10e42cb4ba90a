use proptest::prelude::*;
use riskgraph::graph::{EntityId, EntityKind};
use riskgraph::vector::{cosine_similarity, EmbeddingIndex};

fn paper(i: usize) -> EntityId {
    EntityId::new(EntityKind::Paper, i.to_string())
}

#[test]
fn test_top_k_orthogonal_scenario() {
    let mut index = EmbeddingIndex::new();
    index.upsert(paper(1), vec![1.0, 0.0]);
    index.upsert(paper(2), vec![0.0, 1.0]);

    let results = index.top_k(&[1.0, 0.0], 2);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, paper(1));
    assert_eq!(results[0].score, 1.0);
    assert_eq!(results[1].id, paper(2));
    assert_eq!(results[1].score, 0.0);
}

#[test]
fn test_nearest_neighbor_in_three_dimensions() {
    let mut index = EmbeddingIndex::new();
    index.upsert(paper(1), vec![1.0, 0.0, 0.0]);
    index.upsert(paper(2), vec![0.0, 1.0, 0.0]);
    index.upsert(paper(3), vec![0.0, 0.0, 1.0]);

    // Query vector is closest to paper 1
    let results = index.top_k(&[0.9, 0.1, 0.0], 1);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, paper(1));
    assert!(results[0].score > 0.99);
}

#[test]
fn test_zero_query_scores_everything_zero() {
    let mut index = EmbeddingIndex::new();
    index.upsert(paper(1), vec![1.0, 2.0]);
    index.upsert(paper(2), vec![3.0, 4.0]);

    let results = index.top_k(&[0.0, 0.0], 5);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.score == 0.0));
    // Equal scores keep insertion order
    assert_eq!(results[0].id, paper(1));
}

#[test]
fn test_replacing_a_vector_changes_ranking() {
    let mut index = EmbeddingIndex::new();
    index.upsert(paper(1), vec![1.0, 0.0]);
    index.upsert(paper(2), vec![0.0, 1.0]);
    assert_eq!(index.top_k(&[0.0, 1.0], 1)[0].id, paper(2));

    index.upsert(paper(1), vec![0.0, 1.0]);
    assert_eq!(index.len(), 2);
    // Tie at 1.0 now; paper 1 was inserted first
    assert_eq!(index.top_k(&[0.0, 1.0], 1)[0].id, paper(1));
}

fn vectors() -> impl Strategy<Value = Vec<Vec<f32>>> {
    prop::collection::vec(prop::collection::vec(-10.0f32..10.0, 1..6), 0..20)
}

proptest! {
    #[test]
    fn prop_top_k_bounded_and_sorted(
        stored in vectors(),
        query in prop::collection::vec(-10.0f32..10.0, 1..6),
        k in 0usize..25,
    ) {
        let mut index = EmbeddingIndex::new();
        for (i, v) in stored.iter().enumerate() {
            index.upsert(paper(i), v.clone());
        }

        let results = index.top_k(&query, k);
        prop_assert_eq!(results.len(), k.min(stored.len()));
        for pair in results.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn prop_self_similarity_is_one(v in prop::collection::vec(-100.0f32..100.0, 1..16)) {
        prop_assume!(v.iter().any(|x| x.abs() > 1e-3));
        prop_assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-4);
        prop_assert_eq!(cosine_similarity(&v, &vec![0.0; v.len()]), 0.0);
    }
}
