use std::time::Duration;

use phrasal_alignment_rs::pairwise::scoring::Equality;
use phrasal_alignment_rs::pairwise::sw;
use phrasal_alignment_rs::pairwise::{AlignmentResult, Outcome};

use super::words;

fn engine(equal: f64, different: f64, gap: f64) -> sw::Engine<Equality<f64>> {
    sw::Engine::new(Equality::new(equal, different, gap))
}

/// Alignments sorted by their start offsets, as (start1, start2, rendition1,
/// rendition2) tuples.
fn regions(outcome: &Outcome<f64>) -> Vec<(usize, usize, String, String)> {
    let mut result: Vec<_> = outcome
        .alignments()
        .iter()
        .map(|x| {
            (
                *x.start1(),
                *x.start2(),
                x.seq1().to_string(),
                x.seq2().to_string(),
            )
        })
        .collect();
    result.sort();
    result
}

fn check_invariants(outcome: &Outcome<f64>) {
    for alignment in outcome.alignments() {
        assert_eq!(alignment.seq1().len(), alignment.seq2().len());
        assert!(!alignment
            .seq1()
            .iter()
            .zip(alignment.seq2().iter())
            .any(|(a, b)| a.is_gap() && b.is_gap()));
    }
}

#[test]
fn test_bridged_region() {
    // A strong match on both flanks makes gapping "xyz" out worthwhile: one
    // region spanning all of B, with the middle token unpaired.
    let engine = engine(2.0, -1.0, -1.0);
    let outcome = engine.align(&words(&["TNF", "alpha"]), &words(&["TNF", "xyz", "alpha"]));

    assert_eq!(outcome.score(), Some(3.0));
    assert_eq!(
        regions(&outcome),
        vec![(0, 0, "TNF - alpha".to_string(), "TNF xyz alpha".to_string())]
    );
    check_invariants(&outcome);
}

#[test]
fn test_split_regions_exclude_low_scoring_middle() {
    // With a weaker match the bridge is no longer worth its gap: the table
    // maximum is attained twice and each root stops at the floor, excluding
    // "xyz" entirely. The results span B positions 0 and 2.
    let engine = engine(1.0, -1.0, -1.0);
    let outcome = engine.align(&words(&["TNF", "alpha"]), &words(&["TNF", "xyz", "alpha"]));

    assert_eq!(outcome.score(), Some(1.0));
    assert_eq!(
        regions(&outcome),
        vec![
            (0, 0, "TNF".to_string(), "TNF".to_string()),
            (1, 2, "alpha".to_string(), "alpha".to_string()),
        ]
    );
    check_invariants(&outcome);
}

#[test]
fn test_negative_restart_discovers_disjoint_regions() {
    // Two equal-scoring regions separated by a hopeless mismatch: the first
    // grows from the origin (2 matches from 0), the second restarts at the
    // floor (3 matches from -5). Both reach 10 and both are traced back.
    let mut engine = engine(5.0, -50.0, -12.0);
    engine.with_restart(-5.0).unwrap();

    let outcome = engine.align(
        &words(&["a", "b", "X", "c", "d", "e"]),
        &words(&["a", "b", "Y", "c", "d", "e"]),
    );

    assert_eq!(outcome.score(), Some(10.0));
    assert_eq!(
        regions(&outcome),
        vec![
            (0, 0, "a b".to_string(), "a b".to_string()),
            (3, 3, "c d e".to_string(), "c d e".to_string()),
        ]
    );
    check_invariants(&outcome);
}

#[test]
fn test_nothing_above_the_floor() {
    let engine = engine(1.0, -1.0, -1.0);

    let outcome = engine.align(&words(&["x"]), &words(&["y"]));
    assert!(outcome.is_no_alignment());
    assert_eq!(outcome.score(), None);
    assert!(outcome.alignments().is_empty());
}

#[test]
fn test_empty_inputs() {
    let engine = engine(1.0, -1.0, -1.0);

    assert!(engine.align(&words(&[]), &words(&["a"])).is_no_alignment());
    assert!(engine.align(&words(&["a"]), &words(&[])).is_no_alignment());
    assert!(engine.align(&words(&[]), &words(&[])).is_no_alignment());
}

#[test]
fn test_restart_must_be_finite() {
    let mut engine = engine(1.0, -1.0, -1.0);

    assert!(engine.with_restart(f64::NAN).is_err());
    assert!(engine.with_restart(f64::INFINITY).is_err());
    assert!(engine.with_restart(f64::NEG_INFINITY).is_err());
    assert!(engine.with_restart(-3.0).is_ok());
}

#[test]
fn test_timeout_on_tie_heavy_input() {
    // Positive gap scores tie left against up everywhere: the corner roots a
    // traceback with hundreds of millions of paths. The call must abort at
    // the budget instead of enumerating them.
    let mut engine = engine(1.0, -1.0, 1.0);
    let budget = Duration::from_millis(10);
    engine.with_budget(budget);

    let seq = words(&["a"; 16]);
    let outcome = engine.align(&seq, &seq);

    assert!(outcome.is_timed_out());
    assert_eq!(outcome.score(), None);
    assert!(outcome.alignments().is_empty());

    let stats = outcome.stats().unwrap();
    assert!(*stats.elapsed() >= budget);
    assert!(*stats.tracebacks() > 0);
}

#[test]
fn test_zero_budget_times_out_during_table_construction() {
    let mut engine = engine(1.0, -1.0, -1.0);
    engine.with_budget(Duration::ZERO);

    let outcome = engine.align(&words(&["a", "b"]), &words(&["a", "b"]));
    assert!(outcome.is_timed_out());
    // The build was aborted before any traceback started
    assert_eq!(*outcome.stats().unwrap().tracebacks(), 0);
}

#[test]
fn test_determinism() {
    let engine = engine(1.0, -1.0, -1.0);
    let (seq1, seq2) = (words(&["TNF", "alpha"]), words(&["TNF", "xyz", "alpha"]));

    let first = engine.align(&seq1, &seq2);
    let second = engine.align(&seq1, &seq2);
    assert_eq!(first.score(), second.score());
    assert_eq!(regions(&first), regions(&second));
}

#[test]
fn test_stats_are_call_scoped() {
    let engine = engine(1.0, -1.0, -1.0);

    let outcome = engine.align(&words(&["a", "b"]), &words(&["a", "b"]));
    let stats = *outcome.stats().unwrap();
    assert!(*stats.tracebacks() > 0);
    assert!(*stats.elapsed() < sw::DEFAULT_BUDGET);

    // A fresh call starts its bookkeeping from zero; the caller keeps the
    // historical maximum by folding over returned stats.
    let outcome = engine.align(&words(&["a"]), &words(&["a"]));
    assert!(outcome.stats().unwrap().tracebacks() <= stats.tracebacks());
}

#[test]
fn test_start_offsets_point_into_the_inputs() {
    let engine = engine(1.0, -1.0, -1.0);
    let seq1 = words(&["left", "TNF", "alpha"]);
    let seq2 = words(&["TNF", "alpha", "right"]);

    let outcome = engine.align(&seq1, &seq2);
    assert_eq!(outcome.score(), Some(2.0));

    let alignment: &AlignmentResult<f64> = &outcome.alignments()[0];
    assert_eq!((*alignment.start1(), *alignment.start2()), (1, 0));
    assert_eq!(alignment.seq1().to_string(), "TNF alpha");
    assert_eq!(alignment.seq2().to_string(), "TNF alpha");
}
