/*!
 * Tests for the sequence aligner, similarity scorer and node pairing
 */

use carryover::alignment::{EditTag, align, levenshtein_distance, similarity};
use carryover::reconcile::pair_nodes;

/// Identical sequences produce a single Equal op
#[test]
fn test_align_identical_shouldBeIdentity() {
    let script = align(&[1, 2, 3], &[1, 2, 3]);
    assert!(script.is_identity());
    assert_eq!(script.ops().len(), 1);
    assert_eq!(script.ops()[0].tag, EditTag::Equal);
}

/// An element only the source has is a Delete between two Equal runs
#[test]
fn test_align_middleInsertion_shouldKeepNeighboursEqual() {
    let script = align(&["a", "new", "b"], &["a", "b"]);
    let tags: Vec<EditTag> = script.ops().iter().map(|op| op.tag).collect();
    assert_eq!(tags, vec![EditTag::Equal, EditTag::Delete, EditTag::Equal]);
    assert_eq!(script.equal_pairs(), vec![Some(0), None, Some(1)]);
}

/// A differing element with both neighbours equal becomes Replace
#[test]
fn test_align_substitution_shouldBeReplace() {
    let script = align(&["a", "x", "c"], &["a", "y", "c"]);
    assert!(script.ops().iter().any(|op| op.tag == EditTag::Replace));
    assert_eq!(script.pairs(), vec![Some(0), Some(1), Some(2)]);
}

/// Ops cover both sequences in order without overlap
#[test]
fn test_align_ops_shouldTileBothSequences() {
    let source = [1, 2, 3, 4, 5, 6, 7];
    let target = [0, 2, 3, 9, 9, 6, 7, 8];
    let script = align(&source, &target);

    let mut source_end = 0;
    let mut target_end = 0;
    for op in script.ops() {
        assert_eq!(op.source.start, source_end);
        assert_eq!(op.target.start, target_end);
        source_end = op.source.end;
        target_end = op.target.end;
    }
    assert_eq!(source_end, source.len());
    assert_eq!(target_end, target.len());
}

/// Empty inputs still produce a consistent script
#[test]
fn test_align_emptySides_shouldNotPanic() {
    let empty: [u8; 0] = [];
    assert!(align(&empty, &empty).ops().is_empty());
    assert_eq!(align(&[1u8, 2], &empty).pairs(), vec![None, None]);
    assert!(align(&empty, &[1u8]).pairs().is_empty());
}

/// Similarity identities on the 0-100 scale
#[test]
fn test_similarity_identities_shouldHold() {
    assert_eq!(similarity("", ""), 100.0);
    assert_eq!(similarity("abc", ""), 0.0);
    assert_eq!(similarity("勇者", "勇者"), 100.0);
    assert_eq!(similarity("abcd", "abcx"), 75.0);
    assert_eq!(similarity("Abc", "abc"), similarity("abc", "Abc"));
}

/// Distance counts characters, not bytes
#[test]
fn test_levenshteinDistance_multibyte_shouldCountScalars() {
    assert_eq!(levenshtein_distance("こんにちは", "こんばんは"), 2);
    assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
}

/// Swapped nodes are recovered by the relocation step
#[test]
fn test_pairNodes_reorderedPages_shouldFollowSignatures() {
    let current = ["page-B", "page-A", "page-C"];
    let prior = ["page-A", "page-B", "page-C"];
    assert_eq!(pair_nodes(&current, &prior), vec![Some(1), Some(0), Some(2)]);
}

/// A deleted prior node leaves its neighbours paired
#[test]
fn test_pairNodes_deletion_shouldSkipPriorNode() {
    let current = ["a", "c"];
    let prior = ["a", "b", "c"];
    assert_eq!(pair_nodes(&current, &prior), vec![Some(0), Some(2)]);
}

/// Empty slots pair with empty slots and never with present nodes
#[test]
fn test_pairNodes_nullSlots_shouldAlignByPosition() {
    let current = [None, Some(1), Some(2)];
    let prior = [None, Some(2)];
    assert_eq!(pair_nodes(&current, &prior), vec![Some(0), None, Some(1)]);
}
