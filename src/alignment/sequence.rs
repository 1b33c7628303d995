/*!
 * Longest-common-subsequence alignment of two sequences.
 *
 * Produces an edit script of maximal `Equal`, `Replace`, `Insert` and
 * `Delete` runs. Ties between equally long alignments are resolved
 * leftmost-first, so the same inputs always give the same script.
 */

use std::ops::Range;

/// Kind of an edit operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTag {
    /// Elements are equal on both sides
    Equal,
    /// Source elements were replaced by target elements
    Replace,
    /// Elements present only in the target
    Insert,
    /// Elements present only in the source
    Delete,
}

/// One run of the edit script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
    pub tag: EditTag,
    pub source: Range<usize>,
    pub target: Range<usize>,
}

/// Ordered edit operations covering both sequences exactly once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditScript {
    ops: Vec<EditOp>,
    source_len: usize,
}

impl EditScript {
    /// The operations in order
    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    /// Whether every operation is `Equal`
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| op.tag == EditTag::Equal)
    }

    /// Target index for each source index inside `Equal` runs
    pub fn equal_pairs(&self) -> Vec<Option<usize>> {
        self.pairs_for(|tag| tag == EditTag::Equal)
    }

    /// Target index for each source index inside `Equal` and `Replace`
    /// runs, pairing positionally within a run
    pub fn pairs(&self) -> Vec<Option<usize>> {
        self.pairs_for(|tag| matches!(tag, EditTag::Equal | EditTag::Replace))
    }

    fn pairs_for(&self, accept: impl Fn(EditTag) -> bool) -> Vec<Option<usize>> {
        let mut pairs = vec![None; self.source_len];
        for op in self.ops.iter().filter(|op| accept(op.tag)) {
            for (offset, i) in op.source.clone().enumerate() {
                let j = op.target.start + offset;
                if j < op.target.end {
                    pairs[i] = Some(j);
                }
            }
        }
        pairs
    }

    fn push(&mut self, tag: EditTag, source: Range<usize>, target: Range<usize>) {
        if source.is_empty() && target.is_empty() {
            return;
        }
        if let Some(last) = self.ops.last_mut() {
            if last.tag == tag && last.source.end == source.start && last.target.end == target.start {
                last.source.end = source.end;
                last.target.end = target.end;
                return;
            }
        }
        self.ops.push(EditOp { tag, source, target });
    }

    fn push_gap(&mut self, source: Range<usize>, target: Range<usize>) {
        let tag = match (source.is_empty(), target.is_empty()) {
            (true, true) => return,
            (false, true) => EditTag::Delete,
            (true, false) => EditTag::Insert,
            (false, false) => EditTag::Replace,
        };
        self.push(tag, source, target);
    }
}

/// Align `source` against `target`
pub fn align<T: PartialEq>(source: &[T], target: &[T]) -> EditScript {
    let mut script = EditScript {
        ops: Vec::new(),
        source_len: source.len(),
    };

    let prefix = source
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = source[prefix..]
        .iter()
        .rev()
        .zip(target[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    script.push(EditTag::Equal, 0..prefix, 0..prefix);

    let source_end = source.len() - suffix;
    let target_end = target.len() - suffix;
    align_middle(&mut script, source, target, prefix..source_end, prefix..target_end);

    script.push(EditTag::Equal, source_end..source.len(), target_end..target.len());
    script
}

/// Fill the script for the window left after prefix and suffix stripping
fn align_middle<T: PartialEq>(
    script: &mut EditScript,
    source: &[T],
    target: &[T],
    source_window: Range<usize>,
    target_window: Range<usize>,
) {
    let s = &source[source_window.clone()];
    let t = &target[target_window.clone()];
    let (n, m) = (s.len(), t.len());

    if n == 0 || m == 0 {
        script.push_gap(source_window, target_window);
        return;
    }

    // lcs[i * width + j] is the LCS length of s[i..] and t[j..]
    let width = m + 1;
    let mut lcs = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i * width + j] = if s[i] == t[j] {
                lcs[(i + 1) * width + j + 1] + 1
            } else {
                lcs[(i + 1) * width + j].max(lcs[i * width + j + 1])
            };
        }
    }

    let (base_i, base_j) = (source_window.start, target_window.start);
    let (mut i, mut j) = (0, 0);
    let (mut gap_i, mut gap_j) = (0, 0);

    while i < n && j < m {
        if s[i] == t[j] {
            script.push_gap(base_i + gap_i..base_i + i, base_j + gap_j..base_j + j);
            script.push(EditTag::Equal, base_i + i..base_i + i + 1, base_j + j..base_j + j + 1);
            i += 1;
            j += 1;
            gap_i = i;
            gap_j = j;
        } else if lcs[(i + 1) * width + j] >= lcs[i * width + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }

    script.push_gap(base_i + gap_i..source_window.end, base_j + gap_j..target_window.end);
}
