/*!
 * Structural alignment primitives.
 *
 * - `sequence`: LCS edit scripts over arbitrary comparable sequences
 * - `signature`: per-level identity projections of content nodes
 * - `similarity`: normalized edit-distance score used by fuzzy matching
 */

pub mod sequence;
pub mod signature;
pub mod similarity;

pub use sequence::{EditOp, EditScript, EditTag, align};
pub use similarity::{levenshtein_distance, similarity};
