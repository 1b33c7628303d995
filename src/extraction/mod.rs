/*!
 * Text and attribute extraction.
 *
 * - `commands`: block-wise extraction of event command lists
 * - `records`: database records, System.json and map headers
 * - `units`: text units and the last-write-wins attribute map
 * - `predicate`: translatable-content predicate
 * - `script`: quoted literal scanner for script lines
 * - `names`: actor name table for dialogue labels
 * - `options`: extraction options and context
 */

pub mod commands;
pub mod names;
pub mod options;
pub mod predicate;
pub mod records;
pub mod script;
pub mod units;

pub use commands::{Counterpart, extract_command_list, extract_commands};
pub use names::NameTable;
pub use options::{ExtractContext, ExtractOptions, PluginArgument, ScriptMode};
pub use predicate::{ScriptPredicate, TextPredicate, looks_numeric};
pub use units::{AttributeEntry, AttributeMap, Extraction, TextUnit};
