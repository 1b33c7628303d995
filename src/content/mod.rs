/*!
 * Content tree model and loading.
 *
 * - `model`: serde types for event data and database records
 * - `blocks`: grouping of command lists into alignment blocks
 * - `loader`: file classification and lenient parsing
 */

pub mod blocks;
pub mod loader;
pub mod model;

pub use blocks::{Block, BlockKind, group_blocks};
pub use loader::{ContentKind, load_content, parse_content};
pub use model::{Command, CommonEvent, ContentFile, Entity, Event, MapData, Page, PageImage, SystemData, Terms, Troop};
