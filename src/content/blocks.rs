/*!
 * Grouping of command lists into blocks.
 *
 * A block is the atomic unit of alignment at command level: a run of
 * dialogue lines, a comment or script with its continuation lines, or a
 * single command.
 */

use std::ops::Range;

use super::model::Command;

pub const SHOW_TEXT: i64 = 101;
pub const SHOW_CHOICES: i64 = 102;
pub const COMMENT: i64 = 108;
pub const CONDITIONAL_BRANCH: i64 = 111;
pub const CONTROL_VARIABLES: i64 = 122;
pub const CHANGE_NAME: i64 = 320;
pub const CHANGE_NICKNAME: i64 = 324;
pub const CHANGE_PROFILE: i64 = 325;
pub const SCRIPT: i64 = 355;
pub const PLUGIN_COMMAND: i64 = 356;
pub const PLUGIN_COMMAND_MZ: i64 = 357;
pub const TEXT_LINE: i64 = 401;
pub const WHEN_CHOICE: i64 = 402;
pub const SCROLL_TEXT_LINE: i64 = 405;
pub const COMMENT_LINE: i64 = 408;
pub const SCRIPT_LINE: i64 = 655;

/// Opcodes that rarely carry displayed text
pub const RARE_CODES: [i64; 11] = [
    WHEN_CHOICE,
    CONTROL_VARIABLES,
    CONDITIONAL_BRANCH,
    COMMENT,
    COMMENT_LINE,
    CHANGE_NAME,
    CHANGE_NICKNAME,
    CHANGE_PROFILE,
    SCRIPT,
    SCRIPT_LINE,
    PLUGIN_COMMAND,
];

/// Kind of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Consecutive 401 lines
    Dialogue,
    /// Consecutive 405 lines
    ScrollText,
    /// 108 head with its 408 continuation lines
    Comment,
    /// 355 head with its 655 continuation lines
    Script,
    /// Any other command on its own
    Single,
}

impl BlockKind {
    /// Whether the block's parameters are free text lines
    pub fn is_text_run(self) -> bool {
        !matches!(self, BlockKind::Single)
    }
}

/// A contiguous run of commands treated as one unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub range: Range<usize>,
}

impl Block {
    /// Commands covered by this block
    pub fn commands<'a>(&self, list: &'a [Command]) -> &'a [Command] {
        &list[self.range.clone()]
    }

    /// First command of the block
    pub fn head<'a>(&self, list: &'a [Command]) -> &'a Command {
        &list[self.range.start]
    }

    /// First string parameter of every command in the block
    pub fn lines<'a>(&self, list: &'a [Command]) -> Vec<&'a str> {
        self.commands(list)
            .iter()
            .map(|c| c.str_param(0).unwrap_or_default())
            .collect()
    }
}

/// Split a command list into blocks
pub fn group_blocks(list: &[Command]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut index = 0;

    while index < list.len() {
        let code = list[index].code;
        let (kind, continuation) = match code {
            TEXT_LINE => (BlockKind::Dialogue, TEXT_LINE),
            SCROLL_TEXT_LINE => (BlockKind::ScrollText, SCROLL_TEXT_LINE),
            COMMENT => (BlockKind::Comment, COMMENT_LINE),
            SCRIPT => (BlockKind::Script, SCRIPT_LINE),
            _ => (BlockKind::Single, -1),
        };

        let start = index;
        index += 1;
        if kind.is_text_run() {
            while index < list.len() && list[index].code == continuation {
                index += 1;
            }
        }
        blocks.push(Block { kind, range: start..index });
    }

    blocks
}
