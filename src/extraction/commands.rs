/*!
 * Text and attribute extraction from a command list.
 *
 * The list is walked block by block. When a counterpart block from the
 * prior translated tree is supplied, its text fills the translation slot
 * of the matching unit: line `i` of a dialogue block, choice `i` of a
 * choice list, literal `i` of script line `i`, and so on.
 */

use serde_json::Value;

use crate::content::blocks::{
    Block, CHANGE_NAME, CHANGE_NICKNAME, CHANGE_PROFILE, COMMENT, COMMENT_LINE,
    CONDITIONAL_BRANCH, CONTROL_VARIABLES, PLUGIN_COMMAND, PLUGIN_COMMAND_MZ, RARE_CODES, SCRIPT,
    SCRIPT_LINE, SCROLL_TEXT_LINE, SHOW_CHOICES, SHOW_TEXT, TEXT_LINE, WHEN_CHOICE, group_blocks,
};
use crate::content::model::Command;

use super::names::NameTable;
use super::options::{ExtractContext, ScriptMode};
use super::predicate::accepts_attribute;
use super::script::string_literals;
use super::units::{Extraction, TextUnit};

/// Prior version of a command list, paired block by block
#[derive(Debug, Clone, Copy)]
pub struct Counterpart<'a> {
    pub list: &'a [Command],
    pub blocks: &'a [Block],
    /// Prior block index for each current block
    pub pairing: &'a [Option<usize>],
}

/// A single prior block resolved from a `Counterpart`
#[derive(Debug, Clone, Copy)]
struct PriorBlock<'a> {
    list: &'a [Command],
    block: &'a Block,
}

impl<'a> PriorBlock<'a> {
    fn head(&self) -> &'a Command {
        self.block.head(self.list)
    }

    fn lines(&self) -> Vec<&'a str> {
        self.block.lines(self.list)
    }
}

impl<'a> Counterpart<'a> {
    fn block_for(&self, current: usize) -> Option<PriorBlock<'a>> {
        let prior = self.pairing.get(current).copied().flatten()?;
        self.blocks.get(prior).map(|block| PriorBlock { list: self.list, block })
    }
}

/// Extract a command list with no counterpart
pub fn extract_commands(list: &[Command], ctx: &ExtractContext) -> Extraction {
    let blocks = group_blocks(list);
    extract_command_list(list, &blocks, None, ctx)
}

/// Extract a grouped command list, carrying text from `counterpart`
pub fn extract_command_list(
    list: &[Command],
    blocks: &[Block],
    counterpart: Option<&Counterpart>,
    ctx: &ExtractContext,
) -> Extraction {
    let mut out = Extraction::new();
    let mut label = String::new();

    for (index, block) in blocks.iter().enumerate() {
        let head = block.head(list);
        if ctx.options.skip_rare && RARE_CODES.contains(&head.code) {
            continue;
        }

        // A paired block with another opcode is not a counterpart
        let prior = counterpart
            .and_then(|cp| cp.block_for(index))
            .filter(|p| p.head().code == head.code);

        match head.code {
            SHOW_TEXT => label = speaker_label(head, ctx.names),
            TEXT_LINE => emit_dialogue(&mut out, block.lines(list), prior, &label, ctx),
            // Scrolling text has no speaker
            SCROLL_TEXT_LINE => emit_dialogue(&mut out, block.lines(list), prior, "", ctx),
            SHOW_CHOICES => emit_choices(&mut out, head, prior),
            WHEN_CHOICE => emit_param(&mut out, head, prior, 1, "choice"),
            CHANGE_NAME => emit_param(&mut out, head, prior, 1, "name"),
            CHANGE_NICKNAME => emit_param(&mut out, head, prior, 1, "nickname"),
            CHANGE_PROFILE => emit_param(&mut out, head, prior, 1, "profile"),
            COMMENT | COMMENT_LINE => emit_comment(&mut out, block.lines(list), prior),
            SCRIPT | SCRIPT_LINE => {
                let prior_lines = prior.map(|p| p.lines());
                emit_script(&mut out, &block.lines(list), prior_lines.as_deref(), ctx);
            }
            CONTROL_VARIABLES if head.int_param(3) == Some(4) => emit_script_param(&mut out, head, prior, 4, ctx),
            CONDITIONAL_BRANCH if head.int_param(0) == Some(12) => emit_script_param(&mut out, head, prior, 1, ctx),
            PLUGIN_COMMAND => emit_plugin_command(&mut out, head, prior, ctx),
            PLUGIN_COMMAND_MZ => emit_plugin_command_mz(&mut out, head, prior, ctx),
            _ => {}
        }
    }

    out
}

/// Context label for dialogue following a show-text header
fn speaker_label(head: &Command, names: &NameTable) -> String {
    if let Some(speaker) = head.str_param(4).filter(|s| !s.is_empty()) {
        return speaker.to_string();
    }
    if let Some(name) = head
        .int_param(1)
        .and_then(|index| usize::try_from(index).ok())
        .and_then(|index| names.get(index))
    {
        return name.to_string();
    }
    head.str_param(0).unwrap_or_default().to_string()
}

/// Lines with trailing empty lines removed
fn trim_trailing_empty(mut lines: Vec<&str>) -> Vec<&str> {
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

fn emit_dialogue(out: &mut Extraction, lines: Vec<&str>, prior: Option<PriorBlock>, label: &str, ctx: &ExtractContext) {
    let lines = trim_trailing_empty(lines);
    if lines.is_empty() {
        return;
    }
    let prior_lines = prior.map(|p| trim_trailing_empty(p.lines()));

    if ctx.options.merge_lines {
        let join = ctx.options.line_join.as_str();
        let source = lines.join(join);
        if !ctx.is_translatable(&source) {
            return;
        }
        let translation = prior_lines.map(|p| p.join(join)).unwrap_or_default();
        out.texts.push(TextUnit::new(source, translation, label));
        return;
    }

    for (i, line) in lines.iter().enumerate() {
        if !ctx.is_translatable(line) {
            continue;
        }
        let translation = prior_lines
            .as_ref()
            .and_then(|p| p.get(i).copied())
            .unwrap_or_default();
        out.texts.push(TextUnit::new(*line, translation, label));
    }
}

fn emit_choices(out: &mut Extraction, head: &Command, prior: Option<PriorBlock>) {
    let Some(choices) = head.parameters.first().and_then(Value::as_array) else {
        return;
    };
    let prior_choices = prior.and_then(|p| p.head().parameters.first()).and_then(Value::as_array);

    for (i, choice) in choices.iter().enumerate() {
        let Some(text) = choice.as_str().filter(|t| accepts_attribute(t)) else {
            continue;
        };
        let translation = prior_choices
            .and_then(|p| p.get(i))
            .and_then(Value::as_str)
            .unwrap_or_default();
        out.attributes.insert(text, translation, "choice");
    }
}

fn emit_param(out: &mut Extraction, head: &Command, prior: Option<PriorBlock>, index: usize, context: &str) {
    let Some(text) = head.str_param(index).filter(|t| accepts_attribute(t)) else {
        return;
    };
    let translation = prior.and_then(|p| p.head().str_param(index)).unwrap_or_default();
    out.attributes.insert(text, translation, context);
}

fn emit_comment(out: &mut Extraction, lines: Vec<&str>, prior: Option<PriorBlock>) {
    let prior_lines = prior.map(|p| p.lines());
    for (i, line) in lines.iter().enumerate() {
        if !accepts_attribute(line) {
            continue;
        }
        let translation = prior_lines
            .as_ref()
            .and_then(|p| p.get(i).copied())
            .unwrap_or_default();
        out.attributes.insert(*line, translation, "comment");
    }
}

fn emit_script_param(out: &mut Extraction, head: &Command, prior: Option<PriorBlock>, index: usize, ctx: &ExtractContext) {
    let Some(line) = head.str_param(index) else {
        return;
    };
    let prior_lines = prior
        .and_then(|p| p.head().str_param(index))
        .map(|p| vec![p]);
    emit_script(out, &[line], prior_lines.as_deref(), ctx);
}

fn emit_script(out: &mut Extraction, lines: &[&str], prior_lines: Option<&[&str]>, ctx: &ExtractContext) {
    if lines.iter().any(|line| ctx.options.hits_stop_word(line)) {
        return;
    }

    for (i, line) in lines.iter().enumerate() {
        let literals = string_literals(line);
        if !literals.iter().any(|l| ctx.is_translatable(&l.body)) {
            continue;
        }
        let prior_line = prior_lines.and_then(|p| p.get(i).copied());

        match ctx.options.script_mode {
            ScriptMode::WholeLines => {
                out.attributes.insert(*line, prior_line.unwrap_or_default(), "script");
            }
            ScriptMode::Literals => {
                // Literals pair by position only when both lines have the same count
                let prior_literals = prior_line
                    .map(string_literals)
                    .filter(|p| p.len() == literals.len())
                    .unwrap_or_default();
                for (k, literal) in literals.iter().enumerate() {
                    if !ctx.is_translatable(&literal.body) {
                        continue;
                    }
                    let translation = prior_literals.get(k).map(|p| p.body.as_str()).unwrap_or_default();
                    out.attributes.insert(literal.body.as_str(), translation, "script");
                }
            }
        }
    }
}

fn emit_plugin_command(out: &mut Extraction, head: &Command, prior: Option<PriorBlock>, ctx: &ExtractContext) {
    let Some(text) = head.str_param(0) else {
        return;
    };
    if ctx.options.hits_stop_word(text) {
        return;
    }
    let Some(argument) = text
        .split(' ')
        .nth(1)
        .filter(|arg| accepts_attribute(arg) && !arg.contains('_'))
    else {
        return;
    };
    let translation = prior
        .and_then(|p| p.head().str_param(0))
        .and_then(|p| p.split(' ').nth(1))
        .unwrap_or_default();
    out.attributes.insert(argument, translation, "plugin");
}

fn emit_plugin_command_mz(out: &mut Extraction, head: &Command, prior: Option<PriorBlock>, ctx: &ExtractContext) {
    if head.parameters.len() < 4 {
        return;
    }
    let (Some(plugin), Some(command)) = (head.str_param(0), head.str_param(1)) else {
        return;
    };
    if ctx.options.hits_stop_word(&raw_parameters(head)) {
        return;
    }
    let Some(key) = ctx.options.plugin_argument(plugin, command) else {
        return;
    };
    let Some(text) = head.parameters[3]
        .get(key)
        .and_then(Value::as_str)
        .filter(|t| accepts_attribute(t))
    else {
        return;
    };
    let translation = prior
        .and_then(|p| p.head().parameters.get(3))
        .and_then(|args| args.get(key))
        .and_then(Value::as_str)
        .unwrap_or_default();
    out.attributes.insert(text, translation, "plugin");
}

/// Parameters of a command as one JSON string
fn raw_parameters(command: &Command) -> String {
    Value::Array(command.parameters.clone()).to_string()
}
