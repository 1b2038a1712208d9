//! Help screen rendering.
//!
//! Layout is a rendering concern, not a parsing contract: a usage
//! banner built from the program name and positional option names,
//! an `Arguments:` section, and an `Options:` table with a short-flag
//! column, a long-name column carrying a value hint, and word-wrapped
//! descriptions. Widths are measured as terminal display columns.

use std::io::Write;

use unicode_width::UnicodeWidthStr;

use crate::option::{OptionKind, Registry, UserOption};

const MAX_WIDTH: usize = 79;
const FIRST_SPACE: usize = 1;
const SHORT_WIDTH: usize = 4;
const LONG_SPACE: usize = 2;
const LONG_WIDTH_MAX: usize = 30;
const RAW_SPACE: usize = 4;

/// Write the full help screen to `out`. Write errors are ignored; the
/// sink is the caller's problem.
pub(crate) fn print_help(
    out: &mut dyn Write,
    registry: &Registry,
    program: &str,
    intro: Option<&str>,
    outro: Option<&str>,
) {
    if let Some(intro) = intro {
        let _ = write!(out, "{}\n", intro);
    }

    // Usage banner: program name followed by the positional names.
    let mut raw_names = String::new();
    for raw in registry.raw() {
        raw_names.push(' ');
        raw_names.push_str(&raw.long);
    }
    let _ = write!(out, "\nUsage: {}{} [options]\n\n", program, raw_names);

    if !registry.raw().is_empty() {
        let _ = write!(out, "Arguments:\n");
        let name_width = registry
            .raw()
            .iter()
            .map(|r| r.long.width() + RAW_SPACE)
            .max()
            .unwrap_or(0);
        for raw in registry.raw() {
            let _ = write!(out, "{:w$}", "", w = FIRST_SPACE);
            write_padded(out, &raw.long, name_width);
            write_description(out, &raw.help, FIRST_SPACE + name_width);
        }
        let _ = write!(out, "\n");
    }

    let _ = write!(out, "Options:\n");
    let mut long_width = registry
        .named()
        .iter()
        .map(|o| long_column(o).width() + LONG_SPACE)
        .max()
        .unwrap_or(0);
    long_width = long_width.max("--help".width() + LONG_SPACE);
    if long_width > LONG_WIDTH_MAX {
        long_width = LONG_WIDTH_MAX;
    }
    let indent = FIRST_SPACE + SHORT_WIDTH + long_width;

    for opt in registry.named() {
        let _ = write!(out, "{:w$}", "", w = FIRST_SPACE);
        match opt.short {
            Some(c) => write_padded(out, &format!("-{},", c), SHORT_WIDTH),
            None => {
                let _ = write!(out, "{:w$}", "", w = SHORT_WIDTH);
            }
        }
        let column = long_column(opt);
        write_padded(out, &column, long_width);
        // An over-long left column pushes its description to the next
        // line, re-aligned with everyone else's.
        if column.width() + LONG_SPACE > long_width {
            let _ = write!(out, "\n{:w$}", "", w = indent);
        }
        write_description(out, &opt.help, indent);
    }

    let _ = write!(out, "{:w$}", "", w = FIRST_SPACE);
    write_padded(out, "-h,", SHORT_WIDTH);
    write_padded(out, "--help", long_width);
    let _ = write!(out, "Print this help\n");

    if let Some(outro) = outro {
        let _ = write!(out, "\n{}\n", outro);
    }
}

/// Long-name column text including the value hint for the kind.
fn long_column(opt: &UserOption) -> String {
    let mut s = String::from("--");
    s.push_str(&opt.long);
    match opt.kind {
        OptionKind::Required => s.push_str(" <value>"),
        OptionKind::Optional => s.push_str(" <optional>"),
        OptionKind::Default => {
            s.push_str(" <=");
            s.push_str(opt.default_value.as_deref().unwrap_or(""));
            s.push('>');
        }
        OptionKind::Multi => s.push_str(" 'mul ti ple'"),
        OptionKind::Flag | OptionKind::Raw => {}
    }
    s
}

/// Write `s` padded with spaces to `width` display columns. Text wider
/// than the column is written unpadded.
fn write_padded(out: &mut dyn Write, s: &str, width: usize) {
    let _ = write!(out, "{}", s);
    let w = s.width();
    if w < width {
        let _ = write!(out, "{:p$}", "", p = width - w);
    }
}

/// Write a description whose first line continues the current output
/// line; wrapped and explicit (`\n`) continuation lines are indented
/// by `indent` columns.
fn write_description(out: &mut dyn Write, text: &str, indent: usize) {
    let budget = MAX_WIDTH.saturating_sub(indent).max(20);
    let mut first = true;
    for line in text.split('\n') {
        for row in wrap(line, budget) {
            if first {
                first = false;
            } else {
                let _ = write!(out, "{:w$}", "", w = indent);
            }
            let _ = write!(out, "{}\n", row);
        }
    }
}

/// Greedy word wrap by display width. Never splits inside a word, so
/// a single over-long word overflows its row. An empty line yields one
/// empty row.
fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    for word in line.split_whitespace() {
        let w = word.width();
        if current.is_empty() {
            current.push_str(word);
            current_width = w;
        } else if current_width + 1 + w <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + w;
        } else {
            rows.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = w;
        }
    }
    rows.push(current);
    rows
}
