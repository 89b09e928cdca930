//! Shell argument escaping for generated build files.
//!
//! Everything in this module is a pure transformation of an input string and
//! a [`ShellDialect`]; there is no shared state and no failure path. The same
//! argument can be emitted for a POSIX shell, Windows cmd, the various make
//! flavors, a Visual Studio project file, or a compiler response file by
//! flipping fields on the dialect.
//!
//! The two halves of the problem are kept as separate functions so each rule
//! set stays independently testable:
//!
//! 1. [`argument_needs_quotes`] - does this argument need surrounding quotes?
//! 2. [`escape_argument`] - emit the argument, quoted or not, with the
//!    per-character substitutions the dialect requires.

use serde::{Deserialize, Serialize};

/// Target dialect for argument escaping.
///
/// Fields are orthogonal except that the make-family fields (`watcom_wmake`,
/// `mingw_make`, `nmake`) only take effect when `make` is also set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellDialect {
    /// The argument is written into a makefile.
    pub make: bool,

    /// The argument is written into a Visual Studio project file. Do not
    /// combine with `make`.
    pub vs_ide: bool,

    /// The argument is passed to the Windows built-in `echo`, which
    /// interprets neither quotes nor backslashes.
    pub echo_windows: bool,

    /// The makefile is consumed by Watcom WMake.
    pub watcom_wmake: bool,

    /// The makefile is consumed by MinGW make.
    pub mingw_make: bool,

    /// The makefile is consumed by NMake.
    pub nmake: bool,

    /// The argument is written into a Ninja build file.
    pub ninja: bool,

    /// Leave `$(NAME)` make-variable references untouched so the build tool
    /// can substitute them after the shell has parsed quoting. Replacement
    /// values containing quotes or whitespace are the caller's problem.
    pub allow_make_variables: bool,

    /// Quote with the extra single quotes Watcom tools expect.
    pub watcom_quote: bool,

    /// The consuming shell is POSIX-like rather than Windows cmd.
    pub unix: bool,

    /// The argument is written into a compiler/linker response file.
    pub response: bool,

    /// Rewrite the escaped `${CONFIGURATION}` placeholder back to its
    /// literal form after escaping.
    pub unescape_ninja_configuration: bool,
}

/// How [`escape_for_config`] wraps its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapQuotes {
    /// Surround the result with double quotes.
    Wrap,
    /// Emit only the escaped content.
    NoWrap,
}

/// Tokens the shell parses as redirection or pipe operators. Quoting any of
/// these would turn an operator into a literal argument.
const SHELL_OPERATORS: &[&str] = &[
    "<", ">", "<<", ">>", "|", "||", "&&", "&>", "1>", "2>", "2>&1", "1>&2",
];

fn is_shell_operator(arg: &str) -> bool {
    SHELL_OPERATORS.contains(&arg)
}

fn char_is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn char_needs_quotes_on_unix(c: char) -> bool {
    matches!(
        c,
        '\'' | '`' | ';' | '#' | '&' | '$' | '(' | ')' | '~' | '<' | '>' | '|' | '*' | '^' | '\\'
    )
}

fn char_needs_quotes_on_windows(c: char) -> bool {
    matches!(c, '\'' | '#' | '&' | '<' | '>' | '|' | '^')
}

fn char_is_make_variable_name(b: u8) -> bool {
    b == b'_' || b.is_ascii_alphabetic()
}

fn char_needs_quotes(c: char, dialect: &ShellDialect) -> bool {
    // The Windows built-in echo never needs quotes.
    if !dialect.unix && dialect.echo_windows {
        return false;
    }

    // Quotes are needed on every platform to preserve whitespace.
    if char_is_whitespace(c) {
        return true;
    }

    // Response files quote hyphens so option parsers see them as data.
    if dialect.response && c == '-' {
        return true;
    }

    if dialect.unix {
        char_needs_quotes_on_unix(c)
    } else {
        char_needs_quotes_on_windows(c) || (c == ';' && dialect.vs_ide)
    }
}

/// Advance past any well-formed `$(NAME)` references starting at byte `i`.
///
/// Returns the index just past the last reference, or `i` unchanged if none
/// starts there. Names consist of ASCII letters and underscores, so the
/// returned index is always a character boundary.
fn skip_make_variables(s: &str, start: usize) -> usize {
    let bytes = s.as_bytes();
    let mut i = start;
    while i + 1 < bytes.len() && bytes[i] == b'$' && bytes[i + 1] == b'(' {
        let mut j = i + 2;
        while j < bytes.len() && char_is_make_variable_name(bytes[j]) {
            j += 1;
        }
        if j < bytes.len() && bytes[j] == b')' {
            i = j + 1;
        } else {
            break;
        }
    }
    i
}

/// Decide whether `arg` must be surrounded by quotes for `dialect`.
pub fn argument_needs_quotes(arg: &str, dialect: &ShellDialect) -> bool {
    // The empty string needs quotes or it is lost entirely.
    if arg.is_empty() {
        return true;
    }

    let mut i = 0;
    while i < arg.len() {
        // Make-variable references are transparent to the quoting decision.
        if dialect.allow_make_variables {
            i = skip_make_variables(arg, i);
            if i == arg.len() {
                break;
            }
        }

        let Some(c) = arg[i..].chars().next() else {
            break;
        };
        if char_needs_quotes(c, dialect) {
            return true;
        }
        i += c.len_utf8();
    }

    // A few single-character arguments are shell syntax on their own.
    if dialect.unix && arg.len() == 1 {
        if matches!(arg.as_bytes()[0], b'?' | b'&' | b'^' | b'|' | b'#') {
            return true;
        }
    }

    // UNC paths in MinGW makefiles need quotes to keep the leading pair of
    // backslashes intact.
    if dialect.mingw_make && dialect.make && arg.len() > 1 && arg.as_bytes().starts_with(b"\\\\") {
        return true;
    }

    false
}

/// Emit `arg` as a single token for `dialect`, quoting and escaping as
/// needed.
///
/// This does not special-case shell operators; use [`escape_for_shell`] for
/// the full entry point.
pub fn escape_argument(arg: &str, dialect: &ShellDialect) -> String {
    let mut out = String::with_capacity(arg.len() + 2);

    // Consecutive backslashes seen so far. Only meaningful for non-Unix
    // dialects, where a run of backslashes before a double quote (or before
    // the closing quote) must be doubled.
    let mut backslashes = 0usize;

    let needs_quotes = argument_needs_quotes(arg, dialect);
    if needs_quotes {
        if dialect.watcom_quote {
            if dialect.unix {
                out.push('"');
            }
            out.push('\'');
        } else {
            out.push('"');
        }
    }

    let mut i = 0;
    while i < arg.len() {
        if dialect.allow_make_variables {
            let skip = skip_make_variables(arg, i);
            if skip != i {
                // Copy the reference verbatim. The substitution performed by
                // the build tool also cancels any escaping a preceding
                // backslash run would have needed.
                out.push_str(&arg[i..skip]);
                backslashes = 0;
                i = skip;
                if i == arg.len() {
                    break;
                }
            }
        }

        let Some(c) = arg[i..].chars().next() else {
            break;
        };

        if dialect.unix {
            // These keep their meaning even inside a double-quoted argument.
            if matches!(c, '\\' | '"' | '`' | '$') {
                out.push('\\');
            }
        } else if dialect.echo_windows {
            // The built-in echo interprets nothing; emit characters as-is.
        } else {
            match c {
                '\\' => backslashes += 1,
                '"' => {
                    // Double every backslash immediately preceding the quote,
                    // then escape the quote itself.
                    for _ in 0..backslashes {
                        out.push('\\');
                    }
                    backslashes = 0;
                    out.push('\\');
                }
                _ => backslashes = 0,
            }
        }

        match c {
            '$' if dialect.make => {
                // The make tool rewrites $$ to $ before the shell sees it.
                out.push_str("$$");
            }
            '$' if dialect.vs_ide => {
                // "$" isolates the dollar from surrounding text so the IDE
                // does not read it as a macro reference, whether or not the
                // argument as a whole is quoted.
                out.push_str("\"$\"");
            }
            '#' if dialect.make && dialect.watcom_wmake => {
                // WMake rewrites $# to # before the shell sees it.
                out.push_str("$#");
            }
            '%' if dialect.vs_ide || (dialect.make && (dialect.mingw_make || dialect.nmake)) => {
                out.push_str("%%");
            }
            ';' if dialect.vs_ide => {
                // Semicolons separate list items in project files; ";" ends
                // quoting, inserts the character, and restarts quoting.
                out.push_str("\";\"");
            }
            '\n' if dialect.ninja => {
                out.push_str("$\n");
            }
            c => out.push(c),
        }

        i += c.len_utf8();
    }

    if needs_quotes {
        // A trailing backslash run would otherwise escape the closing quote.
        for _ in 0..backslashes {
            out.push('\\');
        }
        if dialect.watcom_quote {
            out.push('\'');
            if dialect.unix {
                out.push('"');
            }
        } else {
            out.push('"');
        }
    }

    if dialect.unescape_ninja_configuration {
        let escaped = if dialect.unix {
            "\\$${CONFIGURATION}"
        } else {
            "$${CONFIGURATION}"
        };
        out = out.replace(escaped, "${CONFIGURATION}");
    }

    out
}

/// Escape `arg` for `dialect`, leaving shell operator tokens untouched.
pub fn escape_for_shell(arg: &str, dialect: &ShellDialect) -> String {
    if is_shell_operator(arg) {
        return arg.to_string();
    }
    escape_argument(arg, dialect)
}

/// Escape `value` for re-emission as a literal in the generator's own
/// configuration language.
///
/// Only double quote, dollar, and backslash carry meaning there; everything
/// else is passed through untouched.
pub fn escape_for_config(value: &str, wrap: WrapQuotes) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    if wrap == WrapQuotes::Wrap {
        out.push('"');
    }
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '$' => out.push_str("\\$"),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    if wrap == WrapQuotes::Wrap {
        out.push('"');
    }
    out
}
