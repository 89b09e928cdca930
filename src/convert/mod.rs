//! Output conversion for a target generator environment.
//!
//! [`Converter`] is the front end the generators call for every emitted path
//! or argument: it knows which shell and build tool will consume the output,
//! derives the matching [`ShellDialect`], converts directory separators, and
//! optionally swaps an existing path for its space-free short form before
//! escaping.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::escape::{self, ShellDialect};

mod short_path;

pub use short_path::{CachedShortPaths, NoShortPaths, ShortPathResolver};

/// The target environment a generator emits for.
///
/// Maps one-to-one onto the boolean queries the generator host answers about
/// its configured shell and build tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorEnv {
    /// Commands run under cmd.exe rather than a POSIX shell.
    pub windows_shell: bool,

    /// Commands run under an MSYS shell.
    pub msys_shell: bool,

    /// Output goes into a Visual Studio project file.
    pub vs_ide: bool,

    /// The build tool is Watcom WMake.
    pub watcom_wmake: bool,

    /// The build tool is MinGW make.
    pub mingw_make: bool,

    /// The build tool is NMake.
    pub nmake: bool,

    /// The build tool is Ninja.
    pub ninja: bool,
}

/// Output format requested by a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Interactive or make-recipe command line.
    Shell,
    /// Shell form plus Ninja's newline and configuration-placeholder
    /// handling.
    NinjaMulti,
    /// Compiler/linker response file: no separator conversion, hyphens
    /// quoted.
    Response,
}

#[derive(Debug, Error)]
#[error("unknown output format `{0}`; expected `shell`, `ninja-multi`, or `response`")]
pub struct ParseOutputFormatError(String);

impl FromStr for OutputFormat {
    type Err = ParseOutputFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shell" => Ok(OutputFormat::Shell),
            "ninja-multi" => Ok(OutputFormat::NinjaMulti),
            "response" => Ok(OutputFormat::Response),
            other => Err(ParseOutputFormatError(other.to_string())),
        }
    }
}

/// Per-call options for [`Converter::escape_for_shell`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeOptions {
    /// Pass `$(NAME)` make-variable references through untouched.
    pub make_vars: bool,
    /// The argument is handed to the Windows built-in echo.
    pub for_echo: bool,
    /// Use Watcom-style quoting.
    pub watcom_quote: bool,
    /// Rewrite the escaped `${CONFIGURATION}` placeholder back to its
    /// literal form afterwards.
    pub unescape_ninja_configuration: bool,
    /// The argument goes into a response file.
    pub for_response: bool,
}

/// Converts paths and arguments into their final on-disk byte form for one
/// generator environment.
#[derive(Debug)]
pub struct Converter {
    env: GeneratorEnv,
    link_script_shell: bool,
    short_paths: Box<dyn ShortPathResolver>,
}

impl Converter {
    /// Create a converter with no short-path support.
    pub fn new(env: GeneratorEnv) -> Self {
        Converter {
            env,
            link_script_shell: false,
            short_paths: Box::new(NoShortPaths),
        }
    }

    /// Create a converter with an injected short-path resolver.
    pub fn with_short_paths(env: GeneratorEnv, short_paths: Box<dyn ShortPathResolver>) -> Self {
        Converter {
            env,
            link_script_shell: false,
            short_paths,
        }
    }

    /// The environment this converter emits for.
    pub fn env(&self) -> &GeneratorEnv {
        &self.env
    }

    /// Toggle link-script mode: arguments written into a link script are
    /// consumed by the linker directly, so the makefile escaping and MSYS
    /// drive-letter translation do not apply.
    pub fn set_link_script_shell(&mut self, link_script_shell: bool) {
        self.link_script_shell = link_script_shell;
    }

    /// Derive the escaping dialect for this environment and the given
    /// per-call options.
    pub fn dialect(&self, opts: &EscapeOptions) -> ShellDialect {
        let mut dialect = ShellDialect {
            watcom_wmake: self.env.watcom_wmake,
            mingw_make: self.env.mingw_make,
            nmake: self.env.nmake,
            ninja: self.env.ninja,
            unix: !self.env.windows_shell,
            allow_make_variables: opts.make_vars,
            echo_windows: opts.for_echo,
            watcom_quote: opts.watcom_quote,
            response: opts.for_response,
            unescape_ninja_configuration: opts.unescape_ninja_configuration,
            ..Default::default()
        };
        // A project file is never also a makefile, and a link script bypasses
        // the make tool entirely.
        if self.env.vs_ide {
            dialect.vs_ide = true;
        } else if !self.link_script_shell {
            dialect.make = true;
        }
        dialect
    }

    /// Escape one argument for this environment, leaving shell operator
    /// tokens untouched.
    pub fn escape_for_shell(&self, arg: &str, opts: &EscapeOptions) -> String {
        escape::escape_for_shell(arg, &self.dialect(opts))
    }

    /// Convert `source` into the byte form the requested output format
    /// wants.
    pub fn to_output_format(
        &self,
        source: &str,
        format: OutputFormat,
        watcom_quote: bool,
    ) -> String {
        match format {
            OutputFormat::Shell | OutputFormat::NinjaMulti => {
                let converted = self.convert_directory_separators(source);
                self.escape_for_shell(
                    &converted,
                    &EscapeOptions {
                        make_vars: true,
                        watcom_quote,
                        unescape_ninja_configuration: format == OutputFormat::NinjaMulti,
                        ..Default::default()
                    },
                )
            }
            OutputFormat::Response => self.escape_for_shell(
                source,
                &EscapeOptions {
                    watcom_quote,
                    for_response: true,
                    ..Default::default()
                },
            ),
        }
    }

    /// Rewrite directory separators for the target shell.
    ///
    /// An MSYS shell translates `/X/...` into drive `X:` paths on its own,
    /// so drive-letter paths are handed over in that shape; a native Windows
    /// shell wants backslashes throughout.
    pub fn convert_directory_separators(&self, source: &str) -> String {
        let mut result = source.to_string();
        if self.env.msys_shell && !self.link_script_shell && result.len() > 2 {
            let (first, second) = (result.as_bytes()[0], result.as_bytes()[1]);
            if second == b':' {
                result.replace_range(0..2, &format!("/{}", first as char));
            }
        }
        if self.env.windows_shell {
            result = result.replace('/', "\\");
        }
        result
    }

    /// Convert a path that refers to an existing file, preferring its short
    /// form when a Windows shell would otherwise need to quote it.
    pub fn for_existing(&self, remote: &str, format: OutputFormat, watcom_quote: bool) -> String {
        if self.env.windows_shell
            && remote.bytes().any(|b| b == b' ' || b == b'#')
            && Path::new(remote).exists()
        {
            if let Some(short) = self.short_paths.resolve(remote) {
                debug!(long = remote, short = short.as_str(), "substituted short path");
                return self.to_output_format(&short, format, watcom_quote);
            }
        }
        self.to_output_format(remote, format, watcom_quote)
    }
}
