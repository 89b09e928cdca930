//! `shellform escape` command

use anyhow::Result;

use shellform::util::Config;
use shellform::{Converter, EscapeOptions, GeneratorEnv, OutputFormat};

use crate::cli::{EscapeArgs, ShellKind, ToolKind};

pub fn execute(args: EscapeArgs, config: &Config) -> Result<()> {
    let env = resolve_env(&args, config.env);

    let mut converter = Converter::new(env);
    converter.set_link_script_shell(args.link_script);

    for arg in &args.args {
        let escaped = escape_one(&converter, arg, &args);

        if args.json {
            let event = serde_json::json!({
                "input": arg,
                "escaped": escaped,
            });
            println!("{}", event);
        } else {
            println!("{}", escaped);
        }
    }

    Ok(())
}

/// Start from the config-file environment and let explicit flags override it.
fn resolve_env(args: &EscapeArgs, mut env: GeneratorEnv) -> GeneratorEnv {
    if let Some(shell) = args.shell {
        env.windows_shell = shell == ShellKind::Windows;
        env.msys_shell = shell == ShellKind::Msys;
    }
    if let Some(tool) = args.tool {
        env.nmake = tool == ToolKind::Nmake;
        env.mingw_make = tool == ToolKind::Mingw;
        env.watcom_wmake = tool == ToolKind::Wmake;
        env.ninja = tool == ToolKind::Ninja;
        env.vs_ide = tool == ToolKind::Vside;
    }
    env
}

fn escape_one(converter: &Converter, arg: &str, args: &EscapeArgs) -> String {
    // The standard output formats imply make-variable passthrough; only the
    // echo and no-make-vars switches need the long-form options.
    if args.echo || args.no_make_vars {
        let opts = EscapeOptions {
            make_vars: !args.no_make_vars,
            for_echo: args.echo,
            watcom_quote: args.watcom_quote,
            unescape_ninja_configuration: args.format == OutputFormat::NinjaMulti,
            for_response: args.format == OutputFormat::Response,
        };
        let source = if args.format == OutputFormat::Response {
            arg.to_string()
        } else {
            converter.convert_directory_separators(arg)
        };
        converter.escape_for_shell(&source, &opts)
    } else {
        converter.to_output_format(arg, args.format, args.watcom_quote)
    }
}
