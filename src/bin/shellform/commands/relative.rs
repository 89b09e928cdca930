//! `shellform relative` command

use anyhow::{Context, Result};

use shellform::util::Config;
use shellform::PathRelativizer;

use crate::cli::RelativeArgs;

pub fn execute(args: RelativeArgs, config: &Config) -> Result<()> {
    let source_top = args
        .source_top
        .clone()
        .or_else(|| config.paths.source_top.clone())
        .context("no source top given; pass --source-top or set [paths].source_top in shellform.toml")?;
    let binary_top = args
        .binary_top
        .clone()
        .or_else(|| config.paths.binary_top.clone())
        .context("no binary top given; pass --binary-top or set [paths].binary_top in shellform.toml")?;

    let relativizer = PathRelativizer::new(source_top, binary_top);
    let result = relativizer.maybe_relative_to(&args.local, &args.remote);

    // Identical paths come back empty; the printable form is `.`.
    let display = if result.is_empty() { "." } else { result.as_str() };

    if args.json {
        let event = serde_json::json!({
            "local": args.local,
            "remote": args.remote,
            "relation": format!("{:?}", relativizer.relation()),
            "result": display,
        });
        println!("{}", event);
    } else {
        println!("{}", display);
    }

    Ok(())
}
