//! `shellform config-escape` command

use anyhow::Result;

use shellform::escape::escape_for_config;
use shellform::WrapQuotes;

use crate::cli::ConfigEscapeArgs;

pub fn execute(args: ConfigEscapeArgs) -> Result<()> {
    let wrap = if args.no_wrap {
        WrapQuotes::NoWrap
    } else {
        WrapQuotes::Wrap
    };

    for value in &args.values {
        println!("{}", escape_for_config(value, wrap));
    }

    Ok(())
}
