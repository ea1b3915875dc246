use crate::cli::RenderArgs;
use anyhow::Context;
use sqlgen::{BuilderConfig, QueryDefinition};

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    print!("{}", render(&args)?);
    Ok(())
}

/// SQL on the first line, pretty JSON parameters after it.
pub fn render(args: &RenderArgs) -> anyhow::Result<String> {
    let config = match &args.config {
        Some(path) => BuilderConfig::load(path)
            .with_context(|| format!("failed to load builder config {}", path.display()))?,
        None => BuilderConfig::default(),
    };

    let definition = QueryDefinition::load(&args.definition)
        .with_context(|| format!("failed to load query definition {}", args.definition.display()))?;

    let query = definition
        .build(config)
        .with_context(|| format!("invalid query definition {}", args.definition.display()))?
        .get_query();

    let (sql, params) = if args.positional {
        let positional = query.to_positional()?;
        (positional.sql, serde_json::to_string_pretty(&positional.params)?)
    } else {
        (query.sql, serde_json::to_string_pretty(&query.params)?)
    };

    Ok(format!("{sql}\n{params}\n"))
}
