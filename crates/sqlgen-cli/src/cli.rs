use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Root,
    Render,
}

#[derive(Debug, Clone)]
pub enum Command {
    Help(HelpTopic),
    Render(RenderArgs),
}

#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub definition: PathBuf,
    pub config: Option<PathBuf>,
    pub positional: bool,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    let mut it = args.iter().skip(1);
    let Some(first) = it.next() else {
        return Ok(Command::Help(HelpTopic::Root));
    };

    match first.as_str() {
        "-h" | "--help" => Ok(Command::Help(HelpTopic::Root)),
        "render" => parse_render(it.map(|s| s.as_str())),
        _ => anyhow::bail!("unknown command: {first}"),
    }
}

fn parse_render<'a>(mut it: impl Iterator<Item = &'a str>) -> anyhow::Result<Command> {
    let mut definition: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut positional = false;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => return Ok(Command::Help(HelpTopic::Render)),
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                config = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--config=") => {
                config = Some(PathBuf::from(token.trim_start_matches("--config=")));
            }
            "--positional" => positional = true,
            other if other.starts_with('-') => anyhow::bail!("unknown argument: {other}"),
            other => {
                if definition.is_some() {
                    anyhow::bail!("unexpected argument: {other}");
                }
                definition = Some(PathBuf::from(other));
            }
        }
    }

    let Some(definition) = definition else {
        anyhow::bail!("missing query definition file: expected `sqlgen render <FILE>`");
    };

    Ok(Command::Render(RenderArgs {
        definition,
        config,
        positional,
    }))
}

pub fn print_help(topic: HelpTopic) {
    match topic {
        HelpTopic::Root => {
            println!(
                "\
sqlgen - render declarative SELECT definitions

USAGE:
  sqlgen <COMMAND> [OPTIONS]

COMMANDS:
  render        Print the SQL and bind parameters of a query definition

Run `sqlgen <command> --help` for more."
            );
        }
        HelpTopic::Render => {
            println!(
                "\
USAGE:
  sqlgen render <FILE> [OPTIONS]

<FILE> is a TOML (or .json) query definition.

OPTIONS:
  --config <FILE>       Builder config (TOML)
  --positional          Emit $1, $2, ... placeholders and a parameter array
  -h, --help            Print help"
            );
        }
    }
}
