mod debug_report;

use autoreply::{Context, Options, RuleSet, classify_verbose_with};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

const DEFAULT_RULES_PATH: &str = "triggers.json";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let rules = match RuleSet::load(&config.rules_path) {
        Ok(rules) => rules,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let ctx = Context { channel: config.channel };
    let opts = Options::default();
    let res = classify_verbose_with(&config.input, &ctx, &opts, &rules);
    debug_report::print_run(&config.input, &res, config.color);
}

struct CliConfig {
    input: String,
    rules_path: PathBuf,
    channel: Option<String>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut rules_path = PathBuf::from(DEFAULT_RULES_PATH);
    let mut channel: Option<String> = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("autoreply {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--rules" | "-r" => {
                let value = args.next().ok_or_else(|| "error: --rules expects a value".to_string())?;
                rules_path = PathBuf::from(value);
            }
            "--channel" => {
                let value = args.next().ok_or_else(|| "error: --channel expects a value".to_string())?;
                channel = Some(value);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--rules=") => {
                rules_path = PathBuf::from(arg.trim_start_matches("--rules="));
            }
            _ if arg.starts_with("--channel=") => {
                channel = Some(arg.trim_start_matches("--channel=").to_string());
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, rules_path, channel, color })
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "autoreply {version}

Rule-based autoresponder classification CLI.

Usage:
  autoreply [OPTIONS] [--] <message...>
  autoreply [OPTIONS] --input <text>

Options:
  -i, --input <text>         Message text to classify. If omitted, reads
                             remaining args or stdin when no args are provided.
  -r, --rules <path>         Rule-set JSON document.
                             Default: {default_rules}
  --channel <id>             Originating channel identifier, checked against
                             the rule set's channel allow-list.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Rule set could not be loaded.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        default_rules = DEFAULT_RULES_PATH
    )
}
