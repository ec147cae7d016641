use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use drill_core::{Config, GroupId, ItemId, LearningItem, MemoryRepository, ReviewService, Verdict};
use serde::Serialize;
use uuid::Uuid;

const USAGE: &str = "\
Usage: drill <command> [args]

Commands:
  evaluate <answer> <reference>           Grade a typed answer
  align <reference> <spoken>              Grade a spoken sentence word by word
  add <items.json> [group-id]             Append a new item, due now
  due <items.json> [group-id]             List items due today
  review <items.json> <item-id> <correct|incorrect>
                                          Record a review and reschedule the item

Set DRILL_LOG=debug to log grading and scheduling decisions to stderr.";

#[derive(Debug, PartialEq)]
enum Command {
    Evaluate { answer: String, reference: String },
    Align { reference: String, spoken: String },
    Add { items: PathBuf, group: Option<GroupId> },
    Due { items: PathBuf, group: Option<GroupId> },
    Review { items: PathBuf, id: ItemId, verdict: Verdict },
}

fn main() -> Result<()> {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    let config = Config::load().context("failed to load configuration")?;
    run(command, &config)
}

fn init_logging() {
    let level = match env::var("DRILL_LOG").as_deref() {
        Ok("debug") => tracing::Level::DEBUG,
        _ => tracing::Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        bail!("missing command");
    };

    let command = match (name.as_str(), rest) {
        ("evaluate", [answer, reference]) => Command::Evaluate {
            answer: answer.clone(),
            reference: reference.clone(),
        },
        ("align", [reference, spoken]) => Command::Align {
            reference: reference.clone(),
            spoken: spoken.clone(),
        },
        ("add", [items, group @ ..]) if group.len() <= 1 => Command::Add {
            items: PathBuf::from(items),
            group: group.first().map(|g| parse_id(g)).transpose()?,
        },
        ("due", [items, group @ ..]) if group.len() <= 1 => Command::Due {
            items: PathBuf::from(items),
            group: group.first().map(|g| parse_id(g)).transpose()?,
        },
        ("review", [items, id, verdict]) => Command::Review {
            items: PathBuf::from(items),
            id: parse_id(id)?,
            verdict: parse_verdict(verdict)?,
        },
        ("evaluate" | "align" | "add" | "due" | "review", _) => {
            bail!("wrong number of arguments for '{}'", name)
        }
        _ => bail!("unknown command '{}'", name),
    };
    Ok(command)
}

fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("'{}' is not a valid id", raw))
}

fn parse_verdict(raw: &str) -> Result<Verdict> {
    match raw {
        "correct" => Ok(Verdict::Correct),
        "incorrect" => Ok(Verdict::Incorrect),
        other => bail!("verdict must be 'correct' or 'incorrect', got '{}'", other),
    }
}

#[derive(Serialize)]
struct ReviewReport<'a> {
    item: &'a LearningItem,
    repaired_from: Option<i32>,
}

fn run(command: Command, config: &Config) -> Result<()> {
    let now = Utc::now();

    match command {
        Command::Evaluate { answer, reference } => {
            let result = config.to_evaluator()?.evaluate(&answer, &reference);
            println!("{}", result);
        }
        Command::Align { reference, spoken } => {
            let result = config.to_aligner()?.align(&reference, &spoken);
            println!("{}", result);
            println!("{:?}", result.grade());
        }
        Command::Add { items, group } => {
            let mut repo = load_items(&items)?;
            let id = ReviewService::new(&mut repo, config.to_scheduler()?).add_item(group, now);
            save_items(&items, repo)?;
            println!("{}", id);
        }
        Command::Due { items, group } => {
            let mut repo = load_items(&items)?;
            let service = ReviewService::new(&mut repo, config.to_scheduler()?);
            let in_group = |item: &LearningItem| group.map_or(true, |g| item.in_group(g));
            let due = service.due(Some(&in_group), now);
            println!("{}", serde_json::to_string_pretty(&due)?);
        }
        Command::Review { items, id, verdict } => {
            let mut repo = load_items(&items)?;
            let outcome =
                ReviewService::new(&mut repo, config.to_scheduler()?).submit(id, verdict, now)?;
            if let Some(warning) = &outcome.repair {
                eprintln!("Warning: {}", warning);
            }
            let report = ReviewReport {
                item: &outcome.item,
                repaired_from: outcome.repair.map(|w| w.found),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            save_items(&items, repo)?;
        }
    }

    Ok(())
}

/// Read a JSON array of items. A missing file is an empty collection.
fn load_items(path: &Path) -> Result<MemoryRepository> {
    if !path.exists() {
        return Ok(MemoryRepository::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let items: Vec<LearningItem> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(MemoryRepository::from_items(items))
}

fn save_items(path: &Path, repo: MemoryRepository) -> Result<()> {
    let content = serde_json::to_string_pretty(&repo.into_items())?;
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_evaluate() {
        assert_eq!(
            parse_args(&args(&["evaluate", "evrey", "every"])).unwrap(),
            Command::Evaluate {
                answer: "evrey".into(),
                reference: "every".into()
            }
        );
    }

    #[test]
    fn test_parse_due_with_optional_group() {
        let group = Uuid::new_v4();
        assert_eq!(
            parse_args(&args(&["due", "items.json"])).unwrap(),
            Command::Due {
                items: PathBuf::from("items.json"),
                group: None
            }
        );
        assert_eq!(
            parse_args(&args(&["due", "items.json", &group.to_string()])).unwrap(),
            Command::Due {
                items: PathBuf::from("items.json"),
                group: Some(group)
            }
        );
    }

    #[test]
    fn test_parse_review() {
        let id = Uuid::new_v4();
        let command = parse_args(&args(&["review", "items.json", &id.to_string(), "incorrect"]));
        assert_eq!(
            command.unwrap(),
            Command::Review {
                items: PathBuf::from("items.json"),
                id,
                verdict: Verdict::Incorrect
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(&[]).is_err());
        assert!(parse_args(&args(&["shuffle"])).is_err());
        assert!(parse_args(&args(&["align", "only one"])).is_err());
        assert!(parse_args(&args(&["due", "items.json", "not-a-uuid"])).is_err());
        assert!(parse_args(&args(&["review", "items.json", &Uuid::new_v4().to_string(), "maybe"])).is_err());
    }
}
