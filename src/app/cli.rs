use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::core::interval::Span;
use crate::core::types::{Date, DayOfWeek, parse_local_datetime};
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliPaths {
    pub config_path: PathBuf,
    pub schedule_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl Default for CliPaths {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            schedule_path: PathBuf::from("schedule.json"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CommandName {
    Day,
    Week,
    Check,
    Grid,
    Apply,
    Block,
    Open,
    Config,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Day(NaiveDate),
    Week(NaiveDate),
    Check {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Grid {
        edit: Option<GridEdit>,
    },
    Apply {
        days: Vec<DayOfWeek>,
        spans: Vec<Span>,
    },
    Block {
        date: NaiveDate,
        span: Option<Span>,
    },
    Open {
        date: NaiveDate,
        span: Span,
        rate: Option<f64>,
    },
    /// No pairs prints the table. A single pair may name the key by its ID.
    Config {
        edits: Vec<(String, String)>,
    },
    Help,
}

/// Weekly grid edit, applied to each listed day.
#[derive(Debug, Clone, PartialEq)]
pub enum GridEdit {
    Select {
        days: Vec<DayOfWeek>,
        spans: Vec<Span>,
    },
    Toggle {
        days: Vec<DayOfWeek>,
        slots: Vec<usize>,
    },
    Clear {
        days: Vec<DayOfWeek>,
    },
}

impl GridEdit {
    pub fn days(&self) -> &[DayOfWeek] {
        match self {
            GridEdit::Select { days, .. }
            | GridEdit::Toggle { days, .. }
            | GridEdit::Clear { days } => days,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub paths: CliPaths,
    pub verbose: bool,
    pub command: Command,
}

impl CliArgs {
    pub fn from_env() -> Result<Self> {
        Self::from_args(std::env::args().skip(1))
    }

    /// Global flags come first, then the command and its arguments.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().peekable();
        let mut paths = CliPaths::default();
        let mut verbose = false;

        while let Some(flag) = args.next_if(|a| a.starts_with('-')) {
            match flag.as_str() {
                "--config" => paths.config_path = next_path(&mut args, "--config")?,
                "--schedule" => paths.schedule_path = next_path(&mut args, "--schedule")?,
                "--logs" => paths.logs_dir = next_path(&mut args, "--logs")?,
                "-v" | "--verbose" => verbose = true,
                "-h" | "--help" => {
                    return Ok(Self {
                        paths,
                        verbose,
                        command: Command::Help,
                    });
                }
                _ => return Err(Error::parse(format!("Unknown argument: {flag}"))),
            }
        }

        let command = match args.next() {
            Some(name) => parse_command(&name, args.collect())?,
            None => Command::Help,
        };
        Ok(Self {
            paths,
            verbose,
            command,
        })
    }
}

fn next_path<I>(args: &mut I, flag: &str) -> Result<PathBuf>
where
    I: Iterator<Item = String>,
{
    args.next()
        .map(PathBuf::from)
        .ok_or_else(|| Error::parse(format!("Missing value for {flag}")))
}

fn parse_command(name: &str, rest: Vec<String>) -> Result<Command> {
    let cmd = CommandName::from_str(name.trim()).map_err(|_| {
        Error::parse(format!(
            "Unknown command: '{}'. Valid commands: {}",
            name.trim(),
            valid_csv::<CommandName>()
        ))
    })?;
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();

    match (cmd, args.as_slice()) {
        (CommandName::Day, [date]) => Ok(Command::Day(parse_date(date)?)),
        (CommandName::Week, [date]) => Ok(Command::Week(parse_date(date)?)),
        (CommandName::Check, [start, end]) => Ok(Command::Check {
            start: parse_local_datetime(start)?,
            end: parse_local_datetime(end)?,
        }),
        (CommandName::Grid, []) => Ok(Command::Grid { edit: None }),
        (CommandName::Grid, [days, word]) if word.eq_ignore_ascii_case("clear") => {
            Ok(Command::Grid {
                edit: Some(GridEdit::Clear {
                    days: parse_days(days)?,
                }),
            })
        }
        (CommandName::Grid, [days, word, slots @ ..])
            if word.eq_ignore_ascii_case("toggle") && !slots.is_empty() =>
        {
            Ok(Command::Grid {
                edit: Some(GridEdit::Toggle {
                    days: parse_days(days)?,
                    slots: slots.iter().map(|s| parse_slot(s)).collect::<Result<_>>()?,
                }),
            })
        }
        (CommandName::Grid, [days, spans @ ..]) if !spans.is_empty() => Ok(Command::Grid {
            edit: Some(GridEdit::Select {
                days: parse_days(days)?,
                spans: spans.iter().map(|s| Span::parse(s)).collect::<Result<_>>()?,
            }),
        }),
        (CommandName::Apply, [days, spans @ ..]) if !spans.is_empty() => Ok(Command::Apply {
            days: parse_days(days)?,
            spans: spans.iter().map(|s| Span::parse(s)).collect::<Result<_>>()?,
        }),
        (CommandName::Block, [date]) => Ok(Command::Block {
            date: parse_date(date)?,
            span: None,
        }),
        (CommandName::Block, [date, span]) => Ok(Command::Block {
            date: parse_date(date)?,
            span: Some(Span::parse(span)?),
        }),
        (CommandName::Open, [date, span, rate @ ..]) if rate.len() <= 1 => Ok(Command::Open {
            date: parse_date(date)?,
            span: Span::parse(span)?,
            rate: rate.first().map(|r| parse_rate(r)).transpose()?,
        }),
        (CommandName::Config, pairs) if pairs.len() % 2 == 0 => Ok(Command::Config {
            edits: pairs
                .chunks(2)
                .map(|pair| (pair[0].to_string(), pair[1].to_string()))
                .collect(),
        }),
        (CommandName::Help, _) => Ok(Command::Help),
        (cmd, _) => Err(Error::parse(format!(
            "Wrong arguments for '{cmd}'. Usage: spotavail {}",
            usage_line(cmd)
        ))),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    Ok(Date::try_from_str(raw)?.0)
}

fn parse_rate(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate >= 0.0 => Ok(rate),
        _ => Err(Error::parse(format!(
            "Invalid hourly rate: '{}'. Expected a non-negative number.",
            raw.trim()
        ))),
    }
}

fn parse_slot(raw: &str) -> Result<usize> {
    raw.trim().parse::<usize>().map_err(|_| {
        Error::parse(format!(
            "Invalid slot: '{}'. Expected a slot number starting at 0.",
            raw.trim()
        ))
    })
}

/// `mon,wed,fri`, or `all` for every day.
fn parse_days(raw: &str) -> Result<Vec<DayOfWeek>> {
    if raw.trim().eq_ignore_ascii_case("all") {
        return Ok(DayOfWeek::iter().collect());
    }
    let mut days = raw
        .split(',')
        .map(DayOfWeek::try_from)
        .collect::<Result<Vec<_>>>()?;
    days.sort();
    days.dedup();
    Ok(days)
}

pub fn usage_line(cmd: CommandName) -> &'static str {
    match cmd {
        CommandName::Day => "day <DATE>",
        CommandName::Week => "week <DATE>",
        CommandName::Check => "check <START> <END>",
        CommandName::Grid => "grid [<DAYS> <START-END>... | <DAYS> toggle <SLOT>... | <DAYS> clear]",
        CommandName::Apply => "apply <DAYS> <START-END>...",
        CommandName::Block => "block <DATE> [START-END]",
        CommandName::Open => "open <DATE> <START-END> [RATE]",
        CommandName::Config => "config [KEY|ID VALUE]...",
        CommandName::Help => "help",
    }
}

pub fn usage() -> String {
    let mut out = String::from(
        "Usage: spotavail [--config PATH] [--schedule PATH] [--logs DIR] [-v] <COMMAND>\n\nCommands:\n",
    );
    for cmd in CommandName::iter() {
        out.push_str(&format!("  {}\n", usage_line(cmd)));
    }
    out.push_str(
        "\nDates are YYYY-MM-DD; booking times are 'YYYY-MM-DD HH:MM'.\nDAYS is a comma list such as mon,tue or 'all'.",
    );
    out
}
