// src/cli/mod.rs — CLI definition (clap derive)
//
// The positional arguments change meaning with the mode flag, so parsing
// happens in two steps: clap fills `Cli`, then `Cli::into_command` turns it
// into exactly one typed `Command`. Time tokens are validated here, before
// the ledger is touched.

pub mod export;
pub mod run;
pub mod status;

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::core::TimeToken;
use crate::infra::errors::WbsoError;

#[derive(Parser, Debug)]
#[command(
    name = "wbso",
    about = "Log your WBSO work by timestamps. Without arguments, shows the recorded sessions.",
    version,
    group(ArgGroup::new("mode").multiple(false).args([
        "log", "close", "cancel", "resume", "delete", "clear", "amend", "export",
    ])),
)]
pub struct Cli {
    /// [START [END]] DESCRIPTION; times are HH:MM, "now" or "last"
    #[arg(num_args = 0..=3, allow_negative_numbers = true, value_name = "ARGS")]
    pub args: Vec<String>,

    /// Log a session, optionally providing start and end times
    #[arg(short, long, visible_alias = "open", visible_short_alias = 'o')]
    pub log: bool,

    /// End the current work session, optionally at ENDTIME
    #[arg(
        short,
        long,
        value_name = "ENDTIME",
        num_args = 0..=1,
        default_missing_value = "now"
    )]
    pub close: Option<String>,

    /// Drop the current work session without recording it
    #[arg(long)]
    pub cancel: bool,

    /// Resume a session by duplicating its description: [INDEX] [START [END]]
    #[arg(short, long)]
    pub resume: bool,

    /// Delete a session by index number
    #[arg(short, long, value_name = "INDEX", allow_negative_numbers = true)]
    pub delete: Option<i64>,

    /// Clear all WBSO sessions
    #[arg(long)]
    pub clear: bool,

    /// Replace a session's description: [INDEX] DESCRIPTION
    #[arg(short, long)]
    pub amend: bool,

    /// Export all sessions to comma-separated format for spreadsheets
    #[arg(long)]
    pub export: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Ledger file path (overrides the config file)
    #[arg(long)]
    pub ledger: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// One ledger operation, fully parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Start {
        start: Option<TimeToken>,
        description: String,
    },
    Log {
        start: TimeToken,
        end: TimeToken,
        description: String,
    },
    Close {
        end: TimeToken,
    },
    Cancel,
    Resume {
        index: i64,
        start: Option<TimeToken>,
        end: Option<TimeToken>,
    },
    Delete {
        index: i64,
    },
    Clear,
    Amend {
        index: i64,
        description: String,
    },
    Export,
}

impl Cli {
    pub fn into_command(self) -> Result<Command, WbsoError> {
        let mut args = self.args;

        if let Some(end) = self.close {
            expect_no_args(&args, "--close [ENDTIME]")?;
            return Ok(Command::Close { end: end.parse()? });
        }
        if self.cancel {
            expect_no_args(&args, "--cancel")?;
            return Ok(Command::Cancel);
        }
        if let Some(index) = self.delete {
            expect_no_args(&args, "--delete INDEX")?;
            return Ok(Command::Delete { index });
        }
        if self.clear {
            expect_no_args(&args, "--clear")?;
            return Ok(Command::Clear);
        }
        if self.export {
            expect_no_args(&args, "--export")?;
            return Ok(Command::Export);
        }
        if self.amend {
            let (index, description) = match args.as_slice() {
                [description] => (-1, description.clone()),
                [index, description] => (
                    parse_index(index).ok_or_else(|| usage("--amend [INDEX] DESCRIPTION"))?,
                    description.clone(),
                ),
                _ => return Err(usage("--amend [INDEX] DESCRIPTION")),
            };
            return Ok(Command::Amend { index, description });
        }
        if self.resume {
            // A leading integer is the session index; times are never integers.
            let (index, times) = match args.split_first() {
                Some((first, rest)) => match parse_index(first) {
                    Some(index) => (index, rest),
                    None => (-1, args.as_slice()),
                },
                None => (-1, args.as_slice()),
            };
            let (start, end) = match times {
                [] => (None, None),
                [start] => (Some(start.parse()?), None),
                [start, end] => (Some(start.parse()?), Some(end.parse()?)),
                _ => return Err(usage("--resume [INDEX] [START [END]]")),
            };
            return Ok(Command::Resume { index, start, end });
        }

        let command = match args.len() {
            0 if self.log => return Err(usage("--log [START [END]] DESCRIPTION")),
            0 => Command::Show,
            1 => Command::Start {
                start: None,
                description: args.remove(0),
            },
            2 => Command::Start {
                start: Some(args[0].parse()?),
                description: args.remove(1),
            },
            _ => Command::Log {
                start: args[0].parse()?,
                end: args[1].parse()?,
                description: args.remove(2),
            },
        };
        Ok(command)
    }
}

fn expect_no_args(args: &[String], flag: &str) -> Result<(), WbsoError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(usage(flag))
    }
}

fn parse_index(arg: &str) -> Option<i64> {
    arg.parse().ok()
}

fn usage(shape: &str) -> WbsoError {
    WbsoError::Usage(format!("usage: wbso {shape}"))
}
