//! Command-line interface parsing for pitchside
//!
//! This module handles parsing of CLI arguments using clap: one subcommand
//! per resource, plus the global `--token` and `--cache-stats` options.
//! Date and match-status arguments are validated at parse time.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::data::{MatchFilter, MatchStatus};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The date is not in YYYY-MM-DD form
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD, e.g. 2026-08-07")]
    InvalidDate(String),

    /// The match status is not recognized
    #[error("Invalid status: '{0}'. Valid statuses: scheduled, timed, in_play, paused, finished, postponed, suspended, cancelled")]
    InvalidStatus(String),
}

/// pitchside - football leagues, standings, scorers, teams and players
#[derive(Parser, Debug)]
#[command(name = "pitchside")]
#[command(about = "Football statistics from football-data.org, with response caching")]
#[command(version)]
pub struct Cli {
    /// API token for football-data.org; defaults to $FOOTBALL_API_KEY
    #[arg(long, value_name = "TOKEN", global = true)]
    pub token: Option<String>,

    /// Print cache diagnostics after the command completes
    #[arg(long, global = true)]
    pub cache_stats: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all available leagues
    Leagues,
    /// Show one league by id or code (e.g. 2021 or PL)
    League {
        id: String,
    },
    /// Show the current table for one or more leagues
    Standings {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show a league's top scorers
    Scorers {
        id: String,
        /// Number of scorers to return
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List a league's matches
    Matches {
        id: String,
        /// Only matches with this status (e.g. finished, scheduled)
        #[arg(long, value_parser = parse_status_arg)]
        status: Option<MatchStatus>,
        /// Only matches on or after this date (YYYY-MM-DD)
        #[arg(long = "from", value_parser = parse_date_arg)]
        date_from: Option<NaiveDate>,
        /// Only matches on or before this date (YYYY-MM-DD)
        #[arg(long = "to", value_parser = parse_date_arg)]
        date_to: Option<NaiveDate>,
    },
    /// List the teams in a league
    Teams {
        id: String,
    },
    /// Show one team by id
    Team {
        id: u64,
    },
    /// List a team's matches
    TeamMatches {
        id: u64,
        /// Only matches with this status (e.g. finished, scheduled)
        #[arg(long, value_parser = parse_status_arg)]
        status: Option<MatchStatus>,
        /// Only matches on or after this date (YYYY-MM-DD)
        #[arg(long = "from", value_parser = parse_date_arg)]
        date_from: Option<NaiveDate>,
        /// Only matches on or before this date (YYYY-MM-DD)
        #[arg(long = "to", value_parser = parse_date_arg)]
        date_to: Option<NaiveDate>,
    },
    /// Show one player by id
    Player {
        id: u64,
    },
    /// List the squad of a team
    Squad {
        id: u64,
    },
}

/// Parses a date argument into a NaiveDate.
///
/// # Arguments
/// * `s` - The date string from the CLI
///
/// # Returns
/// * `Ok(NaiveDate)` if the string is a valid YYYY-MM-DD date
/// * `Err(CliError::InvalidDate)` otherwise
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses a match status argument into a MatchStatus.
///
/// # Arguments
/// * `s` - The status string from the CLI, in any case
///
/// # Returns
/// * `Ok(MatchStatus)` if the string matches a known status
/// * `Err(CliError::InvalidStatus)` otherwise
pub fn parse_status_arg(s: &str) -> Result<MatchStatus, CliError> {
    MatchStatus::from_str(s).ok_or_else(|| CliError::InvalidStatus(s.to_string()))
}

impl Command {
    /// Builds the match filter for the match-listing subcommands
    ///
    /// Returns an empty filter for every other subcommand.
    pub fn match_filter(&self) -> MatchFilter {
        match self {
            Command::Matches {
                status,
                date_from,
                date_to,
                ..
            }
            | Command::TeamMatches {
                status,
                date_from,
                date_to,
                ..
            } => MatchFilter {
                status: *status,
                date_from: *date_from,
                date_to: *date_to,
            },
            _ => MatchFilter::default(),
        }
    }
}
