//! Run configuration for the headless runner.
//!
//! Values come from `VOXEL_TETRIS_*` environment variables first, then command
//! line flags override them.

use anyhow::{anyhow, Result};

use crate::core::shapes::{find_template, template_count};
use crate::core::GameConfig;
use crate::types::GameAction;

pub const DEFAULT_TICKS: u64 = 400;

pub const USAGE: &str = "\
usage: voxel-tetris [--seed N] [--board N] [--ticks N] [--template ID|NAME]
                    [--actions a,b,c] [--json] [--verbose]

actions: shiftX+ shiftX- shiftZ+ shiftZ- rotateX rotateY rotateZ drop hardDrop pause restart";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub game: GameConfig,
    /// Ticks to advance before reporting
    pub ticks: u64,
    /// Scripted actions, one applied before each tick
    pub actions: Vec<GameAction>,
    /// Print the report as JSON instead of a summary
    pub json: bool,
    /// Log every board event to stderr
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            ticks: DEFAULT_TICKS,
            actions: Vec::new(),
            json: false,
            verbose: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Template by catalog index or by name
pub fn parse_template(value: &str) -> Result<usize> {
    if let Ok(id) = value.parse::<usize>() {
        if id < template_count() {
            return Ok(id);
        }
        return Err(anyhow!(
            "template index {} out of range (0..{})",
            id,
            template_count()
        ));
    }
    find_template(value).ok_or_else(|| anyhow!("unknown template: {}", value))
}

/// Comma-separated action script
pub fn parse_actions(value: &str) -> Result<Vec<GameAction>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| GameAction::from_str(s).ok_or_else(|| anyhow!("unknown action: {}", s)))
        .collect()
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(seed) = lookup("VOXEL_TETRIS_SEED").and_then(|s| s.trim().parse().ok()) {
            config.game.seed = seed;
        }
        if let Some(board) = lookup("VOXEL_TETRIS_BOARD").and_then(|s| s.trim().parse().ok()) {
            config.game.board = board;
        }
        if let Some(ticks) = lookup("VOXEL_TETRIS_TICKS").and_then(|s| s.trim().parse().ok()) {
            config.ticks = ticks;
        }
        config.game.debug_template = lookup("VOXEL_TETRIS_DEBUG_TEMPLATE")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) })
            .and_then(|s| parse_template(&s).ok());
        config.verbose = lookup("VOXEL_TETRIS_VERBOSE").is_some_and(|s| parse_flag(&s));

        config
    }

    /// Override with command line flags
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            match flag {
                "--json" => self.json = true,
                "--verbose" => self.verbose = true,
                "--seed" | "--board" | "--ticks" | "--template" | "--actions" => {
                    i += 1;
                    let v = args
                        .get(i)
                        .ok_or_else(|| anyhow!("missing value for {}", flag))?;
                    match flag {
                        "--seed" => {
                            self.game.seed = v
                                .parse::<u32>()
                                .map_err(|_| anyhow!("invalid --seed value: {}", v))?;
                        }
                        "--board" => {
                            self.game.board = v
                                .parse::<usize>()
                                .map_err(|_| anyhow!("invalid --board value: {}", v))?;
                        }
                        "--ticks" => {
                            self.ticks = v
                                .parse::<u64>()
                                .map_err(|_| anyhow!("invalid --ticks value: {}", v))?;
                        }
                        "--template" => self.game.debug_template = Some(parse_template(v)?),
                        _ => self.actions = parse_actions(v)?,
                    }
                }
                other => {
                    return Err(anyhow!("unknown argument: {}", other));
                }
            }
            i += 1;
        }
        Ok(self)
    }
}

/// Environment first, then flags
pub fn parse_args(args: &[String]) -> Result<RunConfig> {
    RunConfig::from_env().apply_args(args)
}
