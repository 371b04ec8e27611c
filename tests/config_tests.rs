//! Runner configuration tests - environment lookup and flag parsing

use std::collections::HashMap;

use voxel_tetris::config::{parse_actions, parse_template, RunConfig, DEFAULT_TICKS};
use voxel_tetris::core::shapes::{BLOCK_3, BLOCK_6};
use voxel_tetris::types::{Axis, GameAction};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_defaults_without_environment() {
    let config = RunConfig::from_lookup(lookup(&[]));
    assert_eq!(config, RunConfig::default());
    assert_eq!(config.ticks, DEFAULT_TICKS);
    assert_eq!(config.game.board, 0);
    assert!(config.game.debug_template.is_none());
}

#[test]
fn test_environment_values() {
    let config = RunConfig::from_lookup(lookup(&[
        ("VOXEL_TETRIS_SEED", "99"),
        ("VOXEL_TETRIS_BOARD", "2"),
        ("VOXEL_TETRIS_TICKS", " 50 "),
        ("VOXEL_TETRIS_DEBUG_TEMPLATE", "cube"),
        ("VOXEL_TETRIS_VERBOSE", "true"),
    ]));
    assert_eq!(config.game.seed, 99);
    assert_eq!(config.game.board, 2);
    assert_eq!(config.ticks, 50);
    assert_eq!(config.game.debug_template, Some(BLOCK_3));
    assert!(config.verbose);
}

#[test]
fn test_bad_environment_values_keep_defaults() {
    let config = RunConfig::from_lookup(lookup(&[
        ("VOXEL_TETRIS_SEED", "many"),
        ("VOXEL_TETRIS_DEBUG_TEMPLATE", "  "),
        ("VOXEL_TETRIS_VERBOSE", "0"),
    ]));
    assert_eq!(config.game.seed, 1);
    assert!(config.game.debug_template.is_none());
    assert!(!config.verbose);
}

#[test]
fn test_flags_override_environment() {
    let base = RunConfig::from_lookup(lookup(&[("VOXEL_TETRIS_SEED", "5")]));
    let config = base
        .apply_args(&args(&[
            "--seed", "7", "--board", "3", "--ticks", "12", "--template", "5", "--json",
        ]))
        .unwrap();
    assert_eq!(config.game.seed, 7);
    assert_eq!(config.game.board, 3);
    assert_eq!(config.ticks, 12);
    assert_eq!(config.game.debug_template, Some(BLOCK_6));
    assert!(config.json);
    assert!(!config.verbose);
}

#[test]
fn test_actions_flag() {
    let config = RunConfig::default()
        .apply_args(&args(&["--actions", "shiftX+, rotateZ,hardDrop,,"]))
        .unwrap();
    assert_eq!(
        config.actions,
        vec![
            GameAction::Shift(Axis::X, 1),
            GameAction::Rotate(Axis::Z),
            GameAction::HardDrop,
        ]
    );
}

#[test]
fn test_flag_errors() {
    let err = RunConfig::default().apply_args(&args(&["--seed"])).unwrap_err();
    assert!(err.to_string().contains("missing value for --seed"));

    let err = RunConfig::default()
        .apply_args(&args(&["--ticks", "-3"]))
        .unwrap_err();
    assert!(err.to_string().contains("invalid --ticks value"));

    let err = RunConfig::default().apply_args(&args(&["--fast"])).unwrap_err();
    assert!(err.to_string().contains("unknown argument: --fast"));

    assert!(parse_actions("shiftY").is_err());
    assert!(parse_template("7").is_err());
    assert!(parse_template("blob").is_err());
    assert_eq!(parse_template("Jack").unwrap(), BLOCK_6);
}
