use host::{
    generate_maze_report, generate_session, parse_moves, replay_moves, solve_maze, HostConfig,
    HostError,
};
use labyrinth_core::{DigRule, Recovery};

/// The known maze seed for testing
const MAZE_SEED: u32 = 2918957128;

fn config() -> HostConfig {
    HostConfig {
        width: 41,
        height: 41,
        ..HostConfig::default()
    }
}

#[test]
fn test_valid_solution() {
    let mut session = generate_session(&config(), MAZE_SEED).expect("Maze generation failed");
    let moves = solve_maze(&session).expect("Generated maze should be solvable");

    let result = replay_moves(&mut session, &moves).expect("Replay failed");

    assert!(result.solved, "BFS solution should reach the goal");
    assert_eq!(result.applied, moves.len());
    assert_eq!(result.rejected, 0);
    assert_eq!(result.final_position, (39, 39));
}

#[test]
fn test_moves_after_goal_are_rejected() {
    let mut session = generate_session(&config(), MAZE_SEED).unwrap();
    let mut moves = solve_maze(&session).unwrap();
    let extra = [0, 1, 2, 3];
    moves.extend_from_slice(&extra);

    let result = replay_moves(&mut session, &moves).unwrap();

    assert!(result.solved);
    assert_eq!(result.rejected, extra.len());
    assert_eq!(result.final_position, (39, 39));
}

#[test]
fn test_partial_solution() {
    let mut session = generate_session(&config(), MAZE_SEED).unwrap();
    let moves = solve_maze(&session).unwrap();

    // Stop two moves short of the goal
    let result = replay_moves(&mut session, &moves[..moves.len() - 2]).unwrap();

    assert!(!result.solved, "Partial solution should not reach the goal");
    assert_eq!(result.rejected, 0);
}

#[test]
fn test_solution_for_wrong_seed() {
    let moves = {
        let session = generate_session(&config(), MAZE_SEED).unwrap();
        solve_maze(&session).unwrap()
    };

    let mut other = generate_session(&config(), 12345).unwrap();
    let result = replay_moves(&mut other, &moves).unwrap();

    assert!(!result.solved, "A path for another maze should not solve this one");
    assert!(result.rejected > 0);
}

#[test]
fn test_walking_into_border() {
    let mut session = generate_session(&config(), MAZE_SEED).unwrap();

    // NORTH and WEST from (1, 1) hit the outer wall ring
    let result = replay_moves(&mut session, &[0, 3, 0, 3]).unwrap();

    assert_eq!(result.applied, 0);
    assert_eq!(result.rejected, 4);
    assert_eq!(result.final_position, (1, 1));
}

#[test]
fn test_same_seed_same_report() {
    let a = generate_maze_report(&config(), MAZE_SEED).unwrap();
    let b = generate_maze_report(&config(), MAZE_SEED).unwrap();
    let c = generate_maze_report(&config(), MAZE_SEED + 1).unwrap();

    assert_eq!(a, b);
    assert_ne!(a.grid_data, c.grid_data);
}

#[test]
fn test_report_json_round_trip() {
    let report = generate_maze_report(&config(), MAZE_SEED).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["seed"], MAZE_SEED);
    assert_eq!(value["options"]["recovery"], "filtered-pool");
    assert_eq!(value["grid_data"].as_array().unwrap().len(), 41);
}

#[test]
fn test_every_tuning_is_solvable() {
    for rule in [DigRule::Standard, DigRule::Strict] {
        for recovery in [Recovery::FilteredPool, Recovery::FullScan] {
            for stop_at_goal in [true, false] {
                let config = HostConfig {
                    width: 23,
                    height: 17,
                    rule,
                    recovery,
                    stop_at_goal,
                    ..HostConfig::default()
                };
                let mut session = generate_session(&config, 7).unwrap();
                let moves = solve_maze(&session).unwrap();
                assert!(replay_moves(&mut session, &moves).unwrap().solved);
            }
        }
    }
}

#[test]
fn test_invalid_dimensions_surface() {
    let config = HostConfig {
        width: 4,
        height: 5,
        ..HostConfig::default()
    };
    assert!(matches!(
        generate_session(&config, MAZE_SEED),
        Err(HostError::Maze(_))
    ));
}

#[test]
fn test_moves_file_round_trip() {
    let session = generate_session(&config(), MAZE_SEED).unwrap();
    let moves = solve_maze(&session).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moves.json");
    std::fs::write(&path, serde_json::to_string(&moves).unwrap()).unwrap();

    let loaded = parse_moves(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, moves);
}
