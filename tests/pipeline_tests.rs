//! Tests for the match pipeline and its observers

use std::sync::{Arc, Mutex};

use noughts::{
    Result,
    opponent::{ComputerOpponent, Difficulty},
    pipeline::{JsonlObserver, MatchConfig, MatchPipeline, MatchResult, Observer, RoundRecord},
    tictactoe::{GameState, Mark},
};

/// Positions each round passed through, shared with the test after the
/// pipeline takes ownership
struct PositionLog(Arc<Mutex<Vec<(usize, GameState, Mark)>>>);

impl Observer for PositionLog {
    fn on_move(
        &mut self,
        _round: usize,
        step: usize,
        before: &GameState,
        _index: usize,
        mark: Mark,
    ) -> Result<()> {
        self.0.lock().unwrap().push((step, *before, mark));
        Ok(())
    }
}

fn config(num_games: usize, seed: u64) -> MatchConfig {
    MatchConfig {
        num_games,
        seed: Some(seed),
    }
}

#[test]
fn test_random_vs_random_totals() {
    let mut pipeline = MatchPipeline::new(config(50, 42));
    let mut x = ComputerOpponent::new(Difficulty::Easy);
    let mut o = ComputerOpponent::new(Difficulty::Easy);

    let result = pipeline.run(&mut x, &mut o).unwrap();

    assert_eq!(result.total_games, 50);
    assert_eq!(result.x_wins + result.o_wins + result.draws, 50);
    assert!((result.x_win_rate + result.o_win_rate + result.draw_rate - 1.0).abs() < 1e-9);
    assert!(result.avg_game_length >= 5.0 && result.avg_game_length <= 9.0);
}

#[test]
fn test_rounds_open_with_x_and_stay_reachable() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mut pipeline =
        MatchPipeline::new(config(30, 9)).with_observer(Box::new(PositionLog(log.clone())));
    let mut x = ComputerOpponent::new(Difficulty::Easy);
    let mut o = ComputerOpponent::new(Difficulty::Medium);
    pipeline.run(&mut x, &mut o).unwrap();

    let log = log.lock().unwrap();
    assert!(!log.is_empty());
    for (step, before, mark) in log.iter() {
        if *step == 0 {
            assert_eq!(*mark, Mark::X);
            assert_eq!(before.board().occupied_count(), 0);
        }
        assert!(before.board().is_reachable(), "{}", before.board().encode());
    }
}

#[test]
fn test_computer_opens_by_playing_x() {
    // the stronger side opens by taking X rather than by changing who moves first
    let mut pipeline = MatchPipeline::new(config(10, 9));
    let mut hard = ComputerOpponent::new(Difficulty::Hard);
    let mut easy = ComputerOpponent::new(Difficulty::Easy);

    let result = pipeline.run(&mut hard, &mut easy).unwrap();
    assert_eq!(result.o_wins, 0);
    assert_eq!(result.x_strategy, "computer-hard");
}

#[test]
fn test_jsonl_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("games.jsonl");

    let observer = JsonlObserver::new(&path).unwrap();
    let mut pipeline = MatchPipeline::new(config(5, 1)).with_observer(Box::new(observer));
    let mut x = ComputerOpponent::new(Difficulty::Medium);
    let mut o = ComputerOpponent::new(Difficulty::Easy);
    let result = pipeline.run(&mut x, &mut o).unwrap();
    drop(pipeline);

    let text = std::fs::read_to_string(&path).unwrap();
    let records: Vec<RoundRecord> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 5);
    for (round, record) in records.iter().enumerate() {
        assert_eq!(record.round, round);
        assert_eq!(record.steps.len(), record.total_moves);
        assert_eq!(record.steps[0].board, ".........");
        assert_eq!(record.steps[0].mark, Mark::X);
        assert_eq!(record.winner.is_some(), record.winning_line.is_some());
    }
    let x_wins = records.iter().filter(|r| r.winner == Some(Mark::X)).count();
    assert_eq!(x_wins, result.x_wins);
}

#[test]
fn test_result_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("result.json");

    let mut pipeline = MatchPipeline::new(config(8, 3));
    let mut x = ComputerOpponent::new(Difficulty::Easy).with_name("left");
    let mut o = ComputerOpponent::new(Difficulty::Medium).with_name("right");
    let result = pipeline.run(&mut x, &mut o).unwrap();

    result.save(&path).unwrap();
    let loaded = MatchResult::load(&path).unwrap();
    assert_eq!(loaded.x_strategy, "left");
    assert_eq!(loaded.o_strategy, "right");
    assert_eq!(loaded.total_games, 8);
    assert_eq!(loaded.draws, result.draws);
}
