use std::fmt;

use anyhow::Result;
use serde::Serialize;
use tilepop_core::{Coord2, GameConfig, GameStatus, MoveResult, PlayEngine};

use crate::policy::Policy;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct GameSummary {
    pub seed: u64,
    pub score: u32,
    pub moves_used: u16,
    pub status: GameStatus,
    pub reshuffles: u32,
}

/// Plays until the game ends, calling `on_move` with the clicked tile after every move.
///
/// Stops early when even a reshuffle leaves nothing to click.
pub(crate) fn play_game<F>(
    engine: &mut PlayEngine,
    seed: u64,
    policy: Policy,
    mut on_move: F,
) -> Result<GameSummary>
where
    F: FnMut(&PlayEngine, Coord2, &MoveResult) -> Result<()>,
{
    let mut reshuffles = 0;

    while !engine.is_finished() {
        if engine.reshuffle_if_stuck() {
            reshuffles += 1;
        }
        let Some(origin) = policy.choose(engine.grid()) else {
            log::warn!("Seed {} left without a valid move", seed);
            break;
        };
        let result = engine.apply_move(origin)?;
        on_move(engine, origin, &result)?;
    }

    Ok(GameSummary {
        seed,
        score: engine.score(),
        moves_used: engine.moves_used(),
        status: engine.status(),
        reshuffles,
    })
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub(crate) struct SimulationStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub unfinished: u32,
    pub total_score: u64,
    pub total_moves: u64,
    pub best_score: u32,
    pub reshuffles: u32,
}

impl SimulationStats {
    pub(crate) fn record(&mut self, summary: &GameSummary) {
        self.games += 1;
        match summary.status {
            GameStatus::Won => self.wins += 1,
            GameStatus::Lost => self.losses += 1,
            GameStatus::InProgress => self.unfinished += 1,
        }
        self.total_score += u64::from(summary.score);
        self.total_moves += u64::from(summary.moves_used);
        self.best_score = self.best_score.max(summary.score);
        self.reshuffles += summary.reshuffles;
    }

    pub(crate) fn win_rate(&self) -> f64 {
        ratio(self.wins.into(), self.games)
    }

    pub(crate) fn average_score(&self) -> f64 {
        ratio(self.total_score, self.games)
    }

    pub(crate) fn average_moves(&self) -> f64 {
        ratio(self.total_moves, self.games)
    }
}

fn ratio(total: u64, games: u32) -> f64 {
    if games == 0 {
        0.0
    } else {
        total as f64 / f64::from(games)
    }
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "games:         {}", self.games)?;
        writeln!(
            f,
            "won:           {} ({:.1}%)",
            self.wins,
            self.win_rate() * 100.0
        )?;
        writeln!(f, "lost:          {}", self.losses)?;
        if self.unfinished > 0 {
            writeln!(f, "unfinished:    {}", self.unfinished)?;
        }
        writeln!(f, "average score: {:.1}", self.average_score())?;
        writeln!(f, "best score:    {}", self.best_score)?;
        writeln!(f, "average moves: {:.2}", self.average_moves())?;
        write!(f, "reshuffles:    {}", self.reshuffles)
    }
}

/// Plays `games` seeded games, game `i` uses `seed + i`.
pub(crate) fn simulate(
    config: GameConfig,
    seed: u64,
    games: u32,
    policy: Policy,
) -> Result<SimulationStats> {
    let mut stats = SimulationStats::default();
    for i in 0..games {
        let game_seed = seed.wrapping_add(u64::from(i));
        let mut engine = PlayEngine::seeded(config, game_seed);
        let summary = play_game(&mut engine, game_seed, policy, |_, _, _| Ok(()))?;
        log::debug!("{:?}", summary);
        stats.record(&summary);
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_ends_within_move_budget() {
        let config = GameConfig::default();
        let mut engine = PlayEngine::seeded(config, 5);
        let mut accepted = 0;

        let summary = play_game(&mut engine, 5, Policy::Greedy, |_, origin, result| {
            assert!(result.outcome.has_update());
            assert!(result.cleared.contains(&origin));
            accepted += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(summary.moves_used, accepted);
        assert!(summary.moves_used <= config.max_moves);
        assert_ne!(summary.status, GameStatus::InProgress);
        assert_eq!(summary.score, engine.score());
    }

    #[test]
    fn same_seed_same_game() {
        let config = GameConfig::default();

        let a = play_game(&mut PlayEngine::seeded(config, 77), 77, Policy::First, |_, _, _| Ok(()));
        let b = play_game(&mut PlayEngine::seeded(config, 77), 77, Policy::First, |_, _, _| Ok(()));

        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn stats_accumulate_summaries() {
        let mut stats = SimulationStats::default();
        let won = GameSummary {
            seed: 1,
            score: 520,
            moves_used: 8,
            status: GameStatus::Won,
            reshuffles: 1,
        };
        let lost = GameSummary {
            seed: 2,
            score: 300,
            moves_used: 10,
            status: GameStatus::Lost,
            reshuffles: 0,
        };

        stats.record(&won);
        stats.record(&lost);

        assert_eq!(stats.games, 2);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.best_score, 520);
        assert_eq!(stats.average_score(), 410.0);
        assert_eq!(stats.average_moves(), 9.0);
        assert_eq!(stats.win_rate(), 0.5);
        assert_eq!(stats.reshuffles, 1);
    }

    #[test]
    fn empty_stats_do_not_divide_by_zero() {
        let stats = SimulationStats::default();

        assert_eq!(stats.average_score(), 0.0);
        assert!(stats.to_string().contains("games:         0"));
    }

    #[test]
    fn simulate_plays_every_game() {
        let stats = simulate(GameConfig::default(), 100, 12, Policy::Greedy).unwrap();

        assert_eq!(stats.games, 12);
        assert_eq!(stats.wins + stats.losses + stats.unfinished, 12);
        assert!(stats.total_moves <= 12 * 10);
    }
}
