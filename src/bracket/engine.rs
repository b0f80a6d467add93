use std::collections::BTreeSet;

use log::warn;
use uuid::Uuid;

use crate::database::models::{r#match::{Match, ScoreRevision}, scorecard::Scorecard, series::Series};

use super::error::{BracketError, BracketResult};

/// How a score submission should treat a match that already has a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEntry {
    Initial,
    Correction
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreChange {
    /// First scores recorded for the match.
    Recorded,
    /// Same scores as already stored, nothing to write.
    Unchanged,
    /// Previously stored scores were overwritten.
    Corrected
}

/// Outcome of completing a round.
#[derive(Debug, Clone, PartialEq)]
pub enum NextRound {
    Matches(Vec<Match>),
    Champion(String)
}

pub fn record_score(current: &Match, p1_score: i32, p2_score: i32, entry: ScoreEntry, recorded_at: u64) -> BracketResult<(Match, ScoreChange)> {
    if p1_score < 0 {
        return Err(BracketError::InvalidScore(p1_score));
    };
    if p2_score < 0 {
        return Err(BracketError::InvalidScore(p2_score));
    };
    if current.scores() == (Some(p1_score), Some(p2_score)) {
        return Ok((current.clone(), ScoreChange::Unchanged));
    };
    if current.is_decided() && entry == ScoreEntry::Initial {
        return Err(BracketError::ScoreAlreadyRecorded(current.id.clone()));
    };

    let overwrites = current.p1_score.is_some() || current.p2_score.is_some();
    let mut updated = current.clone();
    updated.p1_score = Some(p1_score);
    updated.p2_score = Some(p2_score);
    updated.history.push(ScoreRevision { p1_score, p2_score, recorded_at, correction: overwrites });

    if overwrites {
        warn!(
            "Match {} score overwritten: {:?}-{:?} -> {}-{}",
            current.id, current.p1_score, current.p2_score, p1_score, p2_score
        );
        Ok((updated, ScoreChange::Corrected))
    } else {
        Ok((updated, ScoreChange::Recorded))
    }
}

/// Distinct round numbers present in `matches`, ascending.
pub fn rounds_for_series(matches: &[Match]) -> Vec<i32> {
    matches.iter().map(|m| m.round).collect::<BTreeSet<i32>>().into_iter().collect()
}

/// Rounds must run 1, 2, ... n without gaps.
pub fn validate_round_numbers(rounds: &[i32]) -> BracketResult<()> {
    for (idx, round) in rounds.iter().enumerate() {
        let expected = idx as i32 + 1;
        if *round != expected {
            return Err(BracketError::validation(format!("expected round {} but found round {}", expected, round)));
        };
    };
    Ok(())
}

pub fn is_round_complete(matches: &[Match]) -> bool {
    !matches.is_empty() && matches.iter().all(Match::is_decided)
}

pub fn is_decided_game(game: &[i32]) -> bool {
    matches!(game, [s1, s2] if *s1 >= 0 && *s2 >= 0 && s1 != s2)
}

pub fn advance_scorecard(scorecard: &Scorecard) -> Scorecard {
    let mut advanced = scorecard.clone();
    advanced.completed = !scorecard.players.is_empty()
        && scorecard.has_matching_dimensions()
        && scorecard.results.iter().all(|pairing| {
            !pairing.is_empty() && pairing.iter().all(|game| is_decided_game(game))
        });
    advanced
}

fn new_match(series_id: &str, round: i32, slot: i32, p1: &str, p2: &str, timestamp: &str) -> Match {
    Match {
        id: Uuid::new_v4().to_string(),
        serie: series_id.to_string(),
        round,
        slot,
        p1: p1.to_string(),
        p2: p2.to_string(),
        timestamp: timestamp.to_string(),
        p1_score: None,
        p2_score: None,
        history: Vec::new()
    }
}

/// Pairs players in order: (0, 1), (2, 3), ...
pub fn seed_first_round(series_id: &str, players: &[String], timestamp: &str) -> BracketResult<Vec<Match>> {
    if players.len() < 2 {
        return Err(BracketError::validation("a bracket needs at least two players"));
    };
    if !players.len().is_power_of_two() {
        return Err(BracketError::validation(format!("{} players cannot fill a single-elimination bracket", players.len())));
    };
    if players.iter().any(|p| p.trim().is_empty()) {
        return Err(BracketError::validation("player names cannot be empty"));
    };
    let unique : BTreeSet<String> = players.iter().map(|p| p.trim().to_lowercase()).collect();
    if unique.len() != players.len() {
        return Err(BracketError::validation("player names must be unique"));
    };

    Ok(players.chunks(2).enumerate().map(|(slot, pair)| {
        new_match(series_id, 1, slot as i32, pair[0].trim(), pair[1].trim(), timestamp)
    }).collect())
}

/// Builds the following round from a complete round: the winners of slots (0, 1) meet, and so on.
pub fn next_round(round_matches: &[Match], timestamp: &str) -> BracketResult<NextRound> {
    if !is_round_complete(round_matches) {
        return Err(BracketError::validation("the round is not complete"));
    };
    let mut ordered : Vec<&Match> = round_matches.iter().collect();
    ordered.sort_by_key(|m| m.slot);

    let winners : Vec<&String> = ordered.iter().filter_map(|m| m.winner()).collect();
    if let [champion] = winners.as_slice() {
        return Ok(NextRound::Champion(champion.to_string()));
    };
    if winners.len() % 2 != 0 {
        return Err(BracketError::validation(format!("{} winners cannot be paired into a round", winners.len())));
    };

    let series_id = &ordered[0].serie;
    let round = ordered[0].round + 1;
    Ok(NextRound::Matches(winners.chunks(2).enumerate().map(|(slot, pair)| {
        new_match(series_id, round, slot as i32, pair[0], pair[1], timestamp)
    }).collect()))
}

/// A fresh scorecard for one stage, one pairing per match of the round.
pub fn scorecard_for_round(series: &Series, stage: i32, round_matches: &[Match]) -> Scorecard {
    let mut ordered : Vec<&Match> = round_matches.iter().collect();
    ordered.sort_by_key(|m| m.slot);
    let scorecard = Scorecard {
        id: Uuid::new_v4().to_string(),
        serie: series.id.clone(),
        stage,
        name: series.name.clone(),
        bracket: series.bracket.clone(),
        raffle: series.raffle,
        completed: false,
        players: ordered.iter().map(|m| vec![m.p1.clone(), m.p2.clone()]).collect(),
        results: ordered.iter().map(|_| Vec::new()).collect()
    };
    advance_scorecard(&scorecard)
}

/// Sets game `game` of pairing `pairing`; a game index one past the last appends a new game.
pub fn set_scorecard_result(scorecard: &Scorecard, pairing: usize, game: usize, score1: i32, score2: i32) -> BracketResult<Scorecard> {
    if score1 < 0 {
        return Err(BracketError::InvalidScore(score1));
    };
    if score2 < 0 {
        return Err(BracketError::InvalidScore(score2));
    };
    if !scorecard.has_matching_dimensions() {
        return Err(BracketError::validation("scorecard players and results grids differ in size"));
    };
    if pairing >= scorecard.players.len() {
        return Err(BracketError::validation(format!("pairing {} is out of range", pairing)));
    };

    let mut updated = scorecard.clone();
    let games = &mut updated.results[pairing];
    if game < games.len() {
        games[game] = vec![score1, score2];
    } else if game == games.len() {
        games.push(vec![score1, score2]);
    } else {
        return Err(BracketError::validation(format!("game {} is out of range", game)));
    };
    Ok(advance_scorecard(&updated))
}
