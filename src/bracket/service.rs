use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::{database::{BracketRepository, StoreError, models::{series::{Series, BracketInfo}, signup::Signup, r#match::Match}}, util::time::{get_u64_time_millis, get_timestamp_string}};

use super::{engine::{self, ScoreEntry, ScoreChange, NextRound}, error::{BracketError, BracketResult}, views::{BracketView, MatchView, RoundView, ScorecardView, SignupReceipt}};

/// Everything needed to open a new series.
#[derive(Debug, Clone, Default)]
pub struct NewSeries {
    /// Fixed id for seeded series, generated otherwise.
    pub id: Option<String>,
    pub name: String,
    pub bracket: BracketInfo,
    pub raffle: bool,
    pub players: Vec<String>,
    pub scheduled: Option<String>
}

/// Query/command surface used by the HTTP layer.
///
/// Commands validate before the first write. Creating a series writes the matches and scorecard
/// first and the owning series last; a failure midway removes what was written, so readers never
/// see a partial bracket. Advancing writes the next round then its scorecard, and a retry after a
/// failure in between completes the missing scorecard instead of advancing again.
pub struct BracketService {
    repository: Arc<dyn BracketRepository>
}

impl BracketService {
    pub fn new(repository: Arc<dyn BracketRepository>) -> Self {
        Self { repository }
    }

    async fn require_series(&self, series_id: &str) -> BracketResult<Series> {
        match self.repository.find_series(series_id).await? {
            Some(series) => Ok(series),
            None => Err(BracketError::not_found("series", series_id))
        }
    }

    fn group_rounds(matches: &[Match]) -> Vec<RoundView> {
        engine::rounds_for_series(matches).into_iter().map(|round| {
            let round_matches : Vec<Match> = matches.iter().filter(|m| m.round == round).cloned().collect();
            RoundView::from_matches(round, &round_matches)
        }).collect()
    }

    pub async fn get_bracket_view(&self, series_id: &str, round: Option<i32>) -> BracketResult<BracketView> {
        if let Some(round) = round {
            if round < 1 {
                return Err(BracketError::validation(format!("round {} is out of range", round)));
            };
        };
        let series = self.require_series(series_id).await?;
        let matches = match round {
            Some(round) => self.repository.find_matches(series_id, round).await?,
            None => self.repository.find_all_matches(series_id).await?
        };
        Ok(BracketView { series, rounds: Self::group_rounds(&matches) })
    }

    pub async fn get_scorecard_view(&self, series_id: &str, stage: i32) -> BracketResult<ScorecardView> {
        if stage < 1 {
            return Err(BracketError::validation(format!("stage {} is out of range", stage)));
        };
        let mut scorecards = self.repository.find_scorecards(series_id, stage).await?;
        if scorecards.len() > 1 {
            warn!("Series {} has {} scorecards for stage {}", series_id, scorecards.len(), stage);
        };
        if scorecards.is_empty() {
            return Err(BracketError::not_found("scorecard", &format!("{}/{}", series_id, stage)));
        };
        Ok(ScorecardView::from(scorecards.swap_remove(0)))
    }

    pub async fn submit_score(&self, match_id: &str, p1_score: i32, p2_score: i32) -> BracketResult<MatchView> {
        self.apply_score(match_id, p1_score, p2_score, ScoreEntry::Initial).await
    }

    /// Overwrites a result that was entered wrongly. Recorded as a correction in the match history.
    pub async fn correct_score(&self, match_id: &str, p1_score: i32, p2_score: i32) -> BracketResult<MatchView> {
        self.apply_score(match_id, p1_score, p2_score, ScoreEntry::Correction).await
    }

    async fn apply_score(&self, match_id: &str, p1_score: i32, p2_score: i32, entry: ScoreEntry) -> BracketResult<MatchView> {
        let current = match self.repository.find_match(match_id).await? {
            Some(m) => m,
            None => return Err(BracketError::not_found("match", match_id))
        };
        let (updated, change) = engine::record_score(&current, p1_score, p2_score, entry, get_u64_time_millis())?;
        let revision = match (change, updated.history.last()) {
            (ScoreChange::Unchanged, _) | (_, None) => return Ok(MatchView::from(&updated)),
            (_, Some(revision)) => revision
        };

        self.repository.update_match_score(match_id, current.scores(), revision).await?;
        if change == ScoreChange::Corrected && current.winner().is_some() && current.winner() != updated.winner() {
            warn!(
                "Winner of match {} (series {}, round {}) changed from {:?} to {:?}; later rounds are not re-seeded",
                match_id, current.serie, current.round, current.winner(), updated.winner()
            );
        };
        info!("Recorded {}-{} for match {} ({:?})", p1_score, p2_score, match_id, change);
        Ok(MatchView::from(&updated))
    }

    pub async fn register_signup(&self, name: &str, email: &str, source_address: &str, series_id: Option<&str>) -> BracketResult<SignupReceipt> {
        let name = name.trim();
        let email = email.trim().to_lowercase();
        if name.is_empty() {
            return Err(BracketError::validation("player name is required"));
        };
        if email.is_empty() {
            return Err(BracketError::validation("email is required"));
        };
        let series_id = series_id.map(str::trim).filter(|id| !id.is_empty());
        if let Some(series_id) = series_id {
            self.require_series(series_id).await?;
        };

        let duplicate = self.repository.count_signups_by_email(&email).await? > 0;
        let signup = Signup {
            id: Uuid::new_v4().to_string(),
            player_name: name.to_string(),
            email,
            source_address: source_address.to_string(),
            submitted_at: get_u64_time_millis(),
            serie: series_id.map(str::to_string),
            duplicate
        };
        let id = self.repository.insert_signup(&signup).await?;
        if duplicate {
            warn!("Signup {} reuses already registered email {}", id, signup.email);
        };
        info!("Registered signup {} for {} from {}", id, signup.player_name, signup.source_address);
        Ok(SignupReceipt { id, duplicate })
    }

    pub async fn create_series(&self, new_series: NewSeries) -> BracketResult<BracketView> {
        let name = new_series.name.trim();
        if name.is_empty() {
            return Err(BracketError::validation("series name is required"));
        };
        let series = Series {
            id: new_series.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: name.to_string(),
            bracket: new_series.bracket,
            raffle: new_series.raffle,
            completed: false,
            champion: None,
            created_at: get_u64_time_millis()
        };
        let scheduled = new_series.scheduled.unwrap_or_else(get_timestamp_string);
        let first_round = engine::seed_first_round(&series.id, &new_series.players, &scheduled)?;
        let scorecard = engine::scorecard_for_round(&series, 1, &first_round);

        self.repository.insert_matches(&first_round).await?;
        let stored = match self.repository.insert_scorecard(&scorecard).await {
            Ok(()) => self.repository.insert_series(&series).await,
            Err(store_err) => Err(store_err)
        };
        if let Err(store_err) = stored {
            if let Err(cleanup_err) = self.discard_first_round(&series.id).await {
                warn!("Could not remove unpublished round of series {}: {}", series.id, cleanup_err);
            };
            return Err(store_err.into());
        };
        info!("Created series {} ({}) with {} players", series.id, series.name, new_series.players.len());

        Ok(BracketView { rounds: vec![RoundView::from_matches(1, &first_round)], series })
    }

    async fn discard_first_round(&self, series_id: &str) -> BracketResult<()> {
        let matches = self.repository.delete_matches(series_id, 1).await?;
        let scorecards = self.repository.delete_scorecards(series_id, 1).await?;
        if matches > 0 || scorecards > 0 {
            info!("Removed {} matches and {} scorecards left by an unfinished creation of series {}", matches, scorecards, series_id);
        };
        Ok(())
    }

    /// Creates a seeded series unless one with the same id already exists. Returns whether it was created.
    pub async fn ensure_series(&self, new_series: NewSeries) -> BracketResult<bool> {
        if let Some(series_id) = &new_series.id {
            if self.repository.find_series(series_id).await?.is_some() {
                return Ok(false);
            };
            // an earlier creation may have died before the series document was written
            self.discard_first_round(series_id).await?;
        };
        self.create_series(new_series).await?;
        Ok(true)
    }

    /// Inserts the scorecard of a stage. One already stored by a concurrent command counts as done.
    async fn insert_stage_scorecard(&self, series: &Series, round: i32, matches: &[Match]) -> BracketResult<()> {
        let scorecard = engine::scorecard_for_round(series, round, matches);
        match self.repository.insert_scorecard(&scorecard).await {
            Ok(()) | Err(StoreError::Conflict(_)) => Ok(()),
            Err(store_err) => Err(store_err.into())
        }
    }

    /// Seeds the next round from the winners of the latest one, or crowns the champion after the final.
    pub async fn advance_round(&self, series_id: &str) -> BracketResult<BracketView> {
        let series = self.require_series(series_id).await?;
        if series.completed {
            return Err(BracketError::validation(format!("series {} is already completed", series_id)));
        };
        let matches = self.repository.find_all_matches(series_id).await?;
        let rounds = engine::rounds_for_series(&matches);
        engine::validate_round_numbers(&rounds)?;
        let latest = match rounds.last() {
            Some(round) => *round,
            None => return Err(BracketError::validation(format!("series {} has no matches", series_id)))
        };
        let latest_matches : Vec<Match> = matches.iter().filter(|m| m.round == latest).cloned().collect();

        if self.repository.find_scorecards(series_id, latest).await?.is_empty() {
            self.insert_stage_scorecard(&series, latest, &latest_matches).await?;
            info!("Completed scorecard {} of series {} left by an interrupted advance", latest, series_id);
            return self.get_bracket_view(series_id, None).await;
        };

        match engine::next_round(&latest_matches, &get_timestamp_string())? {
            NextRound::Matches(next) => {
                // a concurrent advance that inserted first makes this insert conflict
                self.repository.insert_matches(&next).await?;
                self.insert_stage_scorecard(&series, latest + 1, &next).await?;
                info!("Series {} advanced to round {}", series_id, latest + 1);
            },
            NextRound::Champion(champion) => {
                self.repository.mark_series_completed(series_id, &champion).await?;
                info!("Series {} completed, champion {}", series_id, champion);
            }
        };
        self.get_bracket_view(series_id, None).await
    }

    pub async fn submit_scorecard_result(
        &self,
        series_id: &str,
        stage: i32,
        pairing: usize,
        game: usize,
        score1: i32,
        score2: i32
    ) -> BracketResult<ScorecardView> {
        let current = self.get_scorecard_view(series_id, stage).await?.scorecard;
        let updated = engine::set_scorecard_result(&current, pairing, game, score1, score2)?;
        self.repository.save_scorecard(&updated, &current.results).await?;
        if updated.completed && !current.completed {
            info!("Scorecard {} of series {} completed", stage, series_id);
        };
        Ok(ScorecardView::from(updated))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::database::memory::MemoryRepository;

    fn service() -> (Arc<MemoryRepository>, BracketService) {
        let repository = Arc::new(MemoryRepository::new());
        let service = BracketService::new(repository.clone());
        (repository, service)
    }

    fn new_series(players: &[&str]) -> NewSeries {
        NewSeries {
            id: None,
            name: String::from("S1"),
            bracket: BracketInfo { organizer: String::from("club"), api: String::new(), game: String::from("badminton") },
            raffle: false,
            players: players.iter().map(|p| p.to_string()).collect(),
            scheduled: Some(String::from("2026-10-16T18:00:00Z"))
        }
    }

    #[tokio::test]
    async fn round_one_scenario() {
        let (_, service) = service();
        let view = service.create_series(new_series(&["a", "b", "c", "d"])).await.unwrap();
        let series_id = view.series.id.clone();
        assert!(!view.rounds[0].complete);

        let ids : Vec<String> = view.rounds[0].matches.iter().map(|m| m.id.clone()).collect();
        let first = service.submit_score(&ids[0], 21, 15).await.unwrap();
        let second = service.submit_score(&ids[1], 18, 21).await.unwrap();
        assert!(first.decided && second.decided);
        assert_eq!(second.winner.as_deref(), Some("d"));

        let round = service.get_bracket_view(&series_id, Some(1)).await.unwrap();
        assert!(round.rounds[0].complete);
    }

    #[tokio::test]
    async fn tie_keeps_round_incomplete() {
        let (repository, service) = service();
        let view = service.create_series(new_series(&["a", "b"])).await.unwrap();
        let series_id = view.series.id.clone();
        let mut extra = repository.matches()[0].clone();
        extra.id = String::from("third");
        extra.slot = 1;
        repository.insert_matches(&[extra]).await.unwrap();

        service.submit_score(&view.rounds[0].matches[0].id, 21, 15).await.unwrap();
        let tie = service.submit_score("third", 10, 10).await.unwrap();
        assert!(!tie.decided);

        let round = service.get_bracket_view(&series_id, Some(1)).await.unwrap();
        assert!(!round.rounds[0].complete);
    }

    #[tokio::test]
    async fn empty_round_is_empty_not_missing() {
        let (_, service) = service();
        let view = service.create_series(new_series(&["a", "b"])).await.unwrap();
        let round = service.get_bracket_view(&view.series.id, Some(4)).await.unwrap();
        assert!(round.rounds.is_empty());

        assert_eq!(
            service.get_bracket_view("nope", Some(1)).await,
            Err(BracketError::not_found("series", "nope"))
        );
        assert!(matches!(service.get_bracket_view(&view.series.id, Some(0)).await, Err(BracketError::Validation(_))));
    }

    #[tokio::test]
    async fn resubmitting_identical_scores_writes_once() {
        let (repository, service) = service();
        let view = service.create_series(new_series(&["a", "b"])).await.unwrap();
        let match_id = view.rounds[0].matches[0].id.clone();

        let once = service.submit_score(&match_id, 3, 1).await.unwrap();
        let twice = service.submit_score(&match_id, 3, 1).await.unwrap();
        assert_eq!(once, twice);
        assert_eq!(repository.matches()[0].history.len(), 1);
    }

    #[tokio::test]
    async fn correction_is_distinguished_from_initial_entry() {
        let (repository, service) = service();
        let view = service.create_series(new_series(&["a", "b"])).await.unwrap();
        let match_id = view.rounds[0].matches[0].id.clone();

        service.submit_score(&match_id, 3, 1).await.unwrap();
        assert_eq!(
            service.submit_score(&match_id, 1, 3).await,
            Err(BracketError::ScoreAlreadyRecorded(match_id.clone()))
        );
        let corrected = service.correct_score(&match_id, 1, 3).await.unwrap();
        assert_eq!(corrected.winner.as_deref(), Some("b"));
        assert_eq!(corrected.corrections, 1);

        let history : Vec<bool> = repository.matches()[0].history.iter().map(|r| r.correction).collect();
        assert_eq!(history, vec![false, true]);
    }

    #[tokio::test]
    async fn negative_score_never_reaches_store() {
        let (repository, service) = service();
        let view = service.create_series(new_series(&["a", "b"])).await.unwrap();
        let match_id = view.rounds[0].matches[0].id.clone();
        assert_eq!(service.submit_score(&match_id, -1, 2).await, Err(BracketError::InvalidScore(-1)));
        assert!(repository.matches()[0].history.is_empty());
    }

    #[tokio::test]
    async fn concurrent_update_is_a_conflict() {
        let (repository, service) = service();
        let view = service.create_series(new_series(&["a", "b"])).await.unwrap();
        let match_id = view.rounds[0].matches[0].id.clone();
        service.submit_score(&match_id, 0, 0).await.unwrap();

        let stale = repository.matches()[0].clone();
        repository.overwrite_scores(&match_id, 5, 5);
        let (updated, _) = engine::record_score(&stale, 2, 1, ScoreEntry::Initial, 0).unwrap();
        let result = repository.update_match_score(&match_id, stale.scores(), updated.history.last().unwrap()).await;
        assert!(matches!(result.map_err(BracketError::from), Err(BracketError::Conflict(_))));
    }

    #[tokio::test]
    async fn unknown_match_is_not_found() {
        let (_, service) = service();
        assert_eq!(service.submit_score("missing", 1, 0).await, Err(BracketError::not_found("match", "missing")));
    }

    #[tokio::test]
    async fn signup_scenario() {
        let (repository, service) = service();
        let receipt = service.register_signup("Alice", "a@example.com", "127.0.0.1", None).await.unwrap();
        assert!(!receipt.id.is_empty());
        assert!(!receipt.duplicate);

        let rejected = service.register_signup("", "a@example.com", "127.0.0.1", None).await;
        assert!(matches!(rejected, Err(BracketError::Validation(_))));
        assert_eq!(repository.signups().len(), 1);
    }

    #[tokio::test]
    async fn signup_with_empty_email_never_reaches_store() {
        let (repository, service) = service();
        repository.fail_with(StoreError::Unavailable(String::from("down")));
        let rejected = service.register_signup("Alice", "   ", "127.0.0.1", None).await;
        assert!(matches!(rejected, Err(BracketError::Validation(_))));
        repository.recover();
        assert!(repository.signups().is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_flagged() {
        let (repository, service) = service();
        service.register_signup("Alice", "a@example.com", "127.0.0.1", None).await.unwrap();
        let again = service.register_signup("Alicia", "A@Example.com", "10.0.0.2", None).await.unwrap();
        assert!(again.duplicate);
        assert_eq!(repository.signups().len(), 2);
    }

    #[tokio::test]
    async fn signup_for_unknown_series_is_not_found() {
        let (_, service) = service();
        let result = service.register_signup("Alice", "a@example.com", "127.0.0.1", Some("S9")).await;
        assert_eq!(result, Err(BracketError::not_found("series", "S9")));
    }

    #[tokio::test]
    async fn store_failures_are_storage_unavailable() {
        let (repository, service) = service();
        repository.fail_with(StoreError::Timeout(Duration::from_millis(50)));
        assert!(matches!(
            service.register_signup("Alice", "a@example.com", "127.0.0.1", None).await,
            Err(BracketError::StorageUnavailable(_))
        ));
        repository.fail_with(StoreError::Unavailable(String::from("connection refused")));
        assert!(matches!(service.get_bracket_view("S1", None).await, Err(BracketError::StorageUnavailable(_))));
    }

    #[tokio::test]
    async fn failed_creation_leaves_no_series() {
        let (repository, service) = service();
        repository.fail_with(StoreError::Unavailable(String::from("down")));
        assert!(service.create_series(new_series(&["a", "b"])).await.is_err());
        repository.recover();
        assert!(repository.series().is_empty());
    }

    #[tokio::test]
    async fn failed_scorecard_write_leaves_no_matches() {
        let (repository, service) = service();
        let mut seed = new_series(&["a", "b"]);
        seed.id = Some(String::from("spring"));
        repository.fail_once("insert_scorecard", StoreError::Unavailable(String::from("down")));
        assert!(matches!(service.ensure_series(seed.clone()).await, Err(BracketError::StorageUnavailable(_))));
        assert!(repository.matches().is_empty());
        assert!(repository.series().is_empty());

        assert!(service.ensure_series(seed).await.unwrap());
        let round = service.get_bracket_view("spring", Some(1)).await.unwrap();
        assert_eq!(round.rounds[0].matches.len(), 1);
    }

    #[tokio::test]
    async fn failed_series_write_leaves_no_scorecard() {
        let (repository, service) = service();
        repository.fail_once("insert_series", StoreError::Timeout(Duration::from_millis(50)));
        assert!(service.create_series(new_series(&["a", "b", "c", "d"])).await.is_err());
        assert!(repository.matches().is_empty());
        assert!(repository.scorecards().is_empty());
    }

    #[tokio::test]
    async fn seeding_replaces_leftover_first_round() {
        let (repository, service) = service();
        let leftover = engine::seed_first_round("spring", &[String::from("x"), String::from("y")], "2026-10-16T18:00:00Z").unwrap();
        repository.insert_matches(&leftover).await.unwrap();

        let mut seed = new_series(&["a", "b"]);
        seed.id = Some(String::from("spring"));
        assert!(service.ensure_series(seed).await.unwrap());
        let matches = repository.matches();
        assert_eq!(matches.len(), 1);
        assert_eq!((matches[0].p1.as_str(), matches[0].p2.as_str()), ("a", "b"));
    }

    #[tokio::test]
    async fn interrupted_advance_is_completed_on_retry() {
        let (repository, service) = service();
        let view = service.create_series(new_series(&["a", "b", "c", "d"])).await.unwrap();
        let series_id = view.series.id.clone();
        service.submit_score(&view.rounds[0].matches[0].id, 21, 15).await.unwrap();
        service.submit_score(&view.rounds[0].matches[1].id, 18, 21).await.unwrap();

        repository.fail_once("insert_scorecard", StoreError::Unavailable(String::from("down")));
        assert!(matches!(service.advance_round(&series_id).await, Err(BracketError::StorageUnavailable(_))));

        let resumed = service.advance_round(&series_id).await.unwrap();
        assert_eq!(resumed.rounds.len(), 2);
        assert_eq!(resumed.rounds[1].matches.len(), 1);
        let scorecard = service.get_scorecard_view(&series_id, 2).await.unwrap();
        assert_eq!(scorecard.scorecard.players, vec![vec![String::from("a"), String::from("d")]]);
    }

    #[tokio::test]
    async fn concurrent_advances_seed_one_round() {
        let (repository, service) = service();
        let view = service.create_series(new_series(&["a", "b", "c", "d"])).await.unwrap();
        let series_id = view.series.id.clone();
        service.submit_score(&view.rounds[0].matches[0].id, 21, 15).await.unwrap();
        service.submit_score(&view.rounds[0].matches[1].id, 18, 21).await.unwrap();

        repository.yield_after_reads();
        let (first, second) = tokio::join!(service.advance_round(&series_id), service.advance_round(&series_id));
        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(r, Err(BracketError::Conflict(_)))));
        assert_eq!(repository.matches().iter().filter(|m| m.round == 2).count(), 1);
        assert_eq!(repository.scorecards().iter().filter(|s| s.stage == 2).count(), 1);
    }

    #[tokio::test]
    async fn series_runs_to_a_champion() {
        let (repository, service) = service();
        let view = service.create_series(new_series(&["a", "b", "c", "d"])).await.unwrap();
        let series_id = view.series.id.clone();
        assert!(matches!(service.advance_round(&series_id).await, Err(BracketError::Validation(_))));

        service.submit_score(&view.rounds[0].matches[0].id, 21, 15).await.unwrap();
        service.submit_score(&view.rounds[0].matches[1].id, 18, 21).await.unwrap();
        let advanced = service.advance_round(&series_id).await.unwrap();
        assert_eq!(advanced.rounds.len(), 2);
        let final_match = &advanced.rounds[1].matches[0];
        assert_eq!((final_match.p1.as_str(), final_match.p2.as_str()), ("a", "d"));
        assert!(service.get_scorecard_view(&series_id, 2).await.is_ok());

        service.submit_score(&final_match.id, 11, 21).await.unwrap();
        let finished = service.advance_round(&series_id).await.unwrap();
        assert!(finished.series.completed);
        assert_eq!(finished.series.champion.as_deref(), Some("d"));
        assert_eq!(repository.series()[0].champion.as_deref(), Some("d"));
        assert!(service.advance_round(&series_id).await.is_err());
    }

    #[tokio::test]
    async fn seeded_series_is_created_once() {
        let (repository, service) = service();
        let mut seed = new_series(&["a", "b"]);
        seed.id = Some(String::from("spring-open"));
        assert!(service.ensure_series(seed.clone()).await.unwrap());
        assert!(!service.ensure_series(seed).await.unwrap());
        assert_eq!(repository.series().len(), 1);
        assert_eq!(repository.matches().len(), 1);
        assert!(service.get_bracket_view("spring-open", None).await.is_ok());
    }

    #[tokio::test]
    async fn scorecard_results_fill_until_completed() {
        let (_, service) = service();
        let view = service.create_series(new_series(&["a", "b"])).await.unwrap();
        let series_id = view.series.id.clone();

        let scorecard = service.get_scorecard_view(&series_id, 1).await.unwrap();
        assert_eq!(scorecard.scorecard.players, vec![vec![String::from("a"), String::from("b")]]);
        assert!(!scorecard.scorecard.completed);

        let updated = service.submit_scorecard_result(&series_id, 1, 0, 0, 21, 19).await.unwrap();
        assert!(updated.scorecard.completed);
        assert_eq!(updated.decided_pairings, 1);
        assert!(service.get_scorecard_view(&series_id, 1).await.unwrap().scorecard.completed);
    }

    #[tokio::test]
    async fn missing_scorecard_is_not_found() {
        let (_, service) = service();
        let view = service.create_series(new_series(&["a", "b"])).await.unwrap();
        assert!(matches!(
            service.get_scorecard_view(&view.series.id, 3).await,
            Err(BracketError::NotFound { kind: "scorecard", .. })
        ));
    }
}
