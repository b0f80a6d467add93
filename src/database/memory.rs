use std::sync::{Mutex, atomic::{AtomicBool, Ordering}};

use async_trait::async_trait;
use bracket_api_rs_macro::IdentifiableDocument;

use super::{BracketRepository, ScorePair, StoreError, StoreResult};
use super::models::{series::Series, r#match::{Match, ScoreRevision}, scorecard::Scorecard, signup::Signup};

#[derive(Default)]
struct Collections {
    series: Vec<Series>,
    matches: Vec<Match>,
    scorecards: Vec<Scorecard>,
    signups: Vec<Signup>
}

/// In-process stand-in for the document store, used by the service tests.
#[derive(Default)]
pub struct MemoryRepository {
    collections: Mutex<Collections>,
    failure: Mutex<Option<StoreError>>,
    failure_once: Mutex<Option<(&'static str, StoreError)>>,
    yield_after_reads: AtomicBool
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every following call fails with `error` until `recover` is called.
    pub fn fail_with(&self, error: StoreError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// The next call to `operation` fails with `error`; every other call goes through.
    pub fn fail_once(&self, operation: &'static str, error: StoreError) {
        *self.failure_once.lock().unwrap() = Some((operation, error));
    }

    /// Hands control back to the runtime after each match read, letting concurrent commands interleave.
    pub fn yield_after_reads(&self) {
        self.yield_after_reads.store(true, Ordering::SeqCst);
    }

    pub fn signups(&self) -> Vec<Signup> {
        self.collections.lock().unwrap().signups.clone()
    }

    pub fn series(&self) -> Vec<Series> {
        self.collections.lock().unwrap().series.clone()
    }

    pub fn matches(&self) -> Vec<Match> {
        self.collections.lock().unwrap().matches.clone()
    }

    pub fn scorecards(&self) -> Vec<Scorecard> {
        self.collections.lock().unwrap().scorecards.clone()
    }

    /// Changes stored scores behind the caller's back, as a concurrent writer would.
    pub fn overwrite_scores(&self, match_id: &str, p1_score: i32, p2_score: i32) {
        let mut collections = self.collections.lock().unwrap();
        if let Some(stored) = collections.matches.iter_mut().find(|m| m.id == match_id) {
            stored.p1_score = Some(p1_score);
            stored.p2_score = Some(p2_score);
        }
    }

    fn check(&self, operation: &str) -> StoreResult<()> {
        if let Some(error) = self.failure.lock().unwrap().as_ref() {
            return Err(error.clone());
        };
        let mut failure_once = self.failure_once.lock().unwrap();
        if matches!(failure_once.as_ref(), Some((failing, _)) if *failing == operation) {
            if let Some((_, error)) = failure_once.take() {
                return Err(error);
            };
        };
        Ok(())
    }
}

#[async_trait]
impl BracketRepository for MemoryRepository {
    async fn find_series(&self, series_id: &str) -> StoreResult<Option<Series>> {
        self.check("find_series")?;
        Ok(self.collections.lock().unwrap().series.iter().find(|s| s.id == series_id).cloned())
    }

    async fn insert_series(&self, series: &Series) -> StoreResult<()> {
        self.check("insert_series")?;
        let mut collections = self.collections.lock().unwrap();
        if collections.series.iter().any(|s| s.id == series.id) {
            return Err(StoreError::Conflict(format!("duplicate series {}", series.get_id_value())));
        };
        collections.series.push(series.clone());
        Ok(())
    }

    async fn mark_series_completed(&self, series_id: &str, champion: &str) -> StoreResult<()> {
        self.check("mark_series_completed")?;
        let mut collections = self.collections.lock().unwrap();
        match collections.series.iter_mut().find(|s| s.id == series_id && !s.completed) {
            Some(series) => {
                series.completed = true;
                series.champion = Some(champion.to_string());
                Ok(())
            },
            None => Err(StoreError::Conflict(format!("series {} was completed concurrently", series_id)))
        }
    }

    async fn find_matches(&self, series_id: &str, round: i32) -> StoreResult<Vec<Match>> {
        let mut matches = self.find_all_matches(series_id).await?;
        matches.retain(|m| m.round == round);
        Ok(matches)
    }

    async fn find_all_matches(&self, series_id: &str) -> StoreResult<Vec<Match>> {
        self.check("find_all_matches")?;
        let mut matches : Vec<Match> = self.collections.lock().unwrap().matches.iter()
            .filter(|m| m.serie == series_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| (m.round, m.slot));
        if self.yield_after_reads.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        };
        Ok(matches)
    }

    async fn find_match(&self, match_id: &str) -> StoreResult<Option<Match>> {
        self.check("find_match")?;
        Ok(self.collections.lock().unwrap().matches.iter().find(|m| m.id == match_id).cloned())
    }

    async fn insert_matches(&self, matches: &[Match]) -> StoreResult<()> {
        self.check("insert_matches")?;
        let mut collections = self.collections.lock().unwrap();
        let taken = matches.iter().find(|new| collections.matches.iter()
            .any(|m| m.serie == new.serie && m.round == new.round && m.slot == new.slot));
        if let Some(taken) = taken {
            return Err(StoreError::Conflict(format!(
                "duplicate match for series {} round {} slot {}", taken.serie, taken.round, taken.slot
            )));
        };
        collections.matches.extend_from_slice(matches);
        Ok(())
    }

    async fn delete_matches(&self, series_id: &str, round: i32) -> StoreResult<u64> {
        self.check("delete_matches")?;
        let mut collections = self.collections.lock().unwrap();
        let before = collections.matches.len();
        collections.matches.retain(|m| !(m.serie == series_id && m.round == round));
        Ok((before - collections.matches.len()) as u64)
    }

    async fn update_match_score(&self, match_id: &str, previous: ScorePair, revision: &ScoreRevision) -> StoreResult<()> {
        self.check("update_match_score")?;
        let mut collections = self.collections.lock().unwrap();
        match collections.matches.iter_mut().find(|m| m.id == match_id && m.scores() == previous) {
            Some(stored) => {
                stored.p1_score = Some(revision.p1_score);
                stored.p2_score = Some(revision.p2_score);
                stored.history.push(revision.clone());
                Ok(())
            },
            None => Err(StoreError::Conflict(format!("match {} was modified concurrently", match_id)))
        }
    }

    async fn find_scorecards(&self, series_id: &str, stage: i32) -> StoreResult<Vec<Scorecard>> {
        self.check("find_scorecards")?;
        Ok(self.collections.lock().unwrap().scorecards.iter()
            .filter(|s| s.serie == series_id && s.stage == stage)
            .cloned()
            .collect())
    }

    async fn insert_scorecard(&self, scorecard: &Scorecard) -> StoreResult<()> {
        self.check("insert_scorecard")?;
        let mut collections = self.collections.lock().unwrap();
        if collections.scorecards.iter().any(|s| s.serie == scorecard.serie && s.stage == scorecard.stage) {
            return Err(StoreError::Conflict(format!("duplicate scorecard {} for series {}", scorecard.stage, scorecard.serie)));
        };
        collections.scorecards.push(scorecard.clone());
        Ok(())
    }

    async fn delete_scorecards(&self, series_id: &str, stage: i32) -> StoreResult<u64> {
        self.check("delete_scorecards")?;
        let mut collections = self.collections.lock().unwrap();
        let before = collections.scorecards.len();
        collections.scorecards.retain(|s| !(s.serie == series_id && s.stage == stage));
        Ok((before - collections.scorecards.len()) as u64)
    }

    async fn save_scorecard(&self, scorecard: &Scorecard, previous_results: &[Vec<Vec<i32>>]) -> StoreResult<()> {
        self.check("save_scorecard")?;
        let mut collections = self.collections.lock().unwrap();
        match collections.scorecards.iter_mut().find(|s| s.id == scorecard.id && s.results.as_slice() == previous_results) {
            Some(stored) => {
                *stored = scorecard.clone();
                Ok(())
            },
            None => Err(StoreError::Conflict(format!("scorecard {} was modified concurrently", scorecard.id)))
        }
    }

    async fn insert_signup(&self, signup: &Signup) -> StoreResult<String> {
        self.check("insert_signup")?;
        self.collections.lock().unwrap().signups.push(signup.clone());
        Ok(signup.get_id_value())
    }

    async fn count_signups_by_email(&self, email: &str) -> StoreResult<u64> {
        self.check("count_signups_by_email")?;
        Ok(self.collections.lock().unwrap().signups.iter().filter(|s| s.email == email.to_lowercase()).count() as u64)
    }
}
