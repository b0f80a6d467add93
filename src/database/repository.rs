use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::models::{series::Series, r#match::{Match, ScoreRevision}, scorecard::Scorecard, signup::Signup};

/// Scores of a match as last read from the store, used as the expected value of a conditional update.
pub type ScorePair = (Option<i32>, Option<i32>);

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),
    #[error("{0}")]
    Conflict(String)
}

/// Persistence seam for the bracket domain.
///
/// Every call is a round-trip to the backing store. Lookups that find nothing return an empty
/// `Vec` or `None`; errors are reserved for the store itself failing.
#[async_trait]
pub trait BracketRepository: Send + Sync {
    async fn find_series(&self, series_id: &str) -> StoreResult<Option<Series>>;

    async fn insert_series(&self, series: &Series) -> StoreResult<()>;

    /// Fails with `Conflict` when the series is already completed.
    async fn mark_series_completed(&self, series_id: &str, champion: &str) -> StoreResult<()>;

    /// Matches of one round ordered by bracket slot.
    async fn find_matches(&self, series_id: &str, round: i32) -> StoreResult<Vec<Match>>;

    /// Matches of every round ordered by round, then slot.
    async fn find_all_matches(&self, series_id: &str) -> StoreResult<Vec<Match>>;

    async fn find_match(&self, match_id: &str) -> StoreResult<Option<Match>>;

    /// Fails with `Conflict` when a match already holds one of the `(serie, round, slot)` positions.
    async fn insert_matches(&self, matches: &[Match]) -> StoreResult<()>;

    /// Removes the matches of one round. Only used to discard a round that was never published.
    async fn delete_matches(&self, series_id: &str, round: i32) -> StoreResult<u64>;

    /// Overwrites both scores with the ones carried by `revision` and appends it to the history.
    /// Fails with `Conflict` when the stored scores no longer equal `previous`.
    async fn update_match_score(&self, match_id: &str, previous: ScorePair, revision: &ScoreRevision) -> StoreResult<()>;

    async fn find_scorecards(&self, series_id: &str, stage: i32) -> StoreResult<Vec<Scorecard>>;

    /// Fails with `Conflict` when the series already has a scorecard for that stage.
    async fn insert_scorecard(&self, scorecard: &Scorecard) -> StoreResult<()>;

    async fn delete_scorecards(&self, series_id: &str, stage: i32) -> StoreResult<u64>;

    /// Replaces the scorecard if its stored results still equal `previous_results`.
    async fn save_scorecard(&self, scorecard: &Scorecard, previous_results: &[Vec<Vec<i32>>]) -> StoreResult<()>;

    async fn insert_signup(&self, signup: &Signup) -> StoreResult<String>;

    async fn count_signups_by_email(&self, email: &str) -> StoreResult<u64>;
}
