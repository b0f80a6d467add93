use std::{future::Future, time::Duration};

use async_trait::async_trait;
use bracket_api_rs_macro::IdentifiableDocument;
use futures::TryStreamExt;
use mongodb::{options::{ClientOptions, FindOptions, IndexOptions}, error::{ErrorKind, WriteFailure}, Client, Collection, IndexModel, bson::{doc, Bson}};
use serde::{Serialize, de::DeserializeOwned};
use anyhow::anyhow;
use log::{info, warn};

use self::models::{series::Series, r#match::{Match, ScoreRevision}, scorecard::Scorecard, signup::Signup};

pub mod models;
pub mod repository;
#[cfg(test)]
pub mod memory;

pub use repository::{BracketRepository, ScorePair, StoreError, StoreResult};

const DUPLICATE_KEY_CODE : i32 = 11000;

pub trait CollectionOwner<T> {
    fn get_collection(database: &Database) -> &Collection<T>;
    fn get_collection_name() -> &'static str;
}

pub struct Database {
    pub mongo: mongodb::Database,
    pub series: Collection<Series>,
    pub matches: Collection<Match>,
    pub scorecards: Collection<Scorecard>,
    pub signups: Collection<Signup>,
    pub operation_timeout: Duration
}

impl Database {
    /// Runs one store round-trip, bounded by the operation timeout.
    async fn bounded<T, F>(&self, operation: F) -> StoreResult<T>
        where F: Future<Output = mongodb::error::Result<T>> {
        match tokio::time::timeout(self.operation_timeout, operation).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(mongo_err)) if is_duplicate_key(&mongo_err) => Err(StoreError::Conflict(mongo_err.to_string())),
            Ok(Err(mongo_err)) => Err(StoreError::Unavailable(mongo_err.to_string())),
            Err(_) => Err(StoreError::Timeout(self.operation_timeout))
        }
    }

    async fn find_many<T>(&self, collection: &Collection<T>, filter: mongodb::bson::Document, options: Option<FindOptions>) -> StoreResult<Vec<T>>
        where T: DeserializeOwned + Unpin + Send + Sync {
        self.bounded(async {
            let cursor = collection.find(filter, options).await?;
            cursor.try_collect::<Vec<T>>().await
        }).await
    }

    pub async fn find_by_id<T>(&self, id: &str) -> StoreResult<Option<T>>
        where T: DeserializeOwned + IdentifiableDocument + CollectionOwner<T> + Unpin + Send + Sync {
        self.bounded(T::get_collection(self).find_one(doc! { "_id": id }, None)).await
    }

    /// Inserts the record and returns its id.
    pub async fn insert_one<R>(&self, record: &R) -> StoreResult<String>
        where R: CollectionOwner<R> + Serialize + IdentifiableDocument {
        let collection = R::get_collection(self);
        self.bounded(collection.insert_one(record, None)).await?;
        Ok(record.get_id_value())
    }

    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        // one match per bracket position and one scorecard per stage, so racing writers conflict
        let unique = || IndexOptions::builder().unique(true).build();
        let match_index = IndexModel::builder()
            .keys(doc! { "serie": 1, "round": 1, "slot": 1 })
            .options(unique())
            .build();
        let scorecard_index = IndexModel::builder()
            .keys(doc! { "serie": 1, "scorecard": 1 })
            .options(unique())
            .build();
        let signup_index = IndexModel::builder().keys(doc! { "email": 1 }).build();
        self.bounded(self.matches.create_index(match_index, None)).await?;
        self.bounded(self.scorecards.create_index(scorecard_index, None)).await?;
        self.bounded(self.signups.create_index(signup_index, None)).await?;
        Ok(())
    }

    fn sorted_by_slot() -> FindOptions {
        FindOptions::builder().sort(doc! { "round": 1, "slot": 1 }).build()
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY_CODE,
        ErrorKind::BulkWrite(failure) => failure.write_errors.as_ref()
            .map_or(false, |errors| errors.iter().any(|e| e.code == DUPLICATE_KEY_CODE)),
        _ => false
    }
}

fn optional_score(score: Option<i32>) -> Bson {
    match score {
        Some(value) => Bson::Int32(value),
        None => Bson::Null
    }
}

#[async_trait]
impl BracketRepository for Database {
    async fn find_series(&self, series_id: &str) -> StoreResult<Option<Series>> {
        self.find_by_id::<Series>(series_id).await
    }

    async fn insert_series(&self, series: &Series) -> StoreResult<()> {
        self.insert_one(series).await?;
        Ok(())
    }

    async fn mark_series_completed(&self, series_id: &str, champion: &str) -> StoreResult<()> {
        let result = self.bounded(self.series.update_one(
            doc! { "_id": series_id, "completed": false },
            doc! { "$set": { "completed": true, "champion": champion } },
            None
        )).await?;
        if result.matched_count == 0 {
            return Err(StoreError::Conflict(format!("series {} was completed concurrently", series_id)));
        };
        Ok(())
    }

    async fn find_matches(&self, series_id: &str, round: i32) -> StoreResult<Vec<Match>> {
        self.find_many(&self.matches, doc! { "serie": series_id, "round": round }, Some(Database::sorted_by_slot())).await
    }

    async fn find_all_matches(&self, series_id: &str) -> StoreResult<Vec<Match>> {
        self.find_many(&self.matches, doc! { "serie": series_id }, Some(Database::sorted_by_slot())).await
    }

    async fn find_match(&self, match_id: &str) -> StoreResult<Option<Match>> {
        self.find_by_id::<Match>(match_id).await
    }

    async fn insert_matches(&self, matches: &[Match]) -> StoreResult<()> {
        if matches.is_empty() {
            return Ok(());
        };
        self.bounded(self.matches.insert_many(matches, None)).await?;
        Ok(())
    }

    async fn delete_matches(&self, series_id: &str, round: i32) -> StoreResult<u64> {
        let result = self.bounded(self.matches.delete_many(doc! { "serie": series_id, "round": round }, None)).await?;
        Ok(result.deleted_count)
    }

    async fn update_match_score(&self, match_id: &str, previous: ScorePair, revision: &ScoreRevision) -> StoreResult<()> {
        let (previous_p1, previous_p2) = previous;
        let result = self.bounded(self.matches.update_one(
            doc! {
                "_id": match_id,
                "p1_score": optional_score(previous_p1),
                "p2_score": optional_score(previous_p2)
            },
            doc! {
                "$set": { "p1_score": revision.p1_score, "p2_score": revision.p2_score },
                "$push": { "history": {
                    "p1Score": revision.p1_score,
                    "p2Score": revision.p2_score,
                    "recordedAt": revision.recorded_at as i64,
                    "correction": revision.correction
                } }
            },
            None
        )).await?;
        if result.matched_count == 0 {
            return Err(StoreError::Conflict(format!("match {} was modified concurrently", match_id)));
        };
        Ok(())
    }

    async fn find_scorecards(&self, series_id: &str, stage: i32) -> StoreResult<Vec<Scorecard>> {
        self.find_many(&self.scorecards, doc! { "serie": series_id, "scorecard": stage }, None).await
    }

    async fn insert_scorecard(&self, scorecard: &Scorecard) -> StoreResult<()> {
        self.insert_one(scorecard).await?;
        Ok(())
    }

    async fn delete_scorecards(&self, series_id: &str, stage: i32) -> StoreResult<u64> {
        let result = self.bounded(self.scorecards.delete_many(doc! { "serie": series_id, "scorecard": stage }, None)).await?;
        Ok(result.deleted_count)
    }

    async fn save_scorecard(&self, scorecard: &Scorecard, previous_results: &[Vec<Vec<i32>>]) -> StoreResult<()> {
        let result = self.bounded(self.scorecards.replace_one(
            doc! { "_id": scorecard.get_id_value(), "results": Bson::from(previous_results.to_vec()) },
            scorecard,
            None
        )).await?;
        if result.matched_count == 0 {
            return Err(StoreError::Conflict(format!("scorecard {} was modified concurrently", scorecard.id)));
        };
        Ok(())
    }

    async fn insert_signup(&self, signup: &Signup) -> StoreResult<String> {
        self.insert_one(signup).await
    }

    async fn count_signups_by_email(&self, email: &str) -> StoreResult<u64> {
        self.bounded(self.signups.count_documents(doc! { "email": email.to_lowercase() }, None)).await
    }
}

pub async fn ping_database(mongo: &mongodb::Database) -> bool {
    mongo.run_command(doc! { "ping": 1 }, None).await.is_ok()
}

pub async fn connect(
    db_url: &str,
    db_name: &str,
    min_pool_size: Option<u32>,
    max_pool_size: Option<u32>,
    operation_timeout: Duration
) -> anyhow::Result<Database> {
    let mut client_options = ClientOptions::parse(db_url).await?;
    client_options.min_pool_size = min_pool_size;
    client_options.max_pool_size = max_pool_size;
    client_options.connect_timeout = Some(operation_timeout);
    client_options.server_selection_timeout = Some(operation_timeout);

    let client = Client::with_options(client_options)?;
    let db = client.database(db_name);
    if !ping_database(&db).await {
        return Err(anyhow!("Could not connect to the database at {}. Is it running?", db_url));
    };

    let series = db.collection::<Series>(Series::get_collection_name());
    let matches = db.collection::<Match>(Match::get_collection_name());
    let scorecards = db.collection::<Scorecard>(Scorecard::get_collection_name());
    let signups = db.collection::<Signup>(Signup::get_collection_name());

    let database = Database { mongo: db, series, matches, scorecards, signups, operation_timeout };
    if let Err(index_err) = database.ensure_indexes().await {
        warn!("Could not create indexes: {}", index_err);
    };
    info!("Connected to database {} successfully.", db_name);
    Ok(database)
}
