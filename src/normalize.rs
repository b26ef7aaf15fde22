//! Display rows for each resource, read from the raw JSON with a fixed key
//! priority per field. Every normalizer returns an empty list when the
//! record data is not an array.

use serde::Serialize;
use serde_json::Value;

use crate::{
    resource::Resource,
    util::{as_count, as_label, first_count, first_label, first_number, first_present},
};

const UNKNOWN: &str = "N/A";
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReviews {
    pub game: String,
    pub reviews: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRating {
    pub game: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformCount {
    pub platform: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingBucket {
    pub rating: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifiedCount {
    pub verified: bool,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodCount {
    pub period: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthRating {
    pub length: String,
    pub rating: f64,
    pub avg_length: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpfulVotes {
    pub review: String,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewerCount {
    pub user: String,
    pub reviews: u64,
}

fn rows<T>(data: Option<&Value>, map: impl Fn(&Value) -> T) -> Vec<T> {
    data.and_then(Value::as_array)
        .map(|rows| rows.iter().map(map).collect())
        .unwrap_or_default()
}

fn label_or(row: &Value, keys: &[&str], fallback: &str) -> String {
    first_label(row, keys).unwrap_or_else(|| fallback.to_owned())
}

fn game(row: &Value) -> String {
    label_or(row, &["asin", "game"], UNKNOWN)
}

fn review_count(row: &Value) -> u64 {
    first_count(row, &["review_count", "count"]).unwrap_or(0)
}

/// `games-top-reviewed`
pub fn game_reviews(data: Option<&Value>) -> Vec<GameReviews> {
    rows(data, |row| GameReviews {
        game: game(row),
        reviews: review_count(row),
    })
}

/// `games-top-rated`, `games-worst-rated`
pub fn game_ratings(data: Option<&Value>) -> Vec<GameRating> {
    rows(data, |row| GameRating {
        game: game(row),
        rating: first_number(row, &["avg_rating", "rating", "overall"]).unwrap_or(0.0),
    })
}

/// `outliers-ratings`. The raw star value comes first here, unlike the
/// per-game aggregates.
pub fn outlier_ratings(data: Option<&Value>) -> Vec<GameRating> {
    rows(data, |row| GameRating {
        game: game(row),
        rating: first_number(row, &["overall", "rating"]).unwrap_or(0.0),
    })
}

pub fn platform_counts(data: Option<&Value>) -> Vec<PlatformCount> {
    rows(data, |row| PlatformCount {
        platform: label_or(row, &["platform", "name"], UNKNOWN),
        count: review_count(row),
    })
}

pub fn rating_distribution(data: Option<&Value>) -> Vec<RatingBucket> {
    rows(data, |row| RatingBucket {
        rating: format!("P{}", label_or(row, &["overall", "rating", "value"], "—")),
        count: first_count(row, &["count", "review_count"]).unwrap_or(0),
        percentage: first_number(row, &["percentage", "percent", "pct"]).unwrap_or(0.0),
    })
}

pub fn verified_counts(data: Option<&Value>) -> Vec<VerifiedCount> {
    rows(data, |row| VerifiedCount {
        verified: match row.get("verified") {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(text)) => text == "true",
            _ => false,
        },
        count: review_count(row),
    })
}

pub fn yearly_counts(data: Option<&Value>) -> Vec<PeriodCount> {
    rows(data, |row| PeriodCount {
        period: label_or(row, &["year", "period"], ""),
        count: review_count(row),
    })
}

pub fn monthly_counts(data: Option<&Value>) -> Vec<PeriodCount> {
    rows(data, |row| PeriodCount {
        period: label_or(row, &["month", "period"], ""),
        count: review_count(row),
    })
}

/// Days are numbered 1 (Monday) through 7 (Sunday); anything else is shown as is.
pub fn weekday_counts(data: Option<&Value>) -> Vec<PeriodCount> {
    rows(data, |row| {
        let day = first_present(row, &["day_of_week", "day", "period"]);
        PeriodCount {
            period: day.map_or_else(String::new, weekday_name),
            count: review_count(row),
        }
    })
}

fn weekday_name(day: &Value) -> String {
    let label = as_label(day);
    as_count(day)
        .and_then(|n| usize::try_from(n).ok())
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| WEEKDAYS.get(idx))
        .map_or(label, |name| (*name).to_owned())
}

pub fn length_vs_rating(data: Option<&Value>) -> Vec<LengthRating> {
    rows(data, |row| LengthRating {
        length: label_or(row, &["text_length_bin", "bucket"], ""),
        rating: first_number(row, &["avg_rating", "rating"]).unwrap_or(0.0),
        avg_length: first_number(row, &["avg_length", "length"]).unwrap_or(0.0),
    })
}

/// `text-positive-words`, `text-negative-words`
pub fn word_counts(data: Option<&Value>) -> Vec<WordCount> {
    rows(data, |row| WordCount {
        word: label_or(row, &["word", "token"], ""),
        count: first_count(row, &["frequency", "count"]).unwrap_or(0),
    })
}

pub fn helpful_votes(data: Option<&Value>) -> Vec<HelpfulVotes> {
    rows(data, |row| HelpfulVotes {
        review: label_or(row, &["asin", "review_id"], UNKNOWN),
        votes: first_count(row, &["vote_count", "count"]).unwrap_or(0),
    })
}

pub fn top_reviewers(data: Option<&Value>) -> Vec<ReviewerCount> {
    rows(data, |row| ReviewerCount {
        user: label_or(row, &["reviewerID", "user"], UNKNOWN),
        reviews: review_count(row),
    })
}

/// Display rows of `resource` as JSON. `None` for resources that are shown
/// as a single object rather than a table.
pub fn display_rows(resource: Resource, data: Option<&Value>) -> serde_json::Result<Option<Value>> {
    let rows = match resource {
        Resource::GamesTopReviewed => serde_json::to_value(game_reviews(data))?,
        Resource::GamesTopRated | Resource::GamesWorstRated => {
            serde_json::to_value(game_ratings(data))?
        }
        Resource::OutliersRatings => serde_json::to_value(outlier_ratings(data))?,
        Resource::PlatformsStatistics => serde_json::to_value(platform_counts(data))?,
        Resource::StatisticsRatingDistribution => {
            serde_json::to_value(rating_distribution(data))?
        }
        Resource::StatisticsVerified => serde_json::to_value(verified_counts(data))?,
        Resource::TemporalYearly => serde_json::to_value(yearly_counts(data))?,
        Resource::TemporalMonthly => serde_json::to_value(monthly_counts(data))?,
        Resource::TemporalDayOfWeek => serde_json::to_value(weekday_counts(data))?,
        Resource::TextLengthVsRating => serde_json::to_value(length_vs_rating(data))?,
        Resource::TextPositiveWords | Resource::TextNegativeWords => {
            serde_json::to_value(word_counts(data))?
        }
        Resource::TextHelpfulVotes => serde_json::to_value(helpful_votes(data))?,
        Resource::UsersTopReviewers => serde_json::to_value(top_reviewers(data))?,
        Resource::Info
        | Resource::StatisticsGlobal
        | Resource::StatsLegacy
        | Resource::ProductsTopReviewedNames
        | Resource::ProductsTopRatedNames => return Ok(None),
    };
    Ok(Some(rows))
}
