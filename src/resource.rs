use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The fixed set of remote resources tracked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Info,
    StatisticsGlobal,
    StatisticsRatingDistribution,
    StatisticsVerified,
    TemporalYearly,
    TemporalMonthly,
    TemporalDayOfWeek,
    GamesTopReviewed,
    GamesTopRated,
    GamesWorstRated,
    PlatformsStatistics,
    TextLengthVsRating,
    TextPositiveWords,
    TextNegativeWords,
    TextHelpfulVotes,
    UsersTopReviewers,
    OutliersRatings,
    StatsLegacy,
    ProductsTopReviewedNames,
    ProductsTopRatedNames,
}

impl Resource {
    pub const COUNT: usize = 20;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Info,
        Self::StatisticsGlobal,
        Self::StatisticsRatingDistribution,
        Self::StatisticsVerified,
        Self::TemporalYearly,
        Self::TemporalMonthly,
        Self::TemporalDayOfWeek,
        Self::GamesTopReviewed,
        Self::GamesTopRated,
        Self::GamesWorstRated,
        Self::PlatformsStatistics,
        Self::TextLengthVsRating,
        Self::TextPositiveWords,
        Self::TextNegativeWords,
        Self::TextHelpfulVotes,
        Self::UsersTopReviewers,
        Self::OutliersRatings,
        Self::StatsLegacy,
        Self::ProductsTopReviewedNames,
        Self::ProductsTopRatedNames,
    ];

    /// Slot of this resource in the store's record table.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::StatisticsGlobal => "statistics-global",
            Self::StatisticsRatingDistribution => "statistics-rating-distribution",
            Self::StatisticsVerified => "statistics-verified",
            Self::TemporalYearly => "temporal-yearly",
            Self::TemporalMonthly => "temporal-monthly",
            Self::TemporalDayOfWeek => "temporal-day-of-week",
            Self::GamesTopReviewed => "games-top-reviewed",
            Self::GamesTopRated => "games-top-rated",
            Self::GamesWorstRated => "games-worst-rated",
            Self::PlatformsStatistics => "platforms-statistics",
            Self::TextLengthVsRating => "text-length-vs-rating",
            Self::TextPositiveWords => "text-positive-words",
            Self::TextNegativeWords => "text-negative-words",
            Self::TextHelpfulVotes => "text-helpful-votes",
            Self::UsersTopReviewers => "users-top-reviewers",
            Self::OutliersRatings => "outliers-ratings",
            Self::StatsLegacy => "stats-legacy",
            Self::ProductsTopReviewedNames => "products-top-reviewed-names",
            Self::ProductsTopRatedNames => "products-top-rated-names",
        }
    }

    /// Request path on the upstream API, without query string.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Info => "/",
            Self::StatisticsGlobal => "/statistics/global",
            Self::StatisticsRatingDistribution => "/statistics/rating-distribution",
            Self::StatisticsVerified => "/statistics/verified",
            Self::TemporalYearly => "/temporal/yearly",
            Self::TemporalMonthly => "/temporal/monthly",
            Self::TemporalDayOfWeek => "/temporal/day-of-week",
            Self::GamesTopReviewed => "/games/top-reviewed",
            Self::GamesTopRated => "/games/top-rated",
            Self::GamesWorstRated => "/games/worst-rated",
            Self::PlatformsStatistics => "/platforms/statistics",
            Self::TextLengthVsRating => "/text/length-vs-rating",
            Self::TextPositiveWords => "/text/positive-words",
            Self::TextNegativeWords => "/text/negative-words",
            Self::TextHelpfulVotes => "/text/helpful-votes",
            Self::UsersTopReviewers => "/users/top-reviewers",
            Self::OutliersRatings => "/outliers/ratings",
            Self::StatsLegacy => "/stats",
            Self::ProductsTopReviewedNames => "/products/top-reviewed-names",
            Self::ProductsTopRatedNames => "/products/top-rated-names",
        }
    }

    pub const fn ranking(self) -> Option<ProductRanking> {
        match self {
            Self::ProductsTopReviewedNames => Some(ProductRanking::TopReviewed),
            Self::ProductsTopRatedNames => Some(ProductRanking::TopRated),
            _ => None,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{name}`")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl FromStr for Resource {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|resource| resource.name() == s)
            .ok_or_else(|| UnknownName {
                kind: "resource",
                name: s.to_owned(),
            })
    }
}

/// The two product rankings whose names come from a separate, limit-parameterized
/// envelope endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductRanking {
    TopReviewed,
    TopRated,
}

impl ProductRanking {
    pub const fn names_resource(self) -> Resource {
        match self {
            Self::TopReviewed => Resource::ProductsTopReviewedNames,
            Self::TopRated => Resource::ProductsTopRatedNames,
        }
    }

    /// The games statistic that the names are joined onto.
    pub const fn stats_resource(self) -> Resource {
        match self {
            Self::TopReviewed => Resource::GamesTopReviewed,
            Self::TopRated => Resource::GamesTopRated,
        }
    }

    pub fn path_with_limit(self, limit: u32) -> String {
        format!("{}?limit={limit}", self.names_resource().path())
    }
}

impl FromStr for ProductRanking {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-reviewed" => Ok(Self::TopReviewed),
            "top-rated" => Ok(Self::TopRated),
            _ => Err(UnknownName {
                kind: "ranking",
                name: s.to_owned(),
            }),
        }
    }
}

/// Dashboard sections. Opening one loads every resource it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    General,
    Statistics,
    Temporal,
    Games,
    Platforms,
    Text,
    Users,
    Outliers,
    Legacy,
}

impl Page {
    pub const ALL: [Self; 9] = [
        Self::General,
        Self::Statistics,
        Self::Temporal,
        Self::Games,
        Self::Platforms,
        Self::Text,
        Self::Users,
        Self::Outliers,
        Self::Legacy,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Statistics => "statistics",
            Self::Temporal => "temporal",
            Self::Games => "games",
            Self::Platforms => "platforms",
            Self::Text => "text",
            Self::Users => "users",
            Self::Outliers => "outliers",
            Self::Legacy => "legacy",
        }
    }

    pub const fn resources(self) -> &'static [Resource] {
        match self {
            Self::General => &[Resource::Info],
            Self::Statistics => &[
                Resource::StatisticsGlobal,
                Resource::StatisticsRatingDistribution,
                Resource::StatisticsVerified,
                Resource::GamesTopReviewed,
                Resource::GamesTopRated,
                Resource::ProductsTopReviewedNames,
                Resource::ProductsTopRatedNames,
            ],
            Self::Temporal => &[
                Resource::TemporalYearly,
                Resource::TemporalMonthly,
                Resource::TemporalDayOfWeek,
            ],
            Self::Games => &[
                Resource::GamesTopReviewed,
                Resource::GamesTopRated,
                Resource::GamesWorstRated,
                Resource::ProductsTopReviewedNames,
                Resource::ProductsTopRatedNames,
            ],
            Self::Platforms => &[Resource::PlatformsStatistics],
            Self::Text => &[
                Resource::TextLengthVsRating,
                Resource::TextPositiveWords,
                Resource::TextNegativeWords,
                Resource::TextHelpfulVotes,
            ],
            Self::Users => &[Resource::UsersTopReviewers],
            Self::Outliers => &[Resource::OutliersRatings],
            Self::Legacy => &[Resource::StatsLegacy],
        }
    }
}

impl FromStr for Page {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|page| page.name() == s)
            .ok_or_else(|| UnknownName {
                kind: "page",
                name: s.to_owned(),
            })
    }
}
