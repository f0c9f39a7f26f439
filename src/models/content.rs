use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Creation stamp attached to every extracted catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentMetadata {
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub version: String,
}

impl ContentMetadata {
    pub fn now() -> Self {
        Self { created_at: Utc::now(), version: "1.0".to_string() }
    }
}

/// One deduplicated movie, lifted out of the embedded invoice arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub details: MovieDetails,
    #[serde(rename = "_metadata")]
    pub metadata: ContentMetadata,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    pub year: Option<i64>,
    pub country: String,
    pub color: String,
    pub aspect_ratio: Option<f64>,
    pub content_rating: String,
    pub budget: i64,
    pub gross: i64,
    pub director: CastMember,
    pub cast: MovieCast,
    pub language: String,
    pub genres: Vec<String>,
    pub keywords: Vec<String>,
    pub faces_in_poster: i64,
    pub imdb_score: f64,
    pub imdb_link: String,
    pub critic_reviews: i64,
    pub user_reviews: i64,
    pub voted_users: i64,
    pub facebook_likes: i64,
    pub duration: i64,
}

/// A named person with a Facebook like count: the director or one credited
/// star.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub name: String,
    pub facebook_likes: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieCast {
    pub facebook_likes: i64,
    pub stars: Vec<CastMember>,
}

/// One deduplicated series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "totalSeasons")]
    pub total_seasons: i64,
    #[serde(rename = "totalEpisodes")]
    pub total_episodes: i64,
    #[serde(rename = "avgDuration")]
    pub avg_duration: i64,
    #[serde(rename = "_metadata")]
    pub metadata: ContentMetadata,
}
