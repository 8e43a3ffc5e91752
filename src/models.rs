use serde::{Deserialize, Serialize};

use crate::entities::movie;

/// A movie as it travels over the wire. The storage row id never leaves the
/// repository.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: i64,
    pub rating: f64,
    #[serde(rename = "isSuperHero")]
    pub is_super_hero: bool,
}

impl From<movie::Model> for Movie {
    fn from(row: movie::Model) -> Self {
        Self {
            imdb_id: row.imdb_id,
            title: row.title,
            year: row.year,
            rating: row.rating,
            is_super_hero: row.is_super_hero,
        }
    }
}

/// The columns an update is allowed to overwrite.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieFields {
    pub title: String,
    pub year: i64,
    pub rating: f64,
}

/// Body of `PUT /movies/{imdbID}`. Only `title`, `year` and `rating` are
/// applied; the row is located by the path id.
#[derive(Debug, Deserialize)]
pub struct UpdateMovie {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    pub title: String,
    pub year: i64,
    pub rating: f64,
    #[serde(rename = "isSuperHero", default)]
    pub is_super_hero: Option<bool>,
}

impl UpdateMovie {
    pub fn fields(&self) -> MovieFields {
        MovieFields { title: self.title.clone(), year: self.year, rating: self.rating }
    }

    /// The movie echoed back to the client after an update.
    pub fn into_movie(self, imdb_id: String) -> Movie {
        Movie {
            imdb_id,
            title: self.title,
            year: self.year,
            rating: self.rating,
            is_super_hero: self.is_super_hero.unwrap_or_default(),
        }
    }
}
