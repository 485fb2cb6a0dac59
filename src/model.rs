//! Wire shapes of the three resources, decoded straight from the joined SELECT.

use crate::entity::{EntityDef, DIRECTOR, GENRE, MOVIE};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

/// A row type served by the generic repository and handlers.
pub trait Resource:
    for<'r> FromRow<'r, SqliteRow> + Serialize + Send + Sync + Unpin + 'static
{
    const ENTITY: &'static EntityDef;

    fn id(&self) -> i64;
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Director {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Genre {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i64>,
    pub rating: Option<f64>,
    pub genre_id: Option<i64>,
    pub director_id: Option<i64>,
    /// Null when `director_id` is null or points at a deleted director.
    pub director_name: Option<String>,
    pub genre_name: Option<String>,
}

impl Resource for Director {
    const ENTITY: &'static EntityDef = &DIRECTOR;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Genre {
    const ENTITY: &'static EntityDef = &GENRE;

    fn id(&self) -> i64 {
        self.id
    }
}

impl Resource for Movie {
    const ENTITY: &'static EntityDef = &MOVIE;

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn movie_without_director_serializes_null_name() {
        let movie = Movie {
            id: 1,
            title: Some("Inception".into()),
            description: None,
            trailer: None,
            year: Some(2010),
            rating: Some(8.8),
            genre_id: None,
            director_id: None,
            director_name: None,
            genre_name: None,
        };
        let v = serde_json::to_value(&movie).unwrap();
        assert_eq!(v["director_name"], json!(null));
        assert_eq!(v["rating"], json!(8.8));
        assert_eq!(v.as_object().unwrap().len(), 10);
    }
}
