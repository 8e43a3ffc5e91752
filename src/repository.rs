use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};
use tracing::debug;

use crate::{
    entities::movie,
    error::RepoError,
    models::{Movie, MovieFields},
};

pub type RepoResult<T> = Result<T, RepoError>;

/// Movie persistence. Every method is a single statement against the store.
pub struct MovieRepository {
    db: DatabaseConnection,
}

impl MovieRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, year: Option<i64>) -> RepoResult<Vec<Movie>> {
        let mut query = movie::Entity::find();
        if let Some(year) = year {
            query = query.filter(movie::Column::Year.eq(year));
        }

        let rows = query.order_by_asc(movie::Column::Id).all(&self.db).await?;
        debug!(?year, count = rows.len(), "listed movies");
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn get_by_id(&self, imdb_id: &str) -> RepoResult<Movie> {
        movie::Entity::find()
            .filter(movie::Column::ImdbId.eq(imdb_id))
            .one(&self.db)
            .await?
            .map(Movie::from)
            .ok_or(RepoError::NotFound)
    }

    pub async fn create(&self, movie: &Movie) -> RepoResult<()> {
        let model = movie::ActiveModel {
            id: NotSet,
            imdb_id: Set(movie.imdb_id.clone()),
            title: Set(movie.title.clone()),
            year: Set(movie.year),
            rating: Set(movie.rating),
            is_super_hero: Set(movie.is_super_hero),
        };

        movie::Entity::insert(model).exec_without_returning(&self.db).await?;
        debug!(imdb_id = %movie.imdb_id, "created movie");
        Ok(())
    }

    /// Overwrites title, year and rating. Returns the number of rows touched;
    /// an unknown id touches none and is still `Ok`.
    pub async fn update(&self, imdb_id: &str, fields: MovieFields) -> RepoResult<u64> {
        let result = movie::Entity::update_many()
            .col_expr(movie::Column::Title, Expr::value(fields.title))
            .col_expr(movie::Column::Year, Expr::value(fields.year))
            .col_expr(movie::Column::Rating, Expr::value(fields.rating))
            .filter(movie::Column::ImdbId.eq(imdb_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            debug!(imdb_id, "update matched no movie");
        }
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use super::*;
    use crate::db::connect_in_memory;

    fn movie(imdb_id: &str, title: &str, year: i64) -> Movie {
        Movie {
            imdb_id: imdb_id.to_string(),
            title: title.to_string(),
            year,
            rating: 8.0,
            is_super_hero: false,
        }
    }

    async fn repo() -> MovieRepository {
        MovieRepository::new(connect_in_memory().await)
    }

    #[tokio::test]
    async fn create_then_get() {
        let repo = repo().await;
        let dark_knight = Movie {
            is_super_hero: true,
            rating: 9.0,
            ..movie("tt0468569", "The Dark Knight", 2008)
        };

        repo.create(&dark_knight).await.unwrap();

        assert_eq!(repo.get_by_id("tt0468569").await.unwrap(), dark_knight);
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let repo = repo().await;
        assert!(matches!(repo.get_by_id("tt0000000").await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn duplicate_create_is_a_conflict_and_keeps_first() {
        let repo = repo().await;
        repo.create(&movie("tt0111161", "The Shawshank Redemption", 1994)).await.unwrap();

        let err = repo.create(&movie("tt0111161", "Imposter", 2001)).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict));

        let stored = repo.get_by_id("tt0111161").await.unwrap();
        assert_eq!(stored.title, "The Shawshank Redemption");
        assert_eq!(stored.year, 1994);
    }

    #[tokio::test]
    async fn list_filters_by_year() {
        let repo = repo().await;
        repo.create(&movie("tt0111161", "The Shawshank Redemption", 1994)).await.unwrap();
        repo.create(&movie("tt0110912", "Pulp Fiction", 1994)).await.unwrap();
        repo.create(&movie("tt0068646", "The Godfather", 1972)).await.unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 3);

        let nineties: Vec<_> =
            repo.list(Some(1994)).await.unwrap().into_iter().map(|m| m.imdb_id).collect();
        assert_eq!(nineties, ["tt0111161", "tt0110912"]);

        assert!(repo.list(Some(2020)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_overwrites_mutable_fields_only() {
        let repo = repo().await;
        let original = Movie { is_super_hero: true, ..movie("tt0372784", "Batman Begins", 2005) };
        repo.create(&original).await.unwrap();

        let fields =
            MovieFields { title: "Batman Begins (IMAX)".to_string(), year: 2006, rating: 8.2 };
        assert_eq!(repo.update("tt0372784", fields).await.unwrap(), 1);

        let stored = repo.get_by_id("tt0372784").await.unwrap();
        assert_eq!(stored.title, "Batman Begins (IMAX)");
        assert_eq!(stored.year, 2006);
        assert_eq!(stored.rating, 8.2);
        assert_eq!(stored.imdb_id, original.imdb_id);
        assert!(stored.is_super_hero);
    }

    #[tokio::test]
    async fn update_unknown_touches_nothing() {
        let repo = repo().await;
        let fields = MovieFields { title: "Ghost".to_string(), year: 1990, rating: 7.1 };

        assert_eq!(repo.update("tt0099653", fields).await.unwrap(), 0);
        assert!(matches!(repo.get_by_id("tt0099653").await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn store_failures_surface_as_query_errors() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = MovieRepository::new(db);

        assert!(matches!(repo.list(None).await, Err(RepoError::Query(_))));
    }
}
