//! Resource CRUD routes: `/<segment>/` for list and create, `/<segment>/:id` for the rest.
//! The collection is also served without the trailing slash.

use crate::handlers::{create, delete, list, read, update};
use crate::model::{Director, Genre, Movie, Resource};
use crate::state::AppState;
use axum::{routing::get, Router};

fn resource_routes<T: Resource>() -> Router<AppState> {
    let collection = format!("/{}", T::ENTITY.path_segment);
    Router::new()
        .route(&collection, get(list::<T>).post(create::<T>))
        .route(&format!("{}/", collection), get(list::<T>).post(create::<T>))
        .route(
            &format!("{}/:id", collection),
            get(read::<T>).put(update::<T>).delete(delete::<T>),
        )
}

pub fn entity_routes() -> Router<AppState> {
    Router::new()
        .merge(resource_routes::<Movie>())
        .merge(resource_routes::<Director>())
        .merge(resource_routes::<Genre>())
}
