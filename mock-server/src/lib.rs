use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

pub const API_PREFIX: &str = "/api/v1";

const IMAGE_BASE: &str = "https://food-delivery.umain.io/images";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub image_url: String,
    pub delivery_time_minutes: i64,
    #[serde(rename = "filterIds")]
    pub filter_ids: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Filter {
    pub id: String,
    pub name: String,
    pub image_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RestaurantStatus {
    pub restaurant_id: String,
    pub is_currently_open: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RestaurantsResponse {
    pub restaurants: Vec<Restaurant>,
}

/// Everything the server can answer with. Read-only once built.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub restaurants: Vec<Restaurant>,
    pub filters: HashMap<String, Filter>,
    pub open: HashMap<String, bool>,
}

pub type Db = Arc<Catalog>;

pub const TOP_RATED: &str = "5c64dea3-a4ac-4151-a2e3-42e7919a925d";
pub const FAST_FOOD: &str = "614fd642-3fa6-4f15-8786-dd3a8358cd78";
pub const TAKE_OUT: &str = "c67cd8a3-f191-4083-ad28-741659f214d7";
pub const FAST_DELIVERY: &str = "23a38556-779e-4a3b-a75b-fcbc7a1c7a20";
pub const EAT_IN: &str = "0017e59c-4407-453f-a5be-901695708015";

impl Catalog {
    /// Fixture data shaped like the production API.
    pub fn seeded() -> Self {
        let mut catalog = Catalog::default();

        for (id, name, image) in [
            (TOP_RATED, "Top Rated", "filter_top_rated.png"),
            (FAST_FOOD, "Fast food", "filter_fast_food.png"),
            (TAKE_OUT, "Take-Out", "filter_take_out.png"),
            (FAST_DELIVERY, "Fast delivery", "filter_fast_delivery.png"),
            (EAT_IN, "Eat-in", "filter_eat_in.png"),
        ] {
            catalog.add_filter(Filter {
                id: id.to_string(),
                name: name.to_string(),
                image_url: format!("{IMAGE_BASE}/filter/{image}"),
            });
        }

        let rows: [(&str, &str, f64, &str, i64, &[&str], bool); 5] = [
            (
                "7450001",
                r#"Wayne "Chad Broski" Burgers"#,
                4.6,
                "burgers.png",
                9,
                &[TOP_RATED, FAST_FOOD, TAKE_OUT, FAST_DELIVERY],
                true,
            ),
            ("7450002", "Emilia's Fancy Food", 4.2, "fancy_food.png", 45, &[EAT_IN, TOP_RATED], false),
            ("7450003", "Pizza Palace", 4.0, "pizza.png", 25, &[FAST_FOOD, TAKE_OUT], true),
            ("7450004", "Sushi Zen", 4.8, "sushi.png", 70, &[TOP_RATED, EAT_IN], true),
            ("7450005", "Taco Corner", 3.9, "tacos.png", 15, &[FAST_FOOD, FAST_DELIVERY], false),
        ];
        for (id, name, rating, image, minutes, filter_ids, open) in rows {
            catalog.add_restaurant(
                Restaurant {
                    id: id.to_string(),
                    name: name.to_string(),
                    rating,
                    image_url: format!("{IMAGE_BASE}/restaurant/{image}"),
                    delivery_time_minutes: minutes,
                    filter_ids: filter_ids.iter().map(|s| s.to_string()).collect(),
                },
                open,
            );
        }

        catalog
    }

    pub fn add_filter(&mut self, filter: Filter) {
        self.filters.insert(filter.id.clone(), filter);
    }

    pub fn add_restaurant(&mut self, restaurant: Restaurant, open: bool) {
        self.open.insert(restaurant.id.clone(), open);
        self.restaurants.push(restaurant);
    }
}

pub fn app() -> Router {
    app_with(Catalog::seeded())
}

pub fn app_with(catalog: Catalog) -> Router {
    let db: Db = Arc::new(catalog);
    let api = Router::new()
        .route("/restaurants", get(list_restaurants))
        .route("/filter/{id}", get(get_filter))
        .route("/open/{id}", get(get_status));
    Router::new().nest(API_PREFIX, api).with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Catalog::seeded()).await
}

pub async fn serve(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(catalog)).await
}

async fn list_restaurants(State(db): State<Db>) -> Json<RestaurantsResponse> {
    log::debug!("GET restaurants ({})", db.restaurants.len());
    Json(RestaurantsResponse {
        restaurants: db.restaurants.clone(),
    })
}

async fn get_filter(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Filter>, StatusCode> {
    db.filters.get(&id).cloned().map(Json).ok_or_else(|| {
        log::warn!("unknown filter {id}");
        StatusCode::NOT_FOUND
    })
}

async fn get_status(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<RestaurantStatus>, StatusCode> {
    let open = db.open.get(&id).copied().ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(RestaurantStatus {
        restaurant_id: id,
        is_currently_open: open,
    }))
}
