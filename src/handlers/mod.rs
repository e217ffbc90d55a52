mod generate;
mod health;
mod metrics;

use axum::extract::FromRequest;

use crate::error::ApiError;

pub use generate::{
    cocktail_handler, dare_handler, debate_handler, most_likely_to_handler,
    never_have_i_ever_handler, roast_handler, truth_handler,
};
pub use health::{API_VERSION, health_handler, root_handler};
pub use metrics::metrics_handler;

// JSON body whose rejections come back as {"detail": ...}
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
