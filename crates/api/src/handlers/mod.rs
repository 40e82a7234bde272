//! Request handlers. Each one reads "today"/"now" from the state's clock,
//! calls the matching repository function and publishes a change event
//! after a successful mutation.

pub mod annual_card;
pub mod coach;
pub mod dashboard;
pub mod events;
pub mod private_training;

use serde::Deserialize;

/// `?keyword=` filter shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct KeywordQuery {
    pub keyword: Option<String>,
}
