//! Deep-link entry point.
//!
//! An external `app://open?name=...&img=...&ingredients=...&directions=...`
//! URL synthesizes a [`Drink`] that the UI layer shows as a pending detail
//! request. Missing parameters default to the empty string.

use thiserror::Error;
use url::Url;

use crate::models::Drink;

#[derive(Debug, Error)]
pub enum DeepLinkError {
    #[error("invalid deep link URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Synthesize a drink from a deep-link URL's query parameters.
pub fn parse_drink_link(link: &str) -> Result<Drink, DeepLinkError> {
    let url = Url::parse(link)?;

    let mut name = String::new();
    let mut img = String::new();
    let mut ingredients = String::new();
    let mut directions = String::new();

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "name" => name = value.into_owned(),
            "img" => img = value.into_owned(),
            "ingredients" => ingredients = value.into_owned(),
            "directions" => directions = value.into_owned(),
            _ => {}
        }
    }

    Ok(Drink::new(name, img, ingredients, directions))
}
