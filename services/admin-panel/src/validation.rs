use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::repositories::Catalog;

/// Inclusive character-count bounds for a free-text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextBounds {
     pub min: usize,
     pub max: usize,
}

impl TextBounds {
     pub const fn new(min: usize, max: usize) -> Self {
          Self { min, max }
     }
}

pub const USERNAME: TextBounds = TextBounds::new(3, 50);
pub const PASSWORD: TextBounds = TextBounds::new(6, 100);
pub const GAME_NAME: TextBounds = TextBounds::new(3, 255);
pub const GAME_DESCRIPTION: TextBounds = TextBounds::new(10, 1000);
pub const CATEGORY_NAME: TextBounds = TextBounds::new(3, 100);
pub const CATEGORY_DESCRIPTION: TextBounds = TextBounds::new(10, 500);
pub const PLATFORM_NAME: TextBounds = TextBounds::new(2, 100);
pub const PLATFORM_TYPE: TextBounds = TextBounds::new(2, 50);
pub const PLATFORM_DESCRIPTION: TextBounds = TextBounds::new(5, 500);
pub const REVIEW_TEXT: TextBounds = TextBounds::new(1, 500);

pub const MIN_RELEASE_YEAR: i32 = 1990;
pub const MAX_RELEASE_YEAR: i32 = 2100;
pub const MIN_MARK: i32 = 1;
pub const MAX_MARK: i32 = 10;
pub const MAX_IMAGE_URL_LEN: usize = 500;

static IMAGE_URL: LazyLock<Regex> =
     LazyLock::new(|| Regex::new(r"^https?://\S+$").expect("image URL pattern compiles"));

/// Entities an operator can pick by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
     User,
     Game,
     Platform,
     Category,
     Review,
}

impl EntityKind {
     pub fn label(&self) -> &'static str {
          match self {
               EntityKind::User => "user",
               EntityKind::Game => "game",
               EntityKind::Platform => "platform",
               EntityKind::Category => "category",
               EntityKind::Review => "review",
          }
     }

     pub fn title(&self) -> &'static str {
          match self {
               EntityKind::User => "User",
               EntityKind::Game => "Game",
               EntityKind::Platform => "Platform",
               EntityKind::Category => "Category",
               EntityKind::Review => "Review",
          }
     }
}

/// True when `id` is positive and `lookup` finds a row for it.
///
/// A failed lookup counts as "does not exist"; the operator is asked again.
pub fn validate_identifier<T, F>(id: i32, lookup: F) -> bool
where
     F: FnOnce(i32) -> Result<Option<T>, StoreError>,
{
     if id <= 0 {
          return false;
     }
     match lookup(id) {
          Ok(found) => found.is_some(),
          Err(e) => {
               log::warn!("identifier lookup for {} failed: {}", id, e);
               false
          }
     }
}

/// [`validate_identifier`] against the repository that owns `kind`.
pub fn identifier_exists(catalog: &Catalog, kind: EntityKind, id: i32) -> bool {
     match kind {
          EntityKind::User => validate_identifier(id, |id| catalog.users.get_by_id(id)),
          EntityKind::Game => validate_identifier(id, |id| catalog.games.get_by_id(id)),
          EntityKind::Platform => validate_identifier(id, |id| catalog.platforms.get_by_id(id)),
          EntityKind::Category => validate_identifier(id, |id| catalog.categories.get_by_id(id)),
          EntityKind::Review => validate_identifier(id, |id| catalog.reviews.get_by_id(id)),
     }
}

pub fn validate_mark(mark: i32) -> bool {
     (MIN_MARK..=MAX_MARK).contains(&mark)
}

/// Length is counted in characters after trimming; blank input never passes, even with `min == 0`.
pub fn validate_text(input: &str, bounds: TextBounds) -> bool {
     let len = input.trim().chars().count();
     len >= 1 && len >= bounds.min && len <= bounds.max
}

pub fn validate_year(year: i32) -> bool {
     (MIN_RELEASE_YEAR..=MAX_RELEASE_YEAR).contains(&year)
}

pub fn validate_non_negative(amount: Decimal) -> bool {
     amount >= Decimal::ZERO
}

pub fn validate_image_url(url: &str) -> bool {
     url.chars().count() <= MAX_IMAGE_URL_LEN && IMAGE_URL.is_match(url)
}

pub fn parse_release_date(input: &str) -> Option<NaiveDate> {
     NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}
