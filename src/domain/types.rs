//! Shared domain enumerations aligned with persisted database enums.

use serde::{Deserialize, Serialize};

/// Layout wrapper for a composed page: boxed constrains the content width,
/// full-bleed leaves it unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "page_layout", rename_all = "snake_case")]
pub enum PageLayout {
    Boxed,
    FullBleed,
}

impl PageLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            PageLayout::Boxed => "boxed",
            PageLayout::FullBleed => "full_bleed",
        }
    }

    /// CSS class applied by the layout template.
    pub fn css_class(self) -> &'static str {
        match self {
            PageLayout::Boxed => "layout-boxed",
            PageLayout::FullBleed => "layout-full-bleed",
        }
    }
}

impl TryFrom<&str> for PageLayout {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "boxed" => Ok(PageLayout::Boxed),
            "full_bleed" => Ok(PageLayout::FullBleed),
            _ => Err(()),
        }
    }
}

/// Which block collection a record belongs to. Blocks for landing pages and
/// cases live in separate tables with identical shapes; the collection tag
/// selects the table and the schema family used for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockCollection {
    LandingPage,
    Case,
}

impl BlockCollection {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockCollection::LandingPage => "landing_page",
            BlockCollection::Case => "case",
        }
    }
}
