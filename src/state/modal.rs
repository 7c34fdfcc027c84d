//! Modal dialog state for the terminal front end.

use crate::render::{GalleryItem, RenderedCard};

/// What: Content of the trailer preview dialog.
///
/// Details:
/// - Title and description are derived from the card's display title; `url`
///   is `None` when the record has no trailer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrailerPreview {
    /// `<title> - Episode 1 Preview`.
    pub title: String,
    /// `Watch the exciting preview of <title>`.
    pub description: String,
    /// Trailer page, when known.
    pub url: Option<String>,
}

impl TrailerPreview {
    /// Build the preview for a rendered card.
    #[must_use]
    pub fn for_card(card: &RenderedCard) -> Self {
        Self {
            title: format!("{} - Episode 1 Preview", card.title),
            description: format!("Watch the exciting preview of {}", card.title),
            url: card.trailer_url.clone(),
        }
    }
}

/// Currently open dialog; at most one at a time.
#[derive(Clone, Debug, Default)]
pub enum Modal {
    /// No dialog; keys go to the focused pane.
    #[default]
    None,
    /// Informational message (download results, errors).
    Alert {
        /// Text shown in the dialog body.
        message: String,
    },
    /// Full record view of a grid card.
    Detail { card: Box<RenderedCard> },
    /// Trailer preview of a grid card.
    Trailer(TrailerPreview),
    /// Enlarged gallery image with its captions.
    Image { item: Box<GalleryItem> },
    /// Key binding overview.
    Help,
}

impl Modal {
    /// Whether a dialog is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// URL the `o` key opens for this dialog, if any.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        match self {
            Self::Trailer(t) => t.url.as_deref(),
            Self::Image { item } => Some(&item.image_url),
            Self::Detail { card } => card.trailer_url.as_deref(),
            Self::None | Self::Alert { .. } | Self::Help => None,
        }
    }
}
