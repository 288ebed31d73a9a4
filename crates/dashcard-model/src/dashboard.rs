//! Dashboards and views
//!
//! A dashboard owns an ordered sequence of views; each view owns its
//! cards exclusively (ownership is a tree, never shared across views).

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::card::Card;
use crate::ids::ViewId;

/// A named page containing an ordered list of cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    /// Unique id within the owning dashboard
    pub id: ViewId,
    /// Display title
    pub title: Option<String>,
    /// Opaque navigation path, passed through from the document
    pub path: Option<String>,
    /// Opaque icon reference, passed through from the document
    pub icon: Option<String>,
    /// The view's cards, in display order
    pub cards: Vec<Card>,
}

impl View {
    /// Create an empty view with a fresh generated id
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ViewId::generate(),
            title: Some(title.into()),
            path: None,
            icon: None,
            cards: Vec::new(),
        }
    }

    /// With an explicit id (imported documents keep theirs)
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ViewId>) -> Self {
        self.id = id.into();
        self
    }

    /// With a card appended
    #[inline]
    #[must_use]
    pub fn with_card(mut self, card: Card) -> Self {
        self.cards.push(card);
        self
    }

    /// Total number of cards in the view, nested children included
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.iter().map(Card::subtree_len).sum()
    }
}

/// The root document: an ordered sequence of views
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dashboard {
    /// Display title
    pub title: Option<String>,
    /// Views in navigation order
    pub views: Vec<View>,
}

impl Dashboard {
    /// Create an empty dashboard
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// With a view appended
    #[inline]
    #[must_use]
    pub fn with_view(mut self, view: View) -> Self {
        self.views.push(view);
        self
    }

    /// Find a view by id
    #[must_use]
    pub fn view(&self, id: &ViewId) -> Option<&View> {
        self.views.iter().find(|v| &v.id == id)
    }

    /// Find a view by id, mutably
    pub fn view_mut(&mut self, id: &ViewId) -> Option<&mut View> {
        self.views.iter_mut().find(|v| &v.id == id)
    }

    /// Check the unique-view-id invariant
    ///
    /// Parsing tolerates duplicate ids (documents arrive from outside);
    /// editor operations refuse to create them.
    #[must_use]
    pub fn view_ids_unique(&self) -> bool {
        let mut seen = HashSet::new();
        self.views.iter().all(|v| seen.insert(&v.id))
    }
}
