// 🎬 Scene chain - navigation as data
// The four scenes form a linear chain with mirrored back-edges. Transitions
// live in a table, not in per-scene click handlers, so the chain is a pure
// function that can be tested without any terminal attached.

use crate::data::Listing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Overview,
    NeighbourhoodDetail,
    ListingReviews,
    Insights,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Back,
    Next,
}

/// The whole navigation graph:
/// Overview → Detail → Reviews → Insights, with mirrored back-edges.
/// Overview has no Back; Insights has no Next.
pub const TRANSITIONS: &[(Scene, Action, Scene)] = &[
    (Scene::Overview, Action::Next, Scene::NeighbourhoodDetail),
    (Scene::NeighbourhoodDetail, Action::Next, Scene::ListingReviews),
    (Scene::ListingReviews, Action::Next, Scene::Insights),
    (Scene::NeighbourhoodDetail, Action::Back, Scene::Overview),
    (Scene::ListingReviews, Action::Back, Scene::NeighbourhoodDetail),
    (Scene::Insights, Action::Back, Scene::ListingReviews),
];

/// Look up the next scene for (current, action). `None` means the edge
/// does not exist and the current scene stays active.
pub fn transition(scene: Scene, action: Action) -> Option<Scene> {
    TRANSITIONS
        .iter()
        .find(|(from, a, _)| *from == scene && *a == action)
        .map(|(_, _, to)| *to)
}

impl Scene {
    pub fn has_back(&self) -> bool {
        transition(*self, Action::Back).is_some()
    }

    pub fn has_next(&self) -> bool {
        transition(*self, Action::Next).is_some()
    }

    /// Scene title as shown in the header.
    pub fn title(&self, context: &SceneContext) -> String {
        match self {
            Scene::Overview => "Overview of Listings by Neighbourhood".to_string(),
            Scene::NeighbourhoodDetail => match &context.neighbourhood {
                Some(n) => format!("Listings in {}", n),
                None => "Listings".to_string(),
            },
            Scene::ListingReviews => match &context.listing {
                Some(l) => format!("Reviews for {}", l.name),
                None => "Reviews".to_string(),
            },
            Scene::Insights => "Aggregated Insights".to_string(),
        }
    }
}

/// Immutable selection context passed explicitly into every scene entry.
///
/// This replaces global "current neighbourhood / current listing" variables:
/// a scene is entered with the selection it should show, and the value in
/// hand cannot be mutated behind its back by a later click.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneContext {
    pub neighbourhood: Option<String>,
    pub listing: Option<Listing>,
}

impl SceneContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context with the given neighbourhood selected. Clears any listing
    /// selection: a listing only makes sense inside its own neighbourhood.
    pub fn with_neighbourhood(&self, neighbourhood: &str) -> Self {
        SceneContext {
            neighbourhood: Some(neighbourhood.to_string()),
            listing: None,
        }
    }

    /// Context with the given listing selected (keeps the neighbourhood).
    pub fn with_listing(&self, listing: Listing) -> Self {
        SceneContext {
            neighbourhood: self.neighbourhood.clone(),
            listing: Some(listing),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_chain() {
        assert_eq!(
            transition(Scene::Overview, Action::Next),
            Some(Scene::NeighbourhoodDetail)
        );
        assert_eq!(
            transition(Scene::NeighbourhoodDetail, Action::Next),
            Some(Scene::ListingReviews)
        );
        assert_eq!(
            transition(Scene::ListingReviews, Action::Next),
            Some(Scene::Insights)
        );
    }

    #[test]
    fn test_back_edges_mirror_forward_edges() {
        for &(from, action, to) in TRANSITIONS {
            if action == Action::Next {
                assert_eq!(transition(to, Action::Back), Some(from));
            }
        }
    }

    #[test]
    fn test_chain_endpoints() {
        assert_eq!(transition(Scene::Overview, Action::Back), None);
        assert_eq!(transition(Scene::Insights, Action::Next), None);
        assert!(!Scene::Overview.has_back());
        assert!(!Scene::Insights.has_next());
        assert!(Scene::NeighbourhoodDetail.has_back());
        assert!(Scene::NeighbourhoodDetail.has_next());
    }

    #[test]
    fn test_titles_use_context() {
        let ctx = SceneContext::new().with_neighbourhood("Mitte");
        assert_eq!(
            Scene::NeighbourhoodDetail.title(&ctx),
            "Listings in Mitte"
        );

        let listing = crate::data::Listing {
            id: 1,
            name: "Cozy loft".to_string(),
            neighbourhood: "Mitte".to_string(),
            price: 80.0,
            reviews_per_month: 2.0,
        };
        let ctx = ctx.with_listing(listing);
        assert_eq!(Scene::ListingReviews.title(&ctx), "Reviews for Cozy loft");
    }

    #[test]
    fn test_selecting_neighbourhood_clears_listing() {
        let listing = crate::data::Listing {
            id: 1,
            name: "Cozy loft".to_string(),
            neighbourhood: "Mitte".to_string(),
            price: 80.0,
            reviews_per_month: 2.0,
        };
        let ctx = SceneContext::new()
            .with_neighbourhood("Mitte")
            .with_listing(listing);

        let ctx = ctx.with_neighbourhood("Kreuzberg");

        assert_eq!(ctx.neighbourhood.as_deref(), Some("Kreuzberg"));
        assert!(ctx.listing.is_none());
    }
}
