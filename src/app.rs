// 🎛️ Scene controller
// Owns the current scene, its context, and its freshly-loaded dataset.
// Exactly one scene's view is alive at a time; entering a scene re-reads
// its flat files, so there is no cache to invalidate and no stale
// in-flight fetch that can render into a replaced scene.

use crate::data::{self, Listing, Review};
use crate::geo::{self, RegionCollection};
use crate::pipeline::{self, NeighbourhoodInsight};
use crate::scene::{transition, Action, Scene, SceneContext};
use anyhow::Result;
use std::path::PathBuf;

/// The active scene's dataset. `Failed` is the display fallback for a
/// load error: the controller gets a typed Result and shows the message
/// instead of leaving the panel blank.
#[derive(Debug, Clone)]
pub enum SceneView {
    Overview { regions: RegionCollection },
    Detail { listings: Vec<Listing> },
    Reviews { reviews: Vec<Review> },
    Insights { insights: Vec<NeighbourhoodInsight> },
    Failed { message: String },
}

pub struct App {
    data_dir: PathBuf,
    pub scene: Scene,
    pub context: SceneContext,
    pub view: SceneView,
    pub selected: Option<usize>,
}

impl App {
    /// Open the viewer on the overview scene.
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        let mut app = App {
            data_dir: data_dir.into(),
            scene: Scene::Overview,
            context: SceneContext::new(),
            view: SceneView::Failed {
                message: "not loaded".to_string(),
            },
            selected: None,
        };
        app.enter(Scene::Overview, SceneContext::new());
        app
    }

    /// Make `scene` the single active scene, with `context` as its
    /// selection state, loading its dataset fresh from disk.
    pub fn enter(&mut self, scene: Scene, context: SceneContext) {
        self.view = match self.load_view(scene, &context) {
            Ok(view) => view,
            Err(err) => SceneView::Failed {
                message: format!("{:#}", err),
            },
        };
        self.scene = scene;
        self.context = context;
        self.selected = if self.item_count() > 0 { Some(0) } else { None };
    }

    fn load_view(&self, scene: Scene, context: &SceneContext) -> Result<SceneView> {
        match scene {
            Scene::Overview => {
                let regions = geo::load_regions(self.data_dir.join("neighbourhoods.geojson"))?;
                Ok(SceneView::Overview { regions })
            }
            Scene::NeighbourhoodDetail => {
                let all = data::load_listings(self.data_dir.join("listings.csv"))?;
                let listings = match &context.neighbourhood {
                    Some(n) => pipeline::listings_in(&all, n),
                    None => Vec::new(),
                };
                Ok(SceneView::Detail { listings })
            }
            Scene::ListingReviews => {
                let all = data::load_reviews(self.data_dir.join("reviews.csv"))?;
                let reviews = match &context.listing {
                    Some(l) => pipeline::reviews_for(&all, l.id),
                    None => Vec::new(),
                };
                Ok(SceneView::Reviews { reviews })
            }
            Scene::Insights => {
                let all = data::load_listings(self.data_dir.join("listings.csv"))?;
                Ok(SceneView::Insights {
                    insights: pipeline::aggregate_by_neighbourhood(&all),
                })
            }
        }
    }

    /// Follow the Next edge, if the current scene has one. The selection
    /// travels in the explicit context, read here at action time.
    pub fn advance(&mut self) {
        if let Some(next) = transition(self.scene, Action::Next) {
            self.enter(next, self.context.clone());
        }
    }

    /// Follow the Back edge, if the current scene has one.
    pub fn retreat(&mut self) {
        if let Some(prev) = transition(self.scene, Action::Back) {
            self.enter(prev, self.context.clone());
        }
    }

    /// Act on the highlighted item: selecting a neighbourhood opens its
    /// detail scene, selecting a listing opens its reviews, and a
    /// selection on the reviews scene moves on to the insights.
    pub fn select_current(&mut self) {
        let target = match (&self.view, self.selected) {
            (SceneView::Overview { regions }, Some(i)) => regions.regions.get(i).map(|r| {
                (
                    Scene::NeighbourhoodDetail,
                    self.context.with_neighbourhood(&r.name),
                )
            }),
            (SceneView::Detail { listings }, Some(i)) => listings.get(i).map(|l| {
                (
                    Scene::ListingReviews,
                    self.context.with_listing(l.clone()),
                )
            }),
            (SceneView::Reviews { .. }, _) => {
                Some((Scene::Insights, self.context.clone()))
            }
            _ => None,
        };

        if let Some((scene, context)) = target {
            self.enter(scene, context);
        }
    }

    /// Number of selectable items in the active view.
    pub fn item_count(&self) -> usize {
        match &self.view {
            SceneView::Overview { regions } => regions.regions.len(),
            SceneView::Detail { listings } => listings.len(),
            SceneView::Reviews { reviews } => reviews.len(),
            SceneView::Insights { insights } => insights.len(),
            SceneView::Failed { .. } => 0,
        }
    }

    pub fn next_item(&mut self) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    pub fn previous_item(&mut self) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.selected = Some(i);
    }

    pub fn title(&self) -> String {
        self.scene.title(&self.context)
    }
}

// ============================================================================
// TESTS
// ============================================================================
