// 📊 Data pipeline - filter and aggregate
// The scene controller hands each scene's dataset through here before it
// reaches the chart surface. Filters are order-preserving; aggregates are
// computed fresh on every visit, never stored.

use crate::data::{Listing, Review};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Per-neighbourhood summary, derived on demand for the insights scene.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighbourhoodInsight {
    pub neighbourhood: String,
    pub listing_count: usize,
    pub avg_price: f64,
    pub avg_reviews_per_month: f64,
}

/// Listings in the given neighbourhood, in dataset order.
pub fn listings_in(listings: &[Listing], neighbourhood: &str) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| l.neighbourhood == neighbourhood)
        .cloned()
        .collect()
}

/// Reviews for the given listing, in dataset order.
pub fn reviews_for(reviews: &[Review], listing_id: i64) -> Vec<Review> {
    reviews
        .iter()
        .filter(|r| r.listing_id == listing_id)
        .cloned()
        .collect()
}

/// Group listings by neighbourhood (first-seen order) and compute the
/// arithmetic mean of price and reviews-per-month per group.
///
/// A neighbourhood appears in the result only if it has at least one
/// listing, so every mean is over a non-empty group and always defined.
pub fn aggregate_by_neighbourhood(listings: &[Listing]) -> Vec<NeighbourhoodInsight> {
    // (count, price sum, reviews/month sum) per neighbourhood
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (usize, f64, f64)> = HashMap::new();

    for listing in listings {
        let entry = groups
            .entry(listing.neighbourhood.clone())
            .or_insert_with(|| {
                order.push(listing.neighbourhood.clone());
                (0, 0.0, 0.0)
            });
        entry.0 += 1;
        entry.1 += listing.price;
        entry.2 += listing.reviews_per_month;
    }

    order
        .into_iter()
        .map(|neighbourhood| {
            let (count, price_sum, rpm_sum) = groups[&neighbourhood];
            NeighbourhoodInsight {
                neighbourhood,
                listing_count: count,
                avg_price: price_sum / count as f64,
                avg_reviews_per_month: rpm_sum / count as f64,
            }
        })
        .collect()
}

// ============================================================================
// AXIS DOMAINS
// Upper bounds for the [0, max] domains handed to the chart axes.
// ============================================================================

pub fn max_price(listings: &[Listing]) -> f64 {
    listings.iter().map(|l| l.price).fold(0.0, f64::max)
}

pub fn max_reviews_per_month(listings: &[Listing]) -> f64 {
    listings
        .iter()
        .map(|l| l.reviews_per_month)
        .fold(0.0, f64::max)
}

pub fn max_avg_price(insights: &[NeighbourhoodInsight]) -> f64 {
    insights.iter().map(|i| i.avg_price).fold(0.0, f64::max)
}

/// First and last review date, or `None` when there are no reviews.
pub fn date_extent(reviews: &[Review]) -> Option<(NaiveDate, NaiveDate)> {
    let min = reviews.iter().map(|r| r.date).min()?;
    let max = reviews.iter().map(|r| r.date).max()?;
    Some((min, max))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_listing(id: i64, neighbourhood: &str, price: f64, rpm: f64) -> Listing {
        Listing {
            id,
            name: format!("Listing {}", id),
            neighbourhood: neighbourhood.to_string(),
            price,
            reviews_per_month: rpm,
        }
    }

    fn create_test_review(listing_id: i64, date: &str, rating: f64) -> Review {
        Review {
            listing_id,
            date: date.parse().unwrap(),
            rating,
        }
    }

    #[test]
    fn test_filter_is_order_preserving_subset() {
        let listings = vec![
            create_test_listing(1, "Mitte", 80.0, 2.0),
            create_test_listing(2, "Kreuzberg", 60.0, 1.0),
            create_test_listing(3, "Mitte", 120.0, 3.0),
            create_test_listing(4, "Mitte", 90.0, 0.5),
        ];

        let filtered = listings_in(&listings, "Mitte");

        assert_eq!(
            filtered.iter().map(|l| l.id).collect::<Vec<_>>(),
            vec![1, 3, 4]
        );
        assert!(filtered.iter().all(|l| listings.contains(l)));
    }

    #[test]
    fn test_filter_no_matches_is_empty() {
        let listings = vec![create_test_listing(1, "Mitte", 80.0, 2.0)];
        assert!(listings_in(&listings, "Atlantis").is_empty());
    }

    #[test]
    fn test_aggregate_means_per_neighbourhood() {
        // Two neighbourhoods, prices {10, 20} and {30}
        let listings = vec![
            create_test_listing(1, "A", 10.0, 1.0),
            create_test_listing(2, "A", 20.0, 3.0),
            create_test_listing(3, "B", 30.0, 2.0),
        ];

        let insights = aggregate_by_neighbourhood(&listings);

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].neighbourhood, "A");
        assert_eq!(insights[0].listing_count, 2);
        assert_eq!(insights[0].avg_price, 15.0);
        assert_eq!(insights[0].avg_reviews_per_month, 2.0);
        assert_eq!(insights[1].neighbourhood, "B");
        assert_eq!(insights[1].avg_price, 30.0);
    }

    #[test]
    fn test_aggregate_first_seen_order() {
        let listings = vec![
            create_test_listing(1, "Neukölln", 40.0, 1.0),
            create_test_listing(2, "Mitte", 80.0, 2.0),
            create_test_listing(3, "Neukölln", 60.0, 1.0),
        ];

        let insights = aggregate_by_neighbourhood(&listings);

        assert_eq!(
            insights
                .iter()
                .map(|i| i.neighbourhood.as_str())
                .collect::<Vec<_>>(),
            vec!["Neukölln", "Mitte"]
        );
    }

    #[test]
    fn test_aggregate_mean_counts_only_matching_listings() {
        let listings = vec![
            create_test_listing(1, "Mitte", 100.0, 2.0),
            create_test_listing(2, "Kreuzberg", 999.0, 9.0),
            create_test_listing(3, "Mitte", 200.0, 4.0),
        ];

        let insights = aggregate_by_neighbourhood(&listings);
        let mitte = insights
            .iter()
            .find(|i| i.neighbourhood == "Mitte")
            .unwrap();

        assert_eq!(mitte.avg_price, 150.0);
        assert_eq!(mitte.avg_reviews_per_month, 3.0);
    }

    #[test]
    fn test_aggregate_never_emits_empty_groups() {
        // An absent neighbourhood simply has no entry; no NaN rows.
        let insights = aggregate_by_neighbourhood(&[]);
        assert!(insights.is_empty());

        let listings = vec![create_test_listing(1, "Mitte", 50.0, 1.0)];
        let insights = aggregate_by_neighbourhood(&listings);
        assert!(insights.iter().all(|i| i.avg_price.is_finite()));
        assert!(!insights.iter().any(|i| i.neighbourhood == "Atlantis"));
    }

    #[test]
    fn test_reviews_for_listing() {
        let reviews = vec![
            create_test_review(101, "2023-01-10", 4.0),
            create_test_review(202, "2023-01-11", 2.0),
            create_test_review(101, "2023-02-01", 5.0),
        ];

        let filtered = reviews_for(&reviews, 101);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].rating, 4.0);
        assert_eq!(filtered[1].rating, 5.0);
    }

    #[test]
    fn test_date_extent() {
        let reviews = vec![
            create_test_review(1, "2023-06-01", 3.0),
            create_test_review(1, "2023-01-15", 4.0),
            create_test_review(1, "2023-09-30", 5.0),
        ];

        let (first, last) = date_extent(&reviews).unwrap();
        assert_eq!(first, "2023-01-15".parse().unwrap());
        assert_eq!(last, "2023-09-30".parse().unwrap());

        assert!(date_extent(&[]).is_none());
    }

    #[test]
    fn test_axis_maxima() {
        let listings = vec![
            create_test_listing(1, "A", 10.0, 0.2),
            create_test_listing(2, "A", 75.0, 4.5),
        ];

        assert_eq!(max_price(&listings), 75.0);
        assert_eq!(max_reviews_per_month(&listings), 4.5);
        assert_eq!(max_price(&[]), 0.0);

        let insights = aggregate_by_neighbourhood(&listings);
        assert_eq!(max_avg_price(&insights), 42.5);
    }
}
