//! Product reviews and moderation.
//!
//! Reviews are the only mutable back-office records. The book lives behind a
//! lock in [`crate::state::AppState`]; changes last until the process exits.

use chrono::NaiveDate;
use proscience_core::{ReviewId, ReviewStatus};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::{contains_ci, normalize_search};

/// Highest star rating.
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: ReviewId,
    pub product_name: String,
    pub product_slug: String,
    pub customer_name: String,
    pub customer_email: String,
    /// 1 to 5 stars.
    pub rating: u8,
    pub comment: String,
    pub submitted_on: NaiveDate,
    pub status: ReviewStatus,
    /// Whether the reviewer bought the product.
    pub verified: bool,
}

impl Review {
    /// Rating as filled and empty stars, e.g. "★★★★☆".
    #[must_use]
    pub fn stars(&self) -> String {
        let filled = self.rating.min(MAX_RATING);
        let mut stars = "★".repeat(usize::from(filled));
        stars.push_str(&"☆".repeat(usize::from(MAX_RATING - filled)));
        stars
    }

    fn matches(&self, status: Option<ReviewStatus>, needle: Option<&str>) -> bool {
        if status.is_some_and(|status| status != self.status) {
            return false;
        }
        needle.is_none_or(|needle| {
            contains_ci(&self.product_name, needle)
                || contains_ci(&self.customer_name, needle)
                || contains_ci(&self.comment, needle)
        })
    }
}

/// Review list filter. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub status: Option<ReviewStatus>,
    pub search: Option<String>,
}

/// Moderation counts across every review, regardless of filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewStats {
    pub total: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
    /// Mean rating to one decimal place; zero with no reviews.
    pub average_rating: Decimal,
}

/// The review collection.
#[derive(Debug, Clone, Default)]
pub struct ReviewBook {
    reviews: Vec<Review>,
}

impl ReviewBook {
    #[must_use]
    pub const fn new(reviews: Vec<Review>) -> Self {
        Self { reviews }
    }

    /// The six reviews the shop launched with.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(REVIEWS.iter().filter_map(build).collect())
    }

    #[must_use]
    pub fn all(&self) -> &[Review] {
        &self.reviews
    }

    #[must_use]
    pub fn get(&self, id: ReviewId) -> Option<&Review> {
        self.reviews.iter().find(|review| review.id == id)
    }

    /// Reviews matching a status and a search over product, customer and
    /// comment text.
    #[must_use]
    pub fn filter(&self, filter: &ReviewFilter) -> Vec<&Review> {
        let needle = normalize_search(filter.search.as_deref());
        self.reviews
            .iter()
            .filter(|review| review.matches(filter.status, needle.as_deref()))
            .collect()
    }

    /// Set a review's moderation status. Returns `None` for an unknown id.
    pub fn set_status(&mut self, id: ReviewId, status: ReviewStatus) -> Option<&Review> {
        let review = self.reviews.iter_mut().find(|review| review.id == id)?;
        review.status = status;
        Some(review)
    }

    pub fn approve(&mut self, id: ReviewId) -> Option<&Review> {
        self.set_status(id, ReviewStatus::Approved)
    }

    pub fn reject(&mut self, id: ReviewId) -> Option<&Review> {
        self.set_status(id, ReviewStatus::Rejected)
    }

    /// Remove a review, returning it.
    pub fn delete(&mut self, id: ReviewId) -> Option<Review> {
        let index = self.reviews.iter().position(|review| review.id == id)?;
        Some(self.reviews.remove(index))
    }

    #[must_use]
    pub fn stats(&self) -> ReviewStats {
        let count = |status: ReviewStatus| self.reviews.iter().filter(|r| r.status == status).count();

        let average_rating = if self.reviews.is_empty() {
            Decimal::ZERO
        } else {
            let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
            (Decimal::from(sum) / Decimal::from(self.reviews.len()))
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        };

        ReviewStats {
            total: self.reviews.len(),
            approved: count(ReviewStatus::Approved),
            pending: count(ReviewStatus::Pending),
            rejected: count(ReviewStatus::Rejected),
            average_rating,
        }
    }
}

struct ReviewSeed {
    id: i32,
    product: (&'static str, &'static str),
    customer: (&'static str, &'static str),
    rating: u8,
    comment: &'static str,
    submitted: (i32, u32, u32),
    status: ReviewStatus,
    verified: bool,
}

const REVIEWS: &[ReviewSeed] = &[
    ReviewSeed {
        id: 1,
        product: ("Omega-3 Premium", "omega-3-premium"),
        customer: ("Sarah Johnson", "sarah@example.com"),
        rating: 5,
        comment: "Best supplements I've tried! Noticeable difference in my energy levels and recovery time. The quality is exceptional and the taste is great. Highly recommend to anyone serious about their fitness goals.",
        submitted: (2024, 1, 20),
        status: ReviewStatus::Approved,
        verified: true,
    },
    ReviewSeed {
        id: 2,
        product: ("Whey Protein Isolate", "whey-protein-isolate"),
        customer: ("Michael Chen", "michael@example.com"),
        rating: 5,
        comment: "Great quality and taste. Highly recommend! Mixes well and no aftertaste. Perfect for post-workout recovery.",
        submitted: (2024, 1, 19),
        status: ReviewStatus::Approved,
        verified: true,
    },
    ReviewSeed {
        id: 3,
        product: ("Vitamin D3 + K2", "vitamin-d3-k2"),
        customer: ("Emily Rodriguez", "emily@example.com"),
        rating: 4,
        comment: "Good product, fast shipping. I've been taking it for a month and feel more energetic. Would recommend.",
        submitted: (2024, 1, 18),
        status: ReviewStatus::Pending,
        verified: true,
    },
    ReviewSeed {
        id: 4,
        product: ("Pre-Workout Energy", "pre-workout-energy"),
        customer: ("David Thompson", "david@example.com"),
        rating: 5,
        comment: "Excellent energy boost without the crash. Clean ingredients and no jitters. This has become an essential part of my training routine.",
        submitted: (2024, 1, 17),
        status: ReviewStatus::Approved,
        verified: true,
    },
    ReviewSeed {
        id: 5,
        product: ("Probiotic Complex", "probiotic-complex"),
        customer: ("Jessica Martinez", "jessica@example.com"),
        rating: 3,
        comment: "Not sure if it's working yet, will update. Only been taking for a week. Shipping was fast though.",
        submitted: (2024, 1, 16),
        status: ReviewStatus::Pending,
        verified: false,
    },
    ReviewSeed {
        id: 6,
        product: ("Omega-3 Premium", "omega-3-premium"),
        customer: ("Robert Wilson", "robert@example.com"),
        rating: 5,
        comment: "Amazing product! I've tried many brands and this is by far the best. Great value for money.",
        submitted: (2024, 1, 15),
        status: ReviewStatus::Approved,
        verified: true,
    },
];

fn build(seed: &ReviewSeed) -> Option<Review> {
    let (year, month, day) = seed.submitted;
    Some(Review {
        id: ReviewId::new(seed.id),
        product_name: seed.product.0.to_owned(),
        product_slug: seed.product.1.to_owned(),
        customer_name: seed.customer.0.to_owned(),
        customer_email: seed.customer.1.to_owned(),
        rating: seed.rating,
        comment: seed.comment.to_owned(),
        submitted_on: NaiveDate::from_ymd_opt(year, month, day)?,
        status: seed.status,
        verified: seed.verified,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(reviews: &[&Review]) -> Vec<i32> {
        reviews.iter().map(|r| r.id.as_i32()).collect()
    }

    #[test]
    fn test_seeded_stats() {
        let stats = ReviewBook::seeded().stats();
        assert_eq!(stats.total, 6);
        assert_eq!(stats.approved, 4);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.rejected, 0);
        assert_eq!(stats.average_rating.to_string(), "4.5");
    }

    #[test]
    fn test_empty_stats() {
        let stats = ReviewBook::default().stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_rating, Decimal::ZERO);
    }

    #[test]
    fn test_filter_by_status_and_text() {
        let book = ReviewBook::seeded();

        let pending = book.filter(&ReviewFilter {
            status: Some(ReviewStatus::Pending),
            search: None,
        });
        assert_eq!(ids(&pending), vec![3, 5]);

        let omega = book.filter(&ReviewFilter {
            status: None,
            search: Some("OMEGA".to_string()),
        });
        assert_eq!(ids(&omega), vec![1, 6]);

        // Comment text is searched too.
        let jitters = book.filter(&ReviewFilter {
            status: None,
            search: Some("jitters".to_string()),
        });
        assert_eq!(ids(&jitters), vec![4]);

        let none = book.filter(&ReviewFilter {
            status: Some(ReviewStatus::Rejected),
            search: Some("omega".to_string()),
        });
        assert!(none.is_empty());
    }

    #[test]
    fn test_moderation() {
        let mut book = ReviewBook::seeded();

        assert_eq!(
            book.approve(ReviewId::new(3)).unwrap().status,
            ReviewStatus::Approved
        );
        assert_eq!(
            book.reject(ReviewId::new(5)).unwrap().status,
            ReviewStatus::Rejected
        );
        let stats = book.stats();
        assert_eq!((stats.approved, stats.pending, stats.rejected), (5, 0, 1));

        let removed = book.delete(ReviewId::new(5)).unwrap();
        assert_eq!(removed.customer_name, "Jessica Martinez");
        assert!(book.get(ReviewId::new(5)).is_none());
        assert_eq!(book.stats().total, 5);
        assert_eq!(book.stats().average_rating.to_string(), "4.8");

        assert!(book.approve(ReviewId::new(42)).is_none());
        assert!(book.delete(ReviewId::new(42)).is_none());
    }

    #[test]
    fn test_stars() {
        let book = ReviewBook::seeded();
        assert_eq!(book.get(ReviewId::new(3)).unwrap().stars(), "★★★★☆");
    }
}
