//! Customer testimonials page.

use askama::Template;
use askama_web::WebTemplate;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::instrument;

use crate::filters;

/// A published, verified customer review.
#[derive(Debug, Clone, Copy)]
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub rating: u8,
    /// ISO date, `YYYY-MM-DD`.
    pub date: &'static str,
    pub product: &'static str,
    pub product_slug: &'static str,
    pub text: &'static str,
}

const TESTIMONIALS: &[Testimonial] = &[
    Testimonial {
        name: "Sarah Johnson",
        role: "Fitness Enthusiast",
        rating: 5,
        date: "2024-01-20",
        product: "Whey Protein Isolate",
        product_slug: "whey-protein-isolate",
        text: "Best supplements I've tried! Noticeable difference in my energy levels and recovery time. The quality is exceptional and the taste is great. Highly recommend to anyone serious about their fitness goals.",
    },
    Testimonial {
        name: "Michael Chen",
        role: "Health Conscious",
        rating: 5,
        date: "2024-01-18",
        product: "Omega-3 Premium",
        product_slug: "omega-3-premium",
        text: "The Omega-3 has been a game changer for my joint health. I've been taking it for 3 months and noticed significant improvement. Quality is exceptional and shipping was super fast. Will definitely order again.",
    },
    Testimonial {
        name: "Emily Rodriguez",
        role: "Wellness Advocate",
        rating: 5,
        date: "2024-01-15",
        product: "Probiotic Complex",
        product_slug: "probiotic-complex",
        text: "Love the probiotic complex! My digestion has improved significantly since starting this product. Great customer service too, they answered all my questions quickly. Very satisfied with my purchase.",
    },
    Testimonial {
        name: "David Thompson",
        role: "Athlete",
        rating: 5,
        date: "2024-01-12",
        product: "Pre-Workout Energy",
        product_slug: "pre-workout-energy",
        text: "Outstanding pre-workout supplement! Gives me the energy boost I need without the crash. Clean ingredients and no jitters. This has become an essential part of my training routine.",
    },
    Testimonial {
        name: "Jessica Martinez",
        role: "Nutrition Enthusiast",
        rating: 5,
        date: "2024-01-10",
        product: "Vitamin D3 + K2",
        product_slug: "vitamin-d3-k2",
        text: "Excellent product! I've noticed improved bone health and energy levels. The combination of D3 and K2 is perfect. Fast shipping and great packaging. Highly recommend!",
    },
    Testimonial {
        name: "Robert Wilson",
        role: "Fitness Trainer",
        rating: 5,
        date: "2024-01-08",
        product: "Creatine Monohydrate",
        product_slug: "creatine-monohydrate",
        text: "As a fitness trainer, I've tried many creatine supplements. This one is top-notch: pure, effective, and reasonably priced. My clients have seen great results too. ProScience Nutra is now my go-to brand.",
    },
    Testimonial {
        name: "Amanda Lee",
        role: "Health & Wellness",
        rating: 5,
        date: "2024-01-05",
        product: "Multivitamin Complete",
        product_slug: "multivitamin-complete",
        text: "Comprehensive multivitamin that covers all my nutritional needs. I feel more energetic and my immune system has improved. Love that it's made with quality ingredients and third-party tested.",
    },
    Testimonial {
        name: "James Anderson",
        role: "Bodybuilder",
        rating: 5,
        date: "2024-01-03",
        product: "BCAA Recovery",
        product_slug: "bcaa-recovery",
        text: "Perfect for post-workout recovery. I've noticed faster muscle recovery and less soreness. The taste is great and it mixes easily. Great value for the quality you get.",
    },
];

/// Testimonial display data for templates.
#[derive(Clone)]
pub struct TestimonialView {
    pub name: &'static str,
    pub role: &'static str,
    pub rating: u8,
    /// Filled and empty stars, five in total.
    pub stars: String,
    pub date: String,
    pub product: &'static str,
    pub product_slug: &'static str,
    pub text: &'static str,
}

impl From<&Testimonial> for TestimonialView {
    fn from(t: &Testimonial) -> Self {
        let filled = usize::from(t.rating.min(5));
        Self {
            name: t.name,
            role: t.role,
            rating: t.rating,
            stars: format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled)),
            // "Jan 20, 2024"
            date: NaiveDate::parse_from_str(t.date, "%Y-%m-%d")
                .map_or_else(|_| t.date.to_string(), |d| d.format("%b %-d, %Y").to_string()),
            product: t.product,
            product_slug: t.product_slug,
            text: t.text,
        }
    }
}

/// Mean rating to one decimal place; zero when there are no reviews.
fn average_rating(testimonials: &[Testimonial]) -> Decimal {
    if testimonials.is_empty() {
        return Decimal::ZERO;
    }
    let sum: u32 = testimonials.iter().map(|t| u32::from(t.rating)).sum();
    (Decimal::from(sum) / Decimal::from(testimonials.len()))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Reviews page template.
#[derive(Template, WebTemplate)]
#[template(path = "reviews.html")]
pub struct ReviewsTemplate {
    pub reviews: Vec<TestimonialView>,
    pub average_rating: String,
    pub total_reviews: usize,
}

/// Display the testimonials page.
#[instrument]
pub async fn index() -> ReviewsTemplate {
    ReviewsTemplate {
        reviews: TESTIMONIALS.iter().map(TestimonialView::from).collect(),
        average_rating: format!("{:.1}", average_rating(TESTIMONIALS)),
        total_reviews: TESTIMONIALS.len(),
    }
}
