//! Seed product data.
//!
//! The catalog is compiled in. Edit the table below to change what the shop
//! sells; ids must stay unique and stable because carts refer to them.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

use crate::types::{NutritionFact, NutritionFacts, Product, ProductCategory, ProductId};

type Nutrient = (&'static str, &'static str, Option<&'static str>);

struct Seed {
    id: i32,
    slug: &'static str,
    name: &'static str,
    category: ProductCategory,
    price_cents: i64,
    compare_at_cents: Option<i64>,
    short_description: &'static str,
    description: &'static str,
    ingredients: &'static [&'static str],
    facts: Option<(&'static str, u32, &'static [Nutrient])>,
    benefits: &'static [&'static str],
    usage: &'static str,
    in_stock: bool,
    stock: Option<u32>,
    tags: &'static [&'static str],
    featured: bool,
    flavour: Option<&'static str>,
    created: (i32, u32, u32),
}

const WHEY_FACTS: &[Nutrient] = &[
    ("Calories", "110", None),
    ("Protein", "25g", Some("50%")),
    ("Total carbohydrate", "2g", Some("1%")),
];

const PLANT_FACTS: &[Nutrient] = &[
    ("Calories", "120", None),
    ("Protein", "22g", Some("44%")),
    ("Iron", "5mg", Some("28%")),
];

const D3_K2_FACTS: &[Nutrient] = &[
    ("Vitamin D3", "125mcg", Some("625%")),
    ("Vitamin K2", "100mcg", Some("83%")),
];

const OMEGA_FACTS: &[Nutrient] = &[
    ("EPA", "720mg", None),
    ("DHA", "480mg", None),
];

const PRE_WORKOUT_FACTS: &[Nutrient] = &[
    ("Caffeine", "200mg", None),
    ("Beta-alanine", "3.2g", None),
];

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        slug: "whey-protein-isolate",
        name: "Whey Protein Isolate",
        category: ProductCategory::Protein,
        price_cents: 5499,
        compare_at_cents: Some(6499),
        short_description: "25g of fast-absorbing protein per scoop.",
        description: "Cold-filtered whey protein isolate with minimal lactose, carbs and fat. Mixes smoothly for post-workout recovery.",
        ingredients: &["Whey protein isolate", "Cocoa powder", "Natural flavours", "Sunflower lecithin", "Stevia leaf extract"],
        facts: Some(("1 scoop (30g)", 30, WHEY_FACTS)),
        benefits: &["Supports muscle recovery", "Low in lactose", "Builds lean muscle"],
        usage: "Mix one scoop with 250ml of water or milk within 30 minutes after training.",
        in_stock: true,
        stock: Some(140),
        tags: &["protein", "recovery", "bestseller"],
        featured: true,
        flavour: Some("Chocolate"),
        created: (2024, 1, 8),
    },
    Seed {
        id: 2,
        slug: "plant-protein-blend",
        name: "Plant Protein Blend",
        category: ProductCategory::Protein,
        price_cents: 4499,
        compare_at_cents: None,
        short_description: "Pea and brown rice protein with a complete amino profile.",
        description: "A vegan blend of pea and brown rice protein, naturally sweetened and free from dairy and soy.",
        ingredients: &["Pea protein isolate", "Brown rice protein", "Vanilla bean", "Monk fruit extract"],
        facts: Some(("1 scoop (33g)", 28, PLANT_FACTS)),
        benefits: &["Plant-based muscle support", "Easy to digest", "Dairy free"],
        usage: "Blend one scoop into smoothies or shake with 300ml of plant milk.",
        in_stock: true,
        stock: Some(85),
        tags: &["protein", "vegan"],
        featured: false,
        flavour: Some("Vanilla"),
        created: (2024, 2, 14),
    },
    Seed {
        id: 3,
        slug: "casein-night-protein",
        name: "Casein Night Protein",
        category: ProductCategory::Protein,
        price_cents: 4999,
        compare_at_cents: None,
        short_description: "Slow-release micellar casein for overnight recovery.",
        description: "Micellar casein digests slowly to feed muscles through the night. Thick, creamy texture.",
        ingredients: &["Micellar casein", "Natural flavours", "Xanthan gum"],
        facts: None,
        benefits: &["Sustained amino acid release", "Overnight muscle recovery"],
        usage: "Mix one scoop with 200ml of milk 30 minutes before bed.",
        in_stock: false,
        stock: Some(0),
        tags: &["protein", "recovery"],
        featured: false,
        flavour: Some("Chocolate"),
        created: (2023, 11, 2),
    },
    Seed {
        id: 4,
        slug: "vitamin-d3-k2",
        name: "Vitamin D3 + K2",
        category: ProductCategory::Vitamins,
        price_cents: 2499,
        compare_at_cents: Some(2999),
        short_description: "5000 IU D3 with MK-7 for bone and immune health.",
        description: "Vitamin D3 paired with vitamin K2 as MK-7 to direct calcium to the bones. One softgel a day.",
        ingredients: &["Cholecalciferol", "Menaquinone-7", "Olive oil", "Softgel (gelatin, glycerin)"],
        facts: Some(("1 softgel", 120, D3_K2_FACTS)),
        benefits: &["Supports bone density", "Boosts immune function"],
        usage: "Take one softgel daily with a meal containing fat.",
        in_stock: true,
        stock: Some(18),
        tags: &["vitamins", "immune", "bone"],
        featured: true,
        flavour: None,
        created: (2023, 9, 20),
    },
    Seed {
        id: 5,
        slug: "multivitamin-complete",
        name: "Multivitamin Complete",
        category: ProductCategory::Vitamins,
        price_cents: 3299,
        compare_at_cents: None,
        short_description: "23 essential vitamins and minerals in active forms.",
        description: "A daily multivitamin with methylated B vitamins, chelated minerals and antioxidants for all-round health.",
        ingredients: &["Vitamin A", "Vitamin C", "Methylcobalamin", "Zinc bisglycinate", "Selenium"],
        facts: None,
        benefits: &["Fills nutritional gaps", "Supports energy levels"],
        usage: "Take two tablets daily with breakfast.",
        in_stock: true,
        stock: Some(210),
        tags: &["vitamins", "daily"],
        featured: false,
        flavour: None,
        created: (2023, 6, 5),
    },
    Seed {
        id: 6,
        slug: "magnesium-glycinate",
        name: "Magnesium Glycinate",
        category: ProductCategory::Vitamins,
        price_cents: 1999,
        compare_at_cents: None,
        short_description: "Gentle, highly absorbable magnesium for sleep and muscles.",
        description: "Magnesium bound to glycine for better absorption and no digestive upset. Supports relaxation and deep sleep.",
        ingredients: &["Magnesium bisglycinate", "Vegetable capsule"],
        facts: None,
        benefits: &["Improves sleep quality", "Reduces muscle cramps"],
        usage: "Take two capsules in the evening.",
        in_stock: true,
        stock: None,
        tags: &["vitamins", "sleep", "minerals"],
        featured: false,
        flavour: None,
        created: (2024, 3, 1),
    },
    Seed {
        id: 7,
        slug: "omega-3-premium",
        name: "Omega-3 Premium",
        category: ProductCategory::Wellness,
        price_cents: 3499,
        compare_at_cents: Some(3999),
        short_description: "High-potency EPA and DHA from wild fish oil.",
        description: "Molecularly distilled fish oil delivering 1200mg EPA and DHA per serving for heart, brain and joint health.",
        ingredients: &["Fish oil concentrate", "Natural lemon oil", "Mixed tocopherols"],
        facts: Some(("2 softgels", 60, OMEGA_FACTS)),
        benefits: &["Supports heart health", "Promotes brain function", "Eases joint stiffness"],
        usage: "Take two softgels daily with food.",
        in_stock: true,
        stock: Some(95),
        tags: &["wellness", "heart", "bestseller"],
        featured: true,
        flavour: Some("Lemon"),
        created: (2023, 8, 12),
    },
    Seed {
        id: 8,
        slug: "probiotic-complex",
        name: "Probiotic Complex",
        category: ProductCategory::Wellness,
        price_cents: 3999,
        compare_at_cents: None,
        short_description: "50 billion CFU across 12 strains.",
        description: "A shelf-stable blend of lactobacillus and bifidobacterium strains with prebiotic fibre for gut balance.",
        ingredients: &["Lactobacillus acidophilus", "Bifidobacterium longum", "Inulin", "Delayed-release capsule"],
        facts: None,
        benefits: &["Supports digestive health", "Strengthens immune defences"],
        usage: "Take one capsule each morning on an empty stomach.",
        in_stock: true,
        stock: Some(12),
        tags: &["wellness", "gut"],
        featured: false,
        flavour: None,
        created: (2024, 1, 22),
    },
    Seed {
        id: 9,
        slug: "collagen-peptides",
        name: "Collagen Peptides",
        category: ProductCategory::Wellness,
        price_cents: 3799,
        compare_at_cents: Some(4299),
        short_description: "Grass-fed hydrolysed collagen types I and III.",
        description: "Unflavoured collagen peptides that dissolve in hot or cold drinks to support skin, hair, nails and joints.",
        ingredients: &["Hydrolysed bovine collagen"],
        facts: None,
        benefits: &["Improves skin elasticity", "Supports joint comfort"],
        usage: "Stir two scoops into coffee, tea or smoothies once a day.",
        in_stock: true,
        stock: Some(60),
        tags: &["wellness", "beauty"],
        featured: false,
        flavour: None,
        created: (2023, 12, 3),
    },
    Seed {
        id: 10,
        slug: "pre-workout-energy",
        name: "Pre-Workout Energy",
        category: ProductCategory::Sports,
        price_cents: 3999,
        compare_at_cents: Some(4499),
        short_description: "Clean energy and focus without the crash.",
        description: "Natural caffeine, beta-alanine and citrulline malate for explosive training sessions and sharp focus.",
        ingredients: &["L-citrulline malate", "Beta-alanine", "Natural caffeine", "L-theanine", "Beetroot extract"],
        facts: Some(("1 scoop (12g)", 30, PRE_WORKOUT_FACTS)),
        benefits: &["Increases energy", "Sharpens focus", "Delays fatigue"],
        usage: "Mix one scoop with 300ml of cold water 20 minutes before training.",
        in_stock: true,
        stock: Some(75),
        tags: &["sports", "energy"],
        featured: true,
        flavour: Some("Fruit Punch"),
        created: (2024, 2, 2),
    },
    Seed {
        id: 11,
        slug: "creatine-monohydrate",
        name: "Creatine Monohydrate",
        category: ProductCategory::Sports,
        price_cents: 2999,
        compare_at_cents: None,
        short_description: "Micronised creatine for strength and power.",
        description: "Pure micronised creatine monohydrate, third-party tested. Supports strength, power output and muscle volume.",
        ingredients: &["Creatine monohydrate"],
        facts: None,
        benefits: &["Increases strength", "Improves high-intensity performance"],
        usage: "Take 5g daily in any drink.",
        in_stock: true,
        stock: Some(180),
        tags: &["sports", "strength"],
        featured: false,
        flavour: None,
        created: (2023, 5, 18),
    },
    Seed {
        id: 12,
        slug: "bcaa-recovery",
        name: "BCAA Recovery",
        category: ProductCategory::Sports,
        price_cents: 3299,
        compare_at_cents: None,
        short_description: "2:1:1 branched-chain amino acids with electrolytes.",
        description: "Fermented BCAAs with added electrolytes to reduce soreness and keep you hydrated during long sessions.",
        ingredients: &["L-leucine", "L-isoleucine", "L-valine", "Coconut water powder", "Sea salt"],
        facts: None,
        benefits: &["Reduces muscle soreness", "Supports hydration"],
        usage: "Sip one scoop mixed in 500ml of water during training.",
        in_stock: true,
        stock: Some(40),
        tags: &["sports", "recovery"],
        featured: false,
        flavour: Some("Watermelon"),
        created: (2024, 3, 10),
    },
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn build(seed: &Seed) -> Product {
    let created_at = Utc
        .with_ymd_and_hms(seed.created.0, seed.created.1, seed.created.2, 9, 0, 0)
        .single()
        .unwrap_or_default();

    Product {
        id: ProductId::new(seed.id),
        slug: seed.slug.to_owned(),
        name: seed.name.to_owned(),
        category: seed.category,
        price: Decimal::new(seed.price_cents, 2),
        compare_at_price: seed.compare_at_cents.map(|cents| Decimal::new(cents, 2)),
        images: vec![format!("/static/images/products/{}.jpg", seed.slug)],
        description: seed.description.to_owned(),
        short_description: seed.short_description.to_owned(),
        ingredients: strings(seed.ingredients),
        nutrition_facts: seed.facts.map(|(serving_size, servings, nutrients)| NutritionFacts {
            serving_size: serving_size.to_owned(),
            servings_per_container: servings,
            nutrients: nutrients
                .iter()
                .map(|(name, amount, daily_value)| NutritionFact {
                    name: (*name).to_owned(),
                    amount: (*amount).to_owned(),
                    daily_value: daily_value.map(str::to_owned),
                })
                .collect(),
        }),
        benefits: strings(seed.benefits),
        usage_instructions: seed.usage.to_owned(),
        in_stock: seed.in_stock,
        stock_quantity: seed.stock,
        tags: strings(seed.tags),
        featured: seed.featured,
        flavour: seed.flavour.map(str::to_owned),
        created_at,
        updated_at: created_at,
    }
}

/// Build the seed product list.
pub(super) fn products() -> Vec<Product> {
    SEEDS.iter().map(build).collect()
}
