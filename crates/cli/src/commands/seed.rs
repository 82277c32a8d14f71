//! Catalog seeding command.
//!
//! Upserts the demonstration singing bowls by slug, so re-running the
//! command refreshes the rows instead of duplicating them.
//!
//! ```bash
//! rh-cli seed
//! ```

use sqlx::PgPool;

use resonant_harmony_core::{NewProduct, Price, ProductTag, Slug};

use super::database_url;

/// Shared audio sample used by all demonstration bowls.
const SAMPLE_AUDIO: &str = "https://r2.fivemanage.com/s1eqtVnkFslLnri1MNmBV/singingbowl_sound1.mp3";

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    MissingEnvVar(#[from] super::MissingEnvVar),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
}

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    image_url: &'static str,
    image_hint: &'static str,
}

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Zen Harmony Bowl",
        description: "A beautifully crafted 7-inch bowl made from a seven-metal alloy, \
                      perfect for deep meditation and achieving a state of tranquility. \
                      Its long-lasting resonance helps in focusing the mind.",
        price: "99.99",
        image_url: "https://images.unsplash.com/photo-1545558014-8692077e9b5c?w=600&h=400&fit=crop",
        image_hint: "singing bowl meditation",
    },
    SeedProduct {
        name: "Resonance Master Bowl",
        description: "A large 12-inch bowl with powerful, deep sound projection. Ideal \
                      for sound healing practitioners and group sessions. Its profound \
                      vibrations can be felt throughout the body.",
        price: "249.99",
        image_url: "https://images.unsplash.com/photo-1593811167562-9cef47bfc4d7?w=600&h=400&fit=crop",
        image_hint: "large singing bowl",
    },
    SeedProduct {
        name: "Serenity Now Bowl",
        description: "Compact and easy to transport, this 4-inch bowl brings instant \
                      calm wherever you go. Perfect for office stress relief or as a \
                      travel companion for mindfulness on the move.",
        price: "59.99",
        image_url: "https://images.unsplash.com/photo-1514516870000-8e8e6b500a30?w=600&h=400&fit=crop",
        image_hint: "small singing bowl",
    },
    SeedProduct {
        name: "Tibetan Thunder Bowl",
        description: "A traditional hand-hammered Tibetan bowl, 9 inches in diameter. \
                      It produces a deep, resonant hum with complex overtones, grounding \
                      you in the present moment.",
        price: "179.99",
        image_url: "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?w=600&h=400&fit=crop",
        image_hint: "tibetan bowl",
    },
    SeedProduct {
        name: "Crystal Chakra Bowl",
        description: "A stunning 8-inch frosted quartz crystal bowl tuned to the \
                      frequency of the heart chakra (F note). Its pure, high-frequency \
                      tone is ideal for chakra alignment and energy work.",
        price: "199.99",
        image_url: "https://images.unsplash.com/photo-1506905925346-21bda4d32df4?w=600&h=400&fit=crop",
        image_hint: "crystal bowl",
    },
    SeedProduct {
        name: "Himalayan Heart Bowl",
        description: "Hand-hammered by artisans in the Himalayan foothills, this 6-inch \
                      bowl has a uniquely warm and inviting tone. It is perfect for \
                      loving-kindness meditation and cultivating compassion.",
        price: "129.99",
        image_url: "https://images.unsplash.com/photo-1518241353330-0f7941c2d9b5?w=600&h=400&fit=crop",
        image_hint: "himalayan bowl",
    },
];

/// Seed the catalog, upserting each bowl by slug.
///
/// # Errors
///
/// Returns `SeedError` if the database is unreachable or an upsert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Start seeding...");
    for seed in SEED_PRODUCTS {
        let product = to_new_product(seed)?;
        upsert(&pool, &product).await?;
        tracing::info!(product = seed.name, "Seeded product");
    }

    tracing::info!("Seeding finished.");
    Ok(())
}

fn to_new_product(seed: &SeedProduct) -> Result<NewProduct, SeedError> {
    let price =
        Price::parse(seed.price).map_err(|e| SeedError::InvalidSeed(format!("{}: {e}", seed.name)))?;

    Ok(NewProduct {
        slug: Slug::from_name(seed.name),
        name: seed.name.to_owned(),
        description: collapse_whitespace(seed.description),
        price,
        image_url: seed.image_url.to_owned(),
        image_hint: seed.image_hint.to_owned(),
        audio_url: SAMPLE_AUDIO.to_owned(),
        tag: ProductTag::SingingBowl,
    })
}

/// The seed descriptions are wrapped string literals; fold the line-break
/// indentation back into single spaces.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

async fn upsert(pool: &PgPool, product: &NewProduct) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO product (slug, name, description, price, image_url, \
                              image_hint, audio_url, tag) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (slug) DO UPDATE SET \
             name = EXCLUDED.name, \
             description = EXCLUDED.description, \
             price = EXCLUDED.price, \
             image_url = EXCLUDED.image_url, \
             image_hint = EXCLUDED.image_hint, \
             audio_url = EXCLUDED.audio_url, \
             tag = EXCLUDED.tag, \
             updated_at = now()",
    )
    .bind(product.slug.as_str())
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price.amount())
    .bind(&product.image_url)
    .bind(&product.image_hint)
    .bind(&product.audio_url)
    .bind(product.tag.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_slugs_derive_cleanly() {
        for seed in SEED_PRODUCTS {
            let product = to_new_product(seed).expect("valid seed");
            assert!(!product.slug.as_str().is_empty(), "{}", seed.name);
        }
    }

    #[test]
    fn test_known_slug_derivation() {
        let product = to_new_product(&SEED_PRODUCTS[0]).expect("valid seed");
        assert_eq!(product.slug.as_str(), "zen-harmony-bowl");
    }

    #[test]
    fn test_descriptions_are_single_spaced() {
        for seed in SEED_PRODUCTS {
            let product = to_new_product(seed).expect("valid seed");
            assert!(!product.description.contains("  "), "{}", seed.name);
        }
    }
}
