//! Sample catalog seeding for fresh stores.

use rust_decimal_macros::dec;
use tracing::info;

use crate::errors::StoreResult;
use crate::product::NewProduct;
use crate::repository::Repository;
use crate::types::{Money, ProductName};

/// The twelve sample products a fresh store starts with.
pub fn sample_products() -> Vec<NewProduct> {
    let entries = [
        (
            "Cute Dragon",
            "A friendly little dragon that glows in the dark! Perfect desk buddy.",
            dec!(8.50),
            "/images/dragon.png",
            "Fantasy",
            15,
            "3 hours",
            "Emma (12)",
        ),
        (
            "Rocket Ship",
            "Blast off with this awesome rocket! Has movable fins.",
            dec!(12.00),
            "/images/rocket.png",
            "Space",
            10,
            "4 hours",
            "Jake (11)",
        ),
        (
            "Phone Stand",
            "Cool geometric phone stand. Holds any phone!",
            dec!(5.00),
            "/images/phonestand.png",
            "Useful",
            25,
            "2 hours",
            "Mia (13)",
        ),
        (
            "Dino T-Rex",
            "Roar! This T-Rex has articulated joints and can pose.",
            dec!(15.00),
            "/images/trex.png",
            "Dinosaurs",
            8,
            "5 hours",
            "Lucas (12)",
        ),
        (
            "Minecraft Creeper",
            "Ssssss... Don't worry, this one won't explode!",
            dec!(7.00),
            "/images/creeper.png",
            "Gaming",
            20,
            "2.5 hours",
            "Sophie (11)",
        ),
        (
            "Fidget Spinner",
            "Super smooth spinning action. Satisfying clicks!",
            dec!(4.50),
            "/images/spinner.png",
            "Fidgets",
            30,
            "1.5 hours",
            "Noah (13)",
        ),
        (
            "Unicorn",
            "Magical rainbow unicorn with sparkly finish.",
            dec!(10.00),
            "/images/unicorn.png",
            "Fantasy",
            12,
            "3.5 hours",
            "Emma (12)",
        ),
        (
            "Articulated Snake",
            "Wiggly snake that actually moves! So satisfying.",
            dec!(6.00),
            "/images/snake.png",
            "Animals",
            18,
            "2 hours",
            "Jake (11)",
        ),
        (
            "Pencil Holder",
            "Keep your desk organized with this cool holder!",
            dec!(5.50),
            "/images/pencilholder.png",
            "Useful",
            22,
            "2.5 hours",
            "Mia (13)",
        ),
        (
            "Baby Yoda",
            "The cutest little guy from the galaxy far far away.",
            dec!(11.00),
            "/images/babyyoda.png",
            "Movies",
            14,
            "3 hours",
            "Lucas (12)",
        ),
        (
            "Flexi Octopus",
            "Eight wiggly tentacles! Stress relief champion.",
            dec!(8.00),
            "/images/octopus.png",
            "Animals",
            16,
            "3 hours",
            "Sophie (11)",
        ),
        (
            "Keychain Set",
            "Pack of 3 custom keychains - heart, star, and moon!",
            dec!(6.50),
            "/images/keychains.png",
            "Accessories",
            35,
            "1 hour",
            "Noah (13)",
        ),
    ];

    entries
        .into_iter()
        .map(
            |(name, description, price, image_url, category, in_stock, print_time, created_by)| {
                NewProduct {
                    name: ProductName::try_new(name).expect("sample product names are valid"),
                    description: description.to_string(),
                    price: Money::new(price).expect("sample product prices are valid"),
                    image_url: image_url.to_string(),
                    category: category.to_string(),
                    in_stock,
                    print_time: print_time.to_string(),
                    created_by: created_by.to_string(),
                }
            },
        )
        .collect()
}

/// Inserts the sample products into an empty catalog. Does nothing when the
/// catalog already has products. Returns how many were inserted.
pub async fn seed_catalog<R: Repository>(repository: &R) -> StoreResult<usize> {
    if repository.count_products().await? > 0 {
        return Ok(0);
    }
    let samples = sample_products();
    let count = samples.len();
    for new in samples {
        repository.insert_product(new).await?;
    }
    info!(count, "seeded sample products");
    Ok(count)
}
