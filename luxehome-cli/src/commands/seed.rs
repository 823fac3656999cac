//! Demo listing seed
//!
//! Inserts the three showcase listings the demo site opens with. Each one
//! belongs to a named agent unless `--agent` assigns them all to one id.

use anyhow::{bail, Context, Result};
use clap::Parser;
use uuid::Uuid;

use luxehome_core::models::{PropertyForm, PropertyInput};
use luxehome_core::{gallery, LuxeConfig};
use luxehome_server::db::{ProfileRepo, PropertyRepo};

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Owner for every seeded listing (default: each listing's named agent)
    #[arg(long, value_name = "UUID")]
    pub agent: Option<Uuid>,

    /// Database URL (overrides config/environment)
    #[arg(long)]
    pub database_url: Option<String>,
}

struct DemoListing {
    title: &'static str,
    address: &'static str,
    price: u32,
    beds: u8,
    baths: u8,
    sqft: u16,
    photo: &'static str,
    amenities: &'static [&'static str],
    agent_name: &'static str,
}

const DEMO_LISTINGS: [DemoListing; 3] = [
    DemoListing {
        title: "The Aspen Summit Lodge",
        address: "123 Alpine Way, Aspen, CO 81611",
        price: 14_500_000,
        beds: 5,
        baths: 6,
        sqft: 4500,
        photo: "/aspen-lodge.png",
        amenities: &["mountainView", "fireplace", "sauna", "spa", "parking"],
        agent_name: "Sora Tanaka",
    },
    DemoListing {
        title: "Silicon Valley Glass Cube",
        address: "456 Tech Blvd, Palo Alto, CA 94301",
        price: 8_200_000,
        beds: 4,
        baths: 4,
        sqft: 3200,
        photo: "/silicon-cube.png",
        amenities: &["smartHome", "homeTheater", "infinityPool", "gym", "security"],
        agent_name: "Eleanor Vance",
    },
    DemoListing {
        title: "The Hamptons Heritage Estate",
        address: "789 Ocean Drive, Southampton, NY 11968",
        price: 22_000_000,
        beds: 8,
        baths: 9,
        sqft: 8500,
        photo: "/hamptons-estate.png",
        amenities: &["wineCellar", "gatedCommunity", "guestHouse", "pool", "waterfront"],
        agent_name: "Julian St. James",
    },
];

impl DemoListing {
    /// Published listing with a full amenity map.
    fn input(&self) -> Result<PropertyInput> {
        let flags: serde_json::Map<String, serde_json::Value> = self
            .amenities
            .iter()
            .map(|key| (key.to_string(), serde_json::Value::Bool(true)))
            .collect();

        let mut form = PropertyForm::default();
        for (name, value) in [
            ("title", self.title.to_string()),
            ("address", self.address.to_string()),
            ("price", self.price.to_string()),
            ("beds", self.beds.to_string()),
            ("baths", self.baths.to_string()),
            ("sqft", self.sqft.to_string()),
            ("status", "Active".to_string()),
            ("listing_type", "Sale".to_string()),
            ("amenities", serde_json::Value::Object(flags).to_string()),
        ] {
            form.set(name, value);
        }
        form.validate(gallery::GALLERY_SIZE)
            .with_context(|| format!("demo listing '{}' is invalid", self.title))
    }

    fn gallery(&self) -> String {
        gallery::encode(&[self.photo; gallery::GALLERY_SIZE])
    }
}

pub async fn run_seed(args: SeedArgs) -> Result<()> {
    let config = LuxeConfig::load();
    let pool = super::connect(&config, args.database_url.as_deref()).await?;
    let properties = PropertyRepo::new(&pool);
    let profiles = ProfileRepo::new(&pool);

    let mut inserted = 0usize;
    for listing in &DEMO_LISTINGS {
        let owner = match args.agent {
            Some(agent) => agent,
            None => match profiles.find_by_name(listing.agent_name).await? {
                Some(profile) => profile.id,
                None => {
                    eprintln!("⚠ no agent named '{}', skipping {}", listing.agent_name, listing.title);
                    continue;
                }
            },
        };

        let input = listing.input()?;
        let created = properties
            .create(owner, &input, &listing.gallery())
            .await
            .with_context(|| format!("Failed to insert {}", listing.title))?;
        tracing::debug!(id = %created.id, %owner, "demo listing inserted");
        println!("✓ {} ({})", created.title, created.id);
        inserted += 1;
    }

    if inserted == 0 {
        bail!("No demo listings inserted; pass --agent <UUID> or create the demo agent profiles");
    }
    println!("✓ {inserted} of {} demo listings seeded", DEMO_LISTINGS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxehome_core::models::PropertyStatus;

    #[test]
    fn demo_listings_publish_with_full_amenity_maps() {
        for listing in &DEMO_LISTINGS {
            let input = listing.input().unwrap();
            assert_eq!(input.status, PropertyStatus::Active);
            assert_eq!(input.amenities.len(), luxehome_core::MASTER_AMENITIES.len());
            for key in listing.amenities {
                assert_eq!(input.amenities.get(*key), Some(&true), "{key}");
            }
            assert_eq!(input.amenities.values().filter(|v| **v).count(), 5);
        }
    }

    #[test]
    fn demo_gallery_is_full() {
        let images = gallery::decode(Some(DEMO_LISTINGS[1].gallery().as_str()));
        assert_eq!(images, vec!["/silicon-cube.png"; gallery::GALLERY_SIZE]);
    }
}
