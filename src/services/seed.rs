use crate::models::{Location, Place, PriceLevel};
use crate::services::store::{PlaceStore, StoreError};

struct SeedPlace {
    name: &'static str,
    category: &'static str,
    description: &'static str,
    lat: f64,
    lng: f64,
    price: PriceLevel,
    tags: &'static [&'static str],
}

const MALTA: &[SeedPlace] = &[
    // Beaches
    SeedPlace {
        name: "Blue Lagoon (Comino)",
        category: "beach",
        description: "Crystal clear turquoise waters between Comino and Cominotto, perfect for swimming and snorkeling.",
        lat: 36.013,
        lng: 14.334,
        price: PriceLevel::Low,
        tags: &["beach", "swimming", "snorkeling", "nature", "boat"],
    },
    SeedPlace {
        name: "Golden Bay",
        category: "beach",
        description: "One of Malta's most popular sandy beaches, great for sunsets and swimming.",
        lat: 35.933,
        lng: 14.345,
        price: PriceLevel::Low,
        tags: &["beach", "family", "sunset", "outdoor"],
    },
    SeedPlace {
        name: "Mellieha Bay (Ghadira Bay)",
        category: "beach",
        description: "Largest sandy beach in Malta, shallow waters ideal for families.",
        lat: 35.967,
        lng: 14.349,
        price: PriceLevel::Low,
        tags: &["beach", "family", "swimming", "outdoor"],
    },
    SeedPlace {
        name: "St. Peter's Pool",
        category: "beach",
        description: "Natural rocky swimming pool with crystal clear waters near Marsaxlokk.",
        lat: 35.821,
        lng: 14.562,
        price: PriceLevel::Low,
        tags: &["beach", "swimming", "cliff", "adventure"],
    },
    SeedPlace {
        name: "Ramla Bay (Gozo)",
        category: "beach",
        description: "Golden-red sandy beach surrounded by hills, a favorite among locals.",
        lat: 36.056,
        lng: 14.283,
        price: PriceLevel::Low,
        tags: &["beach", "nature", "family", "outdoor"],
    },
    // Culture and history
    SeedPlace {
        name: "Mdina (The Silent City)",
        category: "culture",
        description: "Ancient walled city with medieval streets, stunning views, and rich history.",
        lat: 35.887,
        lng: 14.406,
        price: PriceLevel::Low,
        tags: &["history", "architecture", "museum", "walking"],
    },
    SeedPlace {
        name: "Valletta",
        category: "culture",
        description: "Malta's capital city, a UNESCO World Heritage site filled with museums, cathedrals and cafes.",
        lat: 35.899,
        lng: 14.514,
        price: PriceLevel::Medium,
        tags: &["history", "architecture", "shopping", "museum"],
    },
    SeedPlace {
        name: "St. John's Co-Cathedral",
        category: "culture",
        description: "Baroque masterpiece in Valletta famous for its ornate interior and Caravaggio paintings.",
        lat: 35.898,
        lng: 14.513,
        price: PriceLevel::Low,
        tags: &["church", "museum", "art", "history"],
    },
    SeedPlace {
        name: "Hagar Qim Temples",
        category: "history",
        description: "Prehistoric temple complex dating back to 3600 BC overlooking the sea.",
        lat: 35.830,
        lng: 14.437,
        price: PriceLevel::Medium,
        tags: &["history", "archaeology", "museum", "outdoor"],
    },
    SeedPlace {
        name: "National Museum of Archaeology",
        category: "museum",
        description: "Showcases Malta's prehistoric treasures from Neolithic to Bronze Age.",
        lat: 35.897,
        lng: 14.511,
        price: PriceLevel::Low,
        tags: &["museum", "history", "education"],
    },
    SeedPlace {
        name: "Victoria (Rabat) and the Citadel",
        category: "culture",
        description: "Gozo's capital city with a stunning hilltop citadel and charming old streets.",
        lat: 36.045,
        lng: 14.239,
        price: PriceLevel::Low,
        tags: &["history", "architecture", "museum"],
    },
    SeedPlace {
        name: "Mosta Dome (Rotunda of Mosta)",
        category: "religion",
        description: "Massive church with one of the largest unsupported domes in the world.",
        lat: 35.910,
        lng: 14.426,
        price: PriceLevel::Low,
        tags: &["church", "architecture", "history"],
    },
    SeedPlace {
        name: "Ta' Pinu Basilica (Gozo)",
        category: "religion",
        description: "Beautiful basilica and pilgrimage site surrounded by countryside views.",
        lat: 36.057,
        lng: 14.222,
        price: PriceLevel::Low,
        tags: &["church", "religion", "architecture", "history"],
    },
    // Nature
    SeedPlace {
        name: "Dingli Cliffs",
        category: "nature",
        description: "Spectacular coastal cliffs offering panoramic views and sunset walks.",
        lat: 35.848,
        lng: 14.382,
        price: PriceLevel::Low,
        tags: &["hiking", "sunset", "nature", "outdoor"],
    },
    SeedPlace {
        name: "Blue Grotto",
        category: "nature",
        description: "Famous sea caves with brilliant blue reflections, best seen by boat.",
        lat: 35.819,
        lng: 14.454,
        price: PriceLevel::Medium,
        tags: &["boat", "photography", "nature", "outdoor"],
    },
    SeedPlace {
        name: "Buskett Gardens",
        category: "park",
        description: "Green woodland area ideal for picnics and walks, one of the few forested spots in Malta.",
        lat: 35.854,
        lng: 14.394,
        price: PriceLevel::Low,
        tags: &["nature", "park", "walking", "family"],
    },
    SeedPlace {
        name: "Dwejra Bay (Gozo)",
        category: "nature",
        description: "Former site of the Azure Window, still scenic for diving and sunsets.",
        lat: 36.056,
        lng: 14.189,
        price: PriceLevel::Low,
        tags: &["dive", "photography", "sunset", "nature"],
    },
    // Nightlife, food and family
    SeedPlace {
        name: "St. Julian's & Paceville",
        category: "nightlife",
        description: "Lively area packed with clubs, bars, and restaurants.",
        lat: 35.915,
        lng: 14.490,
        price: PriceLevel::Medium,
        tags: &["nightlife", "bar", "club", "restaurants"],
    },
    SeedPlace {
        name: "The Point Shopping Mall (Sliema)",
        category: "shopping",
        description: "Large modern shopping mall with international brands and a food court.",
        lat: 35.909,
        lng: 14.509,
        price: PriceLevel::High,
        tags: &["shopping", "indoor", "restaurants"],
    },
    SeedPlace {
        name: "Marsaxlokk Fishing Village",
        category: "food",
        description: "Traditional fishing village famous for its colorful boats and Sunday market.",
        lat: 35.841,
        lng: 14.544,
        price: PriceLevel::Low,
        tags: &["market", "seafood", "photography", "culture"],
    },
    SeedPlace {
        name: "Malta National Aquarium",
        category: "family",
        description: "Great for kids and families, with diverse marine life exhibits and sea views.",
        lat: 35.957,
        lng: 14.418,
        price: PriceLevel::Medium,
        tags: &["family", "kids", "education", "indoor"],
    },
    SeedPlace {
        name: "Popeye Village",
        category: "family",
        description: "Colorful film set from the 1980 Popeye movie, now a family attraction.",
        lat: 35.960,
        lng: 14.340,
        price: PriceLevel::Medium,
        tags: &["family", "kids", "photography", "outdoor"],
    },
];

/// The built-in Malta catalog
pub fn malta_places() -> Vec<Place> {
    MALTA
        .iter()
        .map(|seed| {
            let mut place = Place::new(seed.name, seed.category);
            place.description = Some(seed.description.to_string());
            place.location = Some(Location {
                lat: seed.lat,
                lng: seed.lng,
            });
            place.price_level = Some(seed.price);
            place.tags = seed.tags.iter().map(|t| t.to_string()).collect();
            place
        })
        .collect()
}

/// Insert the Malta catalog when the places collection is empty
///
/// Returns the number of places inserted.
pub async fn seed_if_empty(store: &dyn PlaceStore) -> Result<usize, StoreError> {
    if !store.find_all().await?.is_empty() {
        tracing::info!("Places collection already has data, skipping seeding");
        return Ok(0);
    }

    let places = malta_places();
    let count = places.len();
    for place in places {
        store.insert(place).await?;
    }

    tracing::info!("Seeded {} Malta places", count);
    Ok(count)
}
