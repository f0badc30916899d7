//! Built-in seed data: three agents and eight Moscow-region listings.
//!
//! The numbers here (prices, areas, coordinates, ratings) are the fixture
//! profile the whole test suite leans on, so treat changes as breaking.

use estate_map_listing_models::{
    Agent, AgentId, Coordinate, ListingId, ListingStatus, Property, PropertyType,
};

fn text_list(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// Returns the seed agent roster and listings, in catalog order.
#[allow(clippy::too_many_lines)]
pub(crate) fn load() -> (Vec<Agent>, Vec<Property>) {
    let agents = vec![
        Agent {
            id: AgentId(1),
            name: "Anna Petrova".to_string(),
            phone: "+7 (495) 123-45-67".to_string(),
            email: "anna@estatemap.example".to_string(),
            rating: 4.9,
            properties_count: 45,
            experience_years: 8,
            bio: "Professional realtor with eight years in the Moscow market".to_string(),
        },
        Agent {
            id: AgentId(2),
            name: "Dmitry Ivanov".to_string(),
            phone: "+7 (495) 234-56-78".to_string(),
            email: "dmitry@estatemap.example".to_string(),
            rating: 4.8,
            properties_count: 38,
            experience_years: 6,
            bio: "Specializes in luxury real estate".to_string(),
        },
        Agent {
            id: AgentId(3),
            name: "Elena Smirnova".to_string(),
            phone: "+7 (495) 345-67-89".to_string(),
            email: "elena@estatemap.example".to_string(),
            rating: 4.7,
            properties_count: 52,
            experience_years: 10,
            bio: "Expert in suburban and country properties".to_string(),
        },
    ];

    let properties = vec![
        Property {
            id: ListingId(1),
            title: "Luxury apartment in the city center".to_string(),
            price: 25_000_000.0,
            address: "15 Tverskaya Street".to_string(),
            city: "Moscow".to_string(),
            rooms: 3,
            bathrooms: 2,
            area: 120.0,
            floor: 18,
            total_floors: 25,
            year_built: 2020,
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForSale,
            coordinate: Coordinate::new(55.7558, 37.6173),
            images: text_list(&[
                "tverskaya-living-room",
                "tverskaya-kitchen",
                "tverskaya-bedroom",
                "tverskaya-view",
            ]),
            description: "Spacious three-room apartment with a panoramic view of central \
                          Moscow. Designer renovation, open-plan kitchen and living room, \
                          premium built-in appliances, gated grounds with underground parking."
                .to_string(),
            features: text_list(&[
                "Panoramic windows",
                "Designer renovation",
                "Underground parking",
                "Concierge",
                "Open-plan kitchen",
                "Built-in appliances",
            ]),
            agent: agents[0].clone(),
            is_new: true,
            is_featured: true,
            rating: 4.8,
            views: 1250,
        },
        Property {
            id: ListingId(2),
            title: "Modern studio next to the metro".to_string(),
            price: 8_500_000.0,
            address: "24 Kutuzovsky Avenue".to_string(),
            city: "Moscow".to_string(),
            rooms: 1,
            bathrooms: 1,
            area: 35.0,
            floor: 5,
            total_floors: 10,
            year_built: 2022,
            property_type: PropertyType::Studio,
            status: ListingStatus::ForSale,
            coordinate: Coordinate::new(55.7422, 37.5656),
            images: text_list(&["kutuzovsky-room", "kutuzovsky-kitchen", "kutuzovsky-bath"]),
            description: "Snug studio with a contemporary finish, high ceilings and oversized \
                          windows. Established neighborhood, five minutes to the metro."
                .to_string(),
            features: text_list(&[
                "High ceilings",
                "New building",
                "Metro nearby",
                "Developer finish",
                "Quiet courtyard",
            ]),
            agent: agents[1].clone(),
            is_new: true,
            is_featured: false,
            rating: 4.6,
            views: 890,
        },
        Property {
            id: ListingId(3),
            title: "Country villa in a gated community".to_string(),
            price: 85_000_000.0,
            address: "Rublevo Gated Community".to_string(),
            city: "Moscow Oblast".to_string(),
            rooms: 6,
            bathrooms: 4,
            area: 450.0,
            floor: 0,
            total_floors: 3,
            year_built: 2021,
            property_type: PropertyType::Villa,
            status: ListingStatus::ForSale,
            coordinate: Coordinate::new(55.7558, 37.4173),
            images: text_list(&[
                "rublevo-facade",
                "rublevo-pool",
                "rublevo-living-room",
                "rublevo-garden",
                "rublevo-cellar",
            ]),
            description: "Three-story villa on guarded grounds with a private pool, sauna and \
                          wine cellar. Landscaped quarter-hectare plot."
                .to_string(),
            features: text_list(&[
                "Swimming pool",
                "Sauna",
                "Wine cellar",
                "Three-car garage",
                "Smart home",
                "24/7 security",
                "Private grounds",
            ]),
            agent: agents[2].clone(),
            is_new: false,
            is_featured: true,
            rating: 5.0,
            views: 2340,
        },
        Property {
            id: ListingId(4),
            title: "Penthouse with a terrace".to_string(),
            price: 120_000_000.0,
            address: "8 Presnenskaya Embankment".to_string(),
            city: "Moscow".to_string(),
            rooms: 4,
            bathrooms: 3,
            area: 280.0,
            floor: 75,
            total_floors: 75,
            year_built: 2023,
            property_type: PropertyType::Penthouse,
            status: ListingStatus::ForSale,
            coordinate: Coordinate::new(55.7497, 37.5386),
            images: text_list(&[
                "presnenskaya-terrace",
                "presnenskaya-living-room",
                "presnenskaya-spa",
                "presnenskaya-night-view",
            ]),
            description: "Top-floor penthouse with a 100-square-meter terrace overlooking the \
                          business district. Premium finish, four-meter ceilings."
                .to_string(),
            features: text_list(&[
                "Terrace",
                "Skyline views",
                "Premium finish",
                "Concierge",
                "Spa area",
                "Wine room",
                "360-degree panorama",
            ]),
            agent: agents[0].clone(),
            is_new: true,
            is_featured: true,
            rating: 4.9,
            views: 3120,
        },
        Property {
            id: ListingId(5),
            title: "Two-room flat in a new development".to_string(),
            price: 15_000_000.0,
            address: "45 Leningradskaya Street".to_string(),
            city: "Moscow".to_string(),
            rooms: 2,
            bathrooms: 1,
            area: 65.0,
            floor: 12,
            total_floors: 20,
            year_built: 2023,
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForSale,
            coordinate: Coordinate::new(55.7950, 37.6850),
            images: text_list(&[
                "leningradskaya-living-room",
                "leningradskaya-bedroom",
                "leningradskaya-courtyard",
            ]),
            description: "Bright flat in a new residential complex: open kitchen-living room \
                          and a separate bedroom. Playground and fitness center on site."
                .to_string(),
            features: text_list(&[
                "New development",
                "Playground",
                "Fitness center",
                "Concierge",
                "Underground parking",
            ]),
            agent: agents[1].clone(),
            is_new: true,
            is_featured: false,
            rating: 4.5,
            views: 670,
        },
        Property {
            id: ListingId(6),
            title: "Cozy house in the suburbs".to_string(),
            price: 35_000_000.0,
            address: "Uspenskoye Village, Odintsovo District".to_string(),
            city: "Moscow Oblast".to_string(),
            rooms: 5,
            bathrooms: 3,
            area: 220.0,
            floor: 0,
            total_floors: 2,
            year_built: 2019,
            property_type: PropertyType::House,
            status: ListingStatus::ForSale,
            coordinate: Coordinate::new(55.6667, 37.2667),
            images: text_list(&[
                "uspenskoye-facade",
                "uspenskoye-fireplace",
                "uspenskoye-kitchen",
                "uspenskoye-garden",
            ]),
            description: "Comfortable two-story family home with a fireplace lounge and a \
                          modern kitchen. Fifteen-hundred-square-meter plot with a banya and \
                          gazebo."
                .to_string(),
            features: text_list(&[
                "Banya",
                "Gazebo",
                "Garage",
                "Fireplace",
                "Heated floors",
                "Gas heating",
            ]),
            agent: agents[2].clone(),
            is_new: false,
            is_featured: true,
            rating: 4.7,
            views: 1450,
        },
        Property {
            id: ListingId(7),
            title: "Apartment overlooking the park".to_string(),
            price: 18_000_000.0,
            address: "92 Leninsky Avenue".to_string(),
            city: "Moscow".to_string(),
            rooms: 2,
            bathrooms: 1,
            area: 78.0,
            floor: 10,
            total_floors: 16,
            year_built: 2018,
            property_type: PropertyType::Apartment,
            status: ListingStatus::ForSale,
            coordinate: Coordinate::new(55.6892, 37.5608),
            images: text_list(&["leninsky-living-room", "leninsky-park-view"]),
            description: "Two-room apartment facing the Vorobyovy Gory greenbelt. Quality \
                          renovation, built-in furniture, quiet leafy surroundings."
                .to_string(),
            features: text_list(&[
                "Park view",
                "Built-in furniture",
                "Quiet neighborhood",
                "Metro nearby",
                "Balcony",
            ]),
            agent: agents[0].clone(),
            is_new: false,
            is_featured: false,
            rating: 4.4,
            views: 520,
        },
        Property {
            id: ListingId(8),
            title: "Designer studio in a Stalin-era building".to_string(),
            price: 12_000_000.0,
            address: "7 Kropotkinskaya Embankment".to_string(),
            city: "Moscow".to_string(),
            rooms: 1,
            bathrooms: 1,
            area: 42.0,
            floor: 3,
            total_floors: 5,
            year_built: 1952,
            property_type: PropertyType::Studio,
            status: ListingStatus::ForRent,
            coordinate: Coordinate::new(55.7450, 37.6080),
            images: text_list(&[
                "kropotkinskaya-interior",
                "kropotkinskaya-moldings",
                "kropotkinskaya-embankment",
            ]),
            description: "Styled studio in a historic building: 3.5-meter ceilings, original \
                          stucco moldings, fully furnished to an interior designer's plan."
                .to_string(),
            features: text_list(&[
                "Stalin-era building",
                "High ceilings",
                "Stucco moldings",
                "Fully furnished",
                "Historic building",
            ]),
            agent: agents[1].clone(),
            is_new: false,
            is_featured: true,
            rating: 4.8,
            views: 980,
        },
    ];

    (agents, properties)
}
