//! Demo catalog loaded into an empty store at startup.

use crate::domain::errors::DomainError;
use crate::domain::money::parse_decimal;
use crate::domain::ports::ProductRepository;
use crate::domain::product::NewProduct;

const IMAGE_BASE: &str = "https://images.unsplash.com";
const IMAGE_PARAMS: &str = "auto=format&fit=crop&w=400&h=300";

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    category: &'static str,
    image: &'static str,
    rating: &'static str,
    badge: Option<&'static str>,
    discount_price: Option<&'static str>,
    is_service: bool,
}

const CATALOG: [SeedProduct; 15] = [
    SeedProduct {
        name: "Smartwatch X1",
        description: "Premium smartwatch with health tracking and long battery life.",
        price: "999.99",
        category: "electronics",
        image: "photo-1546868871-0f936769675e",
        rating: "4.5",
        badge: Some("NEW"),
        discount_price: None,
        is_service: false,
    },
    SeedProduct {
        name: "Wireless Headphones",
        description: "Noise-cancelling headphones with crystal clear sound quality.",
        price: "449.99",
        category: "electronics",
        image: "photo-1492107376256-4026437926cd",
        rating: "4.8",
        badge: Some("SALE"),
        discount_price: Some("599.99"),
        is_service: false,
    },
    SeedProduct {
        name: "Designer Backpack",
        description: "Stylish and functional backpack with multiple compartments.",
        price: "79.99",
        category: "fashion",
        image: "photo-1598033129183-c4f50c736f10",
        rating: "4.3",
        badge: None,
        discount_price: None,
        is_service: false,
    },
    SeedProduct {
        name: "Smart Coffee Maker",
        description: "App-controlled coffee maker with programmable brewing.",
        price: "199.99",
        category: "home",
        image: "photo-1540574163026-643ea20ade25",
        rating: "4.6",
        badge: None,
        discount_price: None,
        is_service: false,
    },
    SeedProduct {
        name: "Premium Web Design",
        description: "Professional web design services for your business or personal site.",
        price: "149.00",
        category: "services",
        image: "photo-1590650046871-92c887180603",
        rating: "4.9",
        badge: Some("POPULAR"),
        discount_price: None,
        is_service: true,
    },
    SeedProduct {
        name: "Leather Wallet",
        description: "Handcrafted genuine leather wallet with RFID protection.",
        price: "59.99",
        category: "fashion",
        image: "photo-1602810318660-d2c46b750f88",
        rating: "4.1",
        badge: None,
        discount_price: None,
        is_service: false,
    },
    SeedProduct {
        name: "Smart Home Hub",
        description: "Control all your smart home devices from one central hub.",
        price: "299.99",
        category: "home",
        image: "photo-1579656381226-5fc0f0100c3b",
        rating: "4.4",
        badge: None,
        discount_price: None,
        is_service: false,
    },
    SeedProduct {
        name: "Ultra Slim Laptop",
        description: "Powerful laptop with all-day battery life and stunning display.",
        price: "1299.99",
        category: "electronics",
        image: "photo-1593642702909-dec73df255d7",
        rating: "4.7",
        badge: Some("BESTSELLER"),
        discount_price: None,
        is_service: false,
    },
    SeedProduct {
        name: "Mobile App Development",
        description: "Custom mobile application development for iOS and Android.",
        price: "89.99",
        category: "services",
        image: "photo-1551650975-87deedd944c3",
        rating: "4.5",
        badge: None,
        discount_price: None,
        is_service: true,
    },
    SeedProduct {
        name: "Indoor Plant Set",
        description: "Set of 3 low-maintenance indoor plants with decorative pots.",
        price: "49.99",
        category: "home",
        image: "photo-1554244933-d876deb6b2ff",
        rating: "4.2",
        badge: Some("SALE"),
        discount_price: Some("69.99"),
        is_service: false,
    },
    SeedProduct {
        name: "Running Shoes",
        description: "Lightweight running shoes with ergonomic design and extra cushioning.",
        price: "129.99",
        category: "fashion",
        image: "photo-1520639888713-7851133b1ed0",
        rating: "4.3",
        badge: None,
        discount_price: None,
        is_service: false,
    },
    SeedProduct {
        name: "Smart Security Camera",
        description: "Wireless security camera with motion detection and cloud storage.",
        price: "349.99",
        category: "electronics",
        image: "photo-1546435770-a3e426bf472b",
        rating: "4.6",
        badge: None,
        discount_price: None,
        is_service: false,
    },
    SeedProduct {
        name: "Professional Photography",
        description: "Professional photography services for events, portraits, and products.",
        price: "199.99",
        category: "services",
        image: "photo-1542038784456-1ea8e935640e",
        rating: "4.7",
        badge: None,
        discount_price: None,
        is_service: true,
    },
    SeedProduct {
        name: "Wireless Earbuds",
        description: "True wireless earbuds with touch controls and noise isolation.",
        price: "129.99",
        category: "electronics",
        image: "photo-1588423771073-b8903fbb85b5",
        rating: "4.3",
        badge: None,
        discount_price: None,
        is_service: false,
    },
    SeedProduct {
        name: "Stylish Sunglasses",
        description: "Polarized sunglasses with UV protection and durable frame.",
        price: "89.99",
        category: "fashion",
        image: "photo-1577803645773-f96470509666",
        rating: "4.2",
        badge: None,
        discount_price: None,
        is_service: false,
    },
];

fn decimal(field: &str, raw: &str) -> Result<bigdecimal::BigDecimal, DomainError> {
    parse_decimal(raw).ok_or_else(|| DomainError::Internal(format!("bad seed {} '{}'", field, raw)))
}

/// Loads the demo catalog unless the store already holds products.
/// Returns how many products were inserted.
pub fn seed_products<R: ProductRepository>(repo: &R) -> Result<usize, DomainError> {
    if !repo.list()?.is_empty() {
        log::info!("Products already seeded");
        return Ok(0);
    }

    for seed in &CATALOG {
        repo.create(NewProduct {
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: decimal("price", seed.price)?,
            category: seed.category.to_string(),
            image: format!("{}/{}?{}", IMAGE_BASE, seed.image, IMAGE_PARAMS),
            rating: decimal("rating", seed.rating)?,
            badge: seed.badge.map(str::to_string),
            discount_price: seed
                .discount_price
                .map(|raw| decimal("discount_price", raw))
                .transpose()?,
            is_service: seed.is_service,
        })?;
    }

    log::info!("Seeded {} products", CATALOG.len());
    Ok(CATALOG.len())
}
