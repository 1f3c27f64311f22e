//! Начальные данные для первого запуска (снимок в хранилище отсутствует)

use crate::domain::a001_category::{CategoryDefinition, Taxonomy, UNCATEGORIZED};
use crate::domain::a002_inventory_item::{InventoryItem, SizeLabel, Sizes};
use crate::shared::InventoryState;

pub fn seed_taxonomy() -> Taxonomy {
    Taxonomy::new(vec![
        CategoryDefinition::with_subcategories(
            "Men",
            &["Casual Wear", "Cuban", "Default", "Oxford"],
        ),
        CategoryDefinition::with_subcategories("Women", &["Blouses", "Default", "Dresses"]),
        CategoryDefinition::new(UNCATEGORIZED),
    ])
}

struct SeedItem {
    name: &'static str,
    sku: &'static str,
    category: &'static str,
    subcategory: &'static str,
    sizes: &'static [(SizeLabel, u32)],
    price: f64,
    description: &'static str,
}

const SEED_ITEMS: &[SeedItem] = &[
    SeedItem {
        name: "Oxford Button-Down",
        sku: "MEN-OXF-001",
        category: "Men",
        subcategory: "Oxford",
        sizes: &[
            (SizeLabel::S, 4),
            (SizeLabel::M, 8),
            (SizeLabel::L, 6),
            (SizeLabel::XL, 3),
        ],
        price: 59.0,
        description: "Cotton oxford shirt with button-down collar",
    },
    SeedItem {
        name: "Cuban Collar Shirt",
        sku: "MEN-CUB-001",
        category: "Men",
        subcategory: "Cuban",
        sizes: &[(SizeLabel::M, 5), (SizeLabel::L, 5), (SizeLabel::XXL, 2)],
        price: 45.0,
        description: "Short sleeve camp collar shirt",
    },
    SeedItem {
        name: "Linen Casual Shirt",
        sku: "MEN-CAS-001",
        category: "Men",
        subcategory: "Casual Wear",
        sizes: &[
            (SizeLabel::S, 3),
            (SizeLabel::M, 7),
            (SizeLabel::L, 4),
            (SizeLabel::Xxxl, 1),
        ],
        price: 39.5,
        description: "Relaxed fit linen shirt",
    },
    SeedItem {
        name: "Floral Wrap Dress",
        sku: "WOM-DRS-001",
        category: "Women",
        subcategory: "Dresses",
        sizes: &[(SizeLabel::XS, 2), (SizeLabel::S, 6), (SizeLabel::M, 4)],
        price: 79.0,
        description: "Midi wrap dress with floral print",
    },
    SeedItem {
        name: "Silk Blouse",
        sku: "WOM-BLS-001",
        category: "Women",
        subcategory: "Blouses",
        sizes: &[(SizeLabel::XS, 3), (SizeLabel::S, 3), (SizeLabel::M, 2)],
        price: 65.0,
        description: "Lightweight silk blouse",
    },
];

/// Товары начального набора, привязанные к переданной таксономии
pub fn seed_items(taxonomy: &Taxonomy) -> Vec<InventoryItem> {
    SEED_ITEMS
        .iter()
        .filter_map(|seed| {
            let category = taxonomy.by_name(seed.category)?;
            let subcategory = category.subcategory_by_name(seed.subcategory)?;
            Some(InventoryItem::new_for_insert(
                seed.name.to_string(),
                seed.sku.to_string(),
                category.id,
                subcategory.id,
                Sizes::from_pairs(seed.sizes),
                seed.price,
                Some(seed.description.to_string()),
                None,
            ))
        })
        .collect()
}

pub fn seed_state() -> InventoryState {
    let taxonomy = seed_taxonomy();
    let catalog = seed_items(&taxonomy);
    InventoryState::new(taxonomy, catalog)
}
