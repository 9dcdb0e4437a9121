use carta_menu::MenuCatalog;

/// One flat row of the delivery-platform feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryRecord {
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub dietary: String,
}

/// Flattens the catalog into delivery records, sections in canonical
/// order, items in source order.
pub fn delivery_records(catalog: &MenuCatalog) -> Vec<DeliveryRecord> {
    let mut records = Vec::new();
    for (_, section) in catalog.sections() {
        for category in &section.categories {
            for item in &category.items {
                records.push(DeliveryRecord {
                    category: category.title.clone(),
                    name: item.name.clone(),
                    description: item.description.clone().unwrap_or_default(),
                    price: item.price.primary().to_string(),
                    dietary: item
                        .dietary
                        .map(|d| d.label().to_string())
                        .unwrap_or_default(),
                });
            }
        }
    }
    records
}

/// Renders the feed as comma-joined lines with a header row.
///
/// Fields are NOT escaped; a comma inside an item name shifts every
/// following column. Delivery platforms have ingested this exact shape
/// since the first integration, so the gap is preserved on purpose rather
/// than silently corrected.
pub fn delivery_feed(catalog: &MenuCatalog) -> String {
    let mut out = String::from("category,item,description,price,dietary\n");
    for record in delivery_records(catalog) {
        out.push_str(&record.category);
        out.push(',');
        out.push_str(&record.name);
        out.push(',');
        out.push_str(&record.description);
        out.push(',');
        out.push_str(&record.price);
        out.push(',');
        out.push_str(&record.dietary);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_menu::{Dietary, MenuCategory, MenuItem, Price, SizeTier};

    fn catalog() -> MenuCatalog {
        let mut catalog = MenuCatalog::empty();
        catalog.beverages.categories.push(MenuCategory {
            title: "Hot Drinks".to_string(),
            icon: None,
            items: vec![MenuItem {
                name: "Masala Chai".to_string(),
                description: Some("Spiced black tea".to_string()),
                badges: Default::default(),
                dietary: Some(Dietary::Veg),
                spice_level: None,
                calories: None,
                discount_note: None,
                price: Price::Single("₹40".to_string()),
            }],
        });
        catalog.starters.categories.push(MenuCategory {
            title: "Tandoor".to_string(),
            icon: None,
            items: vec![MenuItem {
                name: "Chicken Tikka".to_string(),
                description: None,
                badges: Default::default(),
                dietary: Some(Dietary::NonVeg),
                spice_level: None,
                calories: None,
                discount_note: None,
                price: Price::Tiered(vec![
                    SizeTier { label: "Half".to_string(), price: "₹240".to_string() },
                    SizeTier { label: "Full".to_string(), price: "₹440".to_string() },
                ]),
            }],
        });
        catalog
    }

    #[test]
    fn test_records_follow_section_order() {
        let records = delivery_records(&catalog());
        assert_eq!(records.len(), 2);
        // Starters come before beverages regardless of insertion order.
        assert_eq!(records[0].name, "Chicken Tikka");
        assert_eq!(records[1].name, "Masala Chai");
    }

    #[test]
    fn test_tiered_item_reports_first_tier_price() {
        let records = delivery_records(&catalog());
        assert_eq!(records[0].price, "₹240");
    }

    #[test]
    fn test_feed_lines_are_unescaped_joins() {
        let feed = delivery_feed(&catalog());
        let lines: Vec<&str> = feed.lines().collect();
        assert_eq!(lines[0], "category,item,description,price,dietary");
        assert_eq!(lines[1], "Tandoor,Chicken Tikka,,₹240,non-veg");
        assert_eq!(lines[2], "Hot Drinks,Masala Chai,Spiced black tea,₹40,veg");
    }

    #[test]
    fn test_comma_in_name_shifts_columns_as_shipped() {
        // The known fidelity gap: no quoting, the comma splits the field.
        let mut catalog = MenuCatalog::empty();
        catalog.mains.categories.push(MenuCategory {
            title: "Rice".to_string(),
            icon: None,
            items: vec![MenuItem {
                name: "Biryani, extra raita".to_string(),
                description: None,
                badges: Default::default(),
                dietary: None,
                spice_level: None,
                calories: None,
                discount_note: None,
                price: Price::Single("₹320".to_string()),
            }],
        });
        let feed = delivery_feed(&catalog);
        let lines: Vec<&str> = feed.lines().collect();
        assert_eq!(lines[1].split(',').count(), 6);
    }
}
