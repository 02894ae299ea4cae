use crate::domain::listing::CleanListing;
use crate::domain::stats::{count_by_category, price_summary, top_addresses, PriceSummary};

fn clean(id: i64, price: f64, address: &str, category: &str) -> CleanListing {
    CleanListing {
        id,
        name: format!("listing {id}"),
        price,
        address: address.to_string(),
        image_url: "https://img.example/x.jpg".to_string(),
        category: category.to_string(),
        scraped_at: "2026-08-27 10:00:00".to_string(),
    }
}

#[test]
fn price_summary_covers_count_average_min_max() {
    let rows = vec![
        clean(1, 1000.0, "Dakar", "dogs"),
        clean(2, 3000.0, "Thiès", "dogs"),
        clean(3, 5000.0, "Dakar", "sheep"),
    ];

    let summary = price_summary(&rows).unwrap();
    assert_eq!(
        summary,
        PriceSummary {
            listings: 3,
            average: 3000.0,
            min: 1000.0,
            max: 5000.0,
        }
    );
}

#[test]
fn price_summary_of_nothing_is_none() {
    assert_eq!(price_summary(&[]), None);
}

#[test]
fn single_listing_summary_collapses_to_its_price() {
    let rows = vec![clean(1, 4500.0, "Dakar", "poultry")];
    let summary = price_summary(&rows).unwrap();
    assert_eq!(summary.average, 4500.0);
    assert_eq!(summary.min, 4500.0);
    assert_eq!(summary.max, 4500.0);
}

#[test]
fn categories_come_back_most_common_first() {
    let rows = vec![
        clean(1, 100.0, "Dakar", "sheep"),
        clean(2, 100.0, "Dakar", "dogs"),
        clean(3, 100.0, "Dakar", "sheep"),
        clean(4, 100.0, "Dakar", "sheep"),
        clean(5, 100.0, "Dakar", "dogs"),
    ];

    assert_eq!(
        count_by_category(&rows),
        vec![("sheep".to_string(), 3), ("dogs".to_string(), 2)]
    );
}

#[test]
fn tied_counts_order_alphabetically() {
    let rows = vec![
        clean(1, 100.0, "Thiès", "poultry"),
        clean(2, 100.0, "Dakar", "poultry"),
        clean(3, 100.0, "Saint-Louis", "poultry"),
    ];

    // All tied at one listing each; order must still be deterministic.
    assert_eq!(
        top_addresses(&rows, 10),
        vec![
            ("Dakar".to_string(), 1),
            ("Saint-Louis".to_string(), 1),
            ("Thiès".to_string(), 1),
        ]
    );
}

#[test]
fn top_addresses_respects_the_limit() {
    let rows = vec![
        clean(1, 100.0, "Dakar", "dogs"),
        clean(2, 100.0, "Dakar", "dogs"),
        clean(3, 100.0, "Thiès", "dogs"),
        clean(4, 100.0, "Saint-Louis", "dogs"),
    ];

    let top = top_addresses(&rows, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0], ("Dakar".to_string(), 2));
}

#[test]
fn empty_rows_give_empty_breakdowns() {
    assert!(count_by_category(&[]).is_empty());
    assert!(top_addresses(&[], 10).is_empty());
}
