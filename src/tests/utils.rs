use crate::db::connection::{init_db, Database};

/// Fresh database at a unique temp path, production schema applied.
pub fn init_test_db(tag: &str) -> Database {
    let path = std::env::temp_dir().join(format!(
        "coinafrique_test_{}_{}.sqlite",
        tag,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let db = Database::new(path.to_string_lossy());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));
    db
}

/// One CoinAfrique-style card. Pass an empty price to omit the price
/// node entirely.
pub fn card_html(name: &str, price: &str, city: &str, img: &str) -> String {
    let price_node = if price.is_empty() {
        String::new()
    } else {
        format!("<p class=\"ad__card-price\">{price}</p>")
    };
    format!(
        r#"<div class="col s6 m4 l3">
            <img class="ad__card-img" src="{img}">
            <p class="ad__card-description">{name}</p>
            {price_node}
            <p class="ad__card-location"><i class="icon"></i><span>{city}</span></p>
        </div>"#
    )
}

/// A full listing page wrapping the given cards in the site chrome.
pub fn page_html(cards: &[String]) -> String {
    format!(
        "<html><body><header>CoinAfrique</header><div class=\"row\">{}</div></body></html>",
        cards.join("\n")
    )
}

/// A page of `n` well-formed cards with distinct names.
pub fn full_page(n: usize, prefix: &str) -> String {
    let cards: Vec<String> = (0..n)
        .map(|i| {
            card_html(
                &format!("{prefix} {i}"),
                "12 500 CFA",
                "Dakar",
                &format!("https://img.example/photo{i}.jpg"),
            )
        })
        .collect();
    page_html(&cards)
}

/// A page with site chrome but zero card containers.
pub fn empty_page() -> String {
    page_html(&[])
}
