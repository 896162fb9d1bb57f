#![allow(clippy::print_stdout)]

use query_url::{QueryUrl, Value};

/// Rebuild a listing URL from a filter form, the way a search page would.
fn main() -> query_url::Result<()> {
    let current = "https://shop.example/listings?filter[brand][]=trek&distance=25";

    let mut url = QueryUrl::builder()
        .current_url(current)
        .parameters([
            ("filter.price.min", Value::from(100)),
            ("filter.price.max", Value::from("")),
            ("distance", Value::from(0)),
        ])
        .build()?;

    println!("filters: {:?}", url.parameter("filter"));
    println!("url:     {url}");

    url.set_parameter("filter.brand", Value::from_iter(["trek", "giant"]));
    println!("brands:  {url}");

    let pagination = url.select_parameters(["page", "per_page"]);
    println!("pagination set: {}", !pagination.is_empty());

    let without_price = url.parameters_excluding(["filter.price"]);
    println!("without price: {:?}", without_price);

    url.require_parameter("filter.brand")?;
    if let Err(err) = url.require_parameter("filter.color") {
        println!("missing: {err}");
    }

    Ok(())
}
