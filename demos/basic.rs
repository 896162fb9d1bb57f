#![allow(clippy::print_stdout)]

use query_url::{QueryUrl, Secure};

fn main() -> query_url::Result<()> {
    let mut url = QueryUrl::builder()
        .url("http://example.org/search?q=bikes&page=1&sort=")
        .secure(Secure::Https)
        .build()?;

    println!("parsed:   {url}");
    println!("q = {:?}", url.parameter("q"));

    url.set_parameter("page", 2)
        .set_parameter("filter.color", "red")
        .set_fragment("results");

    println!("updated:  {}", url.build_url());
    println!("relative: {}", url.build_relative_url());

    url.remove_all_parameters().remove_fragment();
    println!("cleared:  {url}");

    Ok(())
}
