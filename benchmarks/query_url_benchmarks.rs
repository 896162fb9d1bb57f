#![allow(clippy::unwrap_used, clippy::expect_used)]

/// Query URL benchmarks: query-url vs url crate
use criterion::{Criterion, criterion_group, criterion_main};
use query_url::{ParamMap, QueryUrl, query};
use std::hint::black_box;
use url::Url as UrlCrate;

const LISTING_URL: &str = "https://shop.example/listings?q=road+bikes&page=3\
&filter[price][min]=100&filter[price][max]=900&filter[brand][0]=trek\
&filter[brand][1]=giant&sort[field]=price&sort[dir]=asc&distance=0&empty=";

const FLAT_QUERY: &str = "q=road+bikes&page=3&per_page=24&lang=en&currency=EUR";

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_listing_url");

    group.bench_function("query_url", |b| {
        b.iter(|| QueryUrl::parse(black_box(LISTING_URL)).unwrap());
    });

    group.bench_function("url_crate", |b| {
        b.iter(|| {
            let url = UrlCrate::parse(black_box(LISTING_URL)).unwrap();
            url.query_pairs().count()
        });
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_query");

    group.bench_function("flat", |b| {
        b.iter(|| query::decode(black_box(FLAT_QUERY)));
    });

    let nested = LISTING_URL.split_once('?').map(|(_, q)| q).unwrap();
    group.bench_function("nested", |b| {
        b.iter(|| query::decode(black_box(nested)));
    });

    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_query");
    let params: ParamMap = query::decode(LISTING_URL.split_once('?').map(|(_, q)| q).unwrap());

    group.bench_function("query_url", |b| {
        b.iter(|| query::encode(black_box(&params)));
    });

    let pairs: Vec<(String, String)> = UrlCrate::parse(LISTING_URL)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    group.bench_function("url_crate", |b| {
        b.iter(|| {
            let mut url = UrlCrate::parse("https://shop.example/listings").unwrap();
            url.query_pairs_mut().extend_pairs(black_box(&pairs));
            url
        });
    });

    group.finish();
}

fn bench_mutate(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutate_and_build");
    let base = QueryUrl::parse(LISTING_URL).unwrap();

    group.bench_function("set_remove_build", |b| {
        b.iter(|| {
            let mut url = base.clone();
            url.set_parameter("page", 4)
                .set_parameter("filter.price.min", 150)
                .remove_parameter("sort.dir");
            url.build_url()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_decode, bench_encode, bench_mutate);
criterion_main!(benches);
