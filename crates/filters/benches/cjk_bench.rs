use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tabclean_filters::{contains_chinese_text, is_cjk_char, ChineseFilter, ChineseFilterConfig};
use tabclean_formats::{Dataset, NaValues, Record};

fn bench_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("cjk_detection");

    let sample_texts = vec![
        "Phone Case for iPhone 15 Pro Max, shockproof, clear",
        "苹果手机 保护壳 透明 防摔",
        "USB-C Cable 1m - fast charging 60W",
        "Mixed listing: Wireless Earbuds 无线耳机",
        "Điện thoại di động chính hãng",
        "", // Empty cell
    ];

    group.throughput(Throughput::Elements(sample_texts.len() as u64));
    group.bench_function("regex", |b| {
        b.iter(|| {
            for text in &sample_texts {
                black_box(contains_chinese_text(text));
            }
        });
    });

    group.bench_function("per_char", |b| {
        b.iter(|| {
            for text in &sample_texts {
                black_box(text.chars().any(is_cjk_char));
            }
        });
    });

    group.finish();
}

fn bench_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput");

    // 1000 product titles, one in ten with Chinese text at the end
    let titles: Vec<String> = (0..1000)
        .map(|i| {
            if i % 10 == 0 {
                format!("Product {} with a long English description 商品", i)
            } else {
                format!("Product {} with a long English description and price {}", i, i * 100)
            }
        })
        .collect();

    group.throughput(Throughput::Elements(titles.len() as u64));
    group.bench_function("1000_titles", |b| {
        b.iter(|| {
            titles
                .iter()
                .filter(|t| contains_chinese_text(black_box(t)))
                .count()
        });
    });

    group.finish();
}

fn bench_filter_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_apply");

    let na = NaValues::default();
    let headers: Vec<String> = ["title", "description", "price"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let records: Vec<Record> = (0..1000)
        .map(|i| {
            let description = if i % 10 == 0 {
                "Wireless earbuds 无线耳机".to_string()
            } else {
                format!("Wireless earbuds, model {}", i)
            };
            let price = if i % 7 == 0 { "NaN".to_string() } else { i.to_string() };
            Record::from_raw(
                [format!("Product {}", i), description, price],
                &na,
                i as u64 + 2,
            )
        })
        .collect();
    let dataset = Dataset::new(headers.clone(), records);
    let filter = ChineseFilter::new(&ChineseFilterConfig::all_columns(), &headers).unwrap();

    group.throughput(Throughput::Elements(dataset.len() as u64));
    group.bench_function("1000_records", |b| {
        b.iter(|| black_box(filter.apply(dataset.clone())).len());
    });

    group.finish();
}

criterion_group!(benches, bench_detection, bench_throughput, bench_filter_apply);
criterion_main!(benches);
