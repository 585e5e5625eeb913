//! Benchmarks for rendering and reconciliation performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic document models with a realistic mix
//! of headings, paragraphs, tables, and pictures.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docbundle::render::{to_annotated_text, to_markdown, to_record, RecordFormat, RenderOptions};
use docbundle::{DocumentModel, Element, GeneratedImage, Table};

/// Creates a synthetic model with the given number of sections. Each
/// section holds a heading, two paragraphs, a table, and a picture.
fn create_test_model(sections: usize) -> DocumentModel {
    let mut model = DocumentModel::new("bench");

    for i in 0..sections {
        model.push_element(Element::heading(2, format!("Section {i}")));
        model.push_element(Element::text(
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
             eiusmod tempor incididunt ut labore et dolore magna aliqua.",
        ));
        model.push_element(Element::text(
            "Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris \
             nisi ut aliquip ex ea commodo consequat.",
        ));

        let rows: Vec<Vec<String>> = (0..20)
            .map(|r| (0..6).map(|c| format!("cell {r}.{c}")).collect())
            .collect();
        model.push_element(Element::Table(Table::from_rows(rows)));

        model.push_element(Element::Picture);
        model.push_image(GeneratedImage::new(
            GeneratedImage::numbered_name("bench", i + 1),
            640,
            480,
        ));
    }

    model
}

fn bench_annotated_text(c: &mut Criterion) {
    let small = create_test_model(5);
    let large = create_test_model(100);

    c.bench_function("annotated_text_small", |b| {
        b.iter(|| to_annotated_text(black_box(&small)));
    });

    c.bench_function("annotated_text_large", |b| {
        b.iter(|| to_annotated_text(black_box(&large)));
    });
}

fn bench_markdown(c: &mut Criterion) {
    let model = create_test_model(100);
    let options = RenderOptions::default();

    c.bench_function("markdown_large", |b| {
        b.iter(|| to_markdown(black_box(&model), black_box(&options)).unwrap());
    });
}

fn bench_record(c: &mut Criterion) {
    let model = create_test_model(100);

    c.bench_function("record_compact_large", |b| {
        b.iter(|| to_record(black_box(&model), RecordFormat::Compact).unwrap());
    });
}

fn bench_table_renderings(c: &mut Criterion) {
    let rows: Vec<Vec<String>> = (0..200)
        .map(|r| (0..10).map(|c| format!("value {r}.{c}")).collect())
        .collect();
    let table = Table::from_rows(rows);

    c.bench_function("table_text_grid", |b| {
        b.iter(|| black_box(&table).to_text_grid());
    });

    c.bench_function("table_csv", |b| {
        b.iter(|| black_box(&table).to_csv());
    });
}

criterion_group!(
    benches,
    bench_annotated_text,
    bench_markdown,
    bench_record,
    bench_table_renderings
);
criterion_main!(benches);
