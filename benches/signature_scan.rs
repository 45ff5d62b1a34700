//! Signature Scan Benchmarks
//!
//! Measures the full scan of generated documents, from raw bytes to outcome.
//!
//! Run with: `cargo bench --bench signature_scan`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::time::Duration;

use pdf_signature_validator::signature::SignatureScanner;

/// A document of `page_count` pages of filler text, with `last_line` on the final page
fn create_pdf(page_count: usize, last_line: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids = Vec::new();
    for index in 0..page_count {
        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 10.into()]),
            Operation::new("Td", vec![72.into(), 760.into()]),
        ];
        for line in 0..40 {
            let text = format!("Page {} line {}: terms and conditions apply", index + 1, line);
            operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
            operations.push(Operation::new("T*", vec![]));
        }
        if index + 1 == page_count {
            operations.push(Operation::new("Tj", vec![Object::string_literal(last_line)]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations }
            .encode()
            .expect("Failed to encode content");
        let content_id = doc.add_object(Stream::new(dictionary! {}, content));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("Failed to save PDF");
    buffer
}

/// Scanning documents where the phrase only appears on the last page
fn bench_scan_last_page(c: &mut Criterion) {
    let scanner = SignatureScanner::default();

    let mut group = c.benchmark_group("scan_last_page");
    group.measurement_time(Duration::from_secs(10));

    for page_count in [1usize, 10, 50] {
        let pdf_data = create_pdf(page_count, "Podpis klienta");
        group.throughput(Throughput::Bytes(pdf_data.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("pages", page_count),
            &pdf_data,
            |b, data| b.iter(|| black_box(scanner.scan(black_box(data)))),
        );
    }

    group.finish();
}

/// Scanning documents with no phrase, so every page is read
fn bench_scan_unsigned(c: &mut Criterion) {
    let scanner = SignatureScanner::default();
    let pdf_data = create_pdf(50, "End of document");

    let mut group = c.benchmark_group("scan_unsigned");
    group.throughput(Throughput::Bytes(pdf_data.len() as u64));

    group.bench_function("pages/50", |b| {
        b.iter(|| black_box(scanner.has_signature(black_box(&pdf_data))))
    });

    group.finish();
}

/// Rejecting bytes that are not a PDF at all
fn bench_scan_garbage(c: &mut Criterion) {
    let scanner = SignatureScanner::default();
    let garbage = vec![0x5Au8; 64 * 1024];

    c.bench_function("scan_garbage", |b| {
        b.iter(|| black_box(scanner.scan(black_box(&garbage))))
    });
}

criterion_group!(
    benches,
    bench_scan_last_page,
    bench_scan_unsigned,
    bench_scan_garbage
);
criterion_main!(benches);
