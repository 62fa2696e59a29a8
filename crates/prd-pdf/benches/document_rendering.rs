//! Benchmarks for rendering document blocks to HTML and PDF.

#![allow(clippy::format_push_string)] // Benchmark setup code, performance not critical

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use prd_pdf::{DocumentMeta, layout_pages, render_pdf};
use prd_renderer::render_html;

/// Generate a document block with the given number of sections.
fn generate_document(sections: usize) -> String {
    let mut doc = String::with_capacity(sections * 400);
    doc.push_str("# Benchmark PRD\n\n");
    for i in 0..sections {
        doc.push_str(&format!("## Section {i}\n"));
        doc.push_str("Users need **faster** answers with *less* effort via `search`.\n");
        doc.push_str("- first requirement\n- second requirement\n");
        doc.push_str("1. step one\n2. step two\n\n---\n");
    }
    doc
}

fn meta() -> DocumentMeta {
    DocumentMeta::new("Benchmark PRD", NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
}

fn bench_html(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_html");
    for sections in [5, 50] {
        let doc = generate_document(sections);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &doc, |b, doc| {
            b.iter(|| render_html(doc));
        });
    }
    group.finish();
}

fn bench_pdf(c: &mut Criterion) {
    let meta = meta();
    let mut group = c.benchmark_group("render_pdf");
    for sections in [5, 50] {
        let doc = generate_document(sections);
        group.throughput(Throughput::Bytes(doc.len() as u64));
        group.bench_with_input(BenchmarkId::new("layout", sections), &doc, |b, doc| {
            b.iter(|| layout_pages(doc, &meta));
        });
        group.bench_with_input(BenchmarkId::new("full", sections), &doc, |b, doc| {
            b.iter(|| render_pdf(doc, &meta));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_html, bench_pdf);
criterion_main!(benches);
