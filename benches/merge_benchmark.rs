//! Benchmarks for docfuse merge performance.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docfuse::docx::{assemble, insertion_offset, merge_parts, sanitize_fragment, MergeOptions};
use docfuse::SanitizeOptions;
use std::io::{Cursor, Write};

/// Build a body-content fragment with the given number of paragraphs,
/// each carrying the tracking ids a real document would have.
fn make_fragment(paragraphs: usize) -> String {
    let mut body = String::new();
    for i in 0..paragraphs {
        body.push_str(&format!(
            r#"<w:p w14:paraId="{i:08X}" w14:textId="{i:08X}" w:rsidR="00AB{i:04X}"><w:r><w:t>Paragraph {i} with some representative text content.</w:t></w:r></w:p>"#
        ));
    }
    body.push_str(r#"<w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>"#);
    body
}

fn make_docx(body_content: &str) -> Vec<u8> {
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" \
         xmlns:w14=\"http://schemas.microsoft.com/office/word/2010/wordml\">\
         <w:body>{body_content}</w:body></w:document>"
    );
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize_fragment");
    let options = SanitizeOptions::default();

    for paragraphs in [100, 1_000, 5_000] {
        let fragment = make_fragment(paragraphs);
        group.throughput(Throughput::Bytes(fragment.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(paragraphs),
            &fragment,
            |b, fragment| {
                b.iter(|| sanitize_fragment(black_box(fragment), &options).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_splice_and_assemble(c: &mut Criterion) {
    let master = format!("<w:body>{}</w:body>", make_fragment(1_000));
    let fragments: Vec<String> = (0..4)
        .map(|_| {
            sanitize_fragment(&make_fragment(250), &SanitizeOptions::default()).unwrap()
        })
        .collect();

    c.bench_function("splice_and_assemble", |b| {
        b.iter(|| {
            let offset = insertion_offset(black_box(&master)).unwrap();
            assemble(&master, offset, &fragments)
        });
    });
}

fn bench_merge_parts(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let master = dir.path().join("1_master.docx");
    std::fs::write(&master, make_docx(&make_fragment(500))).unwrap();

    let parts: Vec<_> = (2..6)
        .map(|i| {
            let path = dir.path().join(format!("{i}_part.docx"));
            std::fs::write(&path, make_docx(&make_fragment(250))).unwrap();
            path
        })
        .collect();

    let options = MergeOptions::default();
    c.bench_function("merge_parts_4_aux", |b| {
        b.iter(|| merge_parts(black_box(&master), &parts, &options).unwrap());
    });
}

criterion_group!(
    benches,
    bench_sanitize,
    bench_splice_and_assemble,
    bench_merge_parts
);
criterion_main!(benches);
