use criterion::{Criterion, criterion_group, criterion_main};
use motion_lines_engine::{extract_range, insert_line_numbers, replace_lines, strip_line_numbers};
use std::hint::black_box;

fn generate_motion_text(sections: usize) -> String {
    let mut content = String::new();
    for section in 0..sections {
        content.push_str(&format!("<h2>Section {section}</h2>\n"));
        content.push_str(
            "<p>The assembly resolves that the board shall publish an annual report \
             on the <strong>state of the association</strong> and present it at the \
             general meeting.</p>\n",
        );
        content.push_str("<ol><li>First measure to be taken</li><li>Second measure, with a \
             considerably longer wording than the first one</li></ol>\n");
        content.push_str(
            "<blockquote><p>Quoted passage from the statutes that is indented.</p></blockquote>\n",
        );
    }
    content
}

fn bench_numbering(c: &mut Criterion) {
    let mut group = c.benchmark_group("numbering");
    group.sample_size(20);

    let content = generate_motion_text(50);
    group.bench_function("insert_line_numbers", |b| {
        b.iter(|| {
            let numbered = insert_line_numbers(black_box(&content), 80).unwrap();
            black_box(numbered);
        });
    });

    let numbered = insert_line_numbers(&content, 80).unwrap();
    group.bench_function("strip_line_numbers", |b| {
        b.iter(|| {
            let stripped = strip_line_numbers(black_box(&numbered)).unwrap();
            black_box(stripped);
        });
    });

    group.finish();
}

fn bench_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranges");
    group.sample_size(20);

    let numbered = insert_line_numbers(&generate_motion_text(50), 80).unwrap();
    group.bench_function("extract_range", |b| {
        b.iter(|| {
            let bundle = extract_range(black_box(&numbered), 40, 60).unwrap();
            black_box(bundle);
        });
    });

    group.bench_function("replace_lines", |b| {
        b.iter(|| {
            let merged = replace_lines(black_box(&numbered), "<p>Replaced.</p>", 40, 60).unwrap();
            black_box(merged);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_numbering, bench_ranges);
criterion_main!(benches);
