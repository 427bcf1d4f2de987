//! Benchmarks for vim_motions keystroke performance.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use ropey::Rope;
use std::time::Duration;
use vim_motions::error::HostError;
use vim_motions::traits::{Host, TextBuffer};
use vim_motions::types::{Selection, TextEdit};
use vim_motions::{Engine, InputEvent, parse_keys};

/// Rope-based host for benchmarking. No undo history.
#[derive(Clone)]
struct BenchBuffer {
    rope: Rope,
    selection: Selection,
}

impl BenchBuffer {
    fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::cursor(0),
        }
    }

    fn at_line(text: &str, line: usize) -> Self {
        let mut buf = Self::new(text);
        buf.selection = Selection::cursor(buf.rope.line_to_char(line));
        buf
    }
}

impl TextBuffer for BenchBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let line = self.rope.line(line);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn line_to_char(&self, line: usize) -> usize {
        self.rope.line_to_char(line.min(self.rope.len_lines()))
    }

    fn char_to_line(&self, index: usize) -> usize {
        self.rope.char_to_line(index.min(self.rope.len_chars()))
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.rope.get_char(index)
    }

    fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.rope.len_chars());
        self.rope.slice(start.min(end)..end).to_string()
    }
}

impl Host for BenchBuffer {
    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) -> Result<(), HostError> {
        self.selection = selection;
        Ok(())
    }

    fn apply_edits(&mut self, edits: &[TextEdit]) -> Result<(), HostError> {
        let mut ordered: Vec<&TextEdit> = edits.iter().collect();
        ordered.sort_by(|a, b| b.start.cmp(&a.start));
        for edit in ordered {
            self.rope.remove(edit.start..edit.end);
            self.rope.insert(edit.start, &edit.text);
        }
        Ok(())
    }

    fn undo(&mut self) -> Result<(), HostError> {
        Ok(())
    }
}

fn generate_sample_text(lines: usize) -> String {
    let mut text = String::new();
    for i in 0..lines {
        text.push_str(&format!(
            "This is line {} with (some) sample text for \"benchmarking\" vim operations.\n",
            i + 1
        ));
        if i % 10 == 0 {
            text.push('\n');
        }
    }
    text
}

fn run(engine: &mut Engine, buffer: &mut BenchBuffer, keys: &[InputEvent]) {
    for input in keys {
        black_box(engine.handle_event(buffer, input.clone()));
    }
}

fn benchmark_simple_movements(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut buffer = BenchBuffer::at_line(&text, 500);
    let mut engine = Engine::new();
    let keys = parse_keys("jjllhk");

    c.bench_function("simple movements (hjkl)", |b| {
        b.iter(|| run(&mut engine, &mut buffer, black_box(&keys)));
    });
}

fn benchmark_word_movements(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut buffer = BenchBuffer::new(&text);
    let mut engine = Engine::new();
    let keys = parse_keys("wwwbwe");

    c.bench_function("word movements (w/b/e)", |b| {
        b.iter(|| run(&mut engine, &mut buffer, black_box(&keys)));
    });
}

fn benchmark_find_and_brackets(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut buffer = BenchBuffer::at_line(&text, 200);
    let mut engine = Engine::new();
    let keys = parse_keys("0f(%;,t.$F\"0");

    c.bench_function("find and bracket motions", |b| {
        b.iter(|| run(&mut engine, &mut buffer, black_box(&keys)));
    });
}

fn benchmark_delete_operations(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let template = BenchBuffer::at_line(&text, 50);
    let keys = parse_keys("dwdddi(");

    c.bench_function("delete operations (dw, dd, di()", |b| {
        b.iter_batched(
            || (Engine::new(), template.clone()),
            |(mut engine, mut buffer)| run(&mut engine, &mut buffer, &keys),
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_visual_selection(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let mut buffer = BenchBuffer::at_line(&text, 50);
    let mut engine = Engine::new();
    let keys = parse_keys("vwwwwwjjk<esc>");

    c.bench_function("visual selection", |b| {
        b.iter(|| run(&mut engine, &mut buffer, black_box(&keys)));
    });
}

fn benchmark_yank_paste(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let template = BenchBuffer::at_line(&text, 300);
    let keys = parse_keys("3yyp\"ayiwP");

    c.bench_function("yank and paste", |b| {
        b.iter_batched(
            || (Engine::new(), template.clone()),
            |(mut engine, mut buffer)| run(&mut engine, &mut buffer, &keys),
            BatchSize::SmallInput,
        );
    });
}

fn benchmark_complex_sequence(c: &mut Criterion) {
    let text = generate_sample_text(1000);
    let template = BenchBuffer::new(&text);
    // move, change a word, type, leave, repeat
    let keys = parse_keys("5jwwciwhello world<esc>w.");

    c.bench_function("complex keystroke sequence", |b| {
        b.iter_batched(
            || (Engine::new(), template.clone()),
            |(mut engine, mut buffer)| run(&mut engine, &mut buffer, &keys),
            BatchSize::SmallInput,
        );
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(100);
    targets = benchmark_simple_movements,
              benchmark_word_movements,
              benchmark_find_and_brackets,
              benchmark_delete_operations,
              benchmark_visual_selection,
              benchmark_yank_paste,
              benchmark_complex_sequence
}
criterion_main!(benches);
