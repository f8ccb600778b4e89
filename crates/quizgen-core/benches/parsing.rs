use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizgen_core::parser::{ParagraphParser, QuizParser};
use quizgen_core::{parse, QuestionSchema};

fn bench_heading_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("heading_parser");

    let small = generate_quiz(5);
    let medium = generate_quiz(50);
    let large = generate_quiz(200);

    group.bench_function("5_questions", |b| {
        b.iter(|| parse(black_box(&small), 4, QuestionSchema::MultipleChoice))
    });

    group.bench_function("50_questions", |b| {
        b.iter(|| parse(black_box(&medium), 4, QuestionSchema::MultipleChoice))
    });

    group.bench_function("200_questions", |b| {
        b.iter(|| parse(black_box(&large), 4, QuestionSchema::MultipleChoice))
    });

    group.bench_function("200_questions_short_answer", |b| {
        b.iter(|| parse(black_box(&large), 4, QuestionSchema::ShortAnswer))
    });

    group.finish();
}

fn bench_paragraph_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("paragraph_parser");

    let text = generate_paragraphs(20, 5);

    group.bench_function("20_paragraphs", |b| {
        b.iter(|| ParagraphParser.parse(black_box(&text)))
    });

    group.finish();
}

fn generate_quiz(n: usize) -> String {
    let mut s = String::from("Here is your quiz:\n\n");
    for i in 1..=n {
        s.push_str(&format!(
            "**Question {i}**\nWhat is {i} + {i}?\nOptions:\nA) {a}\nB) {b}\nC) {c}\nD) {d}\nAnswer: {a}\n\n",
            a = i * 2,
            b = i * 2 + 1,
            c = i * 3,
            d = i,
        ));
    }
    s
}

fn generate_paragraphs(paragraphs: usize, per_paragraph: usize) -> String {
    let mut s = String::new();
    for p in 1..=paragraphs {
        s.push_str(&format!("**Paragraph {p}:**\nA short reading passage number {p}.\n\n"));
        for q in 1..=per_paragraph {
            s.push_str(&format!(
                "Question: Item {q} of passage {p}?\nOptions: A) one B) two C) three D) four\nAnswer: B\n\n"
            ));
        }
    }
    s
}

criterion_group!(benches, bench_heading_parser, bench_paragraph_parser);
criterion_main!(benches);
