use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use quizline_core::model::{CategoryId, Difficulty, Question, QuestionKind};
use quizline_core::session::{score_answers, QuizSession};

fn make_questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question {
            prompt: format!("Question {i}?"),
            correct_answer: format!("right-{i}"),
            distractors: vec!["a".into(), "b".into(), "c".into()],
            category: "bench".into(),
            difficulty: Difficulty::Easy,
            kind: QuestionKind::Multiple,
        })
        .collect()
}

fn make_selections(n: usize, correct_every: usize) -> BTreeMap<usize, String> {
    (0..n)
        .map(|i| {
            let answer = if i % correct_every == 0 {
                format!("right-{i}")
            } else {
                "a".to_string()
            };
            (i, answer)
        })
        .collect()
}

fn bench_score_answers(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_answers");

    for n in [10usize, 50, 1000] {
        let questions = make_questions(n);
        let selections = make_selections(n, 3);
        group.bench_function(format!("n={n}"), |b| {
            b.iter(|| score_answers(black_box(&questions), black_box(&selections)))
        });
    }

    group.finish();
}

fn bench_full_session(c: &mut Criterion) {
    c.bench_function("session_ten_questions", |b| {
        b.iter(|| {
            let mut session = QuizSession::new(CategoryId(9));
            let ticket = session.begin_load();
            session.complete_load(ticket, Ok(make_questions(10)));
            for i in 0..10 {
                session.select_current(format!("right-{i}"));
                session.advance();
            }
            black_box(session.score())
        })
    });
}

criterion_group!(benches, bench_score_answers, bench_full_session);
criterion_main!(benches);
