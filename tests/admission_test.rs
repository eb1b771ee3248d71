mod helpers;

use chrono::NaiveDate;
use helpers::{test_db, FailingEmbedder, StubEmbedder};
use learnlog::config::AdmissionConfig;
use learnlog::journal::admission::{admit_entry, AdmissionOutcome};
use learnlog::journal::types::{AdmissionError, RejectionReason};

const SPECIFIC_ENTRY: &str = "I implemented a caching layer in Redis for 3 hours yesterday, \
                              fixing a bug where TTLs of 10s expired the wrong keys.";

fn config() -> AdmissionConfig {
    AdmissionConfig::default()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn specific_entry_is_accepted_and_persisted() {
    let mut conn = test_db();

    let outcome = admit_entry(
        &mut conn,
        &StubEmbedder,
        &config(),
        "sam",
        SPECIFIC_ENTRY,
        day(2026, 8, 25),
    )
    .unwrap();

    let entry_id = match outcome {
        AdmissionOutcome::Accepted { entry_id } => entry_id,
        other => panic!("expected acceptance, got {other:?}"),
    };

    let (content, word_count): (String, u32) = conn
        .query_row(
            "SELECT content, word_count FROM entries WHERE id = ?1",
            [&entry_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(content, SPECIFIC_ENTRY);
    assert_eq!(word_count, 22);

    // Embedding row was written alongside the entry
    let vec_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM entries_vec WHERE entry_id = ?1",
            [&entry_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(vec_count, 1);
}

#[test]
fn short_entry_is_rejected_with_word_counts() {
    let mut conn = test_db();

    let outcome = admit_entry(
        &mut conn,
        &StubEmbedder,
        &config(),
        "sam",
        "Learned about Rust traits today",
        day(2026, 8, 25),
    )
    .unwrap();

    match outcome {
        AdmissionOutcome::Rejected { reason, feedback } => {
            assert_eq!(reason, RejectionReason::TooShort);
            assert!(feedback.contains("at least 15 words"));
            assert!(feedback.contains("currently 5"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    let entry_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
        .unwrap();
    assert_eq!(entry_count, 0);
}

#[test]
fn generic_entry_is_rejected_and_logged() {
    let mut conn = test_db();

    let outcome = admit_entry(
        &mut conn,
        &StubEmbedder,
        &config(),
        "sam",
        "You should never give up because honestly I learned a lot from all of these things and more",
        day(2026, 8, 25),
    )
    .unwrap();

    match outcome {
        AdmissionOutcome::Rejected { reason, feedback } => {
            assert_eq!(reason, RejectionReason::Generic);
            assert!(feedback.contains("reads as generic"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    let (reason, similarity): (String, Option<f64>) = conn
        .query_row(
            "SELECT reason, similarity_score FROM rejection_logs WHERE user_id = 'sam'",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(reason, "generic");
    assert!(similarity.is_none());
}

#[test]
fn resubmitting_identical_text_is_a_duplicate() {
    let mut conn = test_db();
    let cfg = config();
    let date = day(2026, 8, 25);

    let first = admit_entry(&mut conn, &StubEmbedder, &cfg, "sam", SPECIFIC_ENTRY, date).unwrap();
    assert!(matches!(first, AdmissionOutcome::Accepted { .. }));

    let second = admit_entry(&mut conn, &StubEmbedder, &cfg, "sam", SPECIFIC_ENTRY, date).unwrap();
    match second {
        AdmissionOutcome::Rejected { reason, feedback } => {
            assert_eq!(reason, RejectionReason::Duplicate);
            assert!(feedback.contains("100% similar"));
            assert!(feedback.contains("August 25, 2026"));
            assert!(feedback.contains("I implemented a caching layer"));
        }
        other => panic!("expected duplicate rejection, got {other:?}"),
    }

    // Only the first entry persisted; the duplicate's similarity was logged
    let entry_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
        .unwrap();
    assert_eq!(entry_count, 1);

    let similarity: f64 = conn
        .query_row(
            "SELECT similarity_score FROM rejection_logs WHERE reason = 'duplicate'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(similarity > 0.999);
}

#[test]
fn same_text_from_another_user_is_not_a_duplicate() {
    let mut conn = test_db();
    let cfg = config();
    let date = day(2026, 8, 25);

    let first = admit_entry(&mut conn, &StubEmbedder, &cfg, "sam", SPECIFIC_ENTRY, date).unwrap();
    assert!(matches!(first, AdmissionOutcome::Accepted { .. }));

    let other = admit_entry(&mut conn, &StubEmbedder, &cfg, "alex", SPECIFIC_ENTRY, date).unwrap();
    assert!(matches!(other, AdmissionOutcome::Accepted { .. }));
}

#[test]
fn novelty_check_failure_fails_open() {
    let mut conn = test_db();

    // Replace the vec0 table with a plain one: the KNN query errors but the
    // embedding insert still succeeds.
    conn.execute("DROP TABLE entries_vec", []).unwrap();
    conn.execute(
        "CREATE TABLE entries_vec (entry_id TEXT PRIMARY KEY, user_id TEXT, embedding BLOB)",
        [],
    )
    .unwrap();

    let outcome = admit_entry(
        &mut conn,
        &StubEmbedder,
        &config(),
        "sam",
        SPECIFIC_ENTRY,
        day(2026, 8, 25),
    )
    .unwrap();
    assert!(matches!(outcome, AdmissionOutcome::Accepted { .. }));
}

#[test]
fn broken_rejection_sink_does_not_block_the_response() {
    let mut conn = test_db();
    conn.execute("DROP TABLE rejection_logs", []).unwrap();

    let outcome = admit_entry(
        &mut conn,
        &StubEmbedder,
        &config(),
        "sam",
        "Learned about Rust traits today",
        day(2026, 8, 25),
    )
    .unwrap();

    // The rejection still comes back with its feedback even though the
    // log write failed.
    match outcome {
        AdmissionOutcome::Rejected { reason, feedback } => {
            assert_eq!(reason, RejectionReason::TooShort);
            assert!(feedback.contains("at least 15 words"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn embedding_failure_is_fatal() {
    let mut conn = test_db();

    let result = admit_entry(
        &mut conn,
        &FailingEmbedder,
        &config(),
        "sam",
        SPECIFIC_ENTRY,
        day(2026, 8, 25),
    );
    assert!(matches!(result, Err(AdmissionError::Embedding(_))));

    let entry_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))
        .unwrap();
    assert_eq!(entry_count, 0);
}

#[test]
fn early_stages_do_not_need_the_embedder() {
    let mut conn = test_db();

    // Rejections before the novelty stage never touch the embedding model.
    let outcome = admit_entry(
        &mut conn,
        &FailingEmbedder,
        &config(),
        "sam",
        "Too short to matter",
        day(2026, 8, 25),
    )
    .unwrap();
    assert!(matches!(
        outcome,
        AdmissionOutcome::Rejected {
            reason: RejectionReason::TooShort,
            ..
        }
    ));
}
