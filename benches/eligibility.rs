use criterion::{black_box, criterion_group, criterion_main, Criterion};
use money_report_core::{
    currency::CurrencyCode,
    domain::{
        ChatReport, IouType, Policy, PolicyType, ReceiptState, Report, ReportAction, ReportStatus,
        ReportType, Session, ThreadReport, Transaction, Violation,
    },
    evaluate,
    store::{save_contents_to_path, load_contents_from_path, HeaderKey, MemoryStore},
    HeaderSnapshot,
};
use tempfile::tempdir;
use uuid::Uuid;

fn build_sample_snapshot(txn_count: usize) -> HeaderSnapshot {
    let policy = Policy::new(PolicyType::Corporate).with_admin(3);
    let mut report = Report::new(ReportType::Expense, 1, policy.policy_id, Uuid::new_v4());
    report.status = ReportStatus::Submitted;
    report.manager_id = Some(2);

    let mut transactions = Vec::with_capacity(txn_count);
    for idx in 0..txn_count {
        let mut txn = Transaction::new(
            report.report_id,
            -(1_000 + (idx % 100) as i64),
            CurrencyCode::new("USD"),
        );
        if idx % 7 == 0 {
            txn.on_hold = true;
        }
        if idx % 11 == 0 {
            txn = txn.with_receipt(ReceiptState::ScanComplete);
        }
        if idx % 13 == 0 {
            txn = txn.with_violation(Violation::Duplicated { dismissed: false });
        }
        transactions.push(txn);
    }
    report.total = transactions.iter().map(|t| t.amount).sum();
    report.unheld_total = Some(
        transactions
            .iter()
            .filter(|t| !t.on_hold)
            .map(|t| t.amount)
            .sum(),
    );

    let action = ReportAction::money_request(1, IouType::Create, transactions[0].transaction_id);
    HeaderSnapshot {
        chat_report: Some(ChatReport::new(report.chat_report_id)),
        transaction_thread: Some(ThreadReport {
            report_id: Uuid::new_v4(),
            parent_report_action_id: Some(action.report_action_id),
        }),
        report_actions: vec![action],
        transactions,
        report: Some(report),
        policy: Some(policy),
        session: Some(Session::new(2, "manager@example.com")),
        ..HeaderSnapshot::default()
    }
}

fn bench_evaluate(c: &mut Criterion) {
    let small = build_sample_snapshot(5);
    let large = build_sample_snapshot(1_000);

    c.bench_function("evaluate_5_expenses", |b| {
        b.iter(|| black_box(evaluate(black_box(&small))))
    });
    c.bench_function("evaluate_1k_expenses", |b| {
        b.iter(|| black_box(evaluate(black_box(&large))))
    });
}

fn bench_store(c: &mut Criterion) {
    let snapshot = build_sample_snapshot(1_000);
    let report = snapshot.report.clone().expect("report");
    let key = HeaderKey::report(report.report_id);
    let mut store = MemoryStore::new();
    store.batch(|contents| {
        contents.policies.extend(
            snapshot
                .policy
                .clone()
                .map(|p| (p.policy_id, p)),
        );
        for txn in &snapshot.transactions {
            contents.transactions.insert(txn.transaction_id, txn.clone());
        }
        contents.reports.insert(report.report_id, report.clone());
    });

    c.bench_function("store_snapshot_1k", |b| {
        b.iter(|| black_box(store.snapshot_for(key)))
    });

    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("store.json");
    c.bench_function("store_save_1k", |b| {
        b.iter(|| save_contents_to_path(store.contents(), &file_path).expect("save store"))
    });
    save_contents_to_path(store.contents(), &file_path).expect("seed");
    c.bench_function("store_load_1k", |b| {
        b.iter(|| black_box(load_contents_from_path(&file_path).expect("load store")))
    });
}

criterion_group!(benches, bench_evaluate, bench_store);
criterion_main!(benches);
