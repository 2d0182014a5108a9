//! Benchmarks for resolving tag sets against a directory tree.

use std::fs;
use std::hint::black_box;
use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};

use tag_sort::tags::{MatchMode, Session, find_possible_paths, tag_subsets};

const YEARS: [&str; 5] = ["2020", "2021", "2022", "2023", "2024"];
const QUARTERS: [&str; 4] = ["Q1", "Q2", "Q3", "Q4"];
const CATEGORIES: [&str; 6] = ["Invoices", "Receipts", "Taxes", "Payslips", "Contracts", "Insurance"];

/// Build a year/quarter/category tree with 120 leaf directories.
fn build_tree() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let root = dir.path().join("archive");
    for year in YEARS {
        for quarter in QUARTERS {
            for category in CATEGORIES {
                fs::create_dir_all(root.join(year).join(quarter).join(category)).expect("Failed to create dirs");
            }
        }
    }
    (dir, root)
}

fn bench_resolve(c: &mut Criterion) {
    let (dir, root) = build_tree();
    let session = Session::new(dir.path(), &root).with_match_mode(MatchMode::Segment);

    c.bench_function("check_path unambiguous", |b| {
        b.iter(|| session.check_path(black_box(&["Taxes", "2023", "Q2"])));
    });

    c.bench_function("check_path ambiguous", |b| {
        b.iter(|| session.check_path(black_box(&["Invoices"])));
    });

    c.bench_function("find_possible_paths substring", |b| {
        b.iter(|| find_possible_paths(&root, black_box(&["Q4", "Receipts"]), MatchMode::Substring));
    });

    c.bench_function("plan_new_path intelligent", |b| {
        b.iter(|| session.plan_new_path(black_box(&["2022", "Q3", "Invoices", "Acme"]), true));
    });
}

fn bench_subsets(c: &mut Criterion) {
    let tags = ["A", "B", "C", "D", "E", "F", "G", "H"];
    c.bench_function("tag_subsets 8 tags", |b| {
        b.iter(|| tag_subsets(black_box(&tags)).count());
    });
}

criterion_group!(benches, bench_resolve, bench_subsets);
criterion_main!(benches);
