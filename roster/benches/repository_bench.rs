use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use tempfile::TempDir;

use roster::database::{initializer, Database, DatabaseConfig};
use roster::{EnrollmentRequest, NewStudent, StudentRepository};

const LOOKUP_SIZES: &[usize] = &[10, 100, 1000];
const BATCH_SIZES: &[usize] = &[10, 100, 500];

fn setup_repository() -> (TempDir, StudentRepository) {
    let temp_dir = TempDir::new().expect("failed to create temporary directory");
    let config = DatabaseConfig::new(temp_dir.path().join("roster.db")).with_pool_size(1, 4);
    let db = Database::open(config).expect("failed to open temporary database");
    assert!(
        initializer::initialize(&db).is_complete(),
        "failed to initialize schema"
    );
    (temp_dir, StudentRepository::new(db))
}

fn student(index: usize, department: &str) -> NewStudent {
    NewStudent::builder(
        format!("BENCH{index}"),
        format!("First{}", index % 97),
        format!("Last{index}"),
    )
    .date_of_birth(NaiveDate::from_ymd_opt(2004, 6, 15).expect("valid date"))
    .email(format!("bench{index}@example.com"))
    .department(department)
    .build()
    .expect("failed to build student")
}

fn populate(repo: &StudentRepository, count: usize) {
    let students: Vec<_> = (0..count)
        .map(|i| {
            let department = if i % 2 == 0 { "Physics" } else { "Chemistry" };
            student(i, department)
        })
        .collect();
    repo.add_batch(&students).expect("failed to populate students");
}

fn bench_add_single(c: &mut Criterion) {
    c.bench_function("add_single", |b| {
        b.iter_batched(
            setup_repository,
            |(temp_dir, repo)| {
                let _temp_dir = temp_dir;
                let added = repo
                    .add(&EnrollmentRequest::new(student(0, "Physics")))
                    .expect("failed to add student");
                black_box(added.id);
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_add_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_batch");

    for &size in BATCH_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &count| {
            b.iter_batched(
                || {
                    let (temp_dir, repo) = setup_repository();
                    let students: Vec<_> = (0..count).map(|i| student(i, "Physics")).collect();
                    (temp_dir, repo, students)
                },
                |(temp_dir, repo, students)| {
                    let _temp_dir = temp_dir;
                    let inserted = repo.add_batch(&students).expect("batch insert failed");
                    black_box(inserted);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_get_by_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_by_id");

    for &size in LOOKUP_SIZES {
        let (_temp_dir, repo) = setup_repository();
        populate(&repo, size);
        let id = i64::try_from(size / 2 + 1).expect("id fits in i64");

        group.bench_with_input(BenchmarkId::from_parameter(size), &id, |b, &id| {
            b.iter(|| black_box(repo.get_by_id(id).expect("lookup failed")));
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for &size in LOOKUP_SIZES {
        let (_temp_dir, repo) = setup_repository();
        populate(&repo, size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(repo.search("last1").expect("search failed")));
        });
    }

    group.finish();
}

fn bench_get_by_department(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_by_department");

    for &size in LOOKUP_SIZES {
        let (_temp_dir, repo) = setup_repository();
        populate(&repo, size);

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                black_box(
                    repo.get_by_department("Physics")
                        .expect("routine call failed"),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    repository_bench,
    bench_add_single,
    bench_add_batch,
    bench_get_by_id,
    bench_search,
    bench_get_by_department
);
criterion_main!(repository_bench);
