//! Shared database test utilities.

use roster::database::{initializer, Database, DatabaseConfig};
use roster::{CourseCatalog, NewCourse, StudentRepository};
use tempfile::TempDir;

/// Creates a temporary, initialized test database.
///
/// The returned `TempDir` must be kept alive for as long as the database
/// is used.
#[allow(dead_code)]
pub fn create_test_database() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::new(dir.path().join("test.db")).with_pool_size(1, 8);
    let db = Database::open(config).unwrap();

    let report = initializer::initialize(&db);
    assert!(report.is_complete(), "schema failed: {:?}", report.failed);

    (dir, db)
}

/// Creates a temporary database wrapped in a repository.
#[allow(dead_code)]
pub fn create_test_repository() -> (TempDir, StudentRepository) {
    let (dir, db) = create_test_database();
    (dir, StudentRepository::new(db))
}

/// Registers `count` courses and returns their ids in insertion order.
#[allow(dead_code)]
pub fn seed_courses(db: &Database, count: usize) -> Vec<i64> {
    let catalog = CourseCatalog::new(db.clone());
    (1..=count)
        .map(|n| {
            catalog
                .add_course(&NewCourse::new(format!("CS{n:03}"), format!("Course {n}"), 3, "Computer Science"))
                .unwrap()
                .id
        })
        .collect()
}

/// Counts the rows of a table.
#[allow(dead_code)]
pub fn count_rows(db: &Database, table: &str) -> i64 {
    let conn = db.acquire().unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}
