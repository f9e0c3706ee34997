// Tuition Ledger - Core Library
// Exposes the store, the spreadsheet import reconciler, and the read-side
// queries for use in the CLI, the API server, and tests.

pub mod db;
pub mod importer;
pub mod queries;
pub mod sheet;

// Re-export commonly used types
pub use db::{open_database, setup_database};
pub use importer::{
    import_csv, reconcile, EntityKind, EntitySpec, FieldSpec, FieldType, ImportOutcome,
    ImportStats, MissingValue, Role,
};
pub use queries::{
    bank_account_detail, course_detail, filter_payments, installment_detail, list_bank_accounts,
    list_courses, list_installments, list_payments, list_products, list_students, list_teachers,
    payment_detail, product_detail, student_detail, teacher_detail,
};
pub use sheet::{Row, Sheet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
