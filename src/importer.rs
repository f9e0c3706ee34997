use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use serde::Serialize;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use crate::sheet::{Row, Sheet};

// ============================================================================
// ENTITY KINDS
// ============================================================================

/// Target entity type for an import. Selected by the caller, never inferred
/// from file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Person,
    BankAccount,
    PaymentMethod,
    PaymentType,
    Status,
    PaymentCategory,
    Payment,
    PaymentFile,
    Student,
    Teacher,
    Olympiad,
    Product,
    Course,
    StudentAgreement,
    TeacherAgreement,
    PaymentAgreement,
    Installment,
    InstallmentStatus,
}

impl EntityKind {
    pub const ALL: [EntityKind; 18] = [
        EntityKind::Person,
        EntityKind::BankAccount,
        EntityKind::PaymentMethod,
        EntityKind::PaymentType,
        EntityKind::Status,
        EntityKind::PaymentCategory,
        EntityKind::Payment,
        EntityKind::PaymentFile,
        EntityKind::Student,
        EntityKind::Teacher,
        EntityKind::Olympiad,
        EntityKind::Product,
        EntityKind::Course,
        EntityKind::StudentAgreement,
        EntityKind::TeacherAgreement,
        EntityKind::PaymentAgreement,
        EntityKind::Installment,
        EntityKind::InstallmentStatus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::BankAccount => "bank-account",
            EntityKind::PaymentMethod => "payment-method",
            EntityKind::PaymentType => "payment-type",
            EntityKind::Status => "status",
            EntityKind::PaymentCategory => "payment-category",
            EntityKind::Payment => "payment",
            EntityKind::PaymentFile => "payment-file",
            EntityKind::Student => "student",
            EntityKind::Teacher => "teacher",
            EntityKind::Olympiad => "olympiad",
            EntityKind::Product => "product",
            EntityKind::Course => "course",
            EntityKind::StudentAgreement => "student-agreement",
            EntityKind::TeacherAgreement => "teacher-agreement",
            EntityKind::PaymentAgreement => "payment-agreement",
            EntityKind::Installment => "installment",
            EntityKind::InstallmentStatus => "installment-status",
        }
    }

    /// Field mapping for this entity type.
    pub fn spec(&self) -> &'static EntitySpec {
        match self {
            EntityKind::Person => &PERSON,
            EntityKind::BankAccount => &BANK_ACCOUNT,
            EntityKind::PaymentMethod => &PAYMENT_METHOD,
            EntityKind::PaymentType => &PAYMENT_TYPE,
            EntityKind::Status => &STATUS,
            EntityKind::PaymentCategory => &PAYMENT_CATEGORY,
            EntityKind::Payment => &PAYMENT,
            EntityKind::PaymentFile => &PAYMENT_FILE,
            EntityKind::Student => &STUDENT,
            EntityKind::Teacher => &TEACHER,
            EntityKind::Olympiad => &OLYMPIAD,
            EntityKind::Product => &PRODUCT,
            EntityKind::Course => &COURSE,
            EntityKind::StudentAgreement => &STUDENT_AGREEMENT,
            EntityKind::TeacherAgreement => &TEACHER_AGREEMENT,
            EntityKind::PaymentAgreement => &PAYMENT_AGREEMENT,
            EntityKind::Installment => &INSTALLMENT,
            EntityKind::InstallmentStatus => &INSTALLMENT_STATUS,
        }
    }

    pub fn table(&self) -> &'static str {
        self.spec().table
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .with_context(|| format!("Unknown entity type: {}", s))
    }
}

// ============================================================================
// FIELD DESCRIPTORS
// ============================================================================

/// How a cell is decoded before it reaches the store.
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    Text,
    Real,
    Integer,
    /// Date, stored as %Y-%m-%d.
    Date,
    /// Time of day, stored as %H:%M:%S.
    Time,
    /// Date + time, stored as %Y-%m-%d %H:%M:%S.
    DateTime,
    /// Numeric identifier of an already-stored row of the given kind.
    /// Resolves to null when the cell is absent or no such row exists.
    Fk(EntityKind),
}

/// What happens when a field resolves to null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingValue {
    /// Skip the row silently and keep going.
    SkipRow,
    /// Store null and keep going.
    StoreNull,
    /// Abort the whole import call.
    FailImport,
}

/// Whether a field participates in the natural-key lookup or is only
/// written on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Key,
    Default,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Column name in the uploaded file.
    pub column: &'static str,
    /// Column name in the store.
    pub field: &'static str,
    pub ty: FieldType,
    pub missing: MissingValue,
    pub role: Role,
    /// Stored in place of an absent cell.
    pub fallback: Option<&'static str>,
}

impl FieldSpec {
    const fn new(
        column: &'static str,
        field: &'static str,
        ty: FieldType,
        missing: MissingValue,
        role: Role,
    ) -> Self {
        FieldSpec {
            column,
            field,
            ty,
            missing,
            role,
            fallback: None,
        }
    }

    const fn or(mut self, fallback: &'static str) -> Self {
        self.fallback = Some(fallback);
        self
    }
}

/// Per-entity import rule: target table plus field list, walked by one
/// generic reconciliation routine.
#[derive(Debug)]
pub struct EntitySpec {
    pub table: &'static str,
    /// Store columns of which at least one must resolve, or the row is
    /// skipped. Empty when no such rule applies.
    pub any_of: &'static [&'static str],
    pub fields: &'static [FieldSpec],
}

// ============================================================================
// THE RULE TABLE
// ============================================================================

const PERSON: EntitySpec = EntitySpec {
    table: "people",
    any_of: &[],
    fields: &[
        FieldSpec::new("person_name", "name", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "person_national_id",
            "national_id",
            FieldType::Text,
            MissingValue::SkipRow,
            Role::Key,
        ),
    ],
};

const BANK_ACCOUNT: EntitySpec = EntitySpec {
    table: "bank_accounts",
    any_of: &[],
    fields: &[
        FieldSpec::new("bank_name", "name", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "bank_number",
            "bank_number",
            FieldType::Text,
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new(
            "bank_description",
            "description",
            FieldType::Text,
            MissingValue::StoreNull,
            Role::Default,
        ),
    ],
};

const PAYMENT_METHOD: EntitySpec = EntitySpec {
    table: "payment_methods",
    any_of: &[],
    fields: &[
        FieldSpec::new("title", "title", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "description",
            "description",
            FieldType::Text,
            MissingValue::StoreNull,
            Role::Default,
        ),
    ],
};

const PAYMENT_TYPE: EntitySpec = EntitySpec {
    table: "payment_types",
    any_of: &[],
    fields: &[
        FieldSpec::new("title", "title", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "description",
            "description",
            FieldType::Text,
            MissingValue::StoreNull,
            Role::Default,
        ),
    ],
};

const STATUS: EntitySpec = EntitySpec {
    table: "statuses",
    any_of: &[],
    fields: &[
        FieldSpec::new("title", "title", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "description",
            "description",
            FieldType::Text,
            MissingValue::StoreNull,
            Role::Default,
        ),
    ],
};

const PAYMENT_CATEGORY: EntitySpec = EntitySpec {
    table: "payment_categories",
    any_of: &[],
    fields: &[
        FieldSpec::new("name", "name", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new("type", "type", FieldType::Text, MissingValue::StoreNull, Role::Default),
    ],
};

const PAYMENT: EntitySpec = EntitySpec {
    table: "payments",
    any_of: &[],
    fields: &[
        FieldSpec::new("name", "name", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new("amount", "amount", FieldType::Real, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "related_person",
            "related_person",
            FieldType::Fk(EntityKind::Person),
            MissingValue::StoreNull,
            Role::Key,
        ),
        FieldSpec::new(
            "payment_method",
            "payment_method",
            FieldType::Fk(EntityKind::PaymentMethod),
            MissingValue::StoreNull,
            Role::Key,
        ),
        FieldSpec::new(
            "status",
            "status",
            FieldType::Fk(EntityKind::Status),
            MissingValue::StoreNull,
            Role::Key,
        ),
        FieldSpec::new(
            "category",
            "category",
            FieldType::Fk(EntityKind::PaymentCategory),
            MissingValue::StoreNull,
            Role::Key,
        ),
        FieldSpec::new(
            "payment_type",
            "payment_type",
            FieldType::Fk(EntityKind::PaymentType),
            MissingValue::FailImport,
            Role::Key,
        ),
        FieldSpec::new(
            "related_bank_account",
            "related_bank_account",
            FieldType::Fk(EntityKind::BankAccount),
            MissingValue::StoreNull,
            Role::Key,
        ),
    ],
};

const PAYMENT_FILE: EntitySpec = EntitySpec {
    table: "payment_files",
    any_of: &[],
    fields: &[
        FieldSpec::new(
            "payment",
            "payment",
            FieldType::Fk(EntityKind::Payment),
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new("file", "file", FieldType::Text, MissingValue::SkipRow, Role::Key),
    ],
};

const STUDENT: EntitySpec = EntitySpec {
    table: "students",
    any_of: &[],
    fields: &[
        FieldSpec::new("name", "name", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "national_id",
            "national_id",
            FieldType::Text,
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new(
            "person",
            "person",
            FieldType::Fk(EntityKind::Person),
            MissingValue::SkipRow,
            Role::Key,
        ),
    ],
};

const TEACHER: EntitySpec = EntitySpec {
    table: "teachers",
    any_of: &[],
    fields: &[
        FieldSpec::new("name", "name", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "national_id",
            "national_id",
            FieldType::Text,
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new(
            "person",
            "person",
            FieldType::Fk(EntityKind::Person),
            MissingValue::SkipRow,
            Role::Key,
        ),
    ],
};

const OLYMPIAD: EntitySpec = EntitySpec {
    table: "olympiads",
    any_of: &[],
    fields: &[FieldSpec::new("title", "title", FieldType::Text, MissingValue::SkipRow, Role::Key)],
};

const PRODUCT: EntitySpec = EntitySpec {
    table: "products",
    any_of: &[],
    fields: &[
        FieldSpec::new("title", "title", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "teacher",
            "teacher",
            FieldType::Fk(EntityKind::Teacher),
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new(
            "description",
            "description",
            FieldType::Text,
            MissingValue::StoreNull,
            Role::Default,
        ),
        FieldSpec::new("amount", "amount", FieldType::Real, MissingValue::StoreNull, Role::Default),
    ],
};

const COURSE: EntitySpec = EntitySpec {
    table: "courses",
    any_of: &[],
    fields: &[
        FieldSpec::new("title", "title", FieldType::Text, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "session_time",
            "session_time",
            FieldType::Time,
            MissingValue::StoreNull,
            Role::Key,
        ),
        FieldSpec::new(
            "start_date",
            "start_date",
            FieldType::Date,
            MissingValue::StoreNull,
            Role::Key,
        ),
        FieldSpec::new(
            "end_date",
            "end_date",
            FieldType::Date,
            MissingValue::StoreNull,
            Role::Key,
        ),
        FieldSpec::new(
            "teacher",
            "teacher",
            FieldType::Fk(EntityKind::Teacher),
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new(
            "olympiad",
            "olympiad",
            FieldType::Fk(EntityKind::Olympiad),
            MissingValue::StoreNull,
            Role::Key,
        ),
    ],
};

const STUDENT_AGREEMENT: EntitySpec = EntitySpec {
    table: "student_agreements",
    any_of: &[],
    fields: &[
        FieldSpec::new(
            "student",
            "student",
            FieldType::Fk(EntityKind::Student),
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new(
            "course",
            "course",
            FieldType::Fk(EntityKind::Course),
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new("amount", "amount", FieldType::Real, MissingValue::StoreNull, Role::Default),
        FieldSpec::new("attrs", "attrs", FieldType::Text, MissingValue::StoreNull, Role::Default),
    ],
};

const TEACHER_AGREEMENT: EntitySpec = EntitySpec {
    table: "teacher_agreements",
    any_of: &[],
    fields: &[
        FieldSpec::new(
            "teacher",
            "teacher",
            FieldType::Fk(EntityKind::Teacher),
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new(
            "product",
            "product",
            FieldType::Fk(EntityKind::Product),
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new("amount", "amount", FieldType::Real, MissingValue::StoreNull, Role::Default),
        FieldSpec::new("attrs", "attrs", FieldType::Text, MissingValue::StoreNull, Role::Default),
    ],
};

const PAYMENT_AGREEMENT: EntitySpec = EntitySpec {
    table: "payment_agreements",
    any_of: &["student_agreement", "teacher_agreement"],
    fields: &[
        FieldSpec::new(
            "student_agreement",
            "student_agreement",
            FieldType::Fk(EntityKind::StudentAgreement),
            MissingValue::StoreNull,
            Role::Key,
        ),
        FieldSpec::new(
            "teacher_agreement",
            "teacher_agreement",
            FieldType::Fk(EntityKind::TeacherAgreement),
            MissingValue::StoreNull,
            Role::Key,
        ),
        FieldSpec::new(
            "payment_direction",
            "payment_direction",
            FieldType::Text,
            MissingValue::StoreNull,
            Role::Default,
        )
        .or("in"),
        FieldSpec::new(
            "total_amount",
            "total_amount",
            FieldType::Integer,
            MissingValue::StoreNull,
            Role::Default,
        ),
    ],
};

const INSTALLMENT: EntitySpec = EntitySpec {
    table: "installments",
    any_of: &[],
    fields: &[
        FieldSpec::new(
            "payment_agreement",
            "payment_agreement",
            FieldType::Fk(EntityKind::PaymentAgreement),
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new("amount", "amount", FieldType::Real, MissingValue::SkipRow, Role::Key),
        FieldSpec::new(
            "due_date",
            "due_date",
            FieldType::DateTime,
            MissingValue::SkipRow,
            Role::Key,
        ),
        FieldSpec::new(
            "received_date",
            "received_date",
            FieldType::DateTime,
            MissingValue::StoreNull,
            Role::Default,
        ),
        FieldSpec::new(
            "status",
            "status",
            FieldType::Fk(EntityKind::InstallmentStatus),
            MissingValue::StoreNull,
            Role::Default,
        ),
    ],
};

const INSTALLMENT_STATUS: EntitySpec = EntitySpec {
    table: "installment_statuses",
    any_of: &[],
    fields: &[FieldSpec::new("title", "title", FieldType::Text, MissingValue::SkipRow, Role::Key)],
};

// ============================================================================
// RECONCILIATION
// ============================================================================

/// Aggregate result surfaced to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub success: bool,
    pub message: String,
}

impl ImportOutcome {
    pub fn failure(message: String) -> Self {
        ImportOutcome {
            success: false,
            message,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImportStats {
    pub created: usize,
    pub existing: usize,
    pub skipped: usize,
}

/// Reconcile a decoded sheet against the store.
///
/// Rows are processed in file order; each created row is visible to the
/// foreign-key lookups of the rows after it. Nothing wraps the call in a
/// transaction: rows created before a failure stay created.
pub fn reconcile(conn: &Connection, kind: EntityKind, sheet: &Sheet) -> ImportOutcome {
    match reconcile_rows(conn, kind, sheet) {
        Ok(stats) => ImportOutcome {
            success: true,
            message: format!(
                "File uploaded and data processed successfully ({} created, {} existing, {} skipped)",
                stats.created, stats.existing, stats.skipped
            ),
        },
        Err(e) => ImportOutcome::failure(format!("{:#}", e)),
    }
}

/// Decode CSV data and reconcile it in one step.
pub fn import_csv<R: Read>(conn: &Connection, kind: EntityKind, reader: R) -> ImportOutcome {
    match Sheet::from_reader(reader) {
        Ok(sheet) => reconcile(conn, kind, &sheet),
        Err(e) => ImportOutcome::failure(format!("{:#}", e)),
    }
}

fn reconcile_rows(conn: &Connection, kind: EntityKind, sheet: &Sheet) -> Result<ImportStats> {
    if sheet.rows.is_empty() {
        bail!("The file is empty.");
    }

    let spec = kind.spec();
    let mut stats = ImportStats::default();

    for row in &sheet.rows {
        if row.is_empty() {
            stats.skipped += 1;
            continue;
        }

        let mut values = Vec::with_capacity(spec.fields.len());
        for field in spec.fields {
            values.push(resolve_field(conn, field, row)?);
        }

        // The fail-import rule fires before the skip rules: a Payment row
        // with an unresolvable payment_type aborts the call even when its
        // other required fields are also missing.
        for (field, value) in spec.fields.iter().zip(&values) {
            if field.missing == MissingValue::FailImport && matches!(value, Value::Null) {
                bail!(
                    "Payment type is missing or invalid for payment: {}",
                    row.get("name").unwrap_or("<unnamed>")
                );
            }
        }

        let missing_required = spec
            .fields
            .iter()
            .zip(&values)
            .any(|(f, v)| f.missing == MissingValue::SkipRow && matches!(v, Value::Null));
        if missing_required {
            stats.skipped += 1;
            continue;
        }

        if !spec.any_of.is_empty() {
            let one_resolved = spec
                .fields
                .iter()
                .zip(&values)
                .any(|(f, v)| spec.any_of.contains(&f.field) && !matches!(v, Value::Null));
            if !one_resolved {
                stats.skipped += 1;
                continue;
            }
        }

        if upsert(conn, spec, &values)? {
            stats.created += 1;
        } else {
            stats.existing += 1;
        }
    }

    Ok(stats)
}

/// Decode one cell to a storable value. Absent cells become the field's
/// fallback, or null.
fn resolve_field(conn: &Connection, field: &FieldSpec, row: &Row) -> Result<Value> {
    let cell = match row.get(field.column) {
        Some(cell) => cell,
        None => {
            return Ok(match field.fallback {
                Some(fallback) => Value::Text(fallback.to_string()),
                None => Value::Null,
            })
        }
    };

    match field.ty {
        FieldType::Text => Ok(Value::Text(cell.to_string())),
        FieldType::Real => {
            let v: f64 = cell.parse().with_context(|| {
                format!("Cannot parse number '{}' in column '{}'", cell, field.column)
            })?;
            Ok(Value::Real(v))
        }
        FieldType::Integer => Ok(Value::Integer(parse_integer(cell, field.column)?)),
        FieldType::Date => {
            let date = NaiveDate::parse_from_str(cell, "%Y-%m-%d").with_context(|| {
                format!("Cannot parse date '{}' in column '{}'", cell, field.column)
            })?;
            Ok(Value::Text(date.format("%Y-%m-%d").to_string()))
        }
        FieldType::Time => {
            let time = NaiveTime::parse_from_str(cell, "%H:%M:%S")
                .or_else(|_| NaiveTime::parse_from_str(cell, "%H:%M"))
                .with_context(|| {
                    format!("Cannot parse time '{}' in column '{}'", cell, field.column)
                })?;
            Ok(Value::Text(time.format("%H:%M:%S").to_string()))
        }
        FieldType::DateTime => {
            let stamp = NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(cell, "%Y-%m-%dT%H:%M:%S"))
                .or_else(|_| {
                    NaiveDate::parse_from_str(cell, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
                })
                .with_context(|| {
                    format!("Cannot parse datetime '{}' in column '{}'", cell, field.column)
                })?;
            Ok(Value::Text(stamp.format("%Y-%m-%d %H:%M:%S").to_string()))
        }
        FieldType::Fk(target) => {
            let id = parse_integer(cell, field.column)?;
            let sql = format!("SELECT id FROM {} WHERE id = ?1", target.table());
            let found: Option<i64> = conn
                .query_row(&sql, [id], |r| r.get(0))
                .optional()
                .with_context(|| format!("Lookup failed for column '{}'", field.column))?;
            Ok(match found {
                Some(id) => Value::Integer(id),
                None => Value::Null,
            })
        }
    }
}

/// Spreadsheet exports routinely render integers as floats ("3.0"), so an
/// integral float is accepted as an identifier or integer amount.
fn parse_integer(cell: &str, column: &str) -> Result<i64> {
    if let Ok(v) = cell.parse::<i64>() {
        return Ok(v);
    }
    if let Ok(v) = cell.parse::<f64>() {
        if v.fract() == 0.0 {
            return Ok(v as i64);
        }
    }
    bail!("Cannot parse number '{}' in column '{}'", cell, column)
}

/// Create-if-absent keyed on the entity's natural key. Returns true when a
/// row was created, false when the key already matched an existing row
/// (which is left untouched: defaults are not re-applied).
fn upsert(conn: &Connection, spec: &EntitySpec, values: &[Value]) -> Result<bool> {
    let mut clauses = Vec::new();
    let mut key_values = Vec::new();
    for (field, value) in spec.fields.iter().zip(values) {
        if field.role == Role::Key {
            // IS instead of = so that null key parts match stored nulls
            clauses.push(format!("{} IS ?{}", field.field, key_values.len() + 1));
            key_values.push(value.clone());
        }
    }

    let select = format!("SELECT id FROM {} WHERE {}", spec.table, clauses.join(" AND "));
    let existing: Option<i64> = conn
        .query_row(&select, params_from_iter(key_values.iter()), |r| r.get(0))
        .optional()
        .with_context(|| format!("Lookup failed in table '{}'", spec.table))?;
    if existing.is_some() {
        return Ok(false);
    }

    let columns: Vec<&str> = spec.fields.iter().map(|f| f.field).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    let insert = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        spec.table,
        columns.join(", "),
        placeholders.join(", ")
    );
    conn.execute(&insert, params_from_iter(values.iter()))
        .with_context(|| format!("Insert failed in table '{}'", spec.table))?;

    Ok(true)
}

// ============================================================================
// TESTS
// ============================================================================
