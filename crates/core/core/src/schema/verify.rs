//! Schema compatibility verification.
//!
//! An actual schema list satisfies an expected one when every expected
//! table exists under the same name and carries at least the expected
//! column families. Extra tables and extra families are allowed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{SchemaIndex, TableName, TableSchema};

/// Decides whether an actual schema list satisfies an expected one.
///
/// An absent list (`None`) is treated the same as an empty one.
/// Implementations must not depend on list order and must leave both
/// inputs untouched.
pub trait SchemaVerifier: Send + Sync {
    /// Returns true if `actual` satisfies `expected`.
    fn verify_schemas(
        &self,
        expected: Option<&[TableSchema]>,
        actual: Option<&[TableSchema]>,
    ) -> bool;

    /// Compares both lists and collects every mismatch.
    fn verify_report(
        &self,
        expected: Option<&[TableSchema]>,
        actual: Option<&[TableSchema]>,
    ) -> VerificationReport;
}

/// The default verifier: table names must match exactly and expected
/// column families must be a subset of the actual ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct FamilySubsetVerifier;

impl FamilySubsetVerifier {
    /// Creates a new verifier.
    pub fn new() -> Self {
        Self
    }
}

impl SchemaVerifier for FamilySubsetVerifier {
    fn verify_schemas(
        &self,
        expected: Option<&[TableSchema]>,
        actual: Option<&[TableSchema]>,
    ) -> bool {
        let expected = match expected {
            Some(expected) if !expected.is_empty() => expected,
            _ => return true,
        };
        let actual = match actual {
            Some(actual) if !actual.is_empty() => actual,
            _ => return false,
        };

        let index = SchemaIndex::build(actual);
        expected.iter().all(|expected_table| {
            index.get(expected_table.name()).is_some_and(|actual_table| {
                expected_table
                    .families()
                    .all(|family| actual_table.has_family(family))
            })
        })
    }

    fn verify_report(
        &self,
        expected: Option<&[TableSchema]>,
        actual: Option<&[TableSchema]>,
    ) -> VerificationReport {
        let expected = expected.unwrap_or_default();
        let index = SchemaIndex::from_optional(actual);

        let mut report = VerificationReport {
            expected_tables: expected.len(),
            actual_tables: index.len(),
            duplicate_actual_tables: index.duplicates().iter().map(|n| (*n).clone()).collect(),
            ..VerificationReport::default()
        };

        for expected_table in expected {
            match index.get(expected_table.name()) {
                None => report.missing_tables.push(expected_table.name().clone()),
                Some(actual_table) => {
                    let missing = expected_table.missing_families_in(actual_table);
                    if !missing.is_empty() {
                        report
                            .missing_families
                            .entry(expected_table.name().clone())
                            .or_default()
                            .extend(missing.into_iter().map(str::to_string));
                    }
                }
            }
        }

        report.missing_tables.sort();
        report.missing_tables.dedup();
        for families in report.missing_families.values_mut() {
            families.sort();
            families.dedup();
        }
        report.duplicate_actual_tables.sort();

        report
    }
}

/// Returns true if `actual` satisfies `expected`, using
/// [`FamilySubsetVerifier`].
pub fn verify_schemas(expected: Option<&[TableSchema]>, actual: Option<&[TableSchema]>) -> bool {
    FamilySubsetVerifier.verify_schemas(expected, actual)
}

/// Collects every mismatch between `expected` and `actual`, using
/// [`FamilySubsetVerifier`].
pub fn verify_report(
    expected: Option<&[TableSchema]>,
    actual: Option<&[TableSchema]>,
) -> VerificationReport {
    FamilySubsetVerifier.verify_report(expected, actual)
}

/// Diagnostic result of a verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    /// Number of tables in the expected list.
    pub expected_tables: usize,
    /// Number of distinct tables in the actual list.
    pub actual_tables: usize,
    /// Expected tables with no counterpart in the actual list.
    pub missing_tables: Vec<TableName>,
    /// Expected column families absent from the matching actual table.
    pub missing_families: BTreeMap<TableName, Vec<String>>,
    /// Tables listed more than once in the actual list. Only the last
    /// occurrence of each took part in the comparison.
    pub duplicate_actual_tables: Vec<TableName>,
    /// When the comparison ran.
    pub checked_at: DateTime<Utc>,
}

impl Default for VerificationReport {
    fn default() -> Self {
        Self {
            expected_tables: 0,
            actual_tables: 0,
            missing_tables: Vec::new(),
            missing_families: BTreeMap::new(),
            duplicate_actual_tables: Vec::new(),
            checked_at: Utc::now(),
        }
    }
}

impl VerificationReport {
    /// Returns true if the actual schema satisfies the expected schema.
    pub fn is_compatible(&self) -> bool {
        self.missing_tables.is_empty() && self.missing_families.is_empty()
    }

    /// Returns the total number of missing column families.
    pub fn missing_family_count(&self) -> usize {
        self.missing_families.values().map(Vec::len).sum()
    }

    /// Returns a one-line description of the outcome.
    pub fn summary(&self) -> String {
        if self.is_compatible() {
            return format!(
                "schema compatible: {} expected table(s) found among {} actual table(s)",
                self.expected_tables, self.actual_tables
            );
        }

        let mut parts = Vec::new();
        if !self.missing_tables.is_empty() {
            let tables: Vec<&str> = self.missing_tables.iter().map(TableName::as_str).collect();
            parts.push(format!("missing tables [{}]", tables.join(", ")));
        }
        if !self.missing_families.is_empty() {
            let families: Vec<String> = self
                .missing_families
                .iter()
                .map(|(table, families)| format!("{}[{}]", table, families.join(", ")))
                .collect();
            parts.push(format!("missing column families {}", families.join(", ")));
        }
        format!("schema incompatible: {}", parts.join("; "))
    }
}
