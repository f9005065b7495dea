//! Bulk roster upload.
//!
//! Every row is parsed and resolved before anything is written. If any row
//! fails, the whole upload is rejected with the full list of row errors;
//! otherwise all students are upserted in a single transaction.

use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{RowError, ServiceError};
use crate::repositories::{StudentFields, StudentRepository, StudentUpsert};
use crate::services::reference_index::ReferenceIndex;
use crate::services::spreadsheet::{self, RosterSheet};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped_blank: usize,
}

pub struct RosterImporter<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RosterImporter<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn import_workbook(&self, bytes: &[u8]) -> Result<ImportSummary, ServiceError> {
        let sheet = spreadsheet::read_roster(bytes)?;
        self.import_rows(sheet).await
    }

    pub async fn import_rows(&self, sheet: RosterSheet) -> Result<ImportSummary, ServiceError> {
        let RosterSheet {
            rows,
            mut errors,
            skipped_blank,
        } = sheet;

        let index = ReferenceIndex::load(self.db).await?;

        let mut resolved: Vec<(String, StudentFields)> = Vec::with_capacity(rows.len());
        for row in &rows {
            match index.resolve_row(row) {
                Ok(fields) => resolved.push((row.reg_no.trim().to_string(), fields)),
                Err(e) => errors.push(RowError {
                    row: row.row,
                    reg_no: row.reg_no.clone(),
                    error: e.to_string(),
                }),
            }
        }

        if !errors.is_empty() {
            errors.sort_by_key(|e| e.row);
            tracing::warn!(
                failed_rows = errors.len(),
                total_rows = rows.len(),
                "roster import rejected"
            );
            return Err(ServiceError::ImportRejected(errors));
        }

        let mut summary = ImportSummary {
            skipped_blank,
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        {
            let students = StudentRepository::new(&txn);
            for (reg_no, fields) in resolved {
                let (_, outcome) = students.upsert(&reg_no, fields).await?;
                match outcome {
                    StudentUpsert::Created => summary.created += 1,
                    StudentUpsert::Updated => summary.updated += 1,
                }
            }
        }
        txn.commit().await?;

        tracing::info!(
            created = summary.created,
            updated = summary.updated,
            skipped_blank = summary.skipped_blank,
            "roster imported"
        );
        Ok(summary)
    }
}
