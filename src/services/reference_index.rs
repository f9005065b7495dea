//! Name-indexed view of the reference tables used to resolve roster rows.
//!
//! Keys are trimmed and lower-cased, so lookups are case-insensitive exact
//! matches. A key that maps to zero or several rows is a [`LookupError`].

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::ConnectionTrait;

use crate::entities::sea_orm_active_enums::ExamSession;
use crate::entities::{branch, exam, hall, section, year};
use crate::error::{LookupError, ReferenceKind, ServiceError};
use crate::repositories::{
    BranchRepository, ExamRepository, HallRepository, SectionRepository, StudentFields,
    YearRepository,
};
use crate::services::spreadsheet::RosterRow;

type SectionKey = (String, i32, i32);
type ExamKey = (String, NaiveDate, ExamSession);

#[derive(Debug, Default)]
pub struct ReferenceIndex {
    years: HashMap<String, Vec<i32>>,
    branches: HashMap<String, Vec<i32>>,
    sections: HashMap<SectionKey, Vec<i32>>,
    halls: HashMap<String, Vec<i32>>,
    exams: HashMap<ExamKey, Vec<i32>>,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn single(kind: ReferenceKind, key: String, candidates: Option<&Vec<i32>>) -> Result<i32, LookupError> {
    match candidates.map(Vec::as_slice) {
        Some([id]) => Ok(*id),
        Some(ids) => Err(LookupError {
            kind,
            key,
            matches: ids.len(),
        }),
        None => Err(LookupError {
            kind,
            key,
            matches: 0,
        }),
    }
}

impl ReferenceIndex {
    pub async fn load<C: ConnectionTrait>(db: &C) -> Result<Self, ServiceError> {
        let years = YearRepository::new(db).find_all().await?;
        let branches = BranchRepository::new(db).find_all().await?;
        let sections = SectionRepository::new(db).find_all().await?;
        let halls = HallRepository::new(db).find_all().await?;
        let exams = ExamRepository::new(db).find_all().await?;

        Ok(Self::from_models(&years, &branches, &sections, &halls, &exams))
    }

    pub fn from_models(
        years: &[year::Model],
        branches: &[branch::Model],
        sections: &[section::Model],
        halls: &[hall::Model],
        exams: &[exam::Model],
    ) -> Self {
        let mut index = Self::default();

        for y in years {
            index.years.entry(normalize(&y.year_name)).or_default().push(y.year_id);
        }
        for b in branches {
            index
                .branches
                .entry(normalize(&b.branch_name))
                .or_default()
                .push(b.branch_id);
        }
        for s in sections {
            index
                .sections
                .entry((normalize(&s.section_name), s.year_id, s.branch_id))
                .or_default()
                .push(s.section_id);
        }
        for h in halls {
            index.halls.entry(normalize(&h.hall_no)).or_default().push(h.hall_id);
        }
        for e in exams {
            index
                .exams
                .entry((normalize(&e.subject), e.date, e.session))
                .or_default()
                .push(e.exam_id);
        }

        index
    }

    pub fn resolve_year(&self, name: &str) -> Result<i32, LookupError> {
        single(ReferenceKind::Year, name.trim().to_string(), self.years.get(&normalize(name)))
    }

    pub fn resolve_branch(&self, name: &str) -> Result<i32, LookupError> {
        single(
            ReferenceKind::Branch,
            name.trim().to_string(),
            self.branches.get(&normalize(name)),
        )
    }

    /// Sections are only unique within a year and branch.
    pub fn resolve_section(
        &self,
        name: &str,
        year_id: i32,
        branch_id: i32,
    ) -> Result<i32, LookupError> {
        single(
            ReferenceKind::Section,
            name.trim().to_string(),
            self.sections.get(&(normalize(name), year_id, branch_id)),
        )
    }

    pub fn resolve_hall(&self, hall_no: &str) -> Result<i32, LookupError> {
        single(
            ReferenceKind::Hall,
            hall_no.trim().to_string(),
            self.halls.get(&normalize(hall_no)),
        )
    }

    pub fn resolve_exam(
        &self,
        subject: &str,
        date: NaiveDate,
        session: &str,
    ) -> Result<i32, LookupError> {
        let key = format!("{} / {} / {}", subject.trim(), date, session.trim());
        let Some(session) = ExamSession::parse_label(session) else {
            return Err(LookupError {
                kind: ReferenceKind::Exam,
                key,
                matches: 0,
            });
        };
        single(
            ReferenceKind::Exam,
            key,
            self.exams.get(&(normalize(subject), date, session)),
        )
    }

    /// Resolves a row's references in order: year, branch, section, hall, exam.
    pub fn resolve_row(&self, row: &RosterRow) -> Result<StudentFields, LookupError> {
        let year_id = self.resolve_year(&row.year)?;
        let branch_id = self.resolve_branch(&row.branch)?;
        let section_id = self.resolve_section(&row.section, year_id, branch_id)?;
        let hall_id = self.resolve_hall(&row.hall)?;
        let exam_id = self.resolve_exam(&row.subject, row.exam_date, &row.session)?;

        Ok(StudentFields {
            name: row.name.clone(),
            year_id,
            branch_id,
            section_id,
            hall_id,
            exam_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_index() -> ReferenceIndex {
        let years = vec![
            year::Model { year_id: 1, year_name: "II".into() },
            year::Model { year_id: 2, year_name: "III".into() },
            year::Model { year_id: 3, year_name: "iii".into() },
        ];
        let branches = vec![branch::Model { branch_id: 1, branch_name: "CSE".into() }];
        let sections = vec![
            section::Model { section_id: 1, section_name: "A".into(), year_id: 1, branch_id: 1 },
            section::Model { section_id: 2, section_name: "A".into(), year_id: 2, branch_id: 1 },
        ];
        let halls = vec![hall::Model { hall_id: 7, hall_no: "VKJ 101".into(), exam_id: 1 }];
        let exams = vec![exam::Model {
            exam_id: 1,
            subject: "Compiler Design".into(),
            date: date(2026, 5, 4),
            session: ExamSession::Session2,
            start_time: None,
        }];
        ReferenceIndex::from_models(&years, &branches, &sections, &halls, &exams)
    }

    #[test]
    fn test_lookups_ignore_case_and_padding() {
        let index = sample_index();
        assert_eq!(index.resolve_year(" ii "), Ok(1));
        assert_eq!(index.resolve_branch("cse"), Ok(1));
        assert_eq!(index.resolve_hall("vkj 101"), Ok(7));
        assert_eq!(
            index.resolve_exam("COMPILER DESIGN", date(2026, 5, 4), "session 2"),
            Ok(1)
        );
    }

    #[test]
    fn test_duplicate_names_are_ambiguous() {
        let index = sample_index();
        let err = index.resolve_year("III").unwrap_err();
        assert_eq!(err.kind, ReferenceKind::Year);
        assert_eq!(err.matches, 2);
    }

    #[test]
    fn test_section_is_scoped_to_year_and_branch() {
        let index = sample_index();
        assert_eq!(index.resolve_section("a", 1, 1), Ok(1));
        assert_eq!(index.resolve_section("a", 2, 1), Ok(2));
        let err = index.resolve_section("B", 1, 1).unwrap_err();
        assert_eq!(err.kind, ReferenceKind::Section);
        assert_eq!(err.matches, 0);
    }

    #[test]
    fn test_exam_requires_date_and_known_session() {
        let index = sample_index();
        assert!(
            index
                .resolve_exam("Compiler Design", date(2026, 5, 5), "Session 2")
                .is_err()
        );
        let err = index
            .resolve_exam("Compiler Design", date(2026, 5, 4), "FN")
            .unwrap_err();
        assert_eq!(err.kind, ReferenceKind::Exam);
        assert_eq!(err.matches, 0);
    }
}
