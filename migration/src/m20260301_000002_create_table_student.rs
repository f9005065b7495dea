use sea_orm_migration::prelude::*;

use crate::m20260301_000001_create_reference_tables::{Branch, Exam, Hall, Section, Year};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::StudentId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Student::RegNo).string_len(20).not_null())
                    .col(ColumnDef::new(Student::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Student::YearId).integer().not_null())
                    .col(ColumnDef::new(Student::BranchId).integer().not_null())
                    .col(ColumnDef::new(Student::SectionId).integer().not_null())
                    .col(ColumnDef::new(Student::ExamId).integer().not_null())
                    .col(ColumnDef::new(Student::HallId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_year")
                            .from(Student::Table, Student::YearId)
                            .to(Year::Table, Year::YearId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_branch")
                            .from(Student::Table, Student::BranchId)
                            .to(Branch::Table, Branch::BranchId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_section")
                            .from(Student::Table, Student::SectionId)
                            .to(Section::Table, Section::SectionId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_exam")
                            .from(Student::Table, Student::ExamId)
                            .to(Exam::Table, Exam::ExamId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_hall")
                            .from(Student::Table, Student::HallId)
                            .to(Hall::Table, Hall::HallId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // reg_no is the business key used by the roster upsert
        manager
            .create_index(
                Index::create()
                    .name("unique_student_reg_no")
                    .table(Student::Table)
                    .col(Student::RegNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_hall_id")
                    .table(Student::Table)
                    .col(Student::HallId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_exam_section")
                    .table(Student::Table)
                    .col(Student::ExamId)
                    .col(Student::SectionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_student_exam_section",
            "idx_student_hall_id",
            "unique_student_reg_no",
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Student::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Student {
    Table,
    StudentId,
    RegNo,
    Name,
    YearId,
    BranchId,
    SectionId,
    ExamId,
    HallId,
}
