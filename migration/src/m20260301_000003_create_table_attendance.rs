use sea_orm_migration::prelude::*;

use crate::m20260301_000002_create_table_student::Student;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::AttendanceId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::StudentId).integer().not_null())
                    .col(
                        ColumnDef::new(Attendance::Status)
                            .string_len(10)
                            .not_null()
                            .default("Present"),
                    )
                    .col(
                        ColumnDef::new(Attendance::Timestamp)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_student")
                            .from(Attendance::Table, Attendance::StudentId)
                            .to(Student::Table, Student::StudentId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one attendance row per student
        manager
            .create_index(
                Index::create()
                    .name("unique_attendance_student_id")
                    .table(Attendance::Table)
                    .col(Attendance::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_attendance_status")
                    .table(Attendance::Table)
                    .col(Attendance::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_attendance_status")
                    .table(Attendance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("unique_attendance_student_id")
                    .table(Attendance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Attendance {
    Table,
    AttendanceId,
    StudentId,
    Status,
    Timestamp,
}
