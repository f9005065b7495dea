use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Year::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Year::YearId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Year::YearName).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Branch::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Branch::BranchId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Branch::BranchName).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Section::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Section::SectionId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Section::SectionName).string_len(10).not_null())
                    .col(ColumnDef::new(Section::YearId).integer().not_null())
                    .col(ColumnDef::new(Section::BranchId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_year")
                            .from(Section::Table, Section::YearId)
                            .to(Year::Table, Year::YearId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_section_branch")
                            .from(Section::Table, Section::BranchId)
                            .to(Branch::Table, Branch::BranchId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Exam::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exam::ExamId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exam::Subject).string_len(100).not_null())
                    .col(ColumnDef::new(Exam::Date).date().not_null())
                    .col(
                        ColumnDef::new(Exam::Session)
                            .string_len(20)
                            .not_null()
                            .default("Session 1"),
                    )
                    .col(ColumnDef::new(Exam::StartTime).time().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Hall::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Hall::HallId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Hall::HallNo).string_len(20).not_null())
                    .col(ColumnDef::new(Hall::ExamId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_hall_exam")
                            .from(Hall::Table, Hall::ExamId)
                            .to(Exam::Table, Exam::ExamId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_section_year_branch")
                    .table(Section::Table)
                    .col(Section::YearId)
                    .col(Section::BranchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hall_exam_id")
                    .table(Hall::Table)
                    .col(Hall::ExamId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_hall_exam_id").table(Hall::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_section_year_branch")
                    .table(Section::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Hall::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Exam::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Section::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Branch::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Year::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Year {
    Table,
    YearId,
    YearName,
}

#[derive(DeriveIden)]
pub enum Branch {
    Table,
    BranchId,
    BranchName,
}

#[derive(DeriveIden)]
pub enum Section {
    Table,
    SectionId,
    SectionName,
    YearId,
    BranchId,
}

#[derive(DeriveIden)]
pub enum Exam {
    Table,
    ExamId,
    Subject,
    Date,
    Session,
    StartTime,
}

#[derive(DeriveIden)]
pub enum Hall {
    Table,
    HallId,
    HallNo,
    ExamId,
}
