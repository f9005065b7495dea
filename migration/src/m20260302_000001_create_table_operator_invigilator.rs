use sea_orm_migration::prelude::*;

use crate::m20260301_000001_create_reference_tables::Hall;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Operator::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Operator::OperatorId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Operator::Username).string_len(150).not_null())
                    .col(ColumnDef::new(Operator::Password).string().not_null())
                    .col(
                        ColumnDef::new(Operator::Role)
                            .string_len(16)
                            .not_null()
                            .default("invigilator"),
                    )
                    .col(
                        ColumnDef::new(Operator::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("unique_operator_username")
                    .table(Operator::Table)
                    .col(Operator::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Invigilator::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invigilator::InvigilatorId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invigilator::OperatorId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invigilator_operator")
                            .from(Invigilator::Table, Invigilator::OperatorId)
                            .to(Operator::Table, Operator::OperatorId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("unique_invigilator_operator_id")
                    .table(Invigilator::Table)
                    .col(Invigilator::OperatorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InvigilatorHall::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InvigilatorHall::InvigilatorId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InvigilatorHall::HallId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_invigilator_hall")
                            .col(InvigilatorHall::InvigilatorId)
                            .col(InvigilatorHall::HallId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invigilator_hall_invigilator")
                            .from(InvigilatorHall::Table, InvigilatorHall::InvigilatorId)
                            .to(Invigilator::Table, Invigilator::InvigilatorId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_invigilator_hall_hall")
                            .from(InvigilatorHall::Table, InvigilatorHall::HallId)
                            .to(Hall::Table, Hall::HallId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InvigilatorHall::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("unique_invigilator_operator_id")
                    .table(Invigilator::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Invigilator::Table).to_owned())
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("unique_operator_username")
                    .table(Operator::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Operator::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Operator {
    Table,
    OperatorId,
    Username,
    Password,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Invigilator {
    Table,
    InvigilatorId,
    OperatorId,
}

#[derive(DeriveIden)]
enum InvigilatorHall {
    Table,
    InvigilatorId,
    HallId,
}
