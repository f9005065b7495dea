pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_reference_tables;
mod m20260301_000002_create_table_student;
mod m20260301_000003_create_table_attendance;
mod m20260302_000001_create_table_operator_invigilator;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_reference_tables::Migration),
            Box::new(m20260301_000002_create_table_student::Migration),
            Box::new(m20260301_000003_create_table_attendance::Migration),
            Box::new(m20260302_000001_create_table_operator_invigilator::Migration),
        ]
    }
}
