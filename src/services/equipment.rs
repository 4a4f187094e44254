//! Equipment service (ICS and PAR)

use std::sync::Arc;

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::ItemStatus,
        equipment::{
            CreateIcsEquipment, CreateParEquipment, EquipmentClassSummary, EquipmentQuery,
            EquipmentSummary, IcsEquipment, ParEquipment, UpdateIcsEquipment, UpdateParEquipment,
        },
        search::{count_where, filter_by_query},
    },
    repository::Repository,
    services::{books::ensure_starts_available, clock::Clock},
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
    clock: Arc<dyn Clock>,
}

impl EquipmentService {
    pub fn new(repository: Repository, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Totals for both equipment classes
    pub async fn summary(&self) -> EquipmentSummary {
        let ics = self.repository.ics.list().await;
        let par = self.repository.par.list().await;

        let ics_summary = EquipmentClassSummary {
            records: ics.len() as i64,
            available: count_where(&ics, |e| e.status == ItemStatus::Available),
            borrowed: count_where(&ics, |e| e.status == ItemStatus::Borrowed),
            total_quantity: ics.iter().map(|e| i64::from(e.quantity)).sum(),
            total_value: ics.iter().map(|e| e.total_amount).sum::<Decimal>(),
        };
        let par_summary = EquipmentClassSummary {
            records: par.len() as i64,
            available: count_where(&par, |e| e.status == ItemStatus::Available),
            borrowed: count_where(&par, |e| e.status == ItemStatus::Borrowed),
            total_quantity: par.iter().map(|e| i64::from(e.quantity)).sum(),
            total_value: par.iter().map(|e| e.amount).sum::<Decimal>(),
        };

        EquipmentSummary {
            total_records: ics_summary.records + par_summary.records,
            total_available: ics_summary.available + par_summary.available,
            total_borrowed: ics_summary.borrowed + par_summary.borrowed,
            ics: ics_summary,
            par: par_summary,
        }
    }

    // ICS

    pub async fn list_ics(&self, query: &EquipmentQuery) -> Vec<IcsEquipment> {
        let rows = self.repository.ics.list().await;
        filter_by_query(&rows, query.search.as_deref())
            .into_iter()
            .filter(|e| query.status.map_or(true, |s| e.status == s))
            .cloned()
            .collect()
    }

    pub async fn get_ics(&self, id: i32) -> AppResult<IcsEquipment> {
        self.repository.ics.get_by_id(id).await
    }

    pub async fn create_ics(&self, data: CreateIcsEquipment) -> AppResult<IcsEquipment> {
        data.validate()?;
        if data.total_amount.is_sign_negative() {
            return Err(AppError::Validation("Total amount cannot be negative".to_string()));
        }
        ensure_starts_available(data.status)?;
        let equipment = self.repository.ics_create(&data).await?;
        tracing::info!(
            "ICS equipment {} ({}) added with id {}",
            equipment.inventory_item_no,
            equipment.description,
            equipment.id
        );
        Ok(equipment)
    }

    pub async fn update_ics(&self, id: i32, data: UpdateIcsEquipment) -> AppResult<IcsEquipment> {
        data.validate()?;
        if data.total_amount.is_some_and(|a| a.is_sign_negative()) {
            return Err(AppError::Validation("Total amount cannot be negative".to_string()));
        }
        self.repository.ics_update(id, &data).await
    }

    /// Delete ICS equipment. A borrowed item is kept unless `force` is set,
    /// in which case its loan is closed as returned today.
    pub async fn delete_ics(&self, id: i32, force: bool) -> AppResult<IcsEquipment> {
        let (deleted, closed) = self.repository.ics_delete(id, force, self.clock.today()).await?;
        log_deleted("ICS", &deleted.inventory_item_no, closed);
        Ok(deleted)
    }

    // PAR

    pub async fn list_par(&self, query: &EquipmentQuery) -> Vec<ParEquipment> {
        let rows = self.repository.par.list().await;
        filter_by_query(&rows, query.search.as_deref())
            .into_iter()
            .filter(|e| query.status.map_or(true, |s| e.status == s))
            .cloned()
            .collect()
    }

    pub async fn get_par(&self, id: i32) -> AppResult<ParEquipment> {
        self.repository.par.get_by_id(id).await
    }

    pub async fn create_par(&self, data: CreateParEquipment) -> AppResult<ParEquipment> {
        data.validate()?;
        if data.amount.is_sign_negative() {
            return Err(AppError::Validation("Amount cannot be negative".to_string()));
        }
        ensure_starts_available(data.status)?;
        let equipment = self.repository.par_create(&data).await?;
        tracing::info!(
            "PAR equipment {} ({}) added with id {}",
            equipment.property_no,
            equipment.description,
            equipment.id
        );
        Ok(equipment)
    }

    pub async fn update_par(&self, id: i32, data: UpdateParEquipment) -> AppResult<ParEquipment> {
        data.validate()?;
        if data.amount.is_some_and(|a| a.is_sign_negative()) {
            return Err(AppError::Validation("Amount cannot be negative".to_string()));
        }
        self.repository.par_update(id, &data).await
    }

    pub async fn delete_par(&self, id: i32, force: bool) -> AppResult<ParEquipment> {
        let (deleted, closed) = self.repository.par_delete(id, force, self.clock.today()).await?;
        log_deleted("PAR", &deleted.property_no, closed);
        Ok(deleted)
    }
}

fn log_deleted(class: &str, number: &str, closed_loans: usize) {
    if closed_loans > 0 {
        tracing::warn!(
            "{} equipment {} deleted while on loan; closed {} loan(s)",
            class,
            number,
            closed_loans
        );
    } else {
        tracing::info!("{} equipment {} deleted", class, number);
    }
}
