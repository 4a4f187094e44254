//! ICS and PAR equipment repositories.
//!
//! Both classes are borrowed through one equipment number: the ICS
//! inventory item number or the PAR property number. Those numbers share a
//! single namespace, so writes to either class lock both tables.

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::{
        enums::TransactionType,
        equipment::{
            CreateIcsEquipment, CreateParEquipment, IcsEquipment, ParEquipment, UpdateIcsEquipment,
            UpdateParEquipment,
        },
        search::same_key,
    },
};

use super::{
    store::{next_id, Table},
    transactions::{close_loans, ensure_renumberable, on_loan},
    Repository,
};

macro_rules! set_field {
    ($target:expr, $value:expr) => {
        if let Some(ref v) = $value {
            $target = v.clone();
        }
    };
}

#[derive(Clone, Default)]
pub struct IcsRepository {
    table: Table<IcsEquipment>,
}

impl IcsRepository {
    pub fn new(rows: Vec<IcsEquipment>) -> Self {
        Self { table: Table::new(rows) }
    }

    pub fn table(&self) -> &Table<IcsEquipment> {
        &self.table
    }

    pub async fn list(&self) -> Vec<IcsEquipment> {
        self.table.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<IcsEquipment> {
        self.table.get(id).await.ok_or_else(|| ics_not_found(id))
    }
}

#[derive(Clone, Default)]
pub struct ParRepository {
    table: Table<ParEquipment>,
}

impl ParRepository {
    pub fn new(rows: Vec<ParEquipment>) -> Self {
        Self { table: Table::new(rows) }
    }

    pub fn table(&self) -> &Table<ParEquipment> {
        &self.table
    }

    pub async fn list(&self) -> Vec<ParEquipment> {
        self.table.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ParEquipment> {
        self.table.get(id).await.ok_or_else(|| par_not_found(id))
    }
}

fn ics_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("ICS equipment {} not found", id))
}

fn par_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("PAR equipment {} not found", id))
}

/// The record allowed to already carry the number (the one being updated)
#[derive(Clone, Copy)]
enum Owner {
    None,
    Ics(i32),
    Par(i32),
}

/// Reject an equipment number already used by another ICS or PAR record
fn ensure_unique_number(
    ics: &[IcsEquipment],
    par: &[ParEquipment],
    number: &str,
    owner: Owner,
) -> AppResult<()> {
    let in_ics = ics
        .iter()
        .filter(|e| !matches!(owner, Owner::Ics(id) if id == e.id))
        .any(|e| same_key(&e.inventory_item_no, number));
    let in_par = par
        .iter()
        .filter(|e| !matches!(owner, Owner::Par(id) if id == e.id))
        .any(|e| same_key(&e.property_no, number));

    if in_ics || in_par {
        return Err(AppError::Conflict(format!(
            "Equipment number {} already exists",
            number.trim()
        )));
    }
    Ok(())
}

fn on_loan_error(number: &str) -> AppError {
    AppError::BusinessRule(
        ErrorCode::ItemOnLoan,
        format!("Equipment {} is currently borrowed", number),
    )
}

impl Repository {
    /// Create ICS equipment; its inventory item number must be unused by any equipment
    pub async fn ics_create(&self, data: &CreateIcsEquipment) -> AppResult<IcsEquipment> {
        let mut ics = self.ics.table().write().await;
        let par = self.par.table().read().await;

        ensure_unique_number(&ics, &par, &data.inventory_item_no, Owner::None)?;

        let equipment = IcsEquipment {
            id: next_id(&ics),
            description: data.description.clone(),
            quantity: data.quantity,
            unit: data.unit.clone(),
            total_amount: data.total_amount,
            inventory_item_no: data.inventory_item_no.trim().to_string(),
            estimated_useful_life: data.estimated_useful_life.clone(),
            ris_no: data.ris_no.clone(),
            ics_no: data.ics_no.clone(),
            status: data.status,
        };
        ics.push(equipment.clone());
        Ok(equipment)
    }

    pub async fn ics_update(&self, id: i32, data: &UpdateIcsEquipment) -> AppResult<IcsEquipment> {
        let mut ics = self.ics.table().write().await;
        let par = self.par.table().read().await;
        let transactions = self.transactions.table().read().await;

        if let Some(ref number) = data.inventory_item_no {
            ensure_unique_number(&ics, &par, number, Owner::Ics(id))?;
        }

        let equipment = ics.iter_mut().find(|e| e.id == id).ok_or_else(|| ics_not_found(id))?;
        ensure_renumberable(
            &transactions,
            TransactionType::Equipment,
            &equipment.inventory_item_no,
            data.inventory_item_no.as_ref(),
        )?;

        set_field!(equipment.description, data.description);
        set_field!(equipment.quantity, data.quantity);
        set_field!(equipment.unit, data.unit);
        set_field!(equipment.total_amount, data.total_amount);
        if let Some(ref v) = data.inventory_item_no {
            equipment.inventory_item_no = v.trim().to_string();
        }
        set_field!(equipment.estimated_useful_life, data.estimated_useful_life);
        set_field!(equipment.ris_no, data.ris_no);
        set_field!(equipment.ics_no, data.ics_no);

        Ok(equipment.clone())
    }

    /// Delete ICS equipment; see [`Repository::books_delete`] for `force`
    pub async fn ics_delete(
        &self,
        id: i32,
        force: bool,
        today: NaiveDate,
    ) -> AppResult<(IcsEquipment, usize)> {
        let mut ics = self.ics.table().write().await;
        let mut transactions = self.transactions.table().write().await;

        let pos = ics.iter().position(|e| e.id == id).ok_or_else(|| ics_not_found(id))?;
        let number = ics[pos].inventory_item_no.clone();

        if !force && on_loan(&transactions, TransactionType::Equipment, &number) {
            return Err(on_loan_error(&number));
        }

        let closed = close_loans(&mut transactions, TransactionType::Equipment, &number, today);
        Ok((ics.remove(pos), closed))
    }

    /// Create PAR equipment; its property number must be unused by any equipment
    pub async fn par_create(&self, data: &CreateParEquipment) -> AppResult<ParEquipment> {
        let ics = self.ics.table().read().await;
        let mut par = self.par.table().write().await;

        ensure_unique_number(&ics, &par, &data.property_no, Owner::None)?;

        let equipment = ParEquipment {
            id: next_id(&par),
            property_no: data.property_no.trim().to_string(),
            description: data.description.clone(),
            quantity: data.quantity,
            unit: data.unit.clone(),
            date_acquired: data.date_acquired,
            amount: data.amount,
            par_no: data.par_no.clone(),
            status: data.status,
        };
        par.push(equipment.clone());
        Ok(equipment)
    }

    pub async fn par_update(&self, id: i32, data: &UpdateParEquipment) -> AppResult<ParEquipment> {
        let ics = self.ics.table().read().await;
        let mut par = self.par.table().write().await;
        let transactions = self.transactions.table().read().await;

        if let Some(ref number) = data.property_no {
            ensure_unique_number(&ics, &par, number, Owner::Par(id))?;
        }

        let equipment = par.iter_mut().find(|e| e.id == id).ok_or_else(|| par_not_found(id))?;
        ensure_renumberable(
            &transactions,
            TransactionType::Equipment,
            &equipment.property_no,
            data.property_no.as_ref(),
        )?;

        if let Some(ref v) = data.property_no {
            equipment.property_no = v.trim().to_string();
        }
        set_field!(equipment.description, data.description);
        set_field!(equipment.quantity, data.quantity);
        set_field!(equipment.unit, data.unit);
        set_field!(equipment.date_acquired, data.date_acquired);
        set_field!(equipment.amount, data.amount);
        set_field!(equipment.par_no, data.par_no);

        Ok(equipment.clone())
    }

    pub async fn par_delete(
        &self,
        id: i32,
        force: bool,
        today: NaiveDate,
    ) -> AppResult<(ParEquipment, usize)> {
        let mut par = self.par.table().write().await;
        let mut transactions = self.transactions.table().write().await;

        let pos = par.iter().position(|e| e.id == id).ok_or_else(|| par_not_found(id))?;
        let number = par[pos].property_no.clone();

        if !force && on_loan(&transactions, TransactionType::Equipment, &number) {
            return Err(on_loan_error(&number));
        }

        let closed = close_loans(&mut transactions, TransactionType::Equipment, &number, today);
        Ok((par.remove(pos), closed))
    }
}
