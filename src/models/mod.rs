//! Data models for the inventory system

pub mod book;
pub mod borrower;
pub mod enums;
pub mod equipment;
pub mod project;
pub mod report;
pub mod search;
pub mod session;
pub mod transaction;

// Re-export commonly used types
pub use book::Book;
pub use borrower::{Borrower, BorrowerDetails};
pub use enums::{BorrowerRole, DocumentCategory, ItemStatus, ProjectType, Theme, TransactionStatus, TransactionType};
pub use equipment::{IcsEquipment, ParEquipment};
pub use project::{Document, ProjectYear};
pub use report::{ReportKind, ReportTable};
pub use search::Searchable;
pub use session::{Preferences, SessionClaims};
pub use transaction::{Transaction, TransactionDetails};
