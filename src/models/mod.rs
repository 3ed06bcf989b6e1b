pub mod premiation;
pub mod sales;
pub mod table;
pub mod voucher;

pub use premiation::{
    BonusOverride, JoinMode, PremiationEntry, PremiationOutcome, PremiationParams,
    PremiationStats, StorePremiation,
};
pub use sales::{ConsolidatedEntry, GroupBy, SalesRecord};
pub use table::{Cell, SalesColumns, Table, VoucherColumns};
pub use voucher::VoucherAdjustment;
