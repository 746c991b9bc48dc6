pub mod invoice_types;
pub mod order_statuses;
pub mod renewal_triggers;
