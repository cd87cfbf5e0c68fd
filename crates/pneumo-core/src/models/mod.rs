pub mod patient;
pub mod record;
