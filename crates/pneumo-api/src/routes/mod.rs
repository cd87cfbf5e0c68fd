pub mod health;
pub mod pathologies;
pub mod records;
