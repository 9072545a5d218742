pub mod controls;
pub mod health;
pub mod reports;
pub mod risks;

pub use controls::{list_controls, record_control};
pub use health::health_check;
pub use reports::get_report;
pub use risks::{
    create_risk, delete_risk, export_risks, get_risk, list_risks, risk_statistics, update_risk,
};
