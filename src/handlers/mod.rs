pub mod health;
pub mod set;
pub mod get;
pub mod cluster_info;

pub use health::health_handler;
pub use set::set_handler;
pub use get::get_handler;
pub use cluster_info::cluster_info_handler;
