pub mod car_detail;
pub mod error;
pub mod home;
pub mod used_cars;

pub use car_detail::car_detail_page;
pub use error::{error_page, not_found_page};
pub use home::home_page;
pub use used_cars::used_cars_page;
