pub mod cars;

pub use cars::{car_detail, get_car, get_cars, list_cars, CarDetail, CarsList};
