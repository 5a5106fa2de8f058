use maud::{html, Markup};

pub mod car_card;
pub mod pagination;

pub use car_card::car_card;
pub use pagination::pagination_nav;

pub fn card(title: &str, body: Markup) -> Markup {
    html! {
        section class="card" {
            h2 { (title) }
            div class="card-body" {
                (body)
            }
        }
    }
}
