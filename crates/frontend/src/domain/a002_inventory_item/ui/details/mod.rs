//! Карточка товара (MVVM):
//! - view_model.rs: состояние формы и команды
//! - view.rs: Leptos-компонент

mod view;
mod view_model;

pub use view::ItemDetails;
pub use view_model::ItemDetailsViewModel;
