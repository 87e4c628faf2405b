//! Widget components for the TUI

mod filter_bar;
mod footer;
mod header;
pub mod modal_overlay;
mod product_grid;
mod product_modal;

pub use filter_bar::{button_regions, FilterBarWidget};
pub use footer::Footer;
pub use header::MainHeader;
pub use product_grid::{card_regions, image_label, ProductGrid};
pub use product_modal::{ModalLayout, ProductModal};
