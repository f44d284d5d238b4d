mod fetcher;
mod traits;

#[cfg(test)]
pub mod testing;

pub use fetcher::HttpEquipmentSource;
pub use traits::EquipmentSource;
