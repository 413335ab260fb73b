//! Values shared between the UI loop and the network service

use heapless::String;

/// Longest item label kept (bytes); longer input is truncated
pub const MAX_ITEM_LEN: usize = 32;

/// Current item label
pub type ItemLabel = String<MAX_ITEM_LEN>;

/// Access to the scale values the API exposes
///
/// Implementations guard each field on its own (an atomic for the
/// weight, a mutex for the label), so methods take `&self`.
pub trait ScaleReadings {
    /// Latest weight in raw sensor units
    fn weight(&self) -> f32;

    /// Copy of the current item label
    fn item(&self) -> ItemLabel;

    /// Replace the item label
    fn set_item(&self, item: &str);
}

/// Copy a label, truncating to `MAX_ITEM_LEN` bytes at a char boundary
pub fn truncate_label(label: &str) -> ItemLabel {
    let mut out = ItemLabel::new();
    for ch in label.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}
