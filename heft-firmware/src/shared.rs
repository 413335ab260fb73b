//! Values shared between the UI loop and network collaborators
//!
//! Each field has its own guard: the weight is an atomic holding the f32
//! bit pattern, the item label sits behind a critical-section mutex.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicU32, Ordering};

use heft_protocol::{truncate_label, ItemLabel, ScaleReadings};

/// Latest weight, as `f32::to_bits`
static WEIGHT_BITS: AtomicU32 = AtomicU32::new(0);

/// Current item label
static ITEM: Mutex<CriticalSectionRawMutex, RefCell<ItemLabel>> =
    Mutex::new(RefCell::new(ItemLabel::new()));

/// Handle to the shared readings
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedReadings;

impl SharedReadings {
    /// Publish a new weight reading
    pub fn publish_weight(&self, weight: f32) {
        WEIGHT_BITS.store(weight.to_bits(), Ordering::Relaxed);
    }
}

impl ScaleReadings for SharedReadings {
    fn weight(&self) -> f32 {
        f32::from_bits(WEIGHT_BITS.load(Ordering::Relaxed))
    }

    fn item(&self) -> ItemLabel {
        ITEM.lock(|item| item.borrow().clone())
    }

    fn set_item(&self, item: &str) {
        let label = truncate_label(item);
        ITEM.lock(|cell| *cell.borrow_mut() = label);
    }
}
