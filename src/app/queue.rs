//! Drag-to-reorder for anything with a string id.
//!
//! Gesture handling lives in the frontend; this only consumes the resolved
//! `(active, over)` pair once a drag completes.

use crate::player::Track;

pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Track {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for String {
    fn id(&self) -> &str {
        self
    }
}

/// Relocate the item `active` to the slot `over` occupied, in place.
///
/// Returns `false` and leaves `items` untouched when the ids are equal or
/// either one is missing.
pub fn move_in_place<T: Identified>(items: &mut Vec<T>, active: &str, over: &str) -> bool {
    if active == over {
        return false;
    }
    let from = items.iter().position(|i| i.id() == active);
    let to = items.iter().position(|i| i.id() == over);
    match (from, to) {
        (Some(from), Some(to)) => {
            let item = items.remove(from);
            items.insert(to, item);
            true
        }
        _ => false,
    }
}

/// Pure form of [`move_in_place`].
pub fn move_item<T: Identified + Clone>(items: &[T], active: &str, over: &str) -> Vec<T> {
    let mut out = items.to_vec();
    move_in_place(&mut out, active, over);
    out
}
