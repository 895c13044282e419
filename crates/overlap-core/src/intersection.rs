use crate::geometry::Rect;
use crate::slot::ImageSlot;

/// Rectangle shared by every box in `boxes`.
///
/// Returns `None` for fewer than two boxes, or when the common region has no
/// positive area. Rect intersection is associative and commutative, so the
/// iteration order does not affect the result.
pub fn intersect_all<I>(boxes: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    let mut iter = boxes.into_iter();
    let first = iter.next()?;

    let mut count = 1usize;
    let common = iter.fold(first, |acc, other| {
        count += 1;
        acc.narrowed_by(&other)
    });

    if count < 2 || !common.has_area() {
        return None;
    }
    Some(common)
}

/// Overlap of all visible slots in display space.
pub fn compute_intersection<'a, I>(slots: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a ImageSlot>,
{
    intersect_all(slots.into_iter().filter_map(ImageSlot::bounds))
}
