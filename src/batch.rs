// Batching — partition an ordered post sequence into fixed-size groups.
//
// The scorer accepts one batch per request, so the orchestrator feeds it
// consecutive chunks. Construction never pads, so no placeholder values
// can leak into a materialized batch.

/// Partition `items` into consecutive chunks of `size`, preserving
/// order. The final chunk may be shorter; empty input yields zero
/// batches. A `size` of 0 is treated as 1.
pub fn into_batches<T>(items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let size = size.max(1);
    if items.is_empty() {
        return Vec::new();
    }

    let mut batches = Vec::with_capacity(items.len().div_ceil(size));
    let mut current = Vec::with_capacity(size);
    for item in items {
        current.push(item);
        if current.len() == size {
            batches.push(std::mem::replace(&mut current, Vec::with_capacity(size)));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }
    batches
}
