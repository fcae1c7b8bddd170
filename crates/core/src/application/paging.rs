// Pagination Arithmetic shared by listing operations

/// Slice out a 1-indexed page. Out-of-range pages yield an empty vec, never
/// an error; page 0 is treated as page 1.
pub fn slice_page<T>(items: Vec<T>, page: u64, page_size: u64) -> Vec<T> {
    let start = (page.saturating_sub(1)).saturating_mul(page_size) as usize;
    if start >= items.len() {
        return Vec::new();
    }
    items
        .into_iter()
        .skip(start)
        .take(page_size as usize)
        .collect()
}

/// Total page count = ceil(total / page_size); 0 when page_size is 0.
pub fn total_pages(total: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
