/// Moves `index` one place through a list of `len`, wrapping at both ends.
pub const fn cycle_index(index: usize, len: usize, forward: bool) -> usize {
    match (len, forward) {
        (0, _) => 0,
        (_, true) => (index + 1) % len,
        (_, false) if index == 0 || index >= len => len - 1,
        (_, false) => index - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_in_both_directions() {
        assert_eq!(cycle_index(2, 3, true), 0);
        assert_eq!(cycle_index(0, 3, false), 2);
        assert_eq!(cycle_index(1, 3, false), 0);
        assert_eq!(cycle_index(5, 0, true), 0);
    }
}
