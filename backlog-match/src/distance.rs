/// Levenshtein distance between two strings, ignoring case.
pub fn distance(a: &str, b: &str) -> usize {
    distance_with_case(a, b, true)
}

/// Levenshtein distance: the minimum number of single-character insertions,
/// deletions, or substitutions turning `a` into `b`.
///
/// Works on `char`s, not bytes, so accented and CJK titles count one edit per
/// character. Cell `[i][j]` of the table is the distance between the suffixes
/// `a[i..]` and `b[j..]`; only two rows are kept alive at a time.
pub fn distance_with_case(a: &str, b: &str, case_insensitive: bool) -> usize {
    let (a, b): (Vec<char>, Vec<char>) = if case_insensitive {
        (a.to_lowercase().chars().collect(), b.to_lowercase().chars().collect())
    } else {
        (a.chars().collect(), b.chars().collect())
    };
    let (n, m) = (a.len(), b.len());

    // Row `n`: only insertions remain.
    let mut below: Vec<usize> = (0..=m).map(|j| m - j).collect();
    let mut row = vec![0; m + 1];

    for i in (0..n).rev() {
        // Column `m`: only deletions remain.
        row[m] = n - i;
        for j in (0..m).rev() {
            row[j] = if a[i] == b[j] {
                below[j + 1]
            } else {
                1 + below[j].min(row[j + 1]).min(below[j + 1])
            };
        }
        std::mem::swap(&mut row, &mut below);
    }

    below[0]
}

#[cfg(test)]
#[path = "tests/distance_tests.rs"]
mod tests;
