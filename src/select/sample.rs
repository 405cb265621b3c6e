// src/select/sample.rs
//! Size-diverse sampling within an extension group.

use sha2::{Digest, Sha256};

/// Picks up to `limit` members of a group: smallest, median and largest by
/// size, then extras in SHA-256-of-path order.
///
/// `members` are `(path, size)` pairs; the result holds indices into it.
/// The extras order is stable across runs but does not favour
/// alphabetically early paths.
#[must_use]
pub fn diverse_subset(members: &[(&str, usize)], limit: usize) -> Vec<usize> {
    let mut by_size: Vec<usize> = (0..members.len()).collect();
    by_size.sort_by(|&a, &b| {
        members[a]
            .1
            .cmp(&members[b].1)
            .then_with(|| members[a].0.cmp(members[b].0))
    });

    let mut picked: Vec<usize> = Vec::with_capacity(limit.min(members.len()));
    if let (Some(&first), Some(&last)) = (by_size.first(), by_size.last()) {
        let median = by_size[by_size.len() / 2];
        for idx in [first, median, last] {
            if !picked.contains(&idx) {
                picked.push(idx);
            }
        }
    }

    let mut extras: Vec<(Vec<u8>, usize)> = by_size
        .iter()
        .filter(|&&idx| !picked.contains(&idx))
        .map(|&idx| (Sha256::digest(members[idx].0.as_bytes()).to_vec(), idx))
        .collect();
    extras.sort();
    picked.extend(extras.into_iter().map(|(_, idx)| idx));

    picked.truncate(limit);
    picked
}
