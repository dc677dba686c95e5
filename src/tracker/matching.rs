//! Greedy IoU matching between tracks and detections.

use ndarray::{Array2, ArrayView1};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssignmentResult {
    /// (track row, detection column) pairs in track order
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Assign detections to tracks one track at a time.
///
/// `ious` has one row per track and one column per detection. Rows are
/// visited top to bottom, so earlier tracks take contested detections
/// first. Each row claims its highest-IoU detection among those still free,
/// the lowest column winning ties, provided the score is strictly above
/// `thresh`. No later pass revisits earlier choices.
pub fn greedy_assignment(ious: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = ious.dim();

    let mut used = vec![false; num_cols];
    let mut matches = Vec::new();
    let mut unmatched_tracks = Vec::new();

    for (row_idx, row) in ious.rows().into_iter().enumerate() {
        match best_candidate(row, &used) {
            Some((col_idx, score)) if score > thresh => {
                used[col_idx] = true;
                matches.push((row_idx, col_idx));
            }
            _ => unmatched_tracks.push(row_idx),
        }
    }
    debug_assert_eq!(matches.len() + unmatched_tracks.len(), num_rows);

    let unmatched_detections = used
        .iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { None } else { Some(i) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}

/// Highest score among free columns; the first one wins ties.
fn best_candidate(row: ArrayView1<f32>, used: &[bool]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (col_idx, &score) in row.iter().enumerate() {
        if used[col_idx] {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((col_idx, score)),
        }
    }
    best
}
