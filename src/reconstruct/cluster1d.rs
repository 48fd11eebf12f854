//! 1-D chaining clusterer.
//!
//! Items are visited in ascending key order; an item joins the open cluster
//! when its key is closer than `proximity` to the key of the item added last,
//! otherwise the cluster closes and a new one starts. Chaining means a long
//! run of small steps stays one cluster even if its extent exceeds the
//! threshold.

/// Groups items (already sorted by `key`) into chained clusters.
pub fn chain_sorted<T, F>(items: Vec<T>, proximity: f32, key: F) -> Vec<Vec<T>>
where
    F: Fn(&T) -> f32,
{
    let mut clusters: Vec<Vec<T>> = Vec::new();
    let mut cur: Vec<T> = Vec::new();
    for item in items {
        let joins = match cur.last() {
            Some(last) => key(&item) - key(last) < proximity,
            None => true,
        };
        if !joins {
            clusters.push(std::mem::take(&mut cur));
        }
        cur.push(item);
    }
    if !cur.is_empty() {
        clusters.push(cur);
    }
    clusters
}

/// Sorted clusters of raw coordinates. Empty input yields no clusters.
pub fn cluster_members(coords: &[i32], proximity: i32) -> Vec<Vec<i32>> {
    let mut sorted = coords.to_vec();
    sorted.sort_unstable();
    chain_sorted(sorted, proximity as f32, |&c| c as f32)
}

/// Cluster representatives: the member mean rounded to the nearest pixel.
pub fn cluster_coordinates(coords: &[i32], proximity: i32) -> Vec<i32> {
    cluster_members(coords, proximity)
        .iter()
        .map(|members| representative(members))
        .collect()
}

fn representative(members: &[i32]) -> i32 {
    let sum: i64 = members.iter().map(|&c| c as i64).sum();
    (sum as f64 / members.len() as f64).round() as i32
}
