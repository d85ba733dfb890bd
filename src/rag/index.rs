use crate::error::RetrievalError;

/// One search result. `position` indexes into the store the index was built
/// from; it is `-1` for padding slots when fewer rows exist than requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    pub position: i64,
    pub distance: f32,
}

impl SearchHit {
    const SENTINEL: SearchHit = SearchHit {
        position: -1,
        distance: f32::INFINITY,
    };

    pub fn is_sentinel(&self) -> bool {
        self.position < 0
    }
}

/// Exhaustive squared-L2 index over a contiguous row-major buffer.
///
/// Derived state: the rows are copies of the store's embeddings, rebuilt
/// wholesale after every write. Cheap for corpora of tens to low hundreds of
/// documents, which is all this assistant ever holds.
#[derive(Debug)]
pub struct FlatIndex {
    data: Vec<f32>,
    dimension: usize,
    rows: usize,
}

impl FlatIndex {
    /// Copies the given embeddings into a fresh index. Fails when the input
    /// is empty or the rows disagree on dimension; callers keep the index
    /// absent in that case rather than serving a stale one.
    pub fn build<'a, I>(embeddings: I) -> Result<Self, RetrievalError>
    where
        I: IntoIterator<Item = &'a [f32]>,
    {
        let mut data = Vec::new();
        let mut dimension = 0usize;
        let mut rows = 0usize;

        for row in embeddings {
            if rows == 0 {
                if row.is_empty() {
                    return Err(RetrievalError::IndexBuild(
                        "zero-dimensional embedding".to_string(),
                    ));
                }
                dimension = row.len();
            } else if row.len() != dimension {
                return Err(RetrievalError::IndexBuild(format!(
                    "row {} has dimension {}, expected {}",
                    rows,
                    row.len(),
                    dimension
                )));
            }
            data.extend_from_slice(row);
            rows += 1;
        }

        if rows == 0 {
            return Err(RetrievalError::IndexBuild(
                "no embeddings to index".to_string(),
            ));
        }

        Ok(Self {
            data,
            dimension,
            rows,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns exactly `k` hits for `k > 0`: ascending distance, ties broken
    /// by lower position, padded with sentinel hits when `k` exceeds the row
    /// count.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>, RetrievalError> {
        if query.len() != self.dimension {
            return Err(RetrievalError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchHit> = self
            .data
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(position, row)| SearchHit {
                position: position as i64,
                distance: l2_squared(query, row),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.position.cmp(&b.position))
        });
        hits.truncate(k);
        hits.resize(k, SearchHit::SENTINEL);

        Ok(hits)
    }
}

fn l2_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_rejects_empty_input() {
        let rows: Vec<&[f32]> = Vec::new();
        assert!(matches!(
            FlatIndex::build(rows),
            Err(RetrievalError::IndexBuild(_))
        ));
    }

    #[test]
    fn build_rejects_mixed_dimensions() {
        let a = [1.0f32, 0.0];
        let b = [1.0f32, 0.0, 0.0];
        let err = FlatIndex::build([a.as_slice(), b.as_slice()]).unwrap_err();
        assert!(matches!(err, RetrievalError::IndexBuild(_)));
    }

    #[test]
    fn search_orders_by_distance_then_position() {
        let rows = [
            [1.0f32, 0.0], // distance 0 to the query
            [0.0f32, 1.0], // distance 2
            [1.0f32, 0.0], // distance 0, later position
        ];
        let index = FlatIndex::build(rows.iter().map(|r| r.as_slice())).unwrap();
        let hits = index.search(&[1.0, 0.0], 3).unwrap();
        let positions: Vec<i64> = hits.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![0, 2, 1]);
        assert_eq!(hits[0].distance, 0.0);
    }

    #[test]
    fn search_pads_underfilled_results_with_sentinels() {
        let rows = [[1.0f32, 0.0], [0.0f32, 1.0]];
        let index = FlatIndex::build(rows.iter().map(|r| r.as_slice())).unwrap();
        let hits = index.search(&[1.0, 0.0], 5).unwrap();
        assert_eq!(hits.len(), 5);
        assert!(hits[..2].iter().all(|h| !h.is_sentinel()));
        assert!(hits[2..].iter().all(|h| h.is_sentinel()));
    }

    #[test]
    fn search_with_zero_k_is_empty() {
        let rows = [[1.0f32, 0.0]];
        let index = FlatIndex::build(rows.iter().map(|r| r.as_slice())).unwrap();
        assert!(index.search(&[1.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn search_checks_query_dimension() {
        let rows = [[1.0f32, 0.0]];
        let index = FlatIndex::build(rows.iter().map(|r| r.as_slice())).unwrap();
        let err = index.search(&[1.0, 0.0, 0.0], 1).unwrap_err();
        assert!(matches!(
            err,
            RetrievalError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }
}
