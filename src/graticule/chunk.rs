//! Vertex-limited output buffers.

use ndarray::Array2;

use crate::graticule::clip::Vertex;

/// A polyline piece holding at most the configured number of vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    pub vertices: Vec<Vertex>,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Screen positions as an `(n, 2)` array for upload to a line-strip
    /// vertex buffer.
    pub fn to_vertex_buffer(&self) -> Array2<f32> {
        let mut buf = Array2::<f32>::zeros((self.vertices.len(), 2));
        for (mut row, v) in buf.rows_mut().into_iter().zip(&self.vertices) {
            row[0] = v.x as f32;
            row[1] = v.y as f32;
        }
        buf
    }
}

/// Cut a run into chunks of at most `max_vertices` vertices. Adjacent
/// chunks share their boundary vertex so the drawn line stays connected.
///
/// `max_vertices` must be at least 2.
pub fn chunk_run(run: &[Vertex], max_vertices: usize) -> Vec<Chunk> {
    if run.len() < 2 {
        return Vec::new();
    }
    let max_vertices = max_vertices.max(2);

    let mut chunks = Vec::with_capacity(run.len() / (max_vertices - 1) + 1);
    let mut start = 0;
    loop {
        let end = (start + max_vertices).min(run.len());
        chunks.push(Chunk {
            vertices: run[start..end].to_vec(),
        });
        if end == run.len() {
            break;
        }
        start = end - 1;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn run(n: usize) -> Vec<Vertex> {
        (0..n)
            .map(|i| Vertex {
                x: i as f64 * 0.01,
                y: -(i as f64) * 0.01,
                t: i as f64,
            })
            .collect()
    }

    #[test]
    fn test_short_run_is_one_chunk() {
        let chunks = chunk_run(&run(5), 64);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 5);
    }

    #[test]
    fn test_chunks_share_boundary_vertex() {
        let r = run(10);
        let chunks = chunk_run(&r, 4);
        // 0..4, 3..7, 6..10
        assert_eq!(chunks.len(), 3);
        for c in &chunks {
            assert!(c.len() <= 4);
        }
        for w in chunks.windows(2) {
            assert_eq!(w[0].vertices.last(), w[1].vertices.first());
        }

        let mut joined: Vec<Vertex> = chunks[0].vertices.clone();
        for c in &chunks[1..] {
            joined.extend_from_slice(&c.vertices[1..]);
        }
        assert_eq!(joined, r);
    }

    #[test]
    fn test_exact_fit_has_no_trailing_chunk() {
        // 4 + 3 vertices fill two chunks exactly
        let chunks = chunk_run(&run(7), 4);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].len(), 4);
    }

    #[test]
    fn test_degenerate_runs() {
        assert!(chunk_run(&run(0), 8).is_empty());
        assert!(chunk_run(&run(1), 8).is_empty());
        assert_eq!(chunk_run(&run(3), 2).len(), 2);
    }

    #[test]
    fn test_vertex_buffer_shape() {
        let chunks = chunk_run(&run(3), 64);
        let buf = chunks[0].to_vertex_buffer();
        assert_eq!(buf.shape(), &[3, 2]);
        assert_relative_eq!(buf[[2, 0]], 0.02_f32);
        assert_relative_eq!(buf[[2, 1]], -0.02_f32);
    }
}
