// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! digraph6 and graph6 records.
//!
//! Both formats pack a vertex count followed by adjacency bits into printable
//! bytes in `63..=126`, six bits per byte, most significant bit first.
//!
//! - digraph6 starts with `&` and stores the full `n x n` matrix row by row:
//!   bit `i * n + j` is the edge `i -> j`.
//! - graph6 has no prefix and stores the upper triangle column by column:
//!   for `j` in `1..n`, for `i` in `0..j`, the undirected edge `{i, j}`.
//!
//! The vertex count is one byte `n + 63` for `n <= 62`; otherwise byte 126
//! followed by three bytes (18 bits), or two 126s followed by six bytes.

use crate::errors::DecodeError;
use crate::graph::Digraph;

const BIAS: u8 = 63;
const LONG: u8 = 126;
const DIGRAPH6_PREFIX: u8 = b'&';

/// Decode one digraph6 or graph6 record (without line terminator).
pub fn decode(record: &[u8]) -> Result<Digraph, DecodeError> {
    let (directed, body) = match record.split_first() {
        None => return Err(DecodeError::Empty),
        Some((&DIGRAPH6_PREFIX, rest)) => (true, rest),
        Some(_) => (false, record),
    };
    let offset = record.len() - body.len();

    let mut bytes = Sextets {
        bytes: body,
        offset,
        pos: 0,
    };
    let n = bytes.vertex_count()?;
    let mut graph = Digraph::new(n).map_err(|_| DecodeError::TooManyVertices { n })?;

    let bits = if directed {
        n * n
    } else {
        n * n.saturating_sub(1) / 2
    };
    let expected = bits.div_ceil(6);
    let found = bytes.remaining();
    if found < expected {
        return Err(DecodeError::Truncated { expected, found });
    }
    if found > expected {
        return Err(DecodeError::TrailingBytes {
            extra: found - expected,
        });
    }

    let mut matrix = Vec::with_capacity(expected * 6);
    for _ in 0..expected {
        let sextet = bytes.next()?;
        matrix.extend((0..6).rev().map(|shift| (sextet >> shift) & 1 == 1));
    }

    if directed {
        for i in 0..n {
            for j in 0..n {
                if matrix[i * n + j] {
                    graph.add_edge(i, j);
                }
            }
        }
    } else {
        let mut k = 0;
        for j in 1..n {
            for i in 0..j {
                if matrix[k] {
                    graph.add_edge(i, j);
                    graph.add_edge(j, i);
                }
                k += 1;
            }
        }
    }
    Ok(graph)
}

/// Encode `graph` as a digraph6 record, without line terminator.
pub fn encode(graph: &Digraph) -> String {
    let n = graph.order();
    let mut out = vec![DIGRAPH6_PREFIX];
    push_vertex_count(&mut out, n);

    let mut sextet = 0u8;
    let mut filled = 0;
    for i in 0..n {
        for j in 0..n {
            sextet = (sextet << 1) | u8::from(graph.has_edge(i, j));
            filled += 1;
            if filled == 6 {
                out.push(sextet + BIAS);
                sextet = 0;
                filled = 0;
            }
        }
    }
    if filled > 0 {
        out.push((sextet << (6 - filled)) + BIAS);
    }
    out.into_iter().map(char::from).collect()
}

fn push_vertex_count(out: &mut Vec<u8>, n: usize) {
    if n <= 62 {
        out.push(n as u8 + BIAS);
        return;
    }
    let sextets = if n <= 258_047 {
        out.push(LONG);
        3
    } else {
        out.extend([LONG, LONG]);
        6
    };
    for k in (0..sextets).rev() {
        out.push(((n >> (6 * k)) & 0x3f) as u8 + BIAS);
    }
}

/// Cursor over the six-bit payload of a record.
struct Sextets<'a> {
    bytes: &'a [u8],
    /// Offset of `bytes` within the whole record, for error messages.
    offset: usize,
    pos: usize,
}

impl Sextets<'_> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn next(&mut self) -> Result<u8, DecodeError> {
        let Some(&byte) = self.bytes.get(self.pos) else {
            return Err(DecodeError::Truncated {
                expected: self.pos + 1,
                found: self.bytes.len(),
            });
        };
        if !(BIAS..=LONG).contains(&byte) {
            return Err(DecodeError::InvalidByte {
                byte,
                offset: self.offset + self.pos,
            });
        }
        self.pos += 1;
        Ok(byte - BIAS)
    }

    fn vertex_count(&mut self) -> Result<usize, DecodeError> {
        let first = self.next()?;
        if first + BIAS != LONG {
            return Ok(first as usize);
        }
        let sextets = if self.bytes.get(self.pos) == Some(&LONG) {
            self.pos += 1;
            6
        } else {
            3
        };
        let mut n = 0usize;
        for _ in 0..sextets {
            n = (n << 6) | self.next()? as usize;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MAXN;

    #[test]
    fn test_decode_single_edge() {
        let g = decode(b"&AO").unwrap();
        assert_eq!(g.order(), 2);
        assert!(g.has_edge(0, 1));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_decode_directed_cycle() {
        let g = decode(b"&BP_").unwrap();
        assert_eq!(g, Digraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap());
    }

    #[test]
    fn test_decode_graph6_is_symmetric() {
        // K3
        let g = decode(b"Bw").unwrap();
        assert_eq!(g.edge_count(), 6);
        assert!(g.has_edge(2, 0) && g.has_edge(0, 2));
    }

    #[test]
    fn test_decode_self_loop() {
        // One vertex with a loop: a single 1 bit.
        let g = decode(b"&@_").unwrap();
        assert!(g.has_loop(0));
    }

    #[test]
    fn test_decode_empty_graphs() {
        assert_eq!(decode(b"&?").unwrap().order(), 0);
        assert_eq!(decode(b"&@?").unwrap().order(), 1);
        assert_eq!(decode(b"@").unwrap().order(), 1);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(decode(b""), Err(DecodeError::Empty));
        assert_eq!(
            decode(b"&A!"),
            Err(DecodeError::InvalidByte {
                byte: b'!',
                offset: 2
            })
        );
        assert_eq!(
            decode(b"&A"),
            Err(DecodeError::Truncated {
                expected: 1,
                found: 0
            })
        );
        assert_eq!(
            decode(b"&AOO"),
            Err(DecodeError::TrailingBytes { extra: 1 })
        );
    }

    #[test]
    fn test_decode_rejects_oversized() {
        let mut record = vec![b'&'];
        push_vertex_count(&mut record, MAXN + 1);
        assert_eq!(
            decode(&record),
            Err(DecodeError::TooManyVertices { n: MAXN + 1 })
        );
    }

    #[test]
    fn test_encode_known_records() {
        assert_eq!(encode(&Digraph::from_edges(2, &[(0, 1)]).unwrap()), "&AO");
        assert_eq!(
            encode(&Digraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap()),
            "&BP_"
        );
        assert_eq!(encode(&Digraph::new(0).unwrap()), "&?");
    }

    #[test]
    fn test_long_vertex_count() {
        let mut out = Vec::new();
        push_vertex_count(&mut out, 63);
        assert_eq!(out, vec![126, 63, 63, 63 + 63]);

        let g = Digraph::from_edges(MAXN, &[(0, MAXN - 1), (MAXN - 1, 0)]).unwrap();
        assert_eq!(decode(encode(&g).as_bytes()).unwrap(), g);
    }
}
