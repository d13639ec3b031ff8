// Codeword maps: parsing the table text format and prefix matching.
//
// Table format: whitespace-separated tokens, alternating value token and
// codeword token. A value token is a decimal integer or `.` for the escape
// entry; a codeword token is a string of `0`/`1` characters, at most 57
// long, read in transmission order (first character = first bit on the
// wire = LSB of the stored pattern).
//
// Decoding matches the buffered low bits against a binary trie built at
// load time. Trie construction doubles as an integrity check: it rejects
// tables where one codeword is a bit prefix of another, so every admitted
// map is uniquely decodable and trie lookup is exactly equivalent to a
// first-match scan in table order.

use std::collections::HashMap;

use crate::error::Error;

/// Longest admissible codeword, so a refilled 64-bit window always covers it.
pub const MAX_CODEWORD_BITS: u32 = 57;

/// A codeword's integer key: a literal value or the reserved escape marker
/// announcing "the next element follows as an uncompressed absolute value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Literal(i64),
    Escape,
}

/// One table entry: key, bit pattern (LSB-first), and bit length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codeword {
    pub key: Key,
    pub bits: u64,
    pub len: u32,
}

impl Codeword {
    /// Render the pattern in transmission order, for error messages.
    pub fn pattern(&self) -> String {
        (0..self.len)
            .map(|i| if (self.bits >> i) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}

const NONE: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
struct TrieNode {
    child: [u32; 2],
    entry: u32,
}

impl TrieNode {
    const fn empty() -> Self {
        Self {
            child: [NONE; 2],
            entry: NONE,
        }
    }
}

/// An immutable, named collection of codewords with exactly one escape
/// entry. Entries keep their table order; a hash index serves encode
/// lookups and a binary trie serves decode lookups.
#[derive(Debug)]
pub struct CodewordMap {
    name: String,
    entries: Vec<Codeword>,
    by_literal: HashMap<i64, u32>,
    escape: u32,
    trie: Vec<TrieNode>,
}

impl CodewordMap {
    /// Parse a map from table text.
    pub fn parse(name: &str, text: &str) -> Result<Self, Error> {
        let mut map = Self {
            name: name.to_string(),
            entries: Vec::new(),
            by_literal: HashMap::new(),
            escape: NONE,
            trie: vec![TrieNode::empty()],
        };
        let mut tokens = text.split_whitespace();
        while let Some(value_tok) = tokens.next() {
            let Some(cw_tok) = tokens.next() else {
                return Err(map.invalid(value_tok, "", "dangling value token"));
            };
            map.add_codeword(value_tok, cw_tok)?;
        }
        if map.escape == NONE {
            return Err(map.invalid(".", "", "no escape entry in table"));
        }
        Ok(map)
    }

    fn invalid(&self, value: &str, codeword: &str, reason: &str) -> Error {
        Error::InvalidCodeword {
            map: self.name.clone(),
            value: value.to_string(),
            codeword: codeword.to_string(),
            reason: reason.to_string(),
        }
    }

    fn add_codeword(&mut self, value_tok: &str, cw_tok: &str) -> Result<(), Error> {
        let key = if value_tok == "." {
            if self.escape != NONE {
                return Err(self.invalid(value_tok, cw_tok, "duplicate escape entry"));
            }
            Key::Escape
        } else {
            let v: i64 = value_tok
                .parse()
                .map_err(|_| self.invalid(value_tok, cw_tok, "unparsable value token"))?;
            if self.by_literal.contains_key(&v) {
                return Err(self.invalid(value_tok, cw_tok, "duplicate value token"));
            }
            Key::Literal(v)
        };

        if cw_tok.len() > MAX_CODEWORD_BITS as usize {
            return Err(self.invalid(value_tok, cw_tok, "codeword longer than 57 bits"));
        }
        let mut bits = 0u64;
        for (i, c) in cw_tok.chars().enumerate() {
            match c {
                '0' => {}
                '1' => bits |= 1 << i,
                _ => return Err(self.invalid(value_tok, cw_tok, "codeword character not 0/1")),
            }
        }

        let idx = self.entries.len() as u32;
        let cw = Codeword {
            key,
            bits,
            len: cw_tok.len() as u32,
        };
        self.insert_trie(cw, idx)?;
        self.entries.push(cw);
        match key {
            Key::Escape => self.escape = idx,
            Key::Literal(v) => {
                self.by_literal.insert(v, idx);
            }
        }
        Ok(())
    }

    fn insert_trie(&mut self, cw: Codeword, idx: u32) -> Result<(), Error> {
        let mut node = 0usize;
        for depth in 0..cw.len {
            if self.trie[node].entry != NONE {
                // An existing, shorter codeword is a prefix of this one.
                let prior = self.entries[self.trie[node].entry as usize];
                return Err(Error::OverlappingCodeword {
                    map: self.name.clone(),
                    first: prior.pattern(),
                    second: cw.pattern(),
                });
            }
            let bit = ((cw.bits >> depth) & 1) as usize;
            let next = self.trie[node].child[bit];
            node = if next == NONE {
                self.trie.push(TrieNode::empty());
                let id = (self.trie.len() - 1) as u32;
                self.trie[node].child[bit] = id;
                id as usize
            } else {
                next as usize
            };
        }
        if self.trie[node].entry != NONE || self.trie[node].child != [NONE; 2] {
            // This codeword duplicates or is a prefix of an existing one.
            let prior = self.descendant_entry(node);
            return Err(Error::OverlappingCodeword {
                map: self.name.clone(),
                first: cw.pattern(),
                second: prior.pattern(),
            });
        }
        self.trie[node].entry = idx;
        Ok(())
    }

    /// Any entry reachable below `node`; used only for overlap diagnostics.
    fn descendant_entry(&self, mut node: usize) -> Codeword {
        loop {
            let n = &self.trie[node];
            if n.entry != NONE {
                return self.entries[n.entry as usize];
            }
            node = if n.child[0] != NONE {
                n.child[0] as usize
            } else {
                n.child[1] as usize
            };
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of entries, escape included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The escape codeword.
    #[inline]
    pub fn escape(&self) -> &Codeword {
        &self.entries[self.escape as usize]
    }

    /// The codeword registered for a literal key, if any.
    #[inline]
    pub fn literal(&self, key: i64) -> Option<&Codeword> {
        self.by_literal
            .get(&key)
            .map(|&idx| &self.entries[idx as usize])
    }

    /// Match the low bits of a buffered window against the trie.
    #[inline]
    pub fn match_prefix(&self, window: u64, window_len: u32) -> Option<&Codeword> {
        let mut node = &self.trie[0];
        let mut depth = 0u32;
        loop {
            if node.entry != NONE {
                return Some(&self.entries[node.entry as usize]);
            }
            if depth >= window_len {
                return None;
            }
            let bit = ((window >> depth) & 1) as usize;
            match node.child[bit] {
                NONE => return None,
                next => node = &self.trie[next as usize],
            }
            depth += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
