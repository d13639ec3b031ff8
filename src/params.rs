// Parameter records: the string-keyed metadata that travels with every
// encoded blob.
//
// A record is handed to the caller's container layer verbatim and must come
// back verbatim; the decoder reads its own identity and stream geometry out
// of it. Keys are plain strings so the record survives storage layers that
// only understand string attributes.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::Error;

// Record keys.
pub const PACKER: &str = "packer";
pub const FORMAT_VERSION: &str = "format_version";
pub const CODEWORD_MAP_NAME: &str = "codeword_map_name";
pub const CODE_DIFF: &str = "code_diff";
pub const SIZE: &str = "size";
pub const AVG_BITS: &str = "avg_bits";
pub const NUM_BITS: &str = "num_bits";

// Coder identities.
pub const HUFFMAN_PACKER: &str = "huffman_coder";
pub const HUFFMAN_FORMAT_VERSION: &str = "2";
pub const BIT_PACKER: &str = "bit_packer";

/// String-keyed parameter record accompanying an encoded byte blob.
///
/// Ordered so that serialized forms are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeParams(BTreeMap<String, String>);

impl CodeParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl ToString) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Look up a key that must be present.
    pub fn require(&self, key: &str) -> Result<&str, Error> {
        self.get(key).ok_or_else(|| Error::BadParameter {
            key: key.to_string(),
            reason: "missing".to_string(),
        })
    }

    /// Look up and parse a required numeric entry.
    pub fn parse_required<F: FromStr>(&self, key: &str) -> Result<F, Error> {
        let raw = self.require(key)?;
        raw.parse().map_err(|_| Error::BadParameter {
            key: key.to_string(),
            reason: format!("unparsable value `{raw}`"),
        })
    }

    /// Parse a required `"0"`/`"1"` flag entry.
    pub fn require_flag(&self, key: &str) -> Result<bool, Error> {
        match self.require(key)? {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(Error::BadParameter {
                key: key.to_string(),
                reason: format!("expected `0` or `1`, found `{other}`"),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, String>> for CodeParams {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl From<CodeParams> for BTreeMap<String, String> {
    fn from(params: CodeParams) -> Self {
        params.0
    }
}

impl<'a> IntoIterator for &'a CodeParams {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
