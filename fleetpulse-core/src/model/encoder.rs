//! Label encoding for categorical features.

use std::collections::BTreeMap;

use super::error::ModelError;

/// Maps category labels to integer codes in sorted label order.
///
/// Fitting on `["Open Body", "Container", "Trailer"]` yields
/// `Container=0, Open Body=1, Trailer=2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryEncoder {
    codes: BTreeMap<String, usize>,
}

impl CategoryEncoder {
    pub fn fit<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut codes: BTreeMap<String, usize> =
            labels.into_iter().map(|l| (l.to_string(), 0)).collect();
        for (code, value) in codes.values_mut().enumerate() {
            *value = code;
        }
        Self { codes }
    }

    pub fn transform(&self, label: &str) -> Result<usize, ModelError> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| ModelError::UnknownCategory(label.to_string()))
    }

    /// Known labels in code order.
    pub fn classes(&self) -> Vec<&str> {
        self.codes.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
