//! Field buffer for one `*NEWRECORD` block.

/// The fields of one record block, in order of first appearance.
///
/// Every key maps to the ordered list of values seen for it; repeating a
/// key appends to its list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    line: usize,
    fields: Vec<(String, Vec<String>)>,
}

impl RawRecord {
    /// Creates an empty record that starts at the given 1-based line.
    pub fn new(line: usize) -> Self {
        Self {
            line,
            fields: Vec::new(),
        }
    }

    /// Line on which the record started.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Appends a value to the list for `key`.
    pub fn push(&mut self, key: &str, value: &str) {
        match self.fields.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value.to_string()),
            None => self
                .fields
                .push((key.to_string(), vec![value.to_string()])),
        }
    }

    /// All values for `key`, in source order.
    pub fn values(&self, key: &str) -> &[String] {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// The first value for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values(key).first().map(String::as_str)
    }

    /// Field keys in order of first appearance.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Returns true if no field has been pushed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
