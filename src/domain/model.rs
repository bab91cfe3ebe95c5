use crate::domain::citant::{classify, Citant};
use crate::domain::fields::{parse_date, yaml_to_string, DateInput, FieldSet, FieldValue};
use crate::utils::error::Result;
use chrono::NaiveDate;
use serde_yaml::{Mapping, Value};

/// Scalar fields reachable through [`Model::get`] and [`Model::set`].
pub const ALLOWED_FIELDS: &[&str] = &[
    "abstract",
    "cff-version",
    "commit",
    "date-released",
    "doi",
    "message",
    "title",
    "version",
];

/// CFF format version written into new citation files.
pub const DEFAULT_SPEC_VERSION: &str = "1.0.3";

/// The default message to use if none is explicitly set.
pub const DEFAULT_MESSAGE: &str =
    "If you use this software in your work, please cite it using the following metadata";

const AUTHORS_KEY: &str = "authors";
const CONTACT_KEY: &str = "contact";
const KEYWORDS_KEY: &str = "keywords";

/// The metadata record of a `CITATION.cff` file.
///
/// Scalar fields go through [`Model::get`] / [`Model::set`], which only accept
/// names from [`ALLOWED_FIELDS`]. The `authors`, `contact` and `keywords`
/// collections are handed out directly; push onto them to add entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    fields: FieldSet,
    authors: Vec<Citant>,
    contact: Vec<Citant>,
    keywords: Vec<String>,
}

impl Model {
    /// A fresh model with the given title, the default CFF version and the
    /// default message.
    pub fn new(title: impl Into<String>) -> Self {
        let mut fields = FieldSet::new(ALLOWED_FIELDS);
        fields.insert("cff-version", FieldValue::from(DEFAULT_SPEC_VERSION));
        fields.insert("message", FieldValue::from(DEFAULT_MESSAGE));
        fields.insert("title", FieldValue::Text(title.into()));

        Self {
            fields,
            authors: Vec::new(),
            contact: Vec::new(),
            keywords: Vec::new(),
        }
    }

    /// Rebuilds a model from a parsed document. Everything other than
    /// `authors`, `contact` and `keywords` is kept as is, including keys the
    /// named accessors would reject. A collection key whose value is not a
    /// sequence stays among the fields untouched.
    pub fn from_mapping(mut mapping: Mapping) -> Self {
        let authors = build_entity_collection(take_sequence(&mut mapping, AUTHORS_KEY));
        let contact = build_entity_collection(take_sequence(&mut mapping, CONTACT_KEY));
        let keywords = build_string_collection(take_sequence(&mut mapping, KEYWORDS_KEY));

        tracing::debug!(
            "Rehydrated model: {} authors, {} contacts, {} keywords, {} fields",
            authors.len(),
            contact.len(),
            keywords.len(),
            mapping.len()
        );

        Self {
            fields: FieldSet::from_mapping(ALLOWED_FIELDS, mapping),
            authors,
            contact,
            keywords,
        }
    }

    /// Reads an allow-listed field, or the empty string if unset. Values come
    /// back as stored: a `date-released` read from a document is text, use
    /// [`Model::date_released`] for a date.
    pub fn get(&self, name: &str) -> Result<FieldValue> {
        self.fields.get(name)
    }

    /// Stores `value` verbatim under an allow-listed field; `None` stores the
    /// empty string.
    pub fn set(&mut self, name: &str, value: Option<FieldValue>) -> Result<()> {
        self.fields.set(name, value)
    }

    /// Sets `date-released`. Text is parsed into a date; a date is stored
    /// unchanged. The field is left alone if parsing fails.
    pub fn set_date_released(&mut self, date: impl Into<DateInput>) -> Result<()> {
        let date = date.into().into_date()?;
        self.fields.insert("date-released", FieldValue::Date(date));
        Ok(())
    }

    pub fn set_version(&mut self, version: impl ToString) {
        self.fields
            .insert("version", FieldValue::Text(version.to_string()));
    }

    pub fn title(&self) -> String {
        self.text("title")
    }

    pub fn version(&self) -> String {
        self.text("version")
    }

    /// `date-released` as a date, if it is set to one or to text that reads
    /// as one.
    pub fn date_released(&self) -> Option<NaiveDate> {
        match self.fields.lookup("date-released")? {
            FieldValue::Date(d) => Some(*d),
            FieldValue::Text(s) => parse_date(s).ok(),
            FieldValue::Yaml(_) => None,
        }
    }

    pub fn authors(&self) -> &Vec<Citant> {
        &self.authors
    }

    pub fn authors_mut(&mut self) -> &mut Vec<Citant> {
        &mut self.authors
    }

    pub fn contact(&self) -> &Vec<Citant> {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut Vec<Citant> {
        &mut self.contact
    }

    pub fn keywords(&self) -> &Vec<String> {
        &self.keywords
    }

    pub fn keywords_mut(&mut self) -> &mut Vec<String> {
        &mut self.keywords
    }

    /// Projects the model onto the mapping written out as YAML: the scalar
    /// fields in their stored order, then the non-empty collections.
    pub fn to_output_mapping(&self) -> Mapping {
        let mut output = self.fields.to_mapping();

        if !self.authors.is_empty() {
            output.insert(
                Value::from(AUTHORS_KEY),
                entity_collection_to_yaml(AUTHORS_KEY, &self.authors),
            );
        }
        if !self.contact.is_empty() {
            output.insert(
                Value::from(CONTACT_KEY),
                entity_collection_to_yaml(CONTACT_KEY, &self.contact),
            );
        }
        if !self.keywords.is_empty() {
            let keywords = self.keywords.iter().cloned().map(Value::String).collect();
            output.insert(Value::from(KEYWORDS_KEY), Value::Sequence(keywords));
        }

        output
    }

    fn text(&self, key: &str) -> String {
        self.fields
            .lookup(key)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }
}

impl From<&str> for Model {
    fn from(title: &str) -> Self {
        Model::new(title)
    }
}

impl From<String> for Model {
    fn from(title: String) -> Self {
        Model::new(title)
    }
}

impl From<Mapping> for Model {
    fn from(mapping: Mapping) -> Self {
        Model::from_mapping(mapping)
    }
}

/// Removes `key` from `mapping` only when it holds a sequence.
fn take_sequence(mapping: &mut Mapping, key: &str) -> Vec<Value> {
    if !matches!(mapping.get(key), Some(Value::Sequence(_))) {
        if mapping.contains_key(key) {
            tracing::debug!("'{}' is not a sequence, keeping it as a field", key);
        }
        return Vec::new();
    }

    match mapping.shift_remove(key) {
        Some(Value::Sequence(items)) => items,
        _ => Vec::new(),
    }
}

fn build_entity_collection(records: Vec<Value>) -> Vec<Citant> {
    records.into_iter().map(classify).collect()
}

fn build_string_collection(items: Vec<Value>) -> Vec<String> {
    items.iter().map(yaml_to_string).collect()
}

fn entity_collection_to_yaml(key: &str, collection: &[Citant]) -> Value {
    let entries: Vec<Value> = collection
        .iter()
        .filter_map(|citant| citant.fields())
        .map(Value::Mapping)
        .collect();

    let dropped = collection.len() - entries.len();
    if dropped > 0 {
        tracing::warn!("Skipped {} '{}' entries with no field mapping", dropped, key);
    }

    Value::Sequence(entries)
}
