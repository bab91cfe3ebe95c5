use crate::domain::fields::{DateInput, FieldSet, FieldValue};
use crate::utils::error::Result;
use serde_yaml::{Mapping, Value};

/// Key whose presence marks a raw author/contact record as a person.
pub const PERSON_MARKER: &str = "given-names";

pub const PERSON_FIELDS: &[&str] = &[
    "address",
    "affiliation",
    "city",
    "country",
    "email",
    "family-names",
    "fax",
    "given-names",
    "name-particle",
    "name-suffix",
    "orcid",
    "post-code",
    "region",
    "tel",
    "website",
];

pub const ENTITY_FIELDS: &[&str] = &[
    "address",
    "city",
    "country",
    "date-end",
    "date-start",
    "email",
    "fax",
    "location",
    "name",
    "orcid",
    "post-code",
    "region",
    "tel",
    "website",
];

/// A named individual credited in a citation.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    fields: FieldSet,
}

impl Person {
    pub fn new(given_names: impl Into<String>, family_names: impl Into<String>) -> Self {
        let mut fields = FieldSet::new(PERSON_FIELDS);
        fields.insert("given-names", FieldValue::Text(given_names.into()));
        fields.insert("family-names", FieldValue::Text(family_names.into()));
        Self { fields }
    }

    pub fn from_mapping(mapping: Mapping) -> Self {
        Self {
            fields: FieldSet::from_mapping(PERSON_FIELDS, mapping),
        }
    }

    pub fn get(&self, name: &str) -> Result<FieldValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: &str, value: Option<FieldValue>) -> Result<()> {
        self.fields.set(name, value)
    }

    pub fn given_names(&self) -> String {
        self.text("given-names")
    }

    pub fn family_names(&self) -> String {
        self.text("family-names")
    }

    pub fn fields(&self) -> Mapping {
        self.fields.to_mapping()
    }

    fn text(&self, key: &str) -> String {
        self.fields
            .lookup(key)
            .map(|v| v.to_string())
            .unwrap_or_default()
    }
}

/// An organisation, team, project or event credited in a citation.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    fields: FieldSet,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        let mut fields = FieldSet::new(ENTITY_FIELDS);
        fields.insert("name", FieldValue::Text(name.into()));
        Self { fields }
    }

    pub fn from_mapping(mapping: Mapping) -> Self {
        Self {
            fields: FieldSet::from_mapping(ENTITY_FIELDS, mapping),
        }
    }

    pub fn get(&self, name: &str) -> Result<FieldValue> {
        self.fields.get(name)
    }

    pub fn set(&mut self, name: &str, value: Option<FieldValue>) -> Result<()> {
        self.fields.set(name, value)
    }

    pub fn set_date_start(&mut self, date: impl Into<DateInput>) -> Result<()> {
        let date = date.into().into_date()?;
        self.fields.insert("date-start", FieldValue::Date(date));
        Ok(())
    }

    pub fn set_date_end(&mut self, date: impl Into<DateInput>) -> Result<()> {
        let date = date.into().into_date()?;
        self.fields.insert("date-end", FieldValue::Date(date));
        Ok(())
    }

    pub fn name(&self) -> String {
        self.fields
            .lookup("name")
            .map(|v| v.to_string())
            .unwrap_or_default()
    }

    pub fn fields(&self) -> Mapping {
        self.fields.to_mapping()
    }
}

/// A member of the `authors` or `contact` collections.
#[derive(Debug, Clone, PartialEq)]
pub enum Citant {
    Person(Person),
    Entity(Entity),
    /// A value with no field mapping of its own. It is kept in the
    /// collection but left out of any output.
    Opaque(Value),
}

impl Citant {
    /// Output-ready field mapping, or `None` for opaque members.
    pub fn fields(&self) -> Option<Mapping> {
        match self {
            Citant::Person(p) => Some(p.fields()),
            Citant::Entity(e) => Some(e.fields()),
            Citant::Opaque(_) => None,
        }
    }

    pub fn is_person(&self) -> bool {
        matches!(self, Citant::Person(_))
    }

    pub fn is_entity(&self) -> bool {
        matches!(self, Citant::Entity(_))
    }

    pub fn as_person(&self) -> Option<&Person> {
        match self {
            Citant::Person(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Citant::Entity(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Person> for Citant {
    fn from(value: Person) -> Self {
        Citant::Person(value)
    }
}

impl From<Entity> for Citant {
    fn from(value: Entity) -> Self {
        Citant::Entity(value)
    }
}

pub fn is_person_record(record: &Mapping) -> bool {
    record.contains_key(PERSON_MARKER)
}

/// Turns a raw author/contact record into a [`Citant`]. Never fails: a record
/// without `given-names` is an entity, and a record that is not a mapping
/// becomes an entity with no fields.
pub fn classify(raw: Value) -> Citant {
    match raw {
        Value::Mapping(mapping) if is_person_record(&mapping) => {
            Citant::Person(Person::from_mapping(mapping))
        }
        Value::Mapping(mapping) => Citant::Entity(Entity::from_mapping(mapping)),
        other => {
            tracing::debug!("Non-mapping citant record classified as empty entity: {:?}", other);
            Citant::Entity(Entity::from_mapping(Mapping::new()))
        }
    }
}
