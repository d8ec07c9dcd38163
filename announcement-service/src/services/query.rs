use mongodb::bson::{oid::ObjectId, Bson, Document};

/// Typed equality filter, lowered to a BSON document only at the driver call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, Bson)>,
}

impl Filter {
    /// Matches every document.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn equals(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::all().and_equals(field, value)
    }

    pub fn by_id(id: ObjectId) -> Self {
        Self::equals("_id", id)
    }

    /// Adds a clause; a later clause on the same field replaces the earlier one.
    pub fn and_equals(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        let field = field.into();
        self.clauses.retain(|(existing, _)| *existing != field);
        self.clauses.push((field, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn into_document(self) -> Document {
        self.clauses.into_iter().collect()
    }
}

impl From<Filter> for Document {
    fn from(filter: Filter) -> Self {
        filter.into_document()
    }
}
