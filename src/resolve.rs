//! Relationship resolution: joins records across collections.
//!
//! Collections reference each other only by id. A [`RelationSpec`] names one
//! such reference once (foreign key field, target collection, the fields to
//! copy, and what to show when the target is missing), and [`resolve`] turns
//! a record plus its specs into a [`ResolvedView`]:
//!
//! ```text
//! Post { authorId: "ada", … }            ResolvedView<Post>
//!       │                                  { …, author: { name: "Ada Lovelace",
//!       └── authors["ada"] ─────────────►               avatar: "/img/ada.jpg" } }
//! ```
//!
//! ## Totality
//!
//! Resolution never fails. A dangling id, an empty id, or a record with no
//! such field all embed the relation's fallback object instead
//! (`{ name: "Unknown Author", avatar: "" }`). A target that lacks one of the
//! projected fields contributes the fallback for that field alone. The
//! serialized view drops every foreign-key field, so no raw id survives into
//! the rendering layer.
//!
//! ## No caching
//!
//! Views borrow the underlying record and are cheap to rebuild. Nothing is
//! memoized here; callers that want to can key a cache on
//! [`ContentStore::generation`](crate::content::ContentStore::generation).

use crate::content::{CollectionMap, FieldValue, Kind, Record};
use rayon::prelude::*;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use tracing::debug;

/// One declared many-to-one relation.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationSpec {
    /// Key the projection is embedded under (`author`).
    pub name: String,
    /// Field on the source record holding the target id (`authorId`).
    pub foreign_key: String,
    pub target: Kind,
    /// Target fields copied into the view, in order.
    pub projection: Vec<String>,
    /// Per-field values used when the target or the field is missing.
    /// Projected fields without an entry fall back to `""`.
    pub fallback: BTreeMap<String, FieldValue>,
}

impl RelationSpec {
    pub fn new(name: &str, foreign_key: &str, target: Kind) -> Self {
        Self {
            name: name.to_string(),
            foreign_key: foreign_key.to_string(),
            target,
            projection: Vec::new(),
            fallback: BTreeMap::new(),
        }
    }

    pub fn project<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn fallback(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.fallback.insert(field.to_string(), value.into());
        self
    }

    fn fallback_value(&self, field: &str) -> FieldValue {
        self.fallback
            .get(field)
            .cloned()
            .unwrap_or_else(|| FieldValue::Text(String::new()))
    }

    fn fallback_object(&self) -> Embedded {
        Embedded {
            resolved: false,
            fields: self
                .projection
                .iter()
                .map(|f| (f.clone(), self.fallback_value(f)))
                .collect(),
        }
    }
}

/// A relation as embedded into a view: either the target's projected fields
/// or the fallback object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embedded {
    /// `false` when the fallback was used.
    #[serde(skip)]
    pub resolved: bool,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Embedded {
    /// Text value of a projected field, `""` when absent or not text.
    pub fn text(&self, field: &str) -> &str {
        self.fields
            .get(field)
            .and_then(FieldValue::as_str)
            .unwrap_or("")
    }
}

/// A record together with all of its resolved relations.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedView<'a, R> {
    pub record: &'a R,
    relations: BTreeMap<String, Embedded>,
    foreign_keys: Vec<String>,
}

impl<'a, R> ResolvedView<'a, R> {
    pub fn relation(&self, name: &str) -> Option<&Embedded> {
        self.relations.get(name)
    }

    pub fn relations(&self) -> &BTreeMap<String, Embedded> {
        &self.relations
    }

    /// Shorthand for `relation(name).text(field)`, `""` when either is absent.
    pub fn text(&self, relation: &str, field: &str) -> &str {
        self.relations
            .get(relation)
            .map(|e| e.text(field))
            .unwrap_or("")
    }

    /// `true` when no relation needed its fallback.
    pub fn is_fully_resolved(&self) -> bool {
        self.relations.values().all(|e| e.resolved)
    }
}

/// Views answer field lookups like their record, except that foreign keys are
/// hidden and `"relation.field"` reads the embedded projection. This lets
/// [`find_related`] and [`find_featured`] run directly over resolved lists.
impl<R: Record> Record for ResolvedView<'_, R> {
    fn id(&self) -> &str {
        self.record.id()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        if let Some((relation, field)) = name.split_once('.') {
            return self.relations.get(relation)?.fields.get(field).cloned();
        }
        if self.foreign_keys.iter().any(|k| k == name) {
            return None;
        }
        self.record.field(name)
    }

    fn slug(&self) -> Option<&str> {
        self.record.slug()
    }

    fn is_featured(&self) -> bool {
        self.record.is_featured()
    }
}

impl<R: Serialize> Serialize for ResolvedView<'_, R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut value = serde_json::to_value(self.record).map_err(S::Error::custom)?;
        if let serde_json::Value::Object(map) = &mut value {
            for key in &self.foreign_keys {
                map.remove(key);
            }
            for (name, embedded) in &self.relations {
                let embedded = serde_json::to_value(embedded).map_err(S::Error::custom)?;
                map.insert(name.clone(), embedded);
            }
        }
        value.serialize(serializer)
    }
}

/// Resolve every relation of `record` against `collections`.
pub fn resolve<'a, R, C>(
    record: &'a R,
    relations: &[RelationSpec],
    collections: &C,
) -> ResolvedView<'a, R>
where
    R: Record,
    C: CollectionMap + ?Sized,
{
    let mut embedded = BTreeMap::new();
    let mut foreign_keys = Vec::with_capacity(relations.len());

    for spec in relations {
        foreign_keys.push(spec.foreign_key.clone());

        let target_id = record.field(&spec.foreign_key);
        let target = target_id
            .as_ref()
            .and_then(FieldValue::as_str)
            .and_then(|id| collections.lookup(spec.target, id));

        let entry = match target {
            Some(target) => Embedded {
                resolved: true,
                fields: spec
                    .projection
                    .iter()
                    .map(|f| {
                        let value = target.field(f).unwrap_or_else(|| spec.fallback_value(f));
                        (f.clone(), value)
                    })
                    .collect(),
            },
            None => {
                debug!(
                    record = record.id(),
                    relation = %spec.name,
                    target = ?target_id,
                    "dangling reference, using fallback"
                );
                spec.fallback_object()
            }
        };
        embedded.insert(spec.name.clone(), entry);
    }

    ResolvedView {
        record,
        relations: embedded,
        foreign_keys,
    }
}

/// Resolve a whole collection. `out[i]` is the view of `records[i]`.
///
/// Each record resolves independently, so the work is spread over the rayon
/// pool; `collect` keeps input order.
pub fn resolve_all<'a, R, C>(
    records: &'a [R],
    relations: &[RelationSpec],
    collections: &C,
) -> Vec<ResolvedView<'a, R>>
where
    R: Record + Sync,
    C: CollectionMap + Sync + ?Sized,
{
    records
        .par_iter()
        .map(|record| resolve(record, relations, collections))
        .collect()
}

/// Parameters for [`find_related`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelatedQuery<'q> {
    /// Record to leave out; defaults to the source record's own id.
    pub exclude_id: Option<&'q str>,
    pub match_field: &'q str,
    pub limit: usize,
}

impl<'q> RelatedQuery<'q> {
    pub fn new(match_field: &'q str, limit: usize) -> Self {
        Self {
            exclude_id: None,
            match_field,
            limit,
        }
    }

    pub fn excluding(mut self, id: &'q str) -> Self {
        self.exclude_id = Some(id);
        self
    }
}

/// Up to `limit` records sharing `record[match_field]`, in collection order.
///
/// No ranking: the first matches encountered win. A record without the
/// match field has no related items.
pub fn find_related<'a, R: Record>(
    record: &R,
    collection: &'a [R],
    query: &RelatedQuery<'_>,
) -> Vec<&'a R> {
    let Some(key) = record.field(query.match_field) else {
        return Vec::new();
    };
    let exclude = query.exclude_id.unwrap_or_else(|| record.id());

    collection
        .iter()
        .filter(|candidate| candidate.id() != exclude)
        .filter(|candidate| candidate.field(query.match_field).as_ref() == Some(&key))
        .take(query.limit)
        .collect()
}

/// First record flagged `featured`, in collection order.
pub fn find_featured<R: Record>(collection: &[R]) -> Option<&R> {
    collection.iter().find(|record| record.is_featured())
}

/// A foreign key whose target does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    pub kind: Kind,
    pub record_id: String,
    pub relation: String,
    pub missing_id: String,
}

/// Every dangling reference in `records`, for reporting. Resolution itself
/// never needs this; it falls back silently.
pub fn dangling<R, C>(
    kind: Kind,
    records: &[R],
    relations: &[RelationSpec],
    collections: &C,
) -> Vec<BrokenLink>
where
    R: Record,
    C: CollectionMap + ?Sized,
{
    let mut broken = Vec::new();
    for record in records {
        for spec in relations {
            let target_id = record
                .field(&spec.foreign_key)
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            if collections.lookup(spec.target, &target_id).is_none() {
                broken.push(BrokenLink {
                    kind,
                    record_id: record.id().to_string(),
                    relation: spec.name.clone(),
                    missing_id: target_id,
                });
            }
        }
    }
    broken
}
