//! Content store: typed, immutable record collections.
//!
//! Every surface of the site is rendered from bundled JSON. Each record kind
//! lives in its own collection and links to other kinds only by id
//! (`Post.authorId → Author.id`). Joining happens later, in [`crate::resolve`].
//!
//! ## Directory Layout
//!
//! ```text
//! content/
//! ├── config.toml          # Site configuration (optional)
//! ├── posts.json           # A collection as one JSON array…
//! ├── authors.json
//! ├── categories.json
//! ├── departments.json
//! ├── jobs/                # …or as one JSON object per file
//! │   ├── 010-designer.json
//! │   └── 020-engineer.json
//! ├── projects.json
//! ├── testimonials.json
//! └── faqs.json
//! ```
//!
//! Both forms may be combined; the array file is read first, then the
//! directory entries sorted by file name. That order is the collection's
//! natural order: "first featured", "first N related" and stable sorting all
//! depend on it. Missing collections are empty.
//!
//! ## Validation
//!
//! - No duplicate ids within a collection
//! - Date fields are ISO `YYYY-MM-DD`, so string order is chronological
//!
//! Records are never mutated after load. The only load-time adjustment is
//! deriving a slug from the title when the file leaves it out.

use crate::naming;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Content directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Duplicate id \"{id}\" in {kind}")]
    DuplicateId { kind: Kind, id: String },
    #[error("Duplicate slug \"{slug}\" in {kind} (records {first} and {id})")]
    DuplicateSlug {
        kind: Kind,
        slug: String,
        first: String,
        id: String,
    },
    #[error("Invalid slug \"{slug}\" on {kind}/{id}: expected lowercase letters, digits and dashes")]
    InvalidSlug { kind: Kind, id: String, slug: String },
    #[error("Invalid {field} \"{value}\" on {kind}/{id}: expected YYYY-MM-DD")]
    InvalidDate {
        kind: Kind,
        id: String,
        field: &'static str,
        value: String,
    },
}

/// The collections a content directory can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Posts,
    Authors,
    Categories,
    Departments,
    Jobs,
    Projects,
    Testimonials,
    Faqs,
}

impl Kind {
    pub const ALL: [Kind; 8] = [
        Kind::Posts,
        Kind::Authors,
        Kind::Categories,
        Kind::Departments,
        Kind::Jobs,
        Kind::Projects,
        Kind::Testimonials,
        Kind::Faqs,
    ];

    /// Collection name, also the file stem on disk.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Posts => "posts",
            Kind::Authors => "authors",
            Kind::Categories => "categories",
            Kind::Departments => "departments",
            Kind::Jobs => "jobs",
            Kind::Projects => "projects",
            Kind::Testimonials => "testimonials",
            Kind::Faqs => "faqs",
        }
    }

    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single field read off a record by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(u64),
    Flag(bool),
    List(Vec<String>),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Number(u64::from(n))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Flag(b)
    }
}

impl From<&[String]> for FieldValue {
    fn from(list: &[String]) -> Self {
        FieldValue::List(list.to_vec())
    }
}

/// Uniform, object-safe access to any content record.
///
/// Field names use the JSON spelling (`authorId`, `publishDate`).
pub trait Record {
    fn id(&self) -> &str;

    fn field(&self, name: &str) -> Option<FieldValue>;

    fn slug(&self) -> Option<&str> {
        None
    }

    fn is_featured(&self) -> bool {
        false
    }
}

/// A record kind that can be loaded from disk into its own collection.
pub trait Entry: Record + Serialize + DeserializeOwned + Send + Sync {
    const KIND: Kind;

    /// `(field name, value)` pairs that must be ISO dates.
    fn dates(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }

    /// Fill derived fields after deserialization.
    fn normalize(&mut self) {}
}

/// Derive a missing slug from the title, or from the id when the title has
/// nothing sluggable in it. Explicit slugs are left alone for `load` to check.
fn fill_slug(slug: &mut String, title: &str, id: &str) {
    if slug.is_empty() {
        *slug = naming::slugify(title);
    }
    if slug.is_empty() {
        *slug = naming::slugify(id);
    }
}

// =============================================================================
// Record kinds
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Markdown body.
    #[serde(default)]
    pub content: String,
    pub author_id: String,
    pub category_id: String,
    pub publish_date: String,
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub read_time: u32,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: String,
}

impl Record for Post {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "slug" => self.slug.as_str().into(),
            "title" => self.title.as_str().into(),
            "excerpt" => self.excerpt.as_str().into(),
            "content" => self.content.as_str().into(),
            "authorId" => self.author_id.as_str().into(),
            "categoryId" => self.category_id.as_str().into(),
            "publishDate" => self.publish_date.as_str().into(),
            "readTime" => self.read_time.into(),
            "views" => self.views.into(),
            "likes" => self.likes.into(),
            "featured" => self.featured.into(),
            "tags" => self.tags.as_slice().into(),
            "image" => self.image.as_str().into(),
            _ => return None,
        })
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn is_featured(&self) -> bool {
        self.featured
    }
}

impl Entry for Post {
    const KIND: Kind = Kind::Posts;

    fn dates(&self) -> Vec<(&'static str, &str)> {
        vec![("publishDate", &self.publish_date)]
    }

    fn normalize(&mut self) {
        fill_slug(&mut self.slug, &self.title, &self.id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub bio: String,
}

impl Record for Author {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "avatar" => self.avatar.as_str().into(),
            "role" => self.role.as_str().into(),
            "bio" => self.bio.as_str().into(),
            _ => return None,
        })
    }
}

impl Entry for Author {
    const KIND: Kind = Kind::Authors;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

impl Record for Category {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "slug" => self.slug.as_str().into(),
            "description" => self.description.as_str().into(),
            _ => return None,
        })
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

impl Entry for Category {
    const KIND: Kind = Kind::Categories;

    fn normalize(&mut self) {
        fill_slug(&mut self.slug, &self.name, &self.id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Record for Department {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "name" => self.name.as_str().into(),
            "description" => self.description.as_str().into(),
            _ => return None,
        })
    }
}

impl Entry for Department {
    const KIND: Kind = Kind::Departments;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub title: String,
    pub department_id: String,
    #[serde(default)]
    pub location: String,
    /// `full-time`, `part-time`, `contract`, …
    #[serde(default)]
    pub employment_type: String,
    pub posted_date: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl Record for Job {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "slug" => self.slug.as_str().into(),
            "title" => self.title.as_str().into(),
            "departmentId" => self.department_id.as_str().into(),
            "location" => self.location.as_str().into(),
            "employmentType" => self.employment_type.as_str().into(),
            "postedDate" => self.posted_date.as_str().into(),
            "salary" => self.salary.as_str().into(),
            "featured" => self.featured.into(),
            "summary" => self.summary.as_str().into(),
            "responsibilities" => self.responsibilities.as_slice().into(),
            "requirements" => self.requirements.as_slice().into(),
            _ => return None,
        })
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn is_featured(&self) -> bool {
        self.featured
    }
}

impl Entry for Job {
    const KIND: Kind = Kind::Jobs;

    fn dates(&self) -> Vec<(&'static str, &str)> {
        vec![("postedDate", &self.posted_date)]
    }

    fn normalize(&mut self) {
        fill_slug(&mut self.slug, &self.title, &self.id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub client: String,
    pub category_id: String,
    pub completed_date: String,
    #[serde(default)]
    pub summary: String,
    /// Markdown case study.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl Record for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "slug" => self.slug.as_str().into(),
            "title" => self.title.as_str().into(),
            "client" => self.client.as_str().into(),
            "categoryId" => self.category_id.as_str().into(),
            "completedDate" => self.completed_date.as_str().into(),
            "summary" => self.summary.as_str().into(),
            "content" => self.content.as_str().into(),
            "image" => self.image.as_str().into(),
            "featured" => self.featured.into(),
            "technologies" => self.technologies.as_slice().into(),
            _ => return None,
        })
    }

    fn slug(&self) -> Option<&str> {
        Some(&self.slug)
    }

    fn is_featured(&self) -> bool {
        self.featured
    }
}

impl Entry for Project {
    const KIND: Kind = Kind::Projects;

    fn dates(&self) -> Vec<(&'static str, &str)> {
        vec![("completedDate", &self.completed_date)]
    }

    fn normalize(&mut self) {
        fill_slug(&mut self.slug, &self.title, &self.id);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub quote: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub avatar: String,
    /// Star rating, 1–5.
    #[serde(default = "default_rating")]
    pub rating: u32,
}

fn default_rating() -> u32 {
    5
}

impl Record for Testimonial {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "quote" => self.quote.as_str().into(),
            "name" => self.name.as_str().into(),
            "role" => self.role.as_str().into(),
            "company" => self.company.as_str().into(),
            "avatar" => self.avatar.as_str().into(),
            "rating" => self.rating.into(),
            _ => return None,
        })
    }
}

impl Entry for Testimonial {
    const KIND: Kind = Kind::Testimonials;

    fn normalize(&mut self) {
        self.rating = self.rating.clamp(1, 5);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: String,
    pub question: String,
    pub answer: String,
    /// Plain label used as the FAQ filter; not a reference.
    #[serde(default)]
    pub category: String,
}

impl Record for Faq {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "id" => self.id.as_str().into(),
            "question" => self.question.as_str().into(),
            "answer" => self.answer.as_str().into(),
            "category" => self.category.as_str().into(),
            _ => return None,
        })
    }
}

impl Entry for Faq {
    const KIND: Kind = Kind::Faqs;
}

// =============================================================================
// Collections
// =============================================================================

/// An insertion-ordered collection with an id index.
///
/// When built in memory with duplicate ids the first occurrence wins the
/// index; [`load`] rejects duplicates outright.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            index.entry(item.id().to_string()).or_insert(pos);
        }
        Self { items, index }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    /// First record whose slug matches. `None` is the router's not-found signal.
    pub fn by_slug(&self, slug: &str) -> Option<&T> {
        self.items.iter().find(|item| item.slug() == Some(slug))
    }
}

/// Look up any record by collection and id.
pub trait CollectionMap {
    fn lookup(&self, kind: Kind, id: &str) -> Option<&dyn Record>;
}

fn as_record<T: Record>(item: &T) -> &dyn Record {
    item
}

/// Every collection of a site, loaded once and shared read-only.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    pub posts: Collection<Post>,
    pub authors: Collection<Author>,
    pub categories: Collection<Category>,
    pub departments: Collection<Department>,
    pub jobs: Collection<Job>,
    pub projects: Collection<Project>,
    pub testimonials: Collection<Testimonial>,
    pub faqs: Collection<Faq>,
    generation: String,
}

impl ContentStore {
    /// SHA-256 over every loaded file. Changes whenever any content changes,
    /// so callers can key memoized views on it. Empty for in-memory stores.
    pub fn generation(&self) -> &str {
        &self.generation
    }

    pub fn count(&self, kind: Kind) -> usize {
        match kind {
            Kind::Posts => self.posts.len(),
            Kind::Authors => self.authors.len(),
            Kind::Categories => self.categories.len(),
            Kind::Departments => self.departments.len(),
            Kind::Jobs => self.jobs.len(),
            Kind::Projects => self.projects.len(),
            Kind::Testimonials => self.testimonials.len(),
            Kind::Faqs => self.faqs.len(),
        }
    }
}

impl CollectionMap for ContentStore {
    fn lookup(&self, kind: Kind, id: &str) -> Option<&dyn Record> {
        match kind {
            Kind::Posts => self.posts.get(id).map(as_record),
            Kind::Authors => self.authors.get(id).map(as_record),
            Kind::Categories => self.categories.get(id).map(as_record),
            Kind::Departments => self.departments.get(id).map(as_record),
            Kind::Jobs => self.jobs.get(id).map(as_record),
            Kind::Projects => self.projects.get(id).map(as_record),
            Kind::Testimonials => self.testimonials.get(id).map(as_record),
            Kind::Faqs => self.faqs.get(id).map(as_record),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load every collection under `root`.
pub fn load(root: &Path) -> Result<ContentStore, ContentError> {
    if !root.is_dir() {
        return Err(ContentError::MissingRoot(root.to_path_buf()));
    }
    warn_unrecognized(root)?;

    let mut hasher = Sha256::new();
    let store = ContentStore {
        posts: load_collection(root, &mut hasher)?,
        authors: load_collection(root, &mut hasher)?,
        categories: load_collection(root, &mut hasher)?,
        departments: load_collection(root, &mut hasher)?,
        jobs: load_collection(root, &mut hasher)?,
        projects: load_collection(root, &mut hasher)?,
        testimonials: load_collection(root, &mut hasher)?,
        faqs: load_collection(root, &mut hasher)?,
        generation: format!("{:x}", hasher.finalize()),
    };

    info!(
        posts = store.posts.len(),
        jobs = store.jobs.len(),
        projects = store.projects.len(),
        generation = &store.generation[..12],
        "content loaded"
    );
    Ok(store)
}

enum Source {
    /// `<kind>.json` holding an array of records.
    Array(PathBuf),
    /// `<kind>/<name>.json` holding one record.
    Single(PathBuf),
}

fn load_collection<T: Entry>(
    root: &Path,
    hasher: &mut Sha256,
) -> Result<Collection<T>, ContentError> {
    let mut items: Vec<T> = Vec::new();

    for source in collection_sources(root, T::KIND)? {
        let (path, many) = match source {
            Source::Array(path) => (path, true),
            Source::Single(path) => (path, false),
        };
        let bytes = fs::read(&path)?;
        let rel = path.strip_prefix(root).unwrap_or(&path);
        hasher.update(rel.to_string_lossy().as_bytes());
        hasher.update(b"\0");
        hasher.update(&bytes);

        let parsed = if many {
            serde_json::from_slice::<Vec<T>>(&bytes)
        } else {
            serde_json::from_slice::<T>(&bytes).map(|item| vec![item])
        };
        let parsed = parsed.map_err(|source| ContentError::Json {
            path: path.clone(),
            source,
        })?;
        debug!(path = %rel.display(), records = parsed.len(), "read content file");
        items.extend(parsed);
    }

    let mut seen = HashSet::new();
    let mut slugs: HashMap<String, String> = HashMap::new();
    for item in &mut items {
        item.normalize();
        if !seen.insert(item.id().to_string()) {
            return Err(ContentError::DuplicateId {
                kind: T::KIND,
                id: item.id().to_string(),
            });
        }
        if let Some(slug) = item.slug() {
            if !naming::is_slug(slug) {
                return Err(ContentError::InvalidSlug {
                    kind: T::KIND,
                    id: item.id().to_string(),
                    slug: slug.to_string(),
                });
            }
            if let Some(first) = slugs.get(slug) {
                return Err(ContentError::DuplicateSlug {
                    kind: T::KIND,
                    slug: slug.to_string(),
                    first: first.clone(),
                    id: item.id().to_string(),
                });
            }
            slugs.insert(slug.to_string(), item.id().to_string());
        }
        for (field, value) in item.dates() {
            if !is_iso_date(value) {
                return Err(ContentError::InvalidDate {
                    kind: T::KIND,
                    id: item.id().to_string(),
                    field,
                    value: value.to_string(),
                });
            }
        }
    }

    Ok(Collection::new(items))
}

fn collection_sources(root: &Path, kind: Kind) -> Result<Vec<Source>, ContentError> {
    let mut sources = Vec::new();

    let array = root.join(format!("{}.json", kind.name()));
    if array.is_file() {
        sources.push(Source::Array(array));
    }

    let dir = root.join(kind.name());
    if dir.is_dir() {
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type().is_file() && is_json(path) && !is_hidden(path) {
                sources.push(Source::Single(path.to_path_buf()));
            }
        }
    }
    Ok(sources)
}

fn warn_unrecognized(root: &Path) -> Result<(), ContentError> {
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if !is_json(&path) {
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        if Kind::from_name(&stem).is_none() {
            warn!(path = %path.display(), "ignoring unrecognized content file");
        }
    }
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// `YYYY-MM-DD` with a plausible month and day.
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| -> Option<u32> {
        let part = &value[range];
        if part.bytes().all(|b| b.is_ascii_digit()) {
            part.parse().ok()
        } else {
            None
        }
    };
    matches!(
        (digits(0..4), digits(5..7), digits(8..10)),
        (Some(_), Some(1..=12), Some(1..=31))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn kind_names_round_trip() {
        for kind in Kind::ALL {
            assert_eq!(Kind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(Kind::from_name("widgets"), None);
    }

    #[test]
    fn iso_dates() {
        assert!(is_iso_date("2024-03-15"));
        assert!(!is_iso_date("2024-3-15"));
        assert!(!is_iso_date("2024-13-01"));
        assert!(!is_iso_date("2024-00-10"));
        assert!(!is_iso_date("15/03/2024"));
        assert!(!is_iso_date("2024-03-1x"));
    }

    #[test]
    fn post_fields_use_json_names() {
        let p = post("1", "Tech", "2024-01-01");
        assert_eq!(p.field("categoryId"), Some(FieldValue::Text("Tech".into())));
        assert_eq!(p.field("views"), Some(FieldValue::Number(0)));
        assert_eq!(p.field("category_id"), None);
    }

    #[test]
    fn collection_lookup_by_id_and_slug() {
        let mut a = post("1", "tech", "2024-01-01");
        a.slug = "first".into();
        let b = post("2", "tech", "2024-01-02");
        let posts = Collection::new(vec![a, b]);

        assert_eq!(posts.get("2").map(|p| p.id.as_str()), Some("2"));
        assert_eq!(posts.by_slug("first").map(|p| p.id.as_str()), Some("1"));
        assert!(posts.get("ghost").is_none());
        assert!(posts.by_slug("ghost").is_none());
    }

    #[test]
    fn in_memory_duplicate_ids_first_wins() {
        let mut second = post("1", "design", "2024-01-02");
        second.title = "Second".into();
        let posts = Collection::new(vec![post("1", "tech", "2024-01-01"), second]);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts.get("1").unwrap().category_id, "tech");
    }

    #[test]
    fn store_lookup_dispatches_on_kind() {
        let store = store_with(
            vec![post("p1", "c1", "2024-01-01")],
            vec![author("a1", "Ada")],
            vec![category("c1", "Tech")],
        );
        let found = store.lookup(Kind::Authors, "a1").unwrap();
        assert_eq!(found.field("name"), Some(FieldValue::Text("Ada".into())));
        assert!(store.lookup(Kind::Posts, "a1").is_none());
    }

    #[test]
    fn load_fixture_content() {
        let tmp = setup_fixtures();
        let store = load(tmp.path()).unwrap();

        assert_eq!(store.posts.len(), 5);
        assert_eq!(store.jobs.len(), 3);
        assert!(!store.testimonials.is_empty());
        assert_eq!(store.generation().len(), 64);
    }

    #[test]
    fn load_reads_directory_collections_in_name_order() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("authors");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("020-b.json"), r#"{"id":"b","name":"Bea"}"#).unwrap();
        fs::write(dir.join("010-a.json"), r#"{"id":"a","name":"Al"}"#).unwrap();

        let store = load(tmp.path()).unwrap();
        let ids: Vec<&str> = store.authors.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn load_derives_missing_slugs() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("posts.json"),
            r#"[{"id":"1","title":"Hello, World","authorId":"a","categoryId":"c","publishDate":"2024-01-01"}]"#,
        )
        .unwrap();

        let store = load(tmp.path()).unwrap();
        assert_eq!(store.posts.items()[0].slug, "hello-world");
    }

    #[test]
    fn load_rejects_duplicate_ids() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("authors.json"),
            r#"[{"id":"a","name":"One"},{"id":"a","name":"Two"}]"#,
        )
        .unwrap();

        let result = load(tmp.path());
        assert!(matches!(
            result,
            Err(ContentError::DuplicateId { kind: Kind::Authors, .. })
        ));
    }

    #[test]
    fn load_falls_back_to_id_for_unsluggable_titles() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("posts.json"),
            r#"[{"id":"p1","title":"!!!","authorId":"a","categoryId":"c","publishDate":"2024-01-01"}]"#,
        )
        .unwrap();

        let store = load(tmp.path()).unwrap();
        assert_eq!(store.posts.items()[0].slug, "p1");
        assert!(store.posts.by_slug("p1").is_some());
    }

    #[test]
    fn load_rejects_duplicate_slugs() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("posts.json"),
            r#"[
                {"id":"1","title":"One","slug":"same","authorId":"a","categoryId":"c","publishDate":"2024-01-01"},
                {"id":"2","title":"Same","authorId":"a","categoryId":"c","publishDate":"2024-01-02"}
            ]"#,
        )
        .unwrap();

        let err = load(tmp.path()).unwrap_err();
        assert!(matches!(
            &err,
            ContentError::DuplicateSlug { kind: Kind::Posts, slug, first, id }
                if slug == "same" && first == "1" && id == "2"
        ));
    }

    #[test]
    fn load_rejects_slugs_outside_the_slug_alphabet() {
        for bad in ["../../escaped", "a/b", "Upper", "-"] {
            let tmp = TempDir::new().unwrap();
            let json = format!(
                r#"[{{"id":"1","title":"T","slug":"{bad}","authorId":"a","categoryId":"c","publishDate":"2024-01-01"}}]"#
            );
            fs::write(tmp.path().join("posts.json"), json).unwrap();

            let result = load(tmp.path());
            assert!(
                matches!(result, Err(ContentError::InvalidSlug { kind: Kind::Posts, .. })),
                "accepted slug {bad:?}"
            );
        }
    }

    #[test]
    fn load_rejects_unsluggable_title_and_id() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("jobs.json"),
            r#"[{"id":"***","title":"???","departmentId":"d","postedDate":"2024-01-01"}]"#,
        )
        .unwrap();

        let result = load(tmp.path());
        assert!(matches!(result, Err(ContentError::InvalidSlug { kind: Kind::Jobs, .. })));
    }

    #[test]
    fn load_rejects_bad_dates() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("posts.json"),
            r#"[{"id":"1","title":"T","authorId":"a","categoryId":"c","publishDate":"March 3rd"}]"#,
        )
        .unwrap();

        let result = load(tmp.path());
        assert!(matches!(
            result,
            Err(ContentError::InvalidDate { field: "publishDate", .. })
        ));
    }

    #[test]
    fn load_reports_json_path() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("faqs.json"), "{ not json").unwrap();

        let err = load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("faqs.json"));
    }

    #[test]
    fn load_empty_directory_gives_empty_store() {
        let tmp = TempDir::new().unwrap();
        let store = load(tmp.path()).unwrap();
        for kind in Kind::ALL {
            assert_eq!(store.count(kind), 0);
        }
    }

    #[test]
    fn load_missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = load(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ContentError::MissingRoot(_))));
    }

    #[test]
    fn generation_changes_with_content() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("authors.json"), r#"[{"id":"a","name":"Al"}]"#).unwrap();
        let first = load(tmp.path()).unwrap().generation().to_string();
        let again = load(tmp.path()).unwrap().generation().to_string();
        assert_eq!(first, again);

        fs::write(tmp.path().join("authors.json"), r#"[{"id":"a","name":"Alan"}]"#).unwrap();
        let changed = load(tmp.path()).unwrap().generation().to_string();
        assert_ne!(first, changed);
    }

    #[test]
    fn testimonial_rating_clamped() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("testimonials.json"),
            r#"[{"id":"t","quote":"q","name":"n","rating":9}]"#,
        )
        .unwrap();
        let store = load(tmp.path()).unwrap();
        assert_eq!(store.testimonials.items()[0].rating, 5);
    }
}
