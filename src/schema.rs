//! Per-surface declarations: which relations each record kind has and how
//! each listing filters and sorts.
//!
//! Joins and sort orders are declared here once and instantiated by every
//! caller (site generation, the `resolve` command, tests), so fallback labels
//! and comparator names never drift between call sites.
//!
//! | Surface   | Items          | Filter on        | Sorts                                  |
//! |-----------|----------------|------------------|----------------------------------------|
//! | Blog      | `PostView`     | category name    | latest, oldest, popular, liked, title  |
//! | Portfolio | `ProjectView`  | category name    | latest, oldest, title                  |
//! | Careers   | `JobView`      | department name  | latest, title                          |
//! | FAQ       | `Faq`          | `category` label | default (file order), question         |

use crate::collection::ViewSpec;
use crate::config::FallbackConfig;
use crate::content::{ContentStore, Faq, Job, Kind, Post, Project};
use crate::naming::slugify;
use crate::resolve::{BrokenLink, RelationSpec, ResolvedView, dangling};
use std::cmp::Ordering;

pub const SORT_LATEST: &str = "latest";
pub const SORT_OLDEST: &str = "oldest";
pub const SORT_POPULAR: &str = "popular";
pub const SORT_LIKED: &str = "liked";
pub const SORT_TITLE: &str = "title";
pub const SORT_DEFAULT: &str = "default";
pub const SORT_QUESTION: &str = "question";

pub const BLOG_SORTS: &[&str] = &[SORT_LATEST, SORT_OLDEST, SORT_POPULAR, SORT_LIKED, SORT_TITLE];
pub const PORTFOLIO_SORTS: &[&str] = &[SORT_LATEST, SORT_OLDEST, SORT_TITLE];
pub const CAREERS_SORTS: &[&str] = &[SORT_LATEST, SORT_TITLE];
pub const FAQ_SORTS: &[&str] = &[SORT_DEFAULT, SORT_QUESTION];

pub type PostView<'a> = ResolvedView<'a, Post>;
pub type JobView<'a> = ResolvedView<'a, Job>;
pub type ProjectView<'a> = ResolvedView<'a, Project>;

// =============================================================================
// Relations
// =============================================================================

pub fn post_relations(fallbacks: &FallbackConfig) -> Vec<RelationSpec> {
    vec![
        RelationSpec::new("author", "authorId", Kind::Authors)
            .project(["name", "avatar", "role"])
            .fallback("name", fallbacks.author.as_str()),
        category_relation(fallbacks),
    ]
}

pub fn job_relations(fallbacks: &FallbackConfig) -> Vec<RelationSpec> {
    vec![
        RelationSpec::new("department", "departmentId", Kind::Departments)
            .project(["name"])
            .fallback("name", fallbacks.department.as_str()),
    ]
}

pub fn project_relations(fallbacks: &FallbackConfig) -> Vec<RelationSpec> {
    vec![category_relation(fallbacks)]
}

fn category_relation(fallbacks: &FallbackConfig) -> RelationSpec {
    RelationSpec::new("category", "categoryId", Kind::Categories)
        .project(["name", "slug"])
        .fallback("name", fallbacks.category.as_str())
        .fallback("slug", slugify(&fallbacks.category).as_str())
}

/// Every dangling reference across posts, jobs and projects.
pub fn audit(store: &ContentStore, fallbacks: &FallbackConfig) -> Vec<BrokenLink> {
    let mut broken = dangling(
        Kind::Posts,
        store.posts.items(),
        &post_relations(fallbacks),
        store,
    );
    broken.extend(dangling(
        Kind::Jobs,
        store.jobs.items(),
        &job_relations(fallbacks),
        store,
    ));
    broken.extend(dangling(
        Kind::Projects,
        store.projects.items(),
        &project_relations(fallbacks),
        store,
    ));
    broken
}

// =============================================================================
// Listing specs
// =============================================================================

fn by_title(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn newest_post(a: &PostView<'_>, b: &PostView<'_>) -> Ordering {
    b.record.publish_date.cmp(&a.record.publish_date)
}

fn newest_project(a: &ProjectView<'_>, b: &ProjectView<'_>) -> Ordering {
    b.record.completed_date.cmp(&a.record.completed_date)
}

fn newest_job(a: &JobView<'_>, b: &JobView<'_>) -> Ordering {
    b.record.posted_date.cmp(&a.record.posted_date)
}

pub fn blog_view<'a>(page_size: usize) -> ViewSpec<PostView<'a>> {
    ViewSpec::new(|v| v.text("category", "name"), newest_post)
        .sort(SORT_LATEST, newest_post)
        .sort(SORT_OLDEST, |a, b| newest_post(b, a))
        .sort(SORT_POPULAR, |a, b| b.record.views.cmp(&a.record.views))
        .sort(SORT_LIKED, |a, b| b.record.likes.cmp(&a.record.likes))
        .sort(SORT_TITLE, |a, b| by_title(&a.record.title, &b.record.title))
        .paged(page_size)
}

pub fn portfolio_view<'a>(page_size: usize) -> ViewSpec<ProjectView<'a>> {
    ViewSpec::new(|v| v.text("category", "name"), newest_project)
        .sort(SORT_LATEST, newest_project)
        .sort(SORT_OLDEST, |a, b| newest_project(b, a))
        .sort(SORT_TITLE, |a, b| by_title(&a.record.title, &b.record.title))
        .paged(page_size)
}

pub fn careers_view<'a>() -> ViewSpec<JobView<'a>> {
    ViewSpec::new(|v| v.text("department", "name"), newest_job)
        .sort(SORT_LATEST, newest_job)
        .sort(SORT_TITLE, |a, b| by_title(&a.record.title, &b.record.title))
}

fn faq_category(faq: &Faq) -> &str {
    &faq.category
}

pub fn faq_view() -> ViewSpec<Faq> {
    ViewSpec::new(faq_category, |_, _| Ordering::Equal)
        .sort(SORT_DEFAULT, |_, _| Ordering::Equal)
        .sort(SORT_QUESTION, |a, b| by_title(&a.question, &b.question))
}
